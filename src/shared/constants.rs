// =============================================================================
// VIDEO DEFAULTS
// =============================================================================

/// Title used when an upload is created without one
pub const DEFAULT_VIDEO_TITLE: &str = "Untitled Video";

pub const DEFAULT_VIDEO_CATEGORY: &str = "Uncategorized";

pub const ANONYMOUS_AUTHOR_NAME: &str = "Anonymous";

pub const ANONYMOUS_AUTHOR_ID: &str = "anonymous";

/// Playback policy requested for every asset created from a direct upload
pub const DEFAULT_PLAYBACK_POLICY: &str = "public";
