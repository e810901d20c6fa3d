mod lifecycle_service;
mod video_service;

pub use lifecycle_service::{EventOutcome, InitiatedUpload, UploadSettings, VideoLifecycleService};
pub use video_service::VideoService;
