mod video;

#[cfg(test)]
pub(crate) use video::fixtures;
pub use video::{
    NewVideo, ThumbnailKind, Video, VideoDetailsPatch, VideoMetrics, VideoStatus, VideoVisibility,
};
