pub mod video_handler;
pub mod webhook_handler;

pub use video_handler::{
    __path_create_upload, __path_delete_video, __path_get_video, __path_list_videos,
    __path_record_view, __path_update_video_metadata, create_upload, delete_video, get_video,
    list_videos, record_view, update_video_metadata, VideoState,
};
pub use webhook_handler::{__path_receive_webhook, receive_webhook, WebhookState};
