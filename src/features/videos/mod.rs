pub mod dtos;
pub mod events;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{PgVideoRepository, VideoRepository};
pub use services::{UploadSettings, VideoLifecycleService, VideoService};
