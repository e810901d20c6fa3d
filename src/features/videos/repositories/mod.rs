#[cfg(test)]
mod in_memory;
mod video_repository;

#[cfg(test)]
pub use in_memory::InMemoryVideoRepository;
pub use video_repository::{PgVideoRepository, VideoRepository};
