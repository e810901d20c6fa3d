mod comment_repository;
#[cfg(test)]
mod in_memory;

pub use comment_repository::{CommentRepository, PgCommentRepository};
#[cfg(test)]
pub use in_memory::InMemoryCommentRepository;
