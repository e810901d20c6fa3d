mod comment;

pub use comment::{Comment, CommentAuthor, CommentReply, NewComment};
