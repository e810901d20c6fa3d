//! Feature slices, each with its own routes and services

pub mod comments;
pub mod health;
pub mod videos;
