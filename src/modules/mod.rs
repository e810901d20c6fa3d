//! Modules layer - Infrastructure components for external integrations
//!
//! Contains clients and adapters for external services, currently the hosted
//! video provider that performs uploads, transcoding and playback.

pub mod video_provider;
