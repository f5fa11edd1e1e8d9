//! videoconv - convert one or more media files into a single video
//!
//! Inputs are normalized to H.264/AAC with ffmpeg. Several inputs are joined
//! with the concat demuxer, after pre-converting them all when any of them
//! uses a container the demuxer cannot handle.

pub mod cli;
pub mod concat;
pub mod config;
pub mod error;
pub mod media;
pub mod probe;
pub mod validate;
pub mod workflow;
