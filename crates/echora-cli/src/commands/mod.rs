//! CLI command implementations.

pub mod batch;
pub mod common;
pub mod convolve;
pub mod echo;
pub mod impulses;
pub mod info;
pub mod init_config;
pub mod preview;
