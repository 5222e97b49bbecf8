pub mod config;
pub mod logging;

pub mod batch;
pub mod error;
pub mod fetch;
pub mod image_dir;
pub mod modes;
pub mod summary;
pub mod verify;
