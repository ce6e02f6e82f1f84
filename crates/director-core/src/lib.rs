pub mod collector;
pub mod config;
pub mod driver;
pub mod error;
pub mod file;
pub mod io;
pub mod paths;
pub mod surface;
pub mod task;
pub mod ticker;
pub mod timeline;
pub mod types;
pub mod view;

pub use error::{DirectorError, Result};
