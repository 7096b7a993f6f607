pub mod bumper;
pub mod config;
pub mod error;
pub mod git;
pub mod ui;
pub mod version;

pub use bumper::VersionBumper;
pub use error::{BumpError, Result};
