// Crate root library declaration and module exports.
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod project;
pub mod serialize;

pub use error::{Error, Result};
pub use project::Project;
