pub mod core;

pub use core::{HttpClient, ServiceConnection};
