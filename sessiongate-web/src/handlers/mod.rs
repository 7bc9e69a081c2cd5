//! HTTP request handlers for the sessiongate web server

pub mod health;
pub mod status;
pub mod types;

pub use health::*;
pub use status::*;
pub use types::*;
