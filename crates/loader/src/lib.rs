pub mod config;
pub mod loader;
pub mod source;

pub use config::*;
pub use loader::*;
pub use source::*;
