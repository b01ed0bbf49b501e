pub mod ray;
pub mod sync;

pub use ray::*;
pub use sync::*;
