pub mod eci;
pub mod geodesy;
pub mod vec;

pub use eci::*;
pub use geodesy::*;
pub use vec::*;
