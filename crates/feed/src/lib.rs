pub mod clock;
pub mod track;
pub mod visibility;

pub use clock::*;
pub use track::*;
pub use visibility::*;
