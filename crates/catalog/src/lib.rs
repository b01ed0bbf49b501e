pub mod group;
pub mod launchlog;
pub mod parser;
pub mod record;
pub mod sites;

pub use group::*;
pub use launchlog::*;
pub use parser::*;
pub use record::*;
pub use sites::*;
