pub mod constraints;
pub mod versions;

pub use constraints::*;
pub use versions::*;
