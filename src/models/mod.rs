pub mod filters;
pub mod group;
pub mod incident;

pub use filters::*;
pub use group::*;
pub use incident::*;
