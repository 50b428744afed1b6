mod macros;
mod normalize;

pub use normalize::*;
