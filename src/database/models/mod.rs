pub mod appeal;

pub use appeal::*;
