pub mod angle;
pub mod geodesy;

// Foundation crate: small, well-tested primitives only.
pub use angle::*;
pub use geodesy::*;
