pub mod channel;
pub mod record;
pub mod sink;

pub use channel::*;
pub use record::*;
pub use sink::*;
