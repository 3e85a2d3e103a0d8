pub mod messages;
pub mod topics;
pub mod twin;

pub use messages::*;
pub use twin::*;
