pub mod digest;
pub mod entities;
pub mod identity;
pub mod keys;
pub mod protocol;

pub use digest::*;
pub use entities::*;
pub use identity::*;
pub use keys::*;
pub use protocol::*;
