pub mod cancel;
pub mod exchange;
pub mod init_escrow;

pub use cancel::*;
pub use exchange::*;
pub use init_escrow::*;
