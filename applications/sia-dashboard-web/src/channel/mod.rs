pub mod packet;
#[cfg(target_arch = "wasm32")]
pub mod socket;

pub use packet::{OpenHandshake, Packet};
#[cfg(target_arch = "wasm32")]
pub use socket::Channel;
