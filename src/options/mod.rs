//! Option groups
//!
//! Protocol, pooling and socket settings held by the
//! [`Configuration`](crate::config::Configuration).

mod pooling;
mod protocol;
mod socket;

pub use pooling::{DistanceSizing, PoolingOptions, PoolingSnapshot};
pub use protocol::{Compression, ProtocolOptions, ProtocolVersion};
pub use socket::SocketOptions;
