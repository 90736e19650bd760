//! The bidirectional command channel between client and server.
//!
//! [`messages`] defines the typed wire protocol; [`socket`] provides the
//! WebSocket transport with reconnect handling. The behavior layer treats
//! the channel as opaque: hooks only ever see [`IncomingCommand`] values and
//! push [`OutgoingCommand`] values.

pub mod messages;
pub mod socket;

pub use messages::{
    HighlightAcknowledgement, IncomingCommand, IncomingKind, OutgoingCommand, ScrollTarget,
    ShortcutCommand,
};
pub use socket::{SocketClient, SocketConfig, SocketError, SocketState, Transport};
