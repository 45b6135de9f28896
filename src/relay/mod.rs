//! Room relay: a process-wide, multi-tenant forwarding service.
//!
//! Groups connections into named rooms and forwards move messages only
//! within a room, never to the sender. The relay performs zero validation
//! of moves or roles; trust is fully delegated to the two endpoints.

mod rooms;
mod server;

pub use rooms::{ConnId, RoomRegistry};
pub use server::{router, run_relay};
