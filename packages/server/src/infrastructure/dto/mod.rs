//! Data Transfer Objects (DTOs) for the relay.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket envelope DTOs and decoding

pub mod conversion;
pub mod websocket;
