//! Two-player room relay library.
//!
//! This library provides the server side of a WebSocket relay where one participant
//! creates a room, a second joins with the room code, and both exchange game state.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
