//! Repository 実装
//!
//! - `inmemory`: HashMap を使ったインメモリ実装（再起動で消える）

pub mod inmemory;

pub use inmemory::InMemoryRoomRepository;
