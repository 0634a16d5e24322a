//! Shared utilities for the Pairroom relay.

pub mod logger;
