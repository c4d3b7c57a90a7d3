//! Cache module for storing fetched SWPC responses in memory
//!
//! This module provides a keyed store with a configurable TTL (time-to-live).
//! Entries are held in process memory only; nothing survives a restart. A TTL
//! of zero disables serving from the cache entirely while still recording
//! stores, so every lookup behaves as a miss.

mod store;

pub use store::TtlCache;
