//! Entity model for the play-session tracker.
//!
//! # Responsibility
//! - Define the five persisted record types and their request shapes.
//! - Define the caller-facing aggregate/report structures.
//!
//! # Invariants
//! - Every persisted record is identified by a store-assigned integer id.
//! - Values here are detached snapshots; nothing holds a store handle.
//! - All timestamps are normalized to UTC.

pub mod activity;
pub mod business;
pub mod character;
pub mod earnings;
pub mod report;
pub mod session;
pub mod time;
