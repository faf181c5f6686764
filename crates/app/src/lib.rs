//! # mudstore-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that storage adapters must implement:
//!   - `RoomStorage`, `LinkStorage`, `ItemStorage`, `PlayerStorage`,
//!     `UserStorage`, with list/get/create/update/remove per entity
//! - Define **use-case services** that validate caller input and bound
//!   list pages before delegating to a port
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `mudstore-domain` only (plus `tracing`).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
