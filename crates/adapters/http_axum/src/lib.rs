//! # mudstore-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a JSON REST API for rooms, links, items, players and users
//!   (`/api/rooms`, `/api/rooms/{id}`, …)
//! - Map query strings and JSON bodies into service calls (driving adapter)
//! - Map classified domain errors onto HTTP status codes
//!
//! ## Dependency rule
//! Depends on `mudstore-app` (for port traits and services) and `mudstore-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
