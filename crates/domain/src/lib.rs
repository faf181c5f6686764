//! # mudstore-domain
//!
//! Pure domain model for the mudstore world database.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error taxonomy, timestamps
//! - The polymorphic [`LocationId`](location::LocationId) (room, player or item)
//! - Define **Rooms**, **Links**, **Items**, **Players** and **Users**
//!   together with their change values and list filters
//! - Contain all invariant enforcement for caller-supplied values
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod location;
pub mod page;
pub mod time;

pub mod item;
pub mod link;
pub mod player;
pub mod room;
pub mod user;
