//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the application and external systems (document storage).

mod profile_store;

pub use profile_store::{ProfileStore, ProfileUpdate};
