//! # Shared Types Crate
//!
//! Domain entities shared across the workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Every type that crosses a crate boundary is
//!   defined here, once.
//! - **No wire formats**: These are in-memory entities. Serialization is
//!   provided via `serde` so callers choose the codec (the consensus core
//!   uses `bincode` for envelope bodies), but no disk or network layout is
//!   mandated by this crate.

pub mod entities;

pub use entities::*;
