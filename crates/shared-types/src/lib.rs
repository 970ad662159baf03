//! # Shared Types Crate
//!
//! This crate contains the types exchanged between a contract and the ledger
//! host that executes it.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Every type crossing the contract/host boundary
//!   is defined here.
//! - **Explicit Context**: Caller identity, transaction id, timestamp and the
//!   transient payload travel in a `CallContext` value. Nothing is read from
//!   ambient process state.
//! - **Transient Payload Stays Private**: The transient map is never part of
//!   the public transaction record.

pub mod composite;
pub mod context;
pub mod entities;
pub mod errors;

pub use composite::*;
pub use context::CallContext;
pub use entities::*;
pub use errors::*;
