//! Advisor memory system.
//!
//! Each advisor owns a bounded, importance-ranked store of decaying
//! memories; the bank aggregates one store per advisor plus the
//! civilization-wide shared list.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      MemoryBank                          │
//! │                                                          │
//! │  ┌────────────────────┐   ┌───────────────────────────┐  │
//! │  │ per-advisor stores │   │ shared memories           │  │
//! │  │ (AgentId → Store)  │   │ (broadcast to all stores) │  │
//! │  └────────────────────┘   └───────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```

mod bank;
mod record;
mod store;

pub use bank::MemoryBank;
pub use record::{EventKind, Memory, MemoryId, SECRET_TAG};
pub use store::AgentMemoryStore;
