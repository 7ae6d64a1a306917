//! Chain-reaction engine.
//!
//! Drives one playout at a time: the scheduler picks the acting slot, the
//! selector picks a legal cell, the driver applies the move, and if the cell
//! overloaded the cascade resolver propagates the reaction wave by wave until
//! no cell is left at or above capacity.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                      Playout                        │
//! │                                                     │
//! │  scheduler ──▶ selector ──▶ apply move              │
//! │                                  │                  │
//! │                                  ▼ (overloaded)     │
//! │  ┌───────────────────────────────────────────────┐  │
//! │  │   cascade resolver: wave worklist, returns    │  │
//! │  │   propagation depth                           │  │
//! │  └───────────────────────────────────────────────┘  │
//! │                                  │                  │
//! │          snapshot ◀── record ◀───┘──▶ render sink   │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Every move is recorded as a pre-move snapshot plus the chosen cell; the
//! [`replay`] module re-applies recorded moves with no randomness and must
//! reproduce bit-identical state. That contract is what makes the resolver a
//! pure function of `(pre-move state, chosen cell)`.

pub mod cascade;
pub mod error;
pub mod playout;
pub mod replay;
pub mod scheduler;
pub mod selector;
pub mod sink;

pub use cascade::{apply_move, resolve, MoveEffect, MAX_WAVES};
pub use error::EngineError;
pub use playout::{MoveOutcome, MoveStats, Playout, PlayoutLog, PlayoutStatus};
pub use replay::{replay_record, replay_sequence};
pub use scheduler::next_actor;
pub use selector::select_move;
pub use sink::{NullSink, RenderSink, ResolvedFrame};
