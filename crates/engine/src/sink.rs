//! Render sink seam.
//!
//! Rendering is an I/O-bound side effect owned by an external collaborator.
//! The driver hands each resolved move's frame to a [`RenderSink`] and moves
//! on immediately; sink implementations must not block the caller (the
//! simulator's channel-backed sink forwards frames to a consumer thread).

use cascade_types::{Cell, CellIndex, PlayerSlot, Ply};

/// Everything a renderer needs to paint a before/after pair for one
/// resolved move.
#[derive(Debug, Clone)]
pub struct ResolvedFrame {
    /// The ply this frame belongs to.
    pub ply: Ply,

    /// The slot that moved.
    pub acting: PlayerSlot,

    /// Propagation depth of the move's cascade.
    pub depth: u32,

    /// Full post-resolution cell arena.
    pub cells: Vec<Cell>,

    /// Indices of cells whose charge or ownership changed this move.
    pub changed: Vec<CellIndex>,
}

/// Receiver for per-move render frames.
pub trait RenderSink {
    /// Accept one frame. Must return promptly; any real I/O belongs on the
    /// sink's side of the seam.
    fn frame(&self, frame: ResolvedFrame);
}

/// Sink that drops every frame, for headless playouts and tests.
pub struct NullSink;

impl RenderSink for NullSink {
    fn frame(&self, _frame: ResolvedFrame) {}
}
