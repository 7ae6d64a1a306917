//! Channel-backed render sink.

use cascade_engine::{RenderSink, ResolvedFrame};
use crossbeam::channel::{unbounded, Receiver, Sender};

/// Render sink that forwards frames over an unbounded channel.
///
/// The driver's side never blocks: frames queue up for whatever consumer
/// (renderer collaborator, frame counter, test) drains the receiver. Clones
/// share the same channel, so one sink can serve many parallel playouts.
#[derive(Clone)]
pub struct ChannelSink {
    tx: Sender<ResolvedFrame>,
}

impl ChannelSink {
    /// Create a sink and the receiver end for the consumer.
    pub fn new() -> (Self, Receiver<ResolvedFrame>) {
        let (tx, rx) = unbounded();
        (Self { tx }, rx)
    }
}

impl RenderSink for ChannelSink {
    fn frame(&self, frame: ResolvedFrame) {
        // A closed receiver just means nobody is rendering; drop the frame.
        let _ = self.tx.send(frame);
    }
}
