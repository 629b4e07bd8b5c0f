//! Shared state between the transport tasks and the render loop.
//!
//! Built once at startup and passed around as `Arc<Hub>`; nothing here is an
//! ambient global, which keeps initialization order and ownership explicit.

use std::sync::{Arc, Mutex};

use crate::artwork::{ArtworkBuffer, ART_BYTES};
use crate::command::CommandChannel;
use crate::mailbox::Mailbox;
use crate::snapshot::Snapshot;

/// One-off playback-state correction from a host `{"ack":...}` reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AckState {
    pub playing: bool,
}

pub struct Hub {
    pub snapshots: Mailbox<Snapshot>,
    pub acks: Mailbox<AckState>,
    pub artwork: Mutex<ArtworkBuffer>,
    pub commands: CommandChannel,
}

impl Hub {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            snapshots: Mailbox::new(),
            acks: Mailbox::new(),
            artwork: Mutex::new(ArtworkBuffer::new()),
            commands: CommandChannel::new(),
        })
    }

    /// Latest snapshot if one arrived since the last call; never blocks.
    pub fn try_take_snapshot(&self) -> Option<Snapshot> {
        self.snapshots.try_take()
    }

    /// Pending playback correction, if any.
    pub fn try_take_ack(&self) -> Option<AckState> {
        self.acks.try_take()
    }

    pub fn artwork_is_new(&self) -> bool {
        self.artwork.lock().unwrap().is_fresh()
    }

    pub fn clear_artwork_new(&self) {
        self.artwork.lock().unwrap().clear_fresh()
    }

    /// Copy the raster out for display.
    pub fn copy_artwork(&self, dst: &mut [u8; ART_BYTES]) {
        dst.copy_from_slice(self.artwork.lock().unwrap().raster());
    }

    /// Borrow the raster under the lock, for renderers that push pixels
    /// straight from it.
    pub fn with_artwork<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        f(self.artwork.lock().unwrap().raster())
    }

    /// Queue an operator command toward the host on every transport.
    pub fn send_command(&self, cmd: &str) {
        self.commands.send(cmd)
    }
}
