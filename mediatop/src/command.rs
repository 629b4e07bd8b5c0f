//! Outbound command fan-out: a bounded, drop-on-full queue per transport.

use std::sync::Mutex;

use tokio::sync::mpsc;
use tracing::debug;

/// Per-transport queue depth. Commands are advisory UI actions; when the
/// queue is full the newest one is dropped, not the link stalled.
pub const QUEUE_DEPTH: usize = 8;
/// Upper bound on one command line; anything longer is refused whole rather
/// than truncated into broken JSON.
pub const MAX_COMMAND_BYTES: usize = 256;

pub struct CommandChannel {
    serial_tx: mpsc::Sender<String>,
    net_tx: mpsc::Sender<String>,
    serial_rx: Mutex<Option<mpsc::Receiver<String>>>,
    net_rx: Mutex<Option<mpsc::Receiver<String>>>,
}

impl CommandChannel {
    pub fn new() -> Self {
        let (serial_tx, serial_rx) = mpsc::channel(QUEUE_DEPTH);
        let (net_tx, net_rx) = mpsc::channel(QUEUE_DEPTH);
        Self {
            serial_tx,
            net_tx,
            serial_rx: Mutex::new(Some(serial_rx)),
            net_rx: Mutex::new(Some(net_rx)),
        }
    }

    // Fire-and-forget toward every transport.
    pub fn send(&self, cmd: &str) {
        let cmd = cmd.trim();
        if cmd.is_empty() {
            return;
        }
        if cmd.len() > MAX_COMMAND_BYTES {
            debug!(len = cmd.len(), "oversized command dropped");
            return;
        }
        for (name, tx) in [("serial", &self.serial_tx), ("net", &self.net_tx)] {
            if tx.try_send(cmd.to_string()).is_err() {
                debug!(transport = name, "command queue full, dropping");
            }
        }
    }

    // Each transport claims its receiver once at task start.
    pub fn claim_serial(&self) -> Option<mpsc::Receiver<String>> {
        self.serial_rx.lock().unwrap().take()
    }

    pub fn claim_net(&self) -> Option<mpsc::Receiver<String>> {
        self.net_rx.lock().unwrap().take()
    }
}

impl Default for CommandChannel {
    fn default() -> Self {
        Self::new()
    }
}
