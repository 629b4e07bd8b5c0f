//! Producer tasks: one loop per transport, each owning a private line framer
//! and sharing the hub's mailbox, artwork buffer, and command queues.

use std::io::{Read, Write};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::{sleep, timeout};
use tracing::{info, warn};

use crate::framer::LineFramer;
use crate::hub::Hub;
use crate::ingest::ingest_line;

/// Pause after a failed connect and after a dropped link.
pub const RECONNECT_DELAY: Duration = Duration::from_secs(2);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const SERIAL_POLL: Duration = Duration::from_millis(5);

/// Serial producer. No connection concept: open the port and loop forever,
/// draining outbound commands and framing inbound bytes. Runs on a plain
/// thread because serialport I/O is blocking.
pub fn spawn_serial(hub: Arc<Hub>, port_name: String, baud: u32) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        let Some(mut rx) = hub.commands.claim_serial() else {
            warn!("serial command receiver already claimed");
            return;
        };
        let mut port = match serialport::new(&port_name, baud)
            .timeout(Duration::from_millis(100))
            .open()
        {
            Ok(p) => p,
            Err(e) => {
                warn!(port = %port_name, error = %e, "serial open failed");
                return;
            }
        };
        info!(port = %port_name, baud, "serial transport up");

        let mut framer = LineFramer::new();
        let mut buf = [0u8; 512];
        loop {
            while let Ok(cmd) = rx.try_recv() {
                if let Err(e) = port.write_all(terminated(cmd).as_bytes()) {
                    warn!(error = %e, "serial write failed");
                }
            }
            match port.read(&mut buf) {
                Ok(n) if n > 0 => {
                    for line in framer.feed_slice(&buf[..n]) {
                        ingest_line(&hub, &line);
                    }
                }
                Ok(_) => {}
                Err(ref e) if e.kind() == std::io::ErrorKind::TimedOut => {}
                Err(e) => warn!(error = %e, "serial read failed"),
            }
            std::thread::sleep(SERIAL_POLL);
        }
    })
}

/// Network producer: Disconnected -> Connecting -> Connected, with a fixed
/// backoff on either failure edge. The retry loop is the only recovery path.
pub async fn run_tcp(hub: Arc<Hub>, host: String, port: u16) {
    let Some(mut rx) = hub.commands.claim_net() else {
        warn!("net command receiver already claimed");
        return;
    };
    let addr = format!("{host}:{port}");
    loop {
        info!(%addr, "connecting");
        let stream = match timeout(CONNECT_TIMEOUT, TcpStream::connect(&addr)).await {
            Ok(Ok(s)) => s,
            Ok(Err(e)) => {
                warn!(%addr, error = %e, "connect failed");
                sleep(RECONNECT_DELAY).await;
                continue;
            }
            Err(_) => {
                warn!(%addr, "connect timed out");
                sleep(RECONNECT_DELAY).await;
                continue;
            }
        };
        info!(%addr, "connected");
        if let Err(e) = drive_connection(&hub, stream, &mut rx).await {
            warn!(%addr, error = %e, "link lost");
        }
        sleep(RECONNECT_DELAY).await;
    }
}

async fn drive_connection(
    hub: &Hub,
    mut stream: TcpStream,
    rx: &mut mpsc::Receiver<String>,
) -> std::io::Result<()> {
    let mut framer = LineFramer::new();
    let mut buf = [0u8; 2048];
    loop {
        tokio::select! {
            read = stream.read(&mut buf) => {
                let n = read?;
                if n == 0 {
                    return Err(std::io::Error::new(
                        std::io::ErrorKind::UnexpectedEof,
                        "peer closed",
                    ));
                }
                for line in framer.feed_slice(&buf[..n]) {
                    ingest_line(hub, &line);
                }
            }
            cmd = rx.recv() => {
                if let Some(cmd) = cmd {
                    stream.write_all(terminated(cmd).as_bytes()).await?;
                }
            }
        }
    }
}

fn terminated(mut cmd: String) -> String {
    if !cmd.ends_with('\n') {
        cmd.push('\n');
    }
    cmd
}
