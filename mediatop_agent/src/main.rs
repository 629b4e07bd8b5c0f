//! mediatop_agent: streams newline-delimited telemetry JSON over TCP to the
//! display and answers inbound `{"cmd":...}` control lines.

mod gpu;
mod metrics;
mod state;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use sysinfo::System;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tokio::time::interval;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::metrics::collect_snapshot;
use crate::state::AppState;

const DEFAULT_PORT: u16 = 5432;
const TICK: Duration = Duration::from_secs(1);

fn parse_port<I: IntoIterator<Item = String>>(args: I, default_port: u16) -> u16 {
    let mut it = args.into_iter();
    let _ = it.next(); // program name
    let mut long: Option<String> = None;
    let mut short: Option<String> = None;
    while let Some(a) = it.next() {
        match a.as_str() {
            "--port" => long = it.next(),
            "-p" => short = it.next(),
            _ if a.starts_with("--port=") => {
                if let Some((_, v)) = a.split_once('=') {
                    long = Some(v.to_string());
                }
            }
            _ => {}
        }
    }
    long.or(short)
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(default_port)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    if std::env::args().any(|a| a == "-h" || a == "--help") {
        println!("Usage: mediatop_agent [--port N|-p N]");
        return Ok(());
    }
    let port = parse_port(std::env::args(), DEFAULT_PORT);

    let mut sys = System::new_all();
    sys.refresh_all();
    let state = AppState {
        sys: Arc::new(Mutex::new(sys)),
    };

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".into());
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, host, "mediatop agent listening");

    loop {
        let (stream, peer) = listener.accept().await?;
        info!(%peer, "display connected");
        let st = state.clone();
        tokio::spawn(async move {
            if let Err(e) = serve_client(stream, st).await {
                info!(%peer, error = %e, "display disconnected");
            }
        });
    }
}

// One writer tick + one command reader per client, multiplexed on the socket.
async fn serve_client(stream: TcpStream, state: AppState) -> anyhow::Result<()> {
    let (r, mut w) = stream.into_split();
    let mut lines = BufReader::new(r).lines();
    let mut tick = interval(TICK);
    loop {
        tokio::select! {
            _ = tick.tick() => {
                let snap = collect_snapshot(&state).await;
                let mut line = serde_json::to_string(&snap)?;
                line.push('\n');
                w.write_all(line.as_bytes()).await?;
            }
            line = lines.next_line() => {
                match line? {
                    Some(l) => {
                        if let Some(reply) = handle_command(l.trim(), &state).await {
                            w.write_all(format!("{reply}\n").as_bytes()).await?;
                        }
                    }
                    None => return Ok(()),
                }
            }
        }
    }
}

// play/pause are acknowledged so the display can correct its optimistic UI;
// kill acts on the host; media-player commands are logged for the (external)
// media integration to pick up.
async fn handle_command(line: &str, state: &AppState) -> Option<String> {
    let doc: Value = serde_json::from_str(line).ok()?;
    match doc.get("cmd").and_then(Value::as_str)? {
        "play" => Some("{\"ack\":\"play\"}".into()),
        "pause" => Some("{\"ack\":\"pause\"}".into()),
        "kill" => {
            let pid = doc.get("pid").and_then(Value::as_u64)? as u32;
            let sys = state.sys.lock().await;
            match sys.process(sysinfo::Pid::from_u32(pid)) {
                Some(p) => info!(pid, killed = p.kill(), "kill requested"),
                None => info!(pid, "kill requested for unknown pid"),
            }
            None
        }
        other => {
            info!(cmd = other, "media command received");
            None
        }
    }
}
