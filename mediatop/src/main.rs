//! Entry point for the mediatop display core. Parses args, starts the
//! transport tasks, and runs a headless consumer loop that polls the mailbox
//! and relays stdin commands toward the host.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mediatop::profiles::{load_profiles, resolve, save_profiles, ProfileEntry, ResolveProfile};
use mediatop::snapshot::Snapshot;
use mediatop::transport::{run_tcp, spawn_serial};
use mediatop::Hub;

struct ParsedArgs {
    host: Option<String>,
    port: u16,
    serial: Option<String>,
    baud: u32,
    profile: Option<String>,
    save: bool,
}

const DEFAULT_PORT: u16 = 5432;
const DEFAULT_BAUD: u32 = 115_200;

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<ParsedArgs, String> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "mediatop".into());
    let mut host: Option<String> = None;
    let mut port = DEFAULT_PORT;
    let mut serial: Option<String> = None;
    let mut baud = DEFAULT_BAUD;
    let mut profile: Option<String> = None;
    let mut save = false;

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                return Err(format!(
                    "Usage: {prog} [--host HOST|-H HOST] [--port N|-p N] [--serial DEV|-s DEV] [--baud N|-b N] [--profile NAME|-P NAME] [--save]"
                ));
            }
            "--host" | "-H" => host = it.next(),
            "--serial" | "-s" => serial = it.next(),
            "--profile" | "-P" => profile = it.next(),
            "--port" | "-p" => {
                port = it
                    .next()
                    .and_then(|v| v.parse().ok())
                    .ok_or("invalid --port")?;
            }
            "--baud" | "-b" => {
                baud = it
                    .next()
                    .and_then(|v| v.parse().ok())
                    .ok_or("invalid --baud")?;
            }
            "--save" => save = true,
            _ if arg.starts_with("--host=") => {
                host = arg.split_once('=').map(|(_, v)| v.to_string());
            }
            _ if arg.starts_with("--serial=") => {
                serial = arg.split_once('=').map(|(_, v)| v.to_string());
            }
            _ if arg.starts_with("--profile=") => {
                profile = arg.split_once('=').map(|(_, v)| v.to_string());
            }
            _ if arg.starts_with("--port=") => {
                port = arg
                    .split_once('=')
                    .and_then(|(_, v)| v.parse().ok())
                    .ok_or("invalid --port")?;
            }
            _ if arg.starts_with("--baud=") => {
                baud = arg
                    .split_once('=')
                    .and_then(|(_, v)| v.parse().ok())
                    .ok_or("invalid --baud")?;
            }
            _ => return Err(format!("unknown argument: {arg}\nTry {prog} --help")),
        }
    }

    Ok(ParsedArgs {
        host,
        port,
        serial,
        baud,
        profile,
        save,
    })
}

// Map terse operator input to the wire command vocabulary.
fn command_json(input: &str) -> Option<String> {
    let mut words = input.split_whitespace();
    let verb = words.next()?;
    let arg = words.next();
    match verb {
        "play" | "pause" | "next" | "prev" => Some(format!("{{\"cmd\":\"{verb}\"}}")),
        "like" => Some("{\"cmd\":\"like\"}".into()),
        "addpl" => Some("{\"cmd\":\"add_to_playlist\"}".into()),
        "kill" => {
            let pid: u32 = arg?.parse().ok()?;
            Some(format!("{{\"cmd\":\"kill\",\"pid\":{pid}}}"))
        }
        "shuffle" => {
            let state = matches!(arg?, "on" | "true" | "1");
            Some(format!("{{\"cmd\":\"shuffle\",\"state\":{state}}}"))
        }
        "repeat" => {
            let state = arg?;
            if !matches!(state, "off" | "track" | "context") {
                return None;
            }
            Some(format!("{{\"cmd\":\"repeat\",\"state\":\"{state}\"}}"))
        }
        "queue" => {
            let index: u32 = arg?.parse().ok()?;
            Some(format!(
                "{{\"cmd\":\"queue_action\",\"action\":\"play_now\",\"index\":{index}}}"
            ))
        }
        _ => None,
    }
}

fn summarize(snap: &Snapshot, playing: bool) -> String {
    let mut line = format!(
        "cpu {:5.1}% mem {:5.1}% gpu {:5.1}% procs {}",
        snap.cpu,
        snap.mem,
        snap.gpu,
        snap.procs.len()
    );
    if snap.has_media {
        let m = &snap.media;
        line.push_str(&format!(
            " | {} {} - {} [{}/{}s]",
            if playing { ">" } else { "||" },
            m.artist.as_str(),
            m.title.as_str(),
            m.position,
            m.duration
        ));
    }
    line
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let parsed = match parse_args(std::env::args()) {
        Ok(p) => p,
        Err(msg) => {
            eprintln!("{msg}");
            return Ok(());
        }
    };

    let explicit = ProfileEntry {
        host: parsed.host.clone(),
        port: parsed.host.is_some().then_some(parsed.port),
        serial: parsed.serial.clone(),
        baud: parsed.serial.is_some().then_some(parsed.baud),
    };
    let mut pf = load_profiles();
    let entry = match resolve(parsed.profile.clone(), explicit, &pf) {
        ResolveProfile::Direct(e) => {
            if parsed.save {
                if let Some(name) = parsed.profile {
                    pf.profiles.insert(name, e.clone());
                    if let Err(err) = save_profiles(&pf) {
                        warn!(error = %err, "could not save profile");
                    }
                }
            }
            e
        }
        ResolveProfile::Loaded(e) => e,
        ResolveProfile::Missing(name) => {
            eprintln!("no such profile: {name}");
            return Ok(());
        }
        ResolveProfile::None => {
            eprintln!("nothing to connect to; pass --host or --serial (see --help)");
            return Ok(());
        }
    };

    let hub = Hub::new();

    if let Some(dev) = entry.serial.clone() {
        let baud = entry.baud.unwrap_or(DEFAULT_BAUD);
        spawn_serial(Arc::clone(&hub), dev, baud);
    }
    if let Some(host) = entry.host.clone() {
        let port = entry.port.unwrap_or(DEFAULT_PORT);
        tokio::spawn(run_tcp(Arc::clone(&hub), host, port));
    }

    // Stdin -> command channel, on its own thread so reads never stall the
    // consumer loop.
    {
        let hub = Arc::clone(&hub);
        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            let mut input = String::new();
            while stdin.read_line(&mut input).is_ok_and(|n| n > 0) {
                match command_json(input.trim()) {
                    Some(cmd) => hub.send_command(&cmd),
                    None => eprintln!("unrecognized command: {}", input.trim()),
                }
                input.clear();
            }
        });
    }

    // Consumer loop: poll the mailbox once per frame tick and show whatever
    // the render layer would draw.
    let mut playing = false;
    loop {
        if let Some(ack) = hub.try_take_ack() {
            playing = ack.playing;
            info!(playing, "playback state corrected by host ack");
        }
        if let Some(snap) = hub.try_take_snapshot() {
            if snap.has_media {
                playing = snap.media.playing;
            }
            info!("{}", summarize(&snap, playing));
        }
        if hub.artwork_is_new() {
            hub.with_artwork(|raster| info!(bytes = raster.len(), "new artwork ready"));
            hub.clear_artwork_new();
        }
        sleep(Duration::from_millis(50)).await;
    }
}
