//! Snapshot record and the JSON decoder that fills it.
//!
//! The record is POD-like on purpose: fixed layout, `Copy`, bounded
//! NUL-terminated strings, so it can cross the producer/consumer boundary as
//! a plain copy inside the mailbox.

use serde_json::{Map, Value};
use tracing::debug;

use crate::bounded::{BoundedList, FixedStr};

pub const MAX_PROCS: usize = 5;
pub const MAX_QUEUE: usize = 8;

/// One top-N process row: preformatted display label plus the pid (0 = unknown).
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcEntry {
    pub label: FixedStr<32>,
    pub pid: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RepeatMode {
    #[default]
    Off,
    Track,
    Context,
}

impl RepeatMode {
    pub fn from_wire(s: &str) -> Self {
        match s {
            "track" => RepeatMode::Track,
            "context" => RepeatMode::Context,
            _ => RepeatMode::Off,
        }
    }

    pub fn as_wire(self) -> &'static str {
        match self {
            RepeatMode::Off => "off",
            RepeatMode::Track => "track",
            RepeatMode::Context => "context",
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MediaBlock {
    pub title: FixedStr<64>,
    pub artist: FixedStr<64>,
    pub album: FixedStr<64>,
    pub source: FixedStr<16>,
    pub position: u32,
    pub duration: u32,
    pub playing: bool,
    pub shuffle: bool,
    pub repeat: RepeatMode,
    pub liked: bool,
    pub track_uri: FixedStr<64>,
}

/// One upcoming track from the host's play queue.
#[derive(Clone, Copy, Debug, Default)]
pub struct QueueEntry {
    pub id: FixedStr<64>,
    pub source: FixedStr<16>,
    pub name: FixedStr<48>,
    pub artist: FixedStr<48>,
    pub album: FixedStr<48>,
    pub duration: u32,
    pub is_local: bool,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PlaylistInfo {
    pub id: FixedStr<64>,
    pub name: FixedStr<48>,
    pub snapshot_id: FixedStr<64>,
    pub total_tracks: u32,
    pub public: bool,
    pub collaborative: bool,
    pub has_image: bool,
}

/// One complete point-in-time host report. Missing fields decode to zero, not
/// to errors.
#[derive(Clone, Copy, Debug, Default)]
pub struct Snapshot {
    pub cpu: f32,
    pub mem: f32,
    pub gpu: f32,
    pub procs: BoundedList<ProcEntry, MAX_PROCS>,

    pub has_media: bool,
    pub media: MediaBlock,

    // The raster itself lives in the artwork buffer; the snapshot only says
    // whether the host announced artwork and whether new pixels landed.
    pub has_artwork: bool,
    pub artwork_updated: bool,

    pub has_queue: bool,
    pub queue: BoundedList<QueueEntry, MAX_QUEUE>,

    pub has_playlist: bool,
    pub playlist: PlaylistInfo,
}

/// Decode result: the record plus any inline artwork payload found in the
/// media block. The payload is handed to the artwork decoder by the caller;
/// it is far too large to carry inside the POD record.
#[derive(Debug)]
pub struct Decoded {
    pub snapshot: Snapshot,
    pub artwork_b64: Option<String>,
}

/// Parse one snapshot line. Returns `None` on a syntax error; the caller must
/// then leave the mailbox untouched.
pub fn decode(line: &str) -> Option<Decoded> {
    let doc: Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => {
            debug!(error = %e, "snapshot parse error");
            return None;
        }
    };
    let obj = doc.as_object()?;

    let mut snap = Snapshot::default();
    let mut artwork_b64 = None;

    // cpu_percent_total preferred; cpu_percent is the older key.
    snap.cpu = if obj.contains_key("cpu_percent_total") {
        num_f32(obj, "cpu_percent_total")
    } else {
        num_f32(obj, "cpu_percent")
    };
    snap.mem = num_f32(obj, "mem_percent");
    snap.gpu = num_f32(obj, "gpu_percent");

    decode_procs(obj, &mut snap);

    if let Some(media) = obj.get("media").and_then(Value::as_object) {
        decode_media(media, &mut snap, &mut artwork_b64);
    }

    Some(Decoded {
        snapshot: snap,
        artwork_b64,
    })
}

// Rich form: proc_top5 objects. Legacy form: cpu_top5_process flat strings.
fn decode_procs(obj: &Map<String, Value>, snap: &mut Snapshot) {
    if let Some(arr) = obj.get("proc_top5").and_then(Value::as_array) {
        for v in arr {
            let Some(o) = v.as_object() else { continue };
            let pid = num_u32(o, "pid");
            let mem = num_f32(o, "mem");
            let name = text(o, "name");
            let display = text(o, "display_name");
            let shown = if display.is_empty() { name } else { display };
            let entry = ProcEntry {
                label: FixedStr::from_str(&format!("{mem:.1}% {shown}")),
                pid,
            };
            if !snap.procs.push(entry) {
                break;
            }
        }
    } else if let Some(arr) = obj.get("cpu_top5_process").and_then(Value::as_array) {
        for v in arr {
            let raw = match v.as_str() {
                Some(s) => s.to_string(),
                None => v.to_string(),
            };
            let entry = ProcEntry {
                label: FixedStr::from_str(strip_exe(raw.trim())),
                pid: 0,
            };
            if !snap.procs.push(entry) {
                break;
            }
        }
    }
}

fn decode_media(media: &Map<String, Value>, snap: &mut Snapshot, artwork_b64: &mut Option<String>) {
    let m = &mut snap.media;
    m.title.set(text_or(media, "title", "No media"));
    m.artist.set(text(media, "artist"));
    m.album.set(text(media, "album"));
    m.source.set(text(media, "source"));
    m.position = num_u32(media, "position_seconds");
    m.duration = num_u32(media, "duration_seconds");
    m.playing = flag(media, "is_playing");
    m.shuffle = flag(media, "shuffle");
    m.repeat = RepeatMode::from_wire(text(media, "repeat"));
    m.liked = flag(media, "is_liked");
    m.track_uri.set(text(media, "track_uri"));
    snap.has_media = true;

    // Presence only; the payload goes to the artwork decoder, not the record.
    if let Some(b64) = media.get("artwork_png_b64").and_then(Value::as_str) {
        snap.has_artwork = true;
        *artwork_b64 = Some(b64.to_string());
    }

    // Sub-objects are optional and skipped wholesale when malformed.
    if let Some(arr) = media.get("queue").and_then(Value::as_array) {
        snap.has_queue = true;
        for v in arr {
            let Some(o) = v.as_object() else { continue };
            let entry = QueueEntry {
                id: FixedStr::from_str(text(o, "id")),
                source: FixedStr::from_str(text(o, "source")),
                name: FixedStr::from_str(text(o, "name")),
                artist: FixedStr::from_str(text(o, "artist")),
                album: FixedStr::from_str(text(o, "album")),
                duration: num_u32(o, "duration_seconds"),
                is_local: flag(o, "is_local"),
            };
            if !snap.queue.push(entry) {
                break;
            }
        }
    }

    if let Some(o) = media.get("playlist").and_then(Value::as_object) {
        snap.has_playlist = true;
        snap.playlist = PlaylistInfo {
            id: FixedStr::from_str(text(o, "id")),
            name: FixedStr::from_str(text(o, "name")),
            snapshot_id: FixedStr::from_str(text(o, "snapshot_id")),
            total_tracks: num_u32(o, "total_tracks"),
            public: flag(o, "public"),
            collaborative: flag(o, "collaborative"),
            has_image: flag(o, "has_image"),
        };
    }
}

// Legacy process strings often carry a ".exe" suffix not worth screen space.
fn strip_exe(s: &str) -> &str {
    s.strip_suffix(".exe").or_else(|| s.strip_suffix(".EXE")).unwrap_or(s)
}

fn num_f32(obj: &Map<String, Value>, key: &str) -> f32 {
    obj.get(key).and_then(Value::as_f64).unwrap_or(0.0) as f32
}

// Accepts float-valued seconds too and truncates, as the host sometimes
// reports fractional positions.
fn num_u32(obj: &Map<String, Value>, key: &str) -> u32 {
    obj.get(key).and_then(Value::as_f64).unwrap_or(0.0) as u32
}

fn flag(obj: &Map<String, Value>, key: &str) -> bool {
    obj.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn text<'a>(obj: &'a Map<String, Value>, key: &str) -> &'a str {
    obj.get(key).and_then(Value::as_str).unwrap_or("")
}

fn text_or<'a>(obj: &'a Map<String, Value>, key: &str, default: &'a str) -> &'a str {
    obj.get(key).and_then(Value::as_str).unwrap_or(default)
}
