//! Line dispatch: classify, decode, publish. Every failure is handled here;
//! the consumer only ever observes "nothing new this tick".

use serde_json::Value;
use tracing::debug;

use crate::artwork::ArtOutcome;
use crate::classify::{classify, Kind};
use crate::hub::{AckState, Hub};
use crate::snapshot;

pub fn ingest_line(hub: &Hub, line: &str) {
    match classify(line) {
        Kind::ArtStart => hub.artwork.lock().unwrap().begin(),
        Kind::ArtChunk(hex) => hub.artwork.lock().unwrap().chunk(hex),
        Kind::ArtEnd => {
            let _ = hub.artwork.lock().unwrap().finish();
        }
        Kind::ArtworkInline => {
            if let Some(payload) = extract_artwork_b64(line) {
                let _ = hub.artwork.lock().unwrap().decode_inline(&payload);
            }
        }
        Kind::Ack => {
            if let Some(ack) = parse_ack(line) {
                hub.acks.publish(ack);
            }
        }
        Kind::Snapshot => match snapshot::decode(line) {
            Some(mut dec) => {
                // Inline artwork rides inside the media block; decode it
                // first so the published snapshot can report the outcome.
                if let Some(b64) = dec.artwork_b64.take() {
                    let outcome = hub.artwork.lock().unwrap().decode_inline(&b64);
                    dec.snapshot.artwork_updated = outcome == ArtOutcome::Updated;
                }
                hub.snapshots.publish(dec.snapshot);
            }
            // Previous mailbox contents stay authoritative.
            None => debug!("undecodable snapshot line dropped"),
        },
        Kind::Empty => {}
    }
}

fn extract_artwork_b64(line: &str) -> Option<String> {
    let doc: Value = serde_json::from_str(line).ok()?;
    doc.get("artwork_b64")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn parse_ack(line: &str) -> Option<AckState> {
    let doc: Value = serde_json::from_str(line).ok()?;
    match doc.get("ack").and_then(Value::as_str) {
        Some("play") => Some(AckState { playing: true }),
        Some("pause") => Some(AckState { playing: false }),
        _ => None,
    }
}
