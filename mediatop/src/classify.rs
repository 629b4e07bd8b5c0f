//! Structural message classification, done before any full JSON parse.

/// What a complete line turned out to be.
#[derive(Debug, PartialEq, Eq)]
pub enum Kind<'a> {
    /// Legacy artwork transfer begins.
    ArtStart,
    /// Legacy artwork hex payload (the part after `ART_CHUNK:`).
    ArtChunk(&'a str),
    /// Legacy artwork transfer ends.
    ArtEnd,
    /// Standalone `{"artwork_b64":...}` message; never produces a snapshot.
    ArtworkInline,
    /// Playback acknowledgement; applied as a one-off state correction.
    Ack,
    /// Anything else long enough to plausibly be a snapshot message.
    Snapshot,
    /// Too short to mean anything; ignored.
    Empty,
}

// Prefix/substring checks in a deliberate order: artwork frames first (large
// payloads that must never occupy the snapshot parser), then cheap acks, then
// everything plausibly JSON. The substring matching means a message carrying
// both an "ack" marker and full metrics routes as an ack; that is the
// long-standing wire behavior and stays as-is.
pub fn classify(line: &str) -> Kind<'_> {
    if let Some(hex) = line.strip_prefix("ART_CHUNK:") {
        return Kind::ArtChunk(hex);
    }
    if line.starts_with("ART_START") {
        return Kind::ArtStart;
    }
    if line.starts_with("ART_END") {
        return Kind::ArtEnd;
    }
    // "cpu_percent" also covers "cpu_percent_total".
    if line.contains("\"artwork_b64\"") && !line.contains("\"cpu_percent") {
        return Kind::ArtworkInline;
    }
    if line.contains("\"ack\"") {
        return Kind::Ack;
    }
    if line.len() > 5 {
        return Kind::Snapshot;
    }
    Kind::Empty
}
