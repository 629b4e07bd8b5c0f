//! Line framer and classifier behavior, including the overflow reset policy.

use mediatop::classify::{classify, Kind};
use mediatop::framer::LineFramer;

#[test]
fn yields_line_on_newline_with_cr_stripped() {
    let mut f = LineFramer::new();
    let lines = f.feed_slice(b"hello world\r\n");
    assert_eq!(lines, vec!["hello world".to_string()]);
    assert_eq!(f.pending(), 0);
}

#[test]
fn splits_multiple_lines_in_one_chunk() {
    let mut f = LineFramer::new();
    let lines = f.feed_slice(b"one\ntwo\nthr");
    assert_eq!(lines, vec!["one".to_string(), "two".to_string()]);
    assert_eq!(f.pending(), 3);
    assert_eq!(f.feed(b'\n'), Some("thr".to_string()));
}

#[test]
fn trims_surrounding_whitespace() {
    let mut f = LineFramer::new();
    assert_eq!(f.feed_slice(b"  padded  \n"), vec!["padded".to_string()]);
}

#[test]
fn overflow_discards_and_recovers() {
    let mut f = LineFramer::with_capacity(64);
    // 100 bytes, no newline: buffer resets once it passes the cap.
    let junk = f.feed_slice(&[b'x'; 100]);
    assert!(junk.is_empty());
    // The tail that accumulated after the reset comes out as a junk line.
    let tail = f.feed(b'\n').unwrap();
    assert_eq!(tail.len(), 35);
    // A following well-formed line still parses.
    let lines = f.feed_slice(b"{\"cpu_percent\":1}\n");
    assert_eq!(lines, vec!["{\"cpu_percent\":1}".to_string()]);
}

#[test]
fn classifies_legacy_artwork_frames() {
    assert_eq!(classify("ART_START"), Kind::ArtStart);
    assert_eq!(classify("ART_CHUNK:deadbeef"), Kind::ArtChunk("deadbeef"));
    assert_eq!(classify("ART_END"), Kind::ArtEnd);
}

#[test]
fn classifies_inline_artwork_only_without_metrics_key() {
    assert_eq!(classify(r#"{"artwork_b64":"aGk="}"#), Kind::ArtworkInline);
    // Artwork key next to system metrics means a full snapshot message.
    assert_eq!(
        classify(r#"{"cpu_percent_total":1,"artwork_b64":"aGk="}"#),
        Kind::Snapshot
    );
}

#[test]
fn classifies_ack_and_snapshot() {
    assert_eq!(classify(r#"{"ack":"play"}"#), Kind::Ack);
    assert_eq!(classify(r#"{"cpu_percent_total":42}"#), Kind::Snapshot);
    assert_eq!(classify("hi"), Kind::Empty);
}

#[test]
fn ack_marker_wins_over_snapshot_keys() {
    // Substring routing: a message carrying both markers goes to the ack
    // path. Long-standing wire behavior, kept as-is.
    assert_eq!(
        classify(r#"{"cpu_percent_total":42,"ack":"pause"}"#),
        Kind::Ack
    );
}
