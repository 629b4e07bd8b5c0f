//! Artwork decoder: legacy chunked transfers, inline base64, dedup hashing,
//! and rejection paths that must leave the previous raster intact.

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;

use mediatop::artwork::{ArtOutcome, ArtworkBuffer, ART_BYTES};

fn pattern_raster() -> Vec<u8> {
    (0..ART_BYTES).map(|i| (i % 251) as u8).collect()
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn feed_legacy(art: &mut ArtworkBuffer, bytes: &[u8]) -> ArtOutcome {
    art.begin();
    let hex = to_hex(bytes);
    // Chunk size mirrors what the host sends: a few hundred hex chars.
    for chunk in hex.as_bytes().chunks(512) {
        art.chunk(std::str::from_utf8(chunk).unwrap());
    }
    art.finish()
}

#[test]
fn legacy_transfer_fills_raster_exactly() {
    let mut art = ArtworkBuffer::new();
    let data = pattern_raster();
    assert_eq!(feed_legacy(&mut art, &data), ArtOutcome::Updated);
    assert_eq!(art.raster().as_slice(), data.as_slice());
    assert!(art.is_fresh());
    art.clear_fresh();
    assert!(!art.is_fresh());
}

#[test]
fn identical_legacy_resend_is_unchanged() {
    let mut art = ArtworkBuffer::new();
    let data = pattern_raster();
    assert_eq!(feed_legacy(&mut art, &data), ArtOutcome::Updated);
    art.clear_fresh();
    let hash = art.stored_hash();
    assert_eq!(feed_legacy(&mut art, &data), ArtOutcome::Unchanged);
    assert!(!art.is_fresh());
    assert_eq!(art.stored_hash(), hash);
    assert_eq!(art.raster().as_slice(), data.as_slice());
}

#[test]
fn short_legacy_transfer_keeps_previous_raster() {
    let mut art = ArtworkBuffer::new();
    let good = pattern_raster();
    assert_eq!(feed_legacy(&mut art, &good), ArtOutcome::Updated);
    art.clear_fresh();

    art.begin();
    art.chunk("deadbeef");
    assert_eq!(art.finish(), ArtOutcome::Rejected);
    assert!(!art.is_fresh());
    assert_eq!(art.raster().as_slice(), good.as_slice());
}

#[test]
fn chunk_and_end_outside_transfer_ignored() {
    let mut art = ArtworkBuffer::new();
    let before = *art.raster();
    art.chunk("aabbccdd");
    assert_eq!(art.finish(), ArtOutcome::Rejected);
    assert_eq!(*art.raster(), before);
    assert!(!art.is_fresh());
}

#[test]
fn start_mid_transfer_restarts() {
    let mut art = ArtworkBuffer::new();
    let data = pattern_raster();
    art.begin();
    art.chunk("ffff");
    // Host restarted the transfer; only the second one counts.
    assert_eq!(feed_legacy(&mut art, &data), ArtOutcome::Updated);
    assert_eq!(art.raster().as_slice(), data.as_slice());
}

#[test]
fn inline_decode_roundtrip() {
    let mut art = ArtworkBuffer::new();
    let data = pattern_raster();
    let b64 = B64.encode(&data);
    assert_eq!(art.decode_inline(&b64), ArtOutcome::Updated);
    assert_eq!(art.raster().as_slice(), data.as_slice());
    assert!(art.is_fresh());
}

#[test]
fn inline_resend_skips_decode() {
    let mut art = ArtworkBuffer::new();
    let b64 = B64.encode(pattern_raster());
    assert_eq!(art.decode_inline(&b64), ArtOutcome::Updated);
    art.clear_fresh();
    assert_eq!(art.decode_inline(&b64), ArtOutcome::Unchanged);
    assert!(!art.is_fresh());
}

#[test]
fn wrong_length_inline_rejected() {
    let mut art = ArtworkBuffer::new();
    let good = pattern_raster();
    assert_eq!(art.decode_inline(&B64.encode(&good)), ArtOutcome::Updated);
    art.clear_fresh();
    let hash = art.stored_hash();

    // Valid base64, wrong decoded size.
    let bad = B64.encode([1u8, 2, 3, 4, 5]);
    assert_eq!(art.decode_inline(&bad), ArtOutcome::Rejected);
    assert!(!art.is_fresh());
    assert_eq!(art.stored_hash(), hash);
    assert_eq!(art.raster().as_slice(), good.as_slice());
}

#[test]
fn garbage_base64_rejected() {
    let mut art = ArtworkBuffer::new();
    assert_eq!(art.decode_inline("!!not base64!!"), ArtOutcome::Rejected);
    assert!(!art.is_fresh());
}
