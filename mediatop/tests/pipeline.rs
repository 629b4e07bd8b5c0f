//! End-to-end ingest: classification through to the mailbox and artwork
//! buffer, plus command channel bounds.

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;

use mediatop::artwork::ART_BYTES;
use mediatop::ingest::ingest_line;
use mediatop::mailbox::Mailbox;
use mediatop::Hub;

fn full_size_b64() -> String {
    B64.encode((0..ART_BYTES).map(|i| (i % 7) as u8).collect::<Vec<_>>())
}

#[test]
fn mailbox_is_latest_wins() {
    let mb = Mailbox::new();
    mb.publish(1u32);
    mb.publish(2u32);
    assert_eq!(mb.try_take(), Some(2));
    assert_eq!(mb.try_take(), None);
}

#[test]
fn newer_snapshot_replaces_unread_one() {
    let hub = Hub::new();
    ingest_line(&hub, r#"{"cpu_percent_total":10}"#);
    ingest_line(&hub, r#"{"cpu_percent_total":20}"#);
    let snap = hub.try_take_snapshot().unwrap();
    assert_eq!(snap.cpu, 20.0);
    assert!(hub.try_take_snapshot().is_none());
}

#[test]
fn invalid_line_leaves_pending_snapshot_untouched() {
    let hub = Hub::new();
    ingest_line(&hub, r#"{"cpu_percent_total":10}"#);
    // Long enough to classify as a snapshot, but not valid JSON.
    ingest_line(&hub, r#"{"cpu_percent_total":"#);
    let snap = hub.try_take_snapshot().unwrap();
    assert_eq!(snap.cpu, 10.0);
}

#[test]
fn ack_corrects_playback_without_publishing() {
    let hub = Hub::new();
    ingest_line(&hub, r#"{"ack":"play"}"#);
    assert!(hub.try_take_snapshot().is_none());
    assert!(hub.try_take_ack().unwrap().playing);

    ingest_line(&hub, r#"{"ack":"pause"}"#);
    assert!(!hub.try_take_ack().unwrap().playing);
    assert!(hub.try_take_ack().is_none());
}

#[test]
fn standalone_artwork_message_never_publishes_a_snapshot() {
    let hub = Hub::new();
    let line = format!(r#"{{"artwork_b64":"{}"}}"#, full_size_b64());
    ingest_line(&hub, &line);
    assert!(hub.try_take_snapshot().is_none());
    assert!(hub.artwork_is_new());

    let mut raster = [0u8; ART_BYTES];
    hub.copy_artwork(&mut raster);
    assert_eq!(raster[0], 0);
    assert_eq!(raster[8], 1);

    hub.clear_artwork_new();
    assert!(!hub.artwork_is_new());
}

#[test]
fn legacy_artwork_sequence_through_ingest() {
    let hub = Hub::new();
    let hex: String = (0..ART_BYTES).map(|i| format!("{:02x}", (i % 13) as u8)).collect();
    ingest_line(&hub, "ART_START");
    for chunk in hex.as_bytes().chunks(1024) {
        ingest_line(&hub, &format!("ART_CHUNK:{}", std::str::from_utf8(chunk).unwrap()));
    }
    ingest_line(&hub, "ART_END");
    assert!(hub.artwork_is_new());
    hub.with_artwork(|raster| {
        assert_eq!(raster[12], 12);
        assert_eq!(raster[13], 0);
    });
}

#[test]
fn snapshot_with_inline_artwork_reports_update_once() {
    let hub = Hub::new();
    let line = format!(
        r#"{{"cpu_percent_total":5,"media":{{"title":"T","artwork_png_b64":"{}"}}}}"#,
        full_size_b64()
    );
    ingest_line(&hub, &line);
    let snap = hub.try_take_snapshot().unwrap();
    assert!(snap.has_artwork);
    assert!(snap.artwork_updated);
    hub.clear_artwork_new();

    // Same payload again: announced but not re-decoded.
    ingest_line(&hub, &line);
    let snap = hub.try_take_snapshot().unwrap();
    assert!(snap.has_artwork);
    assert!(!snap.artwork_updated);
    assert!(!hub.artwork_is_new());
}

#[test]
fn command_queue_drops_beyond_capacity() {
    let hub = Hub::new();
    for i in 0..12 {
        hub.send_command(&format!(r#"{{"cmd":"play","n":{i}}}"#));
    }
    let mut rx = hub.commands.claim_net().unwrap();
    let mut received = 0;
    while rx.try_recv().is_ok() {
        received += 1;
    }
    assert_eq!(received, 8);
    // Receiver can only be claimed once.
    assert!(hub.commands.claim_net().is_none());
}

#[test]
fn oversized_and_empty_commands_dropped() {
    let hub = Hub::new();
    hub.send_command("   ");
    hub.send_command(&"x".repeat(4096));
    let mut rx = hub.commands.claim_serial().unwrap();
    assert!(rx.try_recv().is_err());
}
