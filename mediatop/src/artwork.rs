//! Cover-art raster: legacy hex-chunk assembly and inline base64 decode,
//! with content-hash dedup so a static cover resent on every tick costs
//! nothing.

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use tracing::{debug, warn};

pub const ART_WIDTH: usize = 80;
pub const ART_HEIGHT: usize = 80;
/// RGB565, two bytes per pixel.
pub const ART_BYTES: usize = ART_WIDTH * ART_HEIGHT * 2;

/// Only this much of the *encoded* payload feeds the dedup hash. Bounds hash
/// cost on large payloads; two covers sharing a longer common prefix would
/// collide, an accepted trade for the decode skip.
pub const HASH_PREFIX_BYTES: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtOutcome {
    /// New pixels committed; freshness flag set.
    Updated,
    /// Same payload as last time; raster and flag untouched.
    Unchanged,
    /// Bad size or bad encoding; previous raster kept.
    Rejected,
}

// Legacy transfer state. Chunks before ART_START and stray ART_ENDs are
// ignored rather than corrupting anything.
#[derive(Clone, Copy)]
enum ChunkState {
    Idle,
    Receiving { offset: usize },
}

pub struct ArtworkBuffer {
    raster: [u8; ART_BYTES],
    // Legacy chunks assemble here; only an exact-size transfer reaches the
    // raster, so a broken transfer never blanks the last good image.
    staging: [u8; ART_BYTES],
    state: ChunkState,
    hasher: PrefixHasher,
    last_hash: u32,
    fresh: bool,
}

impl ArtworkBuffer {
    pub fn new() -> Self {
        Self {
            raster: [0; ART_BYTES],
            staging: [0; ART_BYTES],
            state: ChunkState::Idle,
            hasher: PrefixHasher::new(),
            last_hash: 0,
            fresh: false,
        }
    }

    /// `ART_START`: reset the transfer. A start mid-transfer restarts it.
    pub fn begin(&mut self) {
        self.staging.fill(0);
        self.hasher = PrefixHasher::new();
        self.state = ChunkState::Receiving { offset: 0 };
        debug!("artwork transfer started");
    }

    /// `ART_CHUNK:` hex pairs appended at the running offset. Ignored outside
    /// a transfer.
    pub fn chunk(&mut self, hex: &str) {
        let ChunkState::Receiving { mut offset } = self.state else {
            debug!("artwork chunk outside transfer, ignoring");
            return;
        };
        self.hasher.update(hex.as_bytes());
        let bytes = hex.as_bytes();
        let mut i = 0;
        while i + 1 < bytes.len() && offset < ART_BYTES {
            self.staging[offset] = (nibble(bytes[i]) << 4) | nibble(bytes[i + 1]);
            offset += 1;
            i += 2;
        }
        self.state = ChunkState::Receiving { offset };
    }

    /// `ART_END`: commit if the transfer filled the raster exactly and the
    /// payload differs from the previous one.
    pub fn finish(&mut self) -> ArtOutcome {
        let ChunkState::Receiving { offset } = self.state else {
            debug!("artwork end outside transfer, ignoring");
            return ArtOutcome::Rejected;
        };
        self.state = ChunkState::Idle;
        if offset != ART_BYTES {
            warn!(got = offset, want = ART_BYTES, "artwork transfer size mismatch");
            return ArtOutcome::Rejected;
        }
        let hash = self.hasher.finish();
        if hash == self.last_hash {
            debug!("artwork unchanged, skipping commit");
            return ArtOutcome::Unchanged;
        }
        self.raster = self.staging;
        self.last_hash = hash;
        self.fresh = true;
        debug!(bytes = ART_BYTES, "artwork committed");
        ArtOutcome::Updated
    }

    /// Single-message base64 form. The dedup hash is checked before any
    /// decode work happens.
    pub fn decode_inline(&mut self, b64: &str) -> ArtOutcome {
        let hash = hash_prefix(b64.as_bytes());
        if hash == self.last_hash {
            debug!("artwork unchanged, skipping decode");
            return ArtOutcome::Unchanged;
        }
        let decoded = match B64.decode(b64) {
            Ok(d) => d,
            Err(e) => {
                warn!(error = %e, "artwork base64 decode failed");
                return ArtOutcome::Rejected;
            }
        };
        if decoded.len() != ART_BYTES {
            warn!(got = decoded.len(), want = ART_BYTES, "artwork size mismatch");
            return ArtOutcome::Rejected;
        }
        self.raster.copy_from_slice(&decoded);
        self.last_hash = hash;
        self.fresh = true;
        debug!(bytes = ART_BYTES, "artwork committed");
        ArtOutcome::Updated
    }

    pub fn raster(&self) -> &[u8; ART_BYTES] {
        &self.raster
    }

    /// Freshness: set on commit, cleared exactly once by the consumer.
    pub fn is_fresh(&self) -> bool {
        self.fresh
    }

    pub fn clear_fresh(&mut self) {
        self.fresh = false;
    }

    pub fn stored_hash(&self) -> u32 {
        self.last_hash
    }
}

impl Default for ArtworkBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// FNV-1a over at most HASH_PREFIX_BYTES, streamable for the chunked path.
struct PrefixHasher {
    state: u32,
    seen: usize,
}

impl PrefixHasher {
    fn new() -> Self {
        Self {
            state: 0x811c_9dc5,
            seen: 0,
        }
    }

    fn update(&mut self, data: &[u8]) {
        let take = data.len().min(HASH_PREFIX_BYTES.saturating_sub(self.seen));
        for &b in &data[..take] {
            self.state ^= u32::from(b);
            self.state = self.state.wrapping_mul(0x0100_0193);
        }
        self.seen += take;
    }

    fn finish(&self) -> u32 {
        self.state
    }
}

fn hash_prefix(data: &[u8]) -> u32 {
    let mut h = PrefixHasher::new();
    h.update(data);
    h.finish()
}

fn nibble(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => 10 + (c - b'a'),
        b'A'..=b'F' => 10 + (c - b'A'),
        _ => 0,
    }
}
