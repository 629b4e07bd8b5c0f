// gpu.rs
use gfxinfo::active_gpu;
use once_cell::sync::OnceCell;

// Runtime toggle (read once): MEDIATOP_AGENT_GPU=0 disables GPU sampling on
// hosts where the probe is slow or unsupported.
fn gpu_enabled() -> bool {
    static ON: OnceCell<bool> = OnceCell::new();
    *ON.get_or_init(|| {
        std::env::var("MEDIATOP_AGENT_GPU")
            .map(|v| v != "0")
            .unwrap_or(true)
    })
}

pub fn gpu_percent() -> f32 {
    if !gpu_enabled() {
        return 0.0;
    }
    match active_gpu() {
        Ok(gpu) => gpu.info().load_pct() as f32,
        Err(_) => 0.0,
    }
}
