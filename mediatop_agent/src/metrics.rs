//! Telemetry collection using sysinfo for mediatop_agent.

use std::cmp::Ordering;

use crate::gpu::gpu_percent;
use crate::state::AppState;
use crate::types::{ProcInfo, SnapshotMsg};

pub const TOP_K: usize = 5;

pub async fn collect_snapshot(state: &AppState) -> SnapshotMsg {
    let mut sys = state.sys.lock().await;
    sys.refresh_all();

    let mem_total = sys.total_memory().max(1);

    // Top processes by memory share; the display has five rows.
    let mut procs: Vec<ProcInfo> = sys
        .processes()
        .values()
        .map(|p| {
            let name = p.name().to_string_lossy().to_string();
            ProcInfo {
                pid: p.pid().as_u32(),
                mem: (p.memory() as f32 / mem_total as f32) * 100.0,
                display_name: display_name(&name).to_string(),
                name,
            }
        })
        .collect();
    procs.sort_by(|a, b| b.mem.partial_cmp(&a.mem).unwrap_or(Ordering::Equal));
    procs.truncate(TOP_K);

    SnapshotMsg {
        cpu_percent_total: sys.global_cpu_usage(),
        mem_percent: (sys.used_memory() as f32 / mem_total as f32) * 100.0,
        gpu_percent: gpu_percent(),
        proc_top5: procs,
    }
}

// Screen-friendly process name: the ".exe" suffix is noise on a 32-char row.
pub fn display_name(name: &str) -> &str {
    name.strip_suffix(".exe")
        .or_else(|| name.strip_suffix(".EXE"))
        .unwrap_or(name)
}
