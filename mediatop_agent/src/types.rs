//! Types that mirror the display's expected JSON schema.

use serde::Serialize;

#[derive(Debug, Serialize, Clone)]
pub struct ProcInfo {
    pub pid: u32,
    /// Memory share in percent, not bytes; the display shows it as-is.
    pub mem: f32,
    pub name: String,
    pub display_name: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct SnapshotMsg {
    pub cpu_percent_total: f32,
    pub mem_percent: f32,
    pub gpu_percent: f32,
    pub proc_top5: Vec<ProcInfo>,
}
