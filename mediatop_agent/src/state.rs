//! Shared agent state: one persistent sysinfo handle reused across clients.

use std::sync::Arc;
use sysinfo::System;
use tokio::sync::Mutex;

pub type SharedSystem = Arc<Mutex<System>>;

#[derive(Clone)]
pub struct AppState {
    pub sys: SharedSystem,
}
