use serde::{Deserialize, Serialize};

/// Response header the service sets on a 404 meaning "no value recorded for
/// this week", as opposed to a path that matched no route.
pub const NOT_RECORDED_HEADER: &str = "x-screentime-not-recorded";

/// Screen time budget for one user and week, in minutes.
///
/// Field order is fixed so `serde_json::to_vec` yields the same bytes on
/// every device: `{"available":N,"used":N}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ScreenTime {
    pub available: u32,
    pub used: u32,
}

impl ScreenTime {
    pub fn remaining(&self) -> u32 {
        self.available.saturating_sub(self.used)
    }
}
