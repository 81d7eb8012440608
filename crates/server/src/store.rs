use std::collections::HashMap;
use std::fmt;

use screentime_core::ScreenTime;
use tokio::sync::RwLock;

use crate::error::ServerError;

/// Identifies one user's screen time budget for an ISO week.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WeekKey {
    pub user: String,
    pub year: i32,
    pub week: u8,
}

impl WeekKey {
    /// Parses the raw path segments of `/time/{user}/{year}/{week}`.
    pub fn parse(user: &str, year: &str, week: &str) -> Result<Self, ServerError> {
        if user.is_empty() {
            return Err(ServerError::BadRequest("user must not be empty".into()));
        }
        let year = year
            .parse::<i32>()
            .map_err(|_| ServerError::BadRequest(format!("invalid year {year:?}")))?;
        let week = week
            .parse::<u8>()
            .ok()
            .filter(|w| (1..=53).contains(w))
            .ok_or_else(|| ServerError::BadRequest(format!("invalid week {week:?}")))?;
        Ok(Self {
            user: user.to_string(),
            year,
            week,
        })
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.user, self.year, self.week)
    }
}

/// In-memory screen time values. Writes overwrite by key.
#[derive(Default)]
pub struct ScreenTimeStore {
    entries: RwLock<HashMap<WeekKey, ScreenTime>>,
}

impl ScreenTimeStore {
    pub async fn get(&self, key: &WeekKey) -> Option<ScreenTime> {
        self.entries.read().await.get(key).copied()
    }

    pub async fn put(&self, key: WeekKey, value: ScreenTime) -> Option<ScreenTime> {
        self.entries.write().await.insert(key, value)
    }
}
