//! Hybrid Logical Clock timestamps for commit ordering.
//!
//! Commits from different clients must interleave into one total order that
//! respects causality: if a replica saw commit A before authoring commit B,
//! then ts(A) < ts(B). A wall clock alone cannot guarantee that across
//! devices, so each timestamp pairs wall-clock milliseconds with a logical
//! counter (Kulkarni et al., "Logical Physical Clocks").

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::time::{SystemTime, UNIX_EPOCH};

fn wall_clock_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before Unix epoch")
        .as_millis() as u64
}

/// A Hybrid Logical Clock timestamp: wall-clock milliseconds plus a logical
/// counter that disambiguates events within the same millisecond.
///
/// Tombstones (`deleted_at`) and commit ordering both use this type, so its
/// total order is the single source of truth for "which edit came later".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HybridTimestamp {
    /// Milliseconds since the Unix epoch.
    wall_time: u64,
    /// Counter for events sharing the same wall time.
    logical: u32,
}

impl HybridTimestamp {
    /// Creates a timestamp at the current wall time.
    #[must_use]
    pub fn now() -> Self {
        Self {
            wall_time: wall_clock_millis(),
            logical: 0,
        }
    }

    /// Creates a timestamp from raw components.
    #[must_use]
    pub const fn new(wall_time: u64, logical: u32) -> Self {
        Self { wall_time, logical }
    }

    /// Returns the wall-clock component in milliseconds since the epoch.
    #[must_use]
    pub const fn wall_time(&self) -> u64 {
        self.wall_time
    }

    /// Returns the logical counter.
    #[must_use]
    pub const fn logical(&self) -> u32 {
        self.logical
    }

    /// Advances the clock for a locally authored commit.
    ///
    /// The result is strictly greater than `self` even when the wall clock
    /// has stalled or stepped backwards.
    #[must_use]
    pub fn tick(&self) -> Self {
        Self::advance_past(*self)
    }

    /// Advances the clock after observing a remote commit's timestamp.
    ///
    /// The result is strictly greater than both `self` and `remote`, so
    /// anything committed locally afterwards sorts after the remote commit.
    #[must_use]
    pub fn receive(&self, remote: &Self) -> Self {
        Self::advance_past(if self >= remote { *self } else { *remote })
    }

    fn advance_past(base: Self) -> Self {
        let now = wall_clock_millis();
        if now > base.wall_time {
            Self {
                wall_time: now,
                logical: 0,
            }
        } else {
            Self {
                wall_time: base.wall_time,
                logical: base.logical.saturating_add(1),
            }
        }
    }
}

impl Default for HybridTimestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl PartialOrd for HybridTimestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HybridTimestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.wall_time.cmp(&other.wall_time) {
            Ordering::Equal => self.logical.cmp(&other.logical),
            other => other,
        }
    }
}
