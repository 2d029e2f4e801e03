//! Snapshot footprint memori queue

use crate::core::ChainCounters;

/// Snapshot dari [`Queue::stats`](crate::Queue::stats).
///
/// Kapasitas dalam jumlah elemen, bukan bytes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct QueueStats {
    pub len: usize,
    /// Segmen hidup, termasuk head kosong yang belum dilepas
    pub segments: usize,
    /// Total kapasitas segmen hidup
    pub capacity: usize,
    pub head_capacity: Option<usize>,
    pub tail_capacity: Option<usize>,
    pub grows: u64,
    pub releases: u64,
    pub shrinks: u64,
}

impl QueueStats {
    pub(crate) fn with_counters(mut self, counters: ChainCounters) -> Self {
        self.grows = counters.grows;
        self.releases = counters.releases;
        self.shrinks = counters.shrinks;
        self
    }

    /// Rasio slot teralokasi yang berisi elemen
    pub fn occupancy(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            self.len as f64 / self.capacity as f64
        }
    }
}
