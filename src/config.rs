//! Konfigurasi queue

use crate::core::MAX_SEGMENT_CAPACITY;
use crate::error::{QueueError, Result};

/// Kapasitas segmen untuk [`QueueConfig::default`]
pub const DEFAULT_MIN_CAPACITY: usize = 64;

/// Reaksi kapasitas segmen terhadap burst
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Growth {
    /// Segmen baru 2x kapasitas tail; segmen tunggal yang tersisa menyusut
    /// 1/2 setiap shift kosong, sampai kapasitas minimum.
    #[default]
    Geometric,
    /// Semua segmen berkapasitas minimum dan tidak pernah dialokasi ulang.
    Fixed,
}

impl Growth {
    /// Kapasitas segmen baru setelah segmen `current` penuh
    #[inline]
    pub(crate) fn grown(self, current: usize) -> usize {
        match self {
            Growth::Geometric => current.saturating_mul(2).min(MAX_SEGMENT_CAPACITY),
            Growth::Fixed => current,
        }
    }

    /// Kapasitas baru segmen terakhir yang kosong, jika menyusut
    #[inline]
    pub(crate) fn shrunk(self, current: usize, min: usize) -> Option<usize> {
        match self {
            Growth::Geometric if current > min => Some((current / 2).max(min)),
            _ => None,
        }
    }
}

/// Parameter yang ditetapkan saat konstruksi queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueConfig {
    pub min_capacity: usize,
    pub growth: Growth,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            min_capacity: DEFAULT_MIN_CAPACITY,
            growth: Growth::Geometric,
        }
    }
}

impl QueueConfig {
    pub fn with_min_capacity(mut self, min_capacity: usize) -> Self {
        self.min_capacity = min_capacity;
        self
    }

    pub fn with_growth(mut self, growth: Growth) -> Self {
        self.growth = growth;
        self
    }

    /// Validasi `min_capacity` sebagai ukuran ring buffer
    pub fn validate(&self) -> Result<()> {
        let cap = self.min_capacity;
        if cap == 0 {
            return Err(QueueError::ZeroCapacity);
        }
        if !cap.is_power_of_two() {
            return Err(QueueError::CapacityNotPowerOfTwo(cap));
        }
        if cap > MAX_SEGMENT_CAPACITY {
            return Err(QueueError::CapacityTooLarge {
                requested: cap,
                max: MAX_SEGMENT_CAPACITY,
            });
        }
        Ok(())
    }
}
