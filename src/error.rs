//! Error konstruksi queue
//!
//! `push` dan `shift` tidak pernah gagal; hanya konfigurasi yang bisa invalid.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// Kapasitas minimum nol
    #[error("segment capacity must be greater than zero")]
    ZeroCapacity,

    /// Kapasitas minimum bukan power of 2
    #[error("segment capacity {0} is not a power of two")]
    CapacityNotPowerOfTwo(usize),

    /// Kapasitas minimum tidak muat di cursor buffer
    #[error("segment capacity {requested} exceeds maximum {max}")]
    CapacityTooLarge { requested: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, QueueError>;
