//! segring - Unbounded FIFO Queue di atas chain ring buffer
//!
//! Arsitektur:
//! - Ring buffer: kapasitas power-of-2, cursor `u32` yang wrap
//! - Segment chain: arena ring buffer yang dihubungkan dengan id; tumbuh 2x
//!   saat penuh, segmen terakhir yang kosong menyusut 1/2
//! - Queue: pemilik chain, menyimpan id head dan tail untuk push/shift O(1)
//!
//! Single-threaded: tidak ada lock, tidak ada atomic. Untuk dipakai lintas
//! thread, pemanggil wajib menyediakan sinkronisasi sendiri.
//!
//! ```
//! use segring::{Growth, Queue, QueueConfig};
//!
//! let config = QueueConfig::default()
//!     .with_min_capacity(4)
//!     .with_growth(Growth::Geometric);
//! let mut q = Queue::with_config(config)?;
//!
//! q.extend(0..10);
//! assert_eq!(q.stats().segments, 2);
//! assert_eq!(q.into_iter().collect::<Vec<_>>(), (0..10).collect::<Vec<_>>());
//! # Ok::<(), segring::QueueError>(())
//! ```

pub mod config;
pub(crate) mod core;
pub mod error;
mod queue;
pub mod stats;

pub use config::{Growth, QueueConfig, DEFAULT_MIN_CAPACITY};
pub use crate::core::MAX_SEGMENT_CAPACITY;
pub use error::QueueError;
pub use queue::{IntoIter, Iter, Queue};
pub use stats::QueueStats;
