//! Core module: Ring buffer dan segment chain
//!
//! Prinsip desain:
//! - `RingBuffer`: buffer melingkar power-of-2, tidak kenal tetangga
//! - `SegmentChain`: arena segmen, tiap segmen satu ring buffer plus link
//! - Tanpa sinkronisasi: hanya satu pemilik yang memutasi

mod ring_buffer;
mod segment;

pub use ring_buffer::MAX_SEGMENT_CAPACITY;
pub use segment::{ChainCounters, Link, SegmentChain, SegmentId};
