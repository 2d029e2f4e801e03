//! Unbounded FIFO Queue di atas chain ring buffer
//!
//! Push ke segmen tail, shift dari segmen head.
//! Tidak ada yang blocking dan tidak ada yang gagal; queue kosong
//! dilaporkan `shift` sebagai `None`.

use std::fmt;
use std::iter::FusedIterator;

use tracing::debug;

use crate::config::QueueConfig;
use crate::core::{Link, SegmentChain, SegmentId};
use crate::error::Result;
use crate::stats::QueueStats;

/// Head dan tail dari chain yang tidak kosong.
///
/// `tail` hanya id (bukan pemilik) ke segmen terakhir chain yang dimiliki
/// lewat `head`; selalu diperbarui dari hasil [`Link`].
#[derive(Debug, Clone, Copy)]
struct Ends {
    head: SegmentId,
    tail: SegmentId,
}

/// Unbounded FIFO queue, single-threaded.
///
/// ```
/// use segring::Queue;
///
/// let mut q = Queue::new();
/// q.push(1);
/// q.push(2);
/// assert_eq!(q.shift(), Some(1));
/// assert_eq!(q.shift(), Some(2));
/// assert_eq!(q.shift(), None);
/// ```
pub struct Queue<T> {
    chain: SegmentChain<T>,
    ends: Option<Ends>,
    len: usize,
    config: QueueConfig,
}

impl<T> Queue<T> {
    /// Queue kosong dengan konfigurasi default. Belum ada alokasi.
    pub fn new() -> Self {
        Self::from_valid(QueueConfig::default())
    }

    /// Queue kosong yang segmennya tidak pernah lebih kecil dari `min_capacity`
    pub fn with_min_capacity(min_capacity: usize) -> Result<Self> {
        Self::with_config(QueueConfig::default().with_min_capacity(min_capacity))
    }

    pub fn with_config(config: QueueConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: QueueConfig) -> Self {
        Self {
            chain: SegmentChain::new(config.min_capacity, config.growth),
            ends: None,
            len: 0,
            config,
        }
    }

    /// Tambah `value` di belakang. Bisa mengalokasi segmen baru.
    #[inline]
    pub fn push(&mut self, value: T) {
        match &mut self.ends {
            Some(ends) => {
                if let Link::Replaced(tail) = self.chain.push(ends.tail, value) {
                    ends.tail = tail;
                }
            }
            None => {
                let id = self.chain.alloc();
                let link = self.chain.push(id, value);
                debug_assert_eq!(link, Link::Unchanged);
                self.ends = Some(Ends { head: id, tail: id });
            }
        }
        self.len += 1;
    }

    /// Ambil elemen terdepan, atau `None` jika kosong.
    #[inline]
    pub fn shift(&mut self) -> Option<T> {
        let ends = self.ends.as_mut()?;
        let (value, link) = self.chain.shift(ends.head);
        if let Link::Replaced(head) = link {
            ends.head = head;
            // Segmen tunggal bisa pindah slot saat arena dipadatkan
            if self.chain[head].next().is_none() {
                ends.tail = head;
            }
        }
        if value.is_some() {
            self.len -= 1;
        }
        value
    }

    pub fn front(&self) -> Option<&T> {
        self.chain.front(self.ends?.head)
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        let head = self.ends?.head;
        self.chain.front_mut(head)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drop semua elemen dan segmen; push berikutnya mulai dari awal.
    pub fn clear(&mut self) {
        debug!(len = self.len, segments = self.chain.segments(), "queue cleared");
        self.chain.clear();
        self.ends = None;
        self.len = 0;
    }

    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    pub fn stats(&self) -> QueueStats {
        let stats = match self.ends {
            Some(ends) => QueueStats {
                len: self.len,
                segments: self.chain.segments(),
                capacity: self.chain.capacities(ends.head).sum(),
                head_capacity: Some(self.chain[ends.head].ring().capacity()),
                tail_capacity: Some(self.chain[ends.tail].ring().capacity()),
                ..Default::default()
            },
            None => QueueStats::default(),
        };
        stats.with_counters(self.chain.counters())
    }

    /// Iterator dari depan ke belakang
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            chain: &self.chain,
            segment: self.ends.map(|ends| ends.head),
            index: 0,
            remaining: self.len,
        }
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Queue<T> {
    fn clone(&self) -> Self {
        let mut queue = Self::from_valid(self.config);
        queue.extend(self.iter().cloned());
        queue
    }
}

impl<T: fmt::Debug> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for Queue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

impl<T> IntoIterator for Queue<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter(self)
    }
}

impl<'a, T> IntoIterator for &'a Queue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Iterator pinjaman dari [`Queue::iter`]
pub struct Iter<'a, T> {
    chain: &'a SegmentChain<T>,
    segment: Option<SegmentId>,
    index: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let chain = self.chain;
        while let Some(id) = self.segment {
            let segment = &chain[id];
            if let Some(value) = segment.ring().get(self.index) {
                self.index += 1;
                self.remaining -= 1;
                return Some(value);
            }
            self.segment = segment.next();
            self.index = 0;
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Iterator pemilik: shift sampai queue kosong
pub struct IntoIter<T>(Queue<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.0.shift()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len(), Some(self.0.len()))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}
