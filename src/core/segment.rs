//! Segment Chain: Linked list ring buffer di dalam arena
//!
//! Prinsip desain:
//! - Segmen disimpan di slot `Vec`, dihubungkan dengan [`SegmentId`] bukan
//!   pointer, sehingga queue bisa menyimpan id head dan tail tanpa aliasing
//! - Push tumpah ke segmen baru yang lebih besar saat tail penuh
//! - Shift melepas head yang sudah kosong dan mengecilkan segmen terakhir
//! - Perubahan head/tail dilaporkan lewat [`Link`]

use std::ops::{Index, IndexMut};

use tracing::{debug, trace};

use super::ring_buffer::RingBuffer;
use crate::config::Growth;

/// Indeks slot sebuah segmen di dalam [`SegmentChain`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentId(usize);

/// Efek operasi segmen terhadap ujung chain tempat ia dipanggil
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Link {
    /// Segmen masih menjadi head (shift) atau tail (push)
    Unchanged,
    /// Segmen lain menggantikannya; pemanggil wajib menyimpan id ini
    Replaced(SegmentId),
}

/// Satu node chain: ring buffer plus link ke segmen berikutnya
#[derive(Debug)]
pub struct Segment<T> {
    ring: RingBuffer<T>,
    next: Option<SegmentId>,
}

impl<T> Segment<T> {
    fn new(capacity: usize) -> Self {
        Self {
            ring: RingBuffer::new(capacity),
            next: None,
        }
    }

    #[inline]
    pub fn ring(&self) -> &RingBuffer<T> {
        &self.ring
    }

    #[inline]
    pub fn next(&self) -> Option<SegmentId> {
        self.next
    }
}

/// Counter seumur hidup untuk perubahan struktur chain
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ChainCounters {
    /// Segmen ditambahkan karena tail penuh
    pub grows: u64,
    /// Head kosong yang dilepas
    pub releases: u64,
    /// Segmen tunggal dialokasi ulang dengan setengah kapasitas
    pub shrinks: u64,
}

/// Arena pemilik semua segmen dari satu queue.
///
/// Slot kosong dipakai ulang untuk segmen baru; buffer segmen yang dilepas
/// selalu di-drop, tidak pernah didaur ulang. Begitu chain kembali ke satu
/// segmen, arena dipadatkan ke slot 0.
///
/// Id yang sudah dilepas tidak valid lagi: indexing dengan id tersebut
/// akan panic.
#[derive(Debug)]
pub struct SegmentChain<T> {
    slots: Vec<Option<Segment<T>>>,
    vacant: Vec<usize>,
    min_capacity: usize,
    growth: Growth,
    counters: ChainCounters,
}

impl<T> SegmentChain<T> {
    pub fn new(min_capacity: usize, growth: Growth) -> Self {
        Self {
            slots: Vec::new(),
            vacant: Vec::new(),
            min_capacity,
            growth,
            counters: ChainCounters::default(),
        }
    }

    /// Alokasi segmen kosong berkapasitas minimum
    pub fn alloc(&mut self) -> SegmentId {
        self.insert(Segment::new(self.min_capacity))
    }

    /// Push ke `tail`, tambah segmen yang lebih besar jika penuh
    pub fn push(&mut self, tail: SegmentId, value: T) -> Link {
        let growth = self.growth;
        let segment = &mut self[tail];
        debug_assert!(segment.next.is_none(), "push into non-tail segment");

        let value = match segment.ring.push(value) {
            Ok(()) => return Link::Unchanged,
            Err(value) => value,
        };

        let current = segment.ring.capacity();
        let mut spill = Segment::new(growth.grown(current));
        let pushed = spill.ring.push(value);
        debug_assert!(pushed.is_ok(), "fresh segment rejected a push");

        let id = self.insert(spill);
        self[tail].next = Some(id);
        self.counters.grows += 1;
        trace!(from = current, to = self[id].ring.capacity(), "segment appended");

        Link::Replaced(id)
    }

    /// Shift dari `head`.
    ///
    /// Segmen kosong yang punya penerus dilepas dan penerusnya menjadi head.
    /// Segmen kosong tanpa penerus tetap ada, dikecilkan satu langkah menuju
    /// kapasitas minimum, lalu arena dipadatkan sehingga segmen itu bisa
    /// pindah id (dilaporkan sebagai [`Link::Replaced`]).
    pub fn shift(&mut self, head: SegmentId) -> (Option<T>, Link) {
        let mut current = head;
        loop {
            let segment = &mut self[current];
            if let Some(value) = segment.ring.shift() {
                return (Some(value), Self::link(head, current));
            }

            let next = segment.next;
            match next {
                Some(next) => {
                    self.release(current);
                    current = next;
                }
                None => {
                    self.shrink(current);
                    let sole = self.compact(current);
                    return (None, Self::link(head, sole));
                }
            }
        }
    }

    /// Elemen pertama chain yang dimulai dari `head`
    pub fn front(&self, head: SegmentId) -> Option<&T> {
        self.first_occupied(head)
            .and_then(|id| self[id].ring.front())
    }

    pub fn front_mut(&mut self, head: SegmentId) -> Option<&mut T> {
        let id = self.first_occupied(head)?;
        self[id].ring.front_mut()
    }

    /// Jumlah segmen yang masih hidup
    pub fn segments(&self) -> usize {
        self.slots.len() - self.vacant.len()
    }

    /// Kapasitas segmen dari `head`, urut sesuai chain
    pub fn capacities(&self, head: SegmentId) -> impl Iterator<Item = usize> + '_ {
        let mut cursor = Some(head);
        std::iter::from_fn(move || {
            let id = cursor?;
            cursor = self[id].next;
            Some(self[id].ring.capacity())
        })
    }

    pub fn counters(&self) -> ChainCounters {
        self.counters
    }

    /// Drop semua segmen dan elemen. Counter tetap disimpan.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.vacant.clear();
    }

    fn first_occupied(&self, head: SegmentId) -> Option<SegmentId> {
        let mut cursor = Some(head);
        while let Some(id) = cursor {
            if !self[id].ring.is_empty() {
                return Some(id);
            }
            cursor = self[id].next;
        }
        None
    }

    fn shrink(&mut self, id: SegmentId) {
        let min = self.min_capacity;
        let growth = self.growth;
        let segment = &mut self[id];
        let current = segment.ring.capacity();

        if let Some(smaller) = growth.shrunk(current, min) {
            segment.ring = RingBuffer::new(smaller);
            self.counters.shrinks += 1;
            debug!(from = current, to = smaller, "sole segment shrunk");
        }
    }

    /// Pindahkan segmen tunggal `sole` ke slot 0 dan buang slot kosong
    /// sisa burst. Tidak ada kerja jika arena sudah satu slot.
    fn compact(&mut self, sole: SegmentId) -> SegmentId {
        if self.slots.len() == 1 {
            return sole;
        }
        debug_assert_eq!(self.segments(), 1, "compacting a chain with live neighbours");

        let segment = self.slots[sole.0].take();
        let dropped = self.slots.len() - 1;

        self.slots.clear();
        self.slots.push(segment);
        self.slots.shrink_to_fit();
        self.vacant.clear();
        self.vacant.shrink_to_fit();
        trace!(slots = dropped, "arena compacted");

        SegmentId(0)
    }

    fn release(&mut self, id: SegmentId) {
        if let Some(segment) = self.slots[id.0].take() {
            self.vacant.push(id.0);
            self.counters.releases += 1;
            trace!(capacity = segment.ring.capacity(), "drained segment released");
        }
    }

    fn insert(&mut self, segment: Segment<T>) -> SegmentId {
        match self.vacant.pop() {
            Some(slot) => {
                self.slots[slot] = Some(segment);
                SegmentId(slot)
            }
            None => {
                self.slots.push(Some(segment));
                SegmentId(self.slots.len() - 1)
            }
        }
    }

    #[inline]
    fn link(head: SegmentId, current: SegmentId) -> Link {
        if current == head {
            Link::Unchanged
        } else {
            Link::Replaced(current)
        }
    }
}

impl<T> Index<SegmentId> for SegmentChain<T> {
    type Output = Segment<T>;

    /// # Panics
    /// Panic jika `id` sudah dilepas atau berasal dari chain lain
    #[inline]
    fn index(&self, id: SegmentId) -> &Segment<T> {
        match self.slots.get(id.0) {
            Some(Some(segment)) => segment,
            _ => panic!("segment {} is not live", id.0),
        }
    }
}

impl<T> IndexMut<SegmentId> for SegmentChain<T> {
    #[inline]
    fn index_mut(&mut self, id: SegmentId) -> &mut Segment<T> {
        match self.slots.get_mut(id.0) {
            Some(Some(segment)) => segment,
            _ => panic!("segment {} is not live", id.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: usize = 4;

    fn chain() -> SegmentChain<usize> {
        SegmentChain::new(SIZE, Growth::Geometric)
    }

    #[test]
    fn test_push_spills_into_grown_segment() {
        let mut chain = chain();
        let first = chain.alloc();
        let mut last = first;

        for i in 0..SIZE * 3 {
            if let Link::Replaced(id) = chain.push(last, i) {
                last = id;
            }
        }

        assert_ne!(first, last);
        assert!(chain[first].ring().is_full(), "first segment should be full");
        assert_eq!(chain[first].next(), Some(last), "first should link to last");
        assert!(chain[last].next().is_none(), "last should terminate the chain");
        assert_eq!(chain.capacities(first).collect::<Vec<_>>(), vec![4, 8]);
        assert_eq!(chain.counters().grows, 1);
    }

    #[test]
    fn test_fixed_growth_keeps_capacity() {
        let mut chain = SegmentChain::new(SIZE, Growth::Fixed);
        let first = chain.alloc();
        let mut last = first;
        for i in 0..SIZE * 3 {
            if let Link::Replaced(id) = chain.push(last, i) {
                last = id;
            }
        }
        assert_eq!(chain.capacities(first).collect::<Vec<_>>(), vec![4, 4, 4]);
        assert_eq!(chain.segments(), 3);
    }

    #[test]
    fn test_shift_releases_drained_heads() {
        let mut chain = chain();
        let mut first = chain.alloc();
        let mut last = first;
        let total = SIZE + SIZE * 2;

        for i in 0..total {
            if let Link::Replaced(id) = chain.push(last, i) {
                last = id;
            }
        }

        let mut unlinks = 0;
        for i in 0..total {
            let (value, link) = chain.shift(first);
            assert_eq!(value, Some(i), "should have FIFO semantics");
            if let Link::Replaced(id) = link {
                first = id;
                unlinks += 1;
            }
        }

        assert_eq!(unlinks, 1);
        assert_eq!(first, last, "last segment should have been promoted to first");
        assert_eq!(chain.segments(), 1);
        assert_eq!(chain.counters().releases, 1);
    }

    #[test]
    fn test_empty_sole_segment_shrinks_to_floor() {
        let mut chain = chain();
        let mut first = chain.alloc();
        let mut last = first;
        // 4 + 8 + 16 slots
        for i in 0..28 {
            if let Link::Replaced(id) = chain.push(last, i) {
                last = id;
            }
        }
        for _ in 0..28 {
            if let (_, Link::Replaced(id)) = chain.shift(first) {
                first = id;
            }
        }
        assert_eq!(first, last);
        assert_eq!(chain[first].ring().capacity(), 16);

        // first empty shift also moves the sole segment to slot 0
        let (value, link) = chain.shift(first);
        assert_eq!(value, None, "should be empty");
        assert_eq!(link, Link::Replaced(SegmentId(0)));
        first = SegmentId(0);
        assert_eq!(chain[first].ring().capacity(), 8);

        for cap in [4, 4, 4] {
            let (value, link) = chain.shift(first);
            assert_eq!(value, None, "should be empty");
            assert_eq!(link, Link::Unchanged, "sole segment stays head");
            assert_eq!(chain[first].ring().capacity(), cap);
        }
        assert_eq!(chain.counters().shrinks, 2);
    }

    #[test]
    fn test_drained_burst_compacts_arena() {
        let mut chain = SegmentChain::new(SIZE, Growth::Fixed);
        let mut first = chain.alloc();
        let mut last = first;

        for i in 0..40_000 {
            if let Link::Replaced(id) = chain.push(last, i) {
                last = id;
            }
        }
        assert_eq!(chain.segments(), 10_000);

        for i in 0..40_000 {
            let (value, link) = chain.shift(first);
            assert_eq!(value, Some(i), "should have FIFO semantics");
            if let Link::Replaced(id) = link {
                first = id;
            }
        }
        assert_eq!(first, last);
        assert_eq!(chain.slots.len(), 10_000, "compaction waits for an empty shift");

        let (value, link) = chain.shift(first);
        assert_eq!(value, None);
        assert_eq!(link, Link::Replaced(SegmentId(0)));
        assert_eq!(chain.segments(), 1);
        assert_eq!(chain.slots.len(), 1);
        assert!(chain.slots.capacity() < 16, "slots kept {}", chain.slots.capacity());
        assert!(chain.vacant.is_empty());
        assert!(chain.vacant.capacity() < 16, "vacant kept {}", chain.vacant.capacity());

        // compacted chain keeps working from slot 0
        let mut first = SegmentId(0);
        let mut last = first;
        for i in 0..10 {
            if let Link::Replaced(id) = chain.push(last, i) {
                last = id;
            }
        }
        for i in 0..10 {
            let (value, link) = chain.shift(first);
            assert_eq!(value, Some(i));
            if let Link::Replaced(id) = link {
                first = id;
            }
        }
        assert_eq!(first, last);
    }

    #[test]
    fn test_compaction_is_noop_for_single_slot() {
        let mut chain = chain();
        let head = chain.alloc();
        assert_eq!(chain.push(head, 1), Link::Unchanged);
        assert_eq!(chain.shift(head), (Some(1), Link::Unchanged));
        assert_eq!(chain.shift(head), (None, Link::Unchanged));
        assert_eq!(chain.slots.len(), 1);
    }

    #[test]
    fn test_front_skips_drained_head() {
        let mut chain = chain();
        let head = chain.alloc();
        let mut last = head;
        for i in 0..SIZE + 1 {
            if let Link::Replaced(id) = chain.push(last, i) {
                last = id;
            }
        }
        for _ in 0..SIZE {
            let (_, link) = chain.shift(head);
            assert_eq!(link, Link::Unchanged);
        }
        // head is empty but not yet released
        assert_eq!(chain.segments(), 2);
        assert_eq!(chain.front(head), Some(&SIZE));
        *chain.front_mut(head).unwrap() += 1;
        assert_eq!(chain.shift(head), (Some(SIZE + 1), Link::Replaced(last)));
    }

    #[test]
    fn test_vacant_slots_are_reused() {
        let mut chain = chain();
        let mut head = chain.alloc();
        let mut tail = head;
        for round in 0..5 {
            for i in 0..SIZE * 2 {
                if let Link::Replaced(id) = chain.push(tail, round * 100 + i) {
                    tail = id;
                }
            }
            for _ in 0..SIZE * 2 {
                if let (_, Link::Replaced(id)) = chain.shift(head) {
                    head = id;
                }
            }
        }
        assert!(chain.slots.len() <= 3, "slots grew to {}", chain.slots.len());
    }
}
