//! Ring Buffer kapasitas tetap - storage untuk satu segmen
//!
//! Prinsip desain:
//! - Kapasitas power-of-2: index = `cursor & mask`, tanpa modulo
//! - Cursor `u32` yang terus naik dan wrap saat overflow
//! - Storage dialokasi sekali saat konstruksi, tidak pernah di-resize
//! - Satu pemilik, tanpa atomic: pemanggil yang menyerialisasi akses

use std::fmt;
use std::mem::MaybeUninit;

/// Kapasitas maksimum satu buffer.
///
/// `write - read` harus tetap muat di cursor `u32`.
pub const MAX_SEGMENT_CAPACITY: usize = 1 << 31;

/// Buffer melingkar dengan kapasitas tetap.
///
/// Slot di rentang logis `[read, write)` (di-wrap dengan `mask`) sudah
/// terinisialisasi; slot lainnya belum.
pub struct RingBuffer<T> {
    read: u32,
    write: u32,
    mask: u32,
    buffer: Box<[MaybeUninit<T>]>,
}

impl<T> RingBuffer<T> {
    /// Membuat buffer kosong berisi `capacity` slot.
    ///
    /// # Panics
    /// Panic jika `capacity` nol, bukan power of 2, atau lebih besar dari
    /// [`MAX_SEGMENT_CAPACITY`].
    pub fn new(capacity: usize) -> Self {
        assert!(
            capacity > 0 && capacity.is_power_of_two(),
            "capacity must be a power of 2"
        );
        assert!(
            capacity <= MAX_SEGMENT_CAPACITY,
            "capacity {} exceeds {}",
            capacity,
            MAX_SEGMENT_CAPACITY
        );

        let buffer = (0..capacity)
            .map(|_| MaybeUninit::uninit())
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Self {
            read: 0,
            write: 0,
            mask: (capacity - 1) as u32,
            buffer,
        }
    }

    /// Push `value` ke buffer.
    ///
    /// Returns `Err(value)` tanpa mengubah buffer jika penuh, supaya
    /// pemanggil bisa memindahkan elemen ke buffer lain.
    #[inline(always)]
    pub fn push(&mut self, value: T) -> Result<(), T> {
        if self.is_full() {
            return Err(value);
        }

        self.buffer[self.slot(self.write)].write(value);
        self.write = self.write.wrapping_add(1);
        Ok(())
    }

    /// Ambil elemen tertua, atau `None` jika kosong.
    #[inline(always)]
    pub fn shift(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let slot = self.slot(self.read);
        self.read = self.read.wrapping_add(1);

        // SAFETY: `slot` ada di dalam `[read, write)` sehingga sudah terinisialisasi.
        // `read` sudah dimajukan, kepemilikan nilai pindah ke pemanggil.
        Some(unsafe { self.buffer[slot].assume_init_read() })
    }

    /// Elemen tertua tanpa mengambilnya
    #[inline(always)]
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    #[inline(always)]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            return None;
        }
        let slot = self.slot(self.read);
        // SAFETY: buffer tidak kosong, slot di `read` sudah terinisialisasi
        Some(unsafe { self.buffer[slot].assume_init_mut() })
    }

    /// Elemen di posisi logis `index`, dihitung dari yang tertua
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len() {
            return None;
        }
        let slot = self.slot(self.read.wrapping_add(index as u32));
        // SAFETY: `index < len`, slot berada di dalam `[read, write)`
        Some(unsafe { self.buffer[slot].assume_init_ref() })
    }

    /// Drop semua elemen dan reset cursor
    #[allow(dead_code)]
    pub fn clear(&mut self) {
        while self.shift().is_some() {}
        self.read = 0;
        self.write = 0;
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.write.wrapping_sub(self.read) as usize
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.read == self.write
    }

    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    #[inline(always)]
    fn slot(&self, cursor: u32) -> usize {
        (cursor & self.mask) as usize
    }

    /// Mulai kedua cursor dari `start` untuk menguji wraparound
    /// tanpa push empat miliar elemen
    #[cfg(test)]
    pub(crate) fn with_cursor(capacity: usize, start: u32) -> Self {
        let mut rb = Self::new(capacity);
        rb.read = start;
        rb.write = start;
        rb
    }
}

impl<T> Drop for RingBuffer<T> {
    fn drop(&mut self) {
        while self.shift().is_some() {}
    }
}

impl<T: fmt::Debug> fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("read", &self.read)
            .field("write", &self.write)
            .field("capacity", &self.capacity())
            .finish()
    }
}
