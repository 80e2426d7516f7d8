//! Growable byte buffer used by the async engine
//!
//! Producers append at the write cursor; the consumer reads from the read
//! cursor. The engine never copies a filled buffer; it exchanges storage
//! with [`Buffer::swap`].

/// Capacity of a buffer created with [`Buffer::new`] (10 MiB)
pub const DEFAULT_BUFFER_SIZE: usize = 10 * 1024 * 1024;

/// Below this capacity the buffer grows by doubling (8 MiB)
pub const THRESHOLD_BUFFER_SIZE: usize = 8 * 1024 * 1024;

/// At or above the threshold the buffer grows in steps of this size (1 MiB)
pub const INCREMENT_BUFFER_SIZE: usize = 1024 * 1024;

/// Byte store with `0 <= reader <= writer <= capacity`
///
/// # Example
///
/// ```
/// use bufferlog::core::Buffer;
///
/// let mut buffer = Buffer::with_capacity(4);
/// buffer.push(b"hello");
/// assert_eq!(buffer.readable_slice(), b"hello");
///
/// buffer.advance_reader(2);
/// assert_eq!(buffer.readable_slice(), b"llo");
///
/// buffer.reset();
/// assert!(buffer.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Buffer {
    data: Vec<u8>,
    reader: usize,
    writer: usize,
}

impl Buffer {
    /// Create a buffer with [`DEFAULT_BUFFER_SIZE`] bytes of capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUFFER_SIZE)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity],
            reader: 0,
            writer: 0,
        }
    }

    /// Append `bytes`, growing the storage first if needed
    pub fn push(&mut self, bytes: &[u8]) {
        self.ensure_writable(bytes.len());
        let end = self.writer + bytes.len();
        self.data[self.writer..end].copy_from_slice(bytes);
        self.writer = end;
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn writable_size(&self) -> usize {
        self.data.len() - self.writer
    }

    #[inline]
    pub fn readable_size(&self) -> usize {
        self.writer - self.reader
    }

    /// Bytes pushed but not yet consumed
    #[inline]
    pub fn readable_slice(&self) -> &[u8] {
        &self.data[self.reader..self.writer]
    }

    /// Mark `len` readable bytes as consumed
    ///
    /// # Panics
    ///
    /// Panics if `len` exceeds [`readable_size`](Self::readable_size).
    pub fn advance_reader(&mut self, len: usize) {
        assert!(
            len <= self.readable_size(),
            "advance_reader({}) past readable data ({} bytes)",
            len,
            self.readable_size()
        );
        self.reader += len;
    }

    /// Rewind both cursors, keeping the allocation
    #[inline]
    pub fn reset(&mut self) {
        self.reader = 0;
        self.writer = 0;
    }

    /// Exchange storage and cursors with `other` without copying
    #[inline]
    pub fn swap(&mut self, other: &mut Buffer) {
        std::mem::swap(self, other);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.reader == self.writer
    }

    fn ensure_writable(&mut self, len: usize) {
        if len <= self.writable_size() {
            return;
        }
        let mut capacity = self.capacity();
        if capacity < THRESHOLD_BUFFER_SIZE {
            capacity = capacity * 2 + len;
        } else {
            while capacity - self.writer < len {
                capacity += INCREMENT_BUFFER_SIZE;
            }
        }
        self.data.resize(capacity, 0);
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}
