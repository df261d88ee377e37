//! Fixed-capacity byte buffer.
//!
//! Every accumulator in the tokenizer and the extractor has a hard capacity.
//! Writes past capacity are dropped, not reported as errors, and the buffer
//! never grows. [`BoundedBuffer::is_truncated`] records that it happened.

use std::borrow::Cow;

/// A byte buffer that silently truncates at a fixed capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedBuffer {
    bytes: Vec<u8>,
    capacity: usize,
    truncated: bool,
}

impl BoundedBuffer {
    /// Create an empty buffer holding at most `capacity` bytes.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            capacity,
            truncated: false,
        }
    }

    /// Append one byte, or drop it if the buffer is full.
    pub fn push(&mut self, byte: u8) {
        if self.bytes.len() < self.capacity {
            self.bytes.push(byte);
        } else {
            self.truncated = true;
        }
    }

    /// Append as much of `text` as fits, cutting on a character boundary.
    pub fn push_str(&mut self, text: &str) {
        let room = self.capacity - self.bytes.len();
        if text.len() <= room {
            self.bytes.extend_from_slice(text.as_bytes());
            return;
        }
        let mut cut = room;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        self.bytes.extend_from_slice(&text.as_bytes()[..cut]);
        self.truncated = true;
    }

    /// Remove and return the last byte.
    pub fn pop(&mut self) -> Option<u8> {
        self.bytes.pop()
    }

    /// The last byte, if any.
    #[must_use]
    pub fn last(&self) -> Option<u8> {
        self.bytes.last().copied()
    }

    /// Empty the buffer and forget any earlier truncation.
    pub fn clear(&mut self) {
        self.bytes.clear();
        self.truncated = false;
    }

    /// Number of bytes held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether no bytes are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Maximum number of bytes this buffer retains.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether any write was dropped since the last [`clear`](Self::clear).
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Raw contents.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Contents as text; invalid UTF-8 becomes U+FFFD.
    #[must_use]
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    /// Take the contents as text and leave the buffer empty.
    pub fn take_string(&mut self) -> String {
        let text = self.to_string_lossy().into_owned();
        self.clear();
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_bytes_past_capacity() {
        let mut buffer = BoundedBuffer::new(3);
        for byte in b"abcdef" {
            buffer.push(*byte);
        }
        assert_eq!(buffer.as_bytes(), b"abc");
        assert!(buffer.is_truncated());
        assert_eq!(buffer.len(), buffer.capacity());
    }

    #[test]
    fn push_str_cuts_on_char_boundary() {
        let mut buffer = BoundedBuffer::new(4);
        buffer.push_str("ab");
        // "é" is two bytes, "ж" is two bytes: only "é" fits
        buffer.push_str("éж");
        assert_eq!(buffer.to_string_lossy(), "abé");
        assert!(buffer.is_truncated());

        let mut narrow = BoundedBuffer::new(1);
        narrow.push_str("ж");
        assert!(narrow.is_empty());
        assert!(narrow.is_truncated());
    }

    #[test]
    fn clear_resets_truncation() {
        let mut buffer = BoundedBuffer::new(1);
        buffer.push_str("xy");
        assert!(buffer.is_truncated());
        assert_eq!(buffer.take_string(), "x");
        assert!(buffer.is_empty());
        assert!(!buffer.is_truncated());
    }

    #[test]
    fn pop_and_last() {
        let mut buffer = BoundedBuffer::new(8);
        buffer.push_str("a /");
        assert_eq!(buffer.last(), Some(b'/'));
        assert_eq!(buffer.pop(), Some(b'/'));
        assert_eq!(buffer.last(), Some(b' '));
    }
}
