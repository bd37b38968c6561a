// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bounded render buffer.

use std::collections::TryReserveError;
use std::fmt::Write;

/**
A fixed-capacity text buffer.

Text written past the capacity is dropped, but its length is still counted, so after rendering
[`LineBuffer::would_be_len`] reports how long the text would have been with unlimited room.
Truncation always lands on a UTF-8 boundary, and once anything has been dropped no later write is
kept, so the buffer always holds a prefix of the full text.

The buffer is allocated once, up front, and never grows.
*/
#[derive(Debug)]
pub struct LineBuffer {
    text: String,
    capacity: usize,
    would_be_len: usize,
    truncated: bool,
}

impl LineBuffer {
    /// Allocates a buffer holding at most `capacity` bytes.
    pub fn acquire(capacity: usize) -> Result<Self, TryReserveError> {
        let mut text = String::new();
        text.try_reserve_exact(capacity)?;
        Ok(Self {
            text,
            capacity,
            would_be_len: 0,
            truncated: false,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Length in bytes of everything written, including the dropped part.
    pub fn would_be_len(&self) -> usize {
        self.would_be_len
    }

    /// Number of bytes that did not fit. Zero unless the render was truncated.
    pub fn overflow(&self) -> usize {
        self.would_be_len.saturating_sub(self.capacity)
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

impl Write for LineBuffer {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        self.would_be_len = self.would_be_len.saturating_add(s.len());
        if self.truncated {
            return Ok(());
        }
        let room = self.capacity - self.text.len();
        if s.len() <= room {
            self.text.push_str(s);
        } else {
            let mut end = room;
            while !s.is_char_boundary(end) {
                end -= 1;
            }
            self.text.push_str(&s[..end]);
            self.truncated = true;
        }
        Ok(())
    }
}
