//! Strategy-safe text chunking
//!
//! A chunk boundary is only placed where the active strategy is guaranteed to
//! end a token regardless of what surrounds the boundary. Segmenting each
//! chunk on its own then yields exactly the tokens a single pass would. When
//! no such position exists after a target offset, the chunk grows until one
//! does (or the text ends).

use crate::domain::Strategy;
use crate::error::{Error, Result};
use std::ops::Range;

/// Represents a chunk of input with metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk<'a> {
    /// The bytes of this chunk
    pub content: &'a [u8],

    /// Start offset in the original input (in bytes)
    pub start_offset: usize,

    /// End offset in the original input (in bytes)
    pub end_offset: usize,

    /// Chunk index in the sequence
    pub index: usize,

    /// Total number of chunks
    pub total_chunks: usize,
}

impl TextChunk<'_> {
    /// Returns the byte length of this chunk
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns true if this chunk is empty
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Returns true if this is the first chunk
    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    /// Returns true if this is the last chunk
    pub fn is_last(&self) -> bool {
        self.index + 1 == self.total_chunks
    }

    /// Range covered in the original input
    pub fn range(&self) -> Range<usize> {
        self.start_offset..self.end_offset
    }
}

/// Manages input chunking with a target chunk size
#[derive(Debug, Clone)]
pub struct ChunkManager {
    /// Target size for each chunk in bytes
    chunk_size: usize,
}

impl ChunkManager {
    /// Creates a new chunk manager with the given target size
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    /// Creates a manager that aims for `count` chunks over `len` bytes
    pub fn for_chunk_count(len: usize, count: usize) -> Self {
        Self::new(len.div_ceil(count.max(1)))
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Chunks `input` at positions that are safe for `strategy`
    ///
    /// Text strategies require valid UTF-8; the byte strategy accepts anything.
    pub fn chunk<'a>(&self, input: &'a [u8], strategy: Strategy) -> Result<Vec<TextChunk<'a>>> {
        if input.is_empty() {
            return Ok(vec![]);
        }

        let text = if strategy.is_byte_level() {
            None
        } else {
            Some(std::str::from_utf8(input)?)
        };

        let mut bounds = vec![0];
        let mut current_pos = 0;

        while current_pos + self.chunk_size < input.len() {
            let target = current_pos + self.chunk_size;
            let cut = match text {
                Some(text) => find_safe_cut(text, target, strategy),
                None => Some(target),
            };

            let Some(cut) = cut else {
                break;
            };

            // Ensure we make progress
            if cut <= current_pos {
                return Err(Error::Chunking {
                    reason: format!("cut at {cut} does not advance past {current_pos}"),
                });
            }

            bounds.push(cut);
            current_pos = cut;
        }
        bounds.push(input.len());

        let total_chunks = bounds.len() - 1;
        let chunks = bounds
            .windows(2)
            .enumerate()
            .map(|(index, pair)| TextChunk {
                content: &input[pair[0]..pair[1]],
                start_offset: pair[0],
                end_offset: pair[1],
                index,
                total_chunks,
            })
            .collect();

        Ok(chunks)
    }
}

/// Finds the first position at or after `from` where `strategy` always
/// separates tokens
pub fn find_safe_cut(text: &str, from: usize, strategy: Strategy) -> Option<usize> {
    if from == 0 || from >= text.len() {
        return None;
    }

    let start = find_utf8_boundary(text.as_bytes(), from);
    let mut prev = text[..start].chars().next_back()?;

    for (offset, ch) in text[start..].char_indices() {
        if strategy.is_safe_cut(prev, ch) {
            return Some(start + offset);
        }
        prev = ch;
    }

    None
}

/// Moves `pos` forward to the nearest UTF-8 character boundary
fn find_utf8_boundary(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && !is_utf8_char_boundary(bytes, pos) {
        pos += 1;
    }
    pos
}

/// Checks if a position is at a valid UTF-8 character boundary
#[inline]
fn is_utf8_char_boundary(bytes: &[u8], pos: usize) -> bool {
    if pos == 0 || pos >= bytes.len() {
        return true;
    }

    // UTF-8 continuation bytes start with 10xxxxxx
    (bytes[pos] & 0b1100_0000) != 0b1000_0000
}
