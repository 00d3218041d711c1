//! Bounds-checked little-endian reads over `.vox` chunk data

use super::CHUNK_HEADER_LEN;
use std::fmt;

/// A read ran past the end of the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfBounds {
    pub offset: usize,
    pub needed: usize,
    pub available: usize,
}

impl fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "needed {} bytes at offset {}, only {} available",
            self.needed, self.offset, self.available
        )
    }
}

impl std::error::Error for OutOfBounds {}

/// One chunk with its content and nested children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    pub id: [u8; 4],
    pub content: &'a [u8],
    pub children: &'a [u8],
}

impl<'a> Chunk<'a> {
    /// Reader over this chunk's content bytes
    pub fn reader(&self) -> ChunkReader<'a> {
        ChunkReader::new(self.content)
    }

    /// Iterator over the nested chunks
    pub fn child_chunks(&self) -> Chunks<'a> {
        ChunkReader::new(self.children).chunks(0)
    }
}

/// Zero-copy reader over a byte slice
#[derive(Debug, Clone, Copy)]
pub struct ChunkReader<'a> {
    data: &'a [u8],
}

impl<'a> ChunkReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow `len` bytes starting at `offset`
    #[inline]
    pub fn slice(&self, offset: usize, len: usize) -> Result<&'a [u8], OutOfBounds> {
        offset
            .checked_add(len)
            .and_then(|end| self.data.get(offset..end))
            .ok_or(OutOfBounds {
                offset,
                needed: len,
                available: self.data.len().saturating_sub(offset),
            })
    }

    #[inline]
    pub fn read_u32_le(&self, offset: usize) -> Result<u32, OutOfBounds> {
        let b = self.slice(offset, 4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    #[inline]
    pub fn read_id(&self, offset: usize) -> Result<[u8; 4], OutOfBounds> {
        let b = self.slice(offset, 4)?;
        Ok([b[0], b[1], b[2], b[3]])
    }

    /// Decode the chunk whose header starts at `offset`. Returns the chunk
    /// and the offset just past its children.
    pub fn chunk_at(&self, offset: usize) -> Result<(Chunk<'a>, usize), OutOfBounds> {
        let id = self.read_id(offset)?;
        let content_len = self.read_u32_le(offset + 4)? as usize;
        let children_len = self.read_u32_le(offset + 8)? as usize;

        let content_start = offset + CHUNK_HEADER_LEN;
        let content = self.slice(content_start, content_len)?;
        let children_start = content_start + content_len;
        let children = self.slice(children_start, children_len)?;

        Ok((
            Chunk {
                id,
                content,
                children,
            },
            children_start + children_len,
        ))
    }

    /// Sibling chunks from `offset` to the end of the buffer
    pub fn chunks(&self, offset: usize) -> Chunks<'a> {
        Chunks {
            reader: *self,
            offset,
        }
    }
}

/// Iterator over consecutive sibling chunks. Stops after the first error.
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    reader: ChunkReader<'a>,
    offset: usize,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Result<Chunk<'a>, OutOfBounds>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.reader.len() {
            return None;
        }
        match self.reader.chunk_at(self.offset) {
            Ok((chunk, next)) => {
                self.offset = next;
                Some(Ok(chunk))
            }
            Err(err) => {
                self.offset = self.reader.len();
                Some(Err(err))
            }
        }
    }
}
