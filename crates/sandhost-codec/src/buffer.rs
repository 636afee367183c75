//! Capacity-checked writer and bounds-checked reader

use crate::error::{CodecError, CodecResult};
use bytes::{BufMut, Bytes, BytesMut};
use sandhost_primitives::{Address, H256};

/// Fixed-capacity message builder.
///
/// Every `put_*` checks the capacity first and leaves the buffer untouched on
/// failure. Memory is reserved as bytes are accepted, never for the whole
/// capacity up front.
#[derive(Debug)]
pub struct ScratchBuffer {
    buf: BytesMut,
    capacity: usize,
}

impl ScratchBuffer {
    /// Create an empty buffer that will hold at most `capacity` bytes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::new(),
            capacity,
        }
    }

    /// Maximum number of bytes
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes written so far
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been written
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Bytes still available
    pub fn remaining(&self) -> usize {
        self.capacity - self.buf.len()
    }

    /// Fail unless `additional` more bytes fit; reserve them if they do
    pub fn ensure(&mut self, additional: usize) -> CodecResult<()> {
        let required = self
            .buf
            .len()
            .checked_add(additional)
            .ok_or(CodecError::BufferOverflow {
                required: usize::MAX,
                capacity: self.capacity,
            })?;
        if required > self.capacity {
            return Err(CodecError::BufferOverflow {
                required,
                capacity: self.capacity,
            });
        }
        self.buf.reserve(additional);
        Ok(())
    }

    /// Append one byte
    pub fn put_u8(&mut self, value: u8) -> CodecResult<()> {
        self.ensure(1)?;
        self.buf.put_u8(value);
        Ok(())
    }

    /// Append a little-endian u32
    pub fn put_u32_le(&mut self, value: u32) -> CodecResult<()> {
        self.ensure(4)?;
        self.buf.put_u32_le(value);
        Ok(())
    }

    /// Append a little-endian i32
    pub fn put_i32_le(&mut self, value: i32) -> CodecResult<()> {
        self.ensure(4)?;
        self.buf.put_i32_le(value);
        Ok(())
    }

    /// Append a little-endian u64
    pub fn put_u64_le(&mut self, value: u64) -> CodecResult<()> {
        self.ensure(8)?;
        self.buf.put_u64_le(value);
        Ok(())
    }

    /// Append raw bytes
    pub fn put_slice(&mut self, data: &[u8]) -> CodecResult<()> {
        self.ensure(data.len())?;
        self.buf.put_slice(data);
        Ok(())
    }

    /// Append a u32 length prefix followed by the bytes
    pub fn put_var_slice(&mut self, data: &[u8]) -> CodecResult<()> {
        let len = u32::try_from(data.len()).map_err(|_| CodecError::BufferOverflow {
            required: data.len(),
            capacity: u32::MAX as usize,
        })?;
        self.ensure(4 + data.len())?;
        self.buf.put_u32_le(len);
        self.buf.put_slice(data);
        Ok(())
    }

    /// Written bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Finish building and hand out the message
    pub fn freeze(self) -> Bytes {
        self.buf.freeze()
    }
}

/// Cursor over a received message; every read is bounds-checked
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Start reading at the beginning of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current offset
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes not yet read
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Whether everything has been read
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Take the next `n` bytes
    pub fn take(&mut self, n: usize) -> CodecResult<&'a [u8]> {
        if n > self.remaining() {
            return Err(CodecError::Truncated {
                offset: self.pos,
                wanted: n,
                available: self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self) -> CodecResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Read one byte
    pub fn u8(&mut self) -> CodecResult<u8> {
        Ok(self.take(1)?[0])
    }

    /// Read a little-endian u32
    pub fn u32_le(&mut self) -> CodecResult<u32> {
        self.array().map(u32::from_le_bytes)
    }

    /// Read a little-endian i32
    pub fn i32_le(&mut self) -> CodecResult<i32> {
        self.array().map(i32::from_le_bytes)
    }

    /// Read a little-endian u64
    pub fn u64_le(&mut self) -> CodecResult<u64> {
        self.array().map(u64::from_le_bytes)
    }

    /// Read a 20-byte address
    pub fn address(&mut self) -> CodecResult<Address> {
        self.array().map(Address::from_bytes)
    }

    /// Read a 32-byte word
    pub fn h256(&mut self) -> CodecResult<H256> {
        self.array().map(H256::from_bytes)
    }

    /// Read a u32 length prefix followed by that many bytes
    pub fn var_slice(&mut self) -> CodecResult<&'a [u8]> {
        let len = self.u32_le()? as usize;
        self.take(len)
    }
}
