//! Log record encoding

use crate::buffer::{ByteReader, ScratchBuffer};
use crate::error::{CodecError, CodecResult};
use bytes::Bytes;
use sandhost_primitives::H256;

/// Size of a log record with empty data and no topics
pub const LOG_FIXED_LEN: usize = 4 + 4;

/// Log emitted by LOG0..LOG4
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogEvent {
    /// Log data
    pub data: Bytes,
    /// Log topics, in emission order
    pub topics: Vec<H256>,
}

impl LogEvent {
    /// Create a log event
    pub fn new(data: impl Into<Bytes>, topics: Vec<H256>) -> Self {
        Self {
            data: data.into(),
            topics,
        }
    }

    /// Size of the encoded record
    pub fn encoded_len(&self) -> usize {
        LOG_FIXED_LEN + self.data.len() + H256::LEN * self.topics.len()
    }

    /// Encode into a buffer of at most `capacity` bytes
    pub fn encode(&self, capacity: usize) -> CodecResult<Bytes> {
        encode_log(&self.data, &self.topics, capacity)
    }
}

/// Encode a log record into a buffer of at most `capacity` bytes
pub fn encode_log(data: &[u8], topics: &[H256], capacity: usize) -> CodecResult<Bytes> {
    let mut buf = ScratchBuffer::with_capacity(capacity);
    let topic_count = u32::try_from(topics.len())
        .map_err(|_| CodecError::MalformedMessage(format!("{} topics", topics.len())))?;

    buf.ensure(LOG_FIXED_LEN + data.len() + H256::LEN * topics.len())?;
    buf.put_var_slice(data)?;
    buf.put_u32_le(topic_count)?;
    for topic in topics {
        buf.put_slice(topic.as_bytes())?;
    }
    Ok(buf.freeze())
}

/// Parse a log record; the whole input must be consumed
pub fn decode_log(bytes: &[u8]) -> CodecResult<LogEvent> {
    let mut reader = ByteReader::new(bytes);
    let data = Bytes::copy_from_slice(reader.var_slice()?);
    let count = reader.u32_le()? as usize;
    if count > reader.remaining() / H256::LEN {
        return Err(CodecError::MalformedMessage(format!(
            "{} topics declared, room for {}",
            count,
            reader.remaining() / H256::LEN
        )));
    }
    let topics = (0..count)
        .map(|_| reader.h256())
        .collect::<CodecResult<Vec<_>>>()?;
    if !reader.is_empty() {
        return Err(CodecError::MalformedMessage(format!(
            "{} trailing bytes after log record",
            reader.remaining()
        )));
    }
    Ok(LogEvent { data, topics })
}
