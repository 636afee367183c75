//! Call result decoding

use crate::buffer::{ByteReader, ScratchBuffer};
use crate::error::{CodecError, CodecResult};
use bytes::Bytes;
use sandhost_primitives::{Address, Gas};
use serde::{Deserialize, Serialize};

/// Size of a call result with empty output and no gas trailer
pub const CALL_RESULT_FIXED_LEN: usize = 4 + 20;

/// Outcome of a nested call as the interpreter sees it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallStatus {
    /// The call completed
    Success,
    /// The call could not be carried out
    Failure,
}

/// Where the remaining gas of a nested call comes from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GasAccounting {
    /// Report the request's gas limit unchanged
    #[default]
    PassThrough,
    /// Read a u64 gas-remaining field after the created address
    Trailer,
}

/// Result of a nested call.
///
/// The output buffer is owned by the result and freed when it is dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallResult {
    /// Call status
    pub status: CallStatus,
    /// Gas left after the call
    pub gas_left: Gas,
    /// Return data
    pub output: Bytes,
    /// Address of the created contract; zero unless the call was a create
    pub created_address: Address,
}

impl CallResult {
    /// Successful result
    pub fn success(gas_left: Gas, output: impl Into<Bytes>, created_address: Address) -> Self {
        Self {
            status: CallStatus::Success,
            gas_left,
            output: output.into(),
            created_address,
        }
    }

    /// Failed result with no output
    pub fn failure(gas_left: Gas) -> Self {
        Self {
            status: CallStatus::Failure,
            gas_left,
            output: Bytes::new(),
            created_address: Address::ZERO,
        }
    }

    /// Whether the call succeeded
    pub fn is_success(&self) -> bool {
        self.status == CallStatus::Success
    }

    /// Take the output, releasing the rest of the result
    pub fn into_output(self) -> Bytes {
        self.output
    }
}

fn malformed(err: CodecError) -> CodecError {
    match err {
        CodecError::Truncated {
            offset,
            wanted,
            available,
        } => CodecError::MalformedResult(format!(
            "need {} bytes at offset {}, {} available",
            wanted, offset, available
        )),
        other => other,
    }
}

/// Decode the boundary's answer to a call.
///
/// `bytes` may be the whole result buffer; anything after the decoded fields
/// is ignored. `request_gas` is reported as the remaining gas unless
/// `gas_accounting` says to read it from the result.
pub fn decode_result(
    bytes: &[u8],
    request_gas: Gas,
    gas_accounting: GasAccounting,
) -> CodecResult<CallResult> {
    let mut reader = ByteReader::new(bytes);
    let declared = reader.i32_le().map_err(malformed)?;
    let len = usize::try_from(declared)
        .map_err(|_| CodecError::MalformedResult(format!("negative output length {}", declared)))?;
    if len > reader.remaining() {
        return Err(CodecError::MalformedResult(format!(
            "output length {} exceeds the {} bytes available",
            len,
            reader.remaining()
        )));
    }
    let output = Bytes::copy_from_slice(reader.take(len)?);
    let created_address = reader.address().map_err(malformed)?;
    let gas_left = match gas_accounting {
        GasAccounting::PassThrough => request_gas,
        GasAccounting::Trailer => reader.u64_le().map_err(malformed)?,
    };

    Ok(CallResult::success(gas_left, output, created_address))
}

/// Encode a call result as the boundary writes it.
///
/// `gas_left` is appended only when given, for `GasAccounting::Trailer`.
pub fn encode_result(
    output: &[u8],
    created_address: &Address,
    gas_left: Option<Gas>,
    capacity: usize,
) -> CodecResult<Bytes> {
    let len = i32::try_from(output.len()).map_err(|_| CodecError::BufferOverflow {
        required: output.len(),
        capacity: i32::MAX as usize,
    })?;
    let mut buf = ScratchBuffer::with_capacity(capacity);
    buf.ensure(CALL_RESULT_FIXED_LEN + output.len() + gas_left.map_or(0, |_| 8))?;
    buf.put_i32_le(len)?;
    buf.put_slice(output)?;
    buf.put_slice(created_address.as_bytes())?;
    if let Some(gas) = gas_left {
        buf.put_u64_le(gas)?;
    }
    Ok(buf.freeze())
}
