//! Outbound call message encoding

use crate::buffer::{ByteReader, ScratchBuffer};
use crate::error::{CodecError, CodecResult};
use bytes::Bytes;
use sandhost_primitives::{Address, Gas, H256, U256};
use std::fmt;
use std::ops::BitOr;

/// Size of a call message with an empty input payload
pub const CALL_MESSAGE_FIXED_LEN: usize = 1 + 4 + 4 + 8 + 20 + 20 + 4 + 32 + 32;

/// Kind of a nested call, numbered as the interpreter numbers them
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum CallKind {
    /// Plain CALL (static calls are CALL with the static flag)
    #[default]
    Call = 0,
    /// DELEGATECALL
    DelegateCall = 1,
    /// CALLCODE
    CallCode = 2,
    /// CREATE
    Create = 3,
    /// CREATE2
    Create2 = 4,
}

impl CallKind {
    /// Whether the call deploys a contract
    pub fn is_create(self) -> bool {
        matches!(self, CallKind::Create | CallKind::Create2)
    }

    /// Lowercase name
    pub fn name(self) -> &'static str {
        match self {
            CallKind::Call => "call",
            CallKind::DelegateCall => "delegatecall",
            CallKind::CallCode => "callcode",
            CallKind::Create => "create",
            CallKind::Create2 => "create2",
        }
    }
}

impl TryFrom<u8> for CallKind {
    type Error = CodecError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CallKind::Call),
            1 => Ok(CallKind::DelegateCall),
            2 => Ok(CallKind::CallCode),
            3 => Ok(CallKind::Create),
            4 => Ok(CallKind::Create2),
            other => Err(CodecError::InvalidCallKind(other)),
        }
    }
}

impl fmt::Display for CallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Call flag bitset
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct CallFlags(u32);

impl CallFlags {
    /// No flags
    pub const NONE: CallFlags = CallFlags(0);

    /// Static call: no state modification allowed
    pub const STATIC: CallFlags = CallFlags(1);

    /// Wrap raw bits; unknown bits are kept as-is
    pub const fn from_bits(bits: u32) -> Self {
        CallFlags(bits)
    }

    /// Raw bits
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether every bit of `other` is set
    pub const fn contains(self, other: CallFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether the static bit is set
    pub const fn is_static(self) -> bool {
        self.contains(CallFlags::STATIC)
    }
}

impl BitOr for CallFlags {
    type Output = CallFlags;

    fn bitor(self, rhs: CallFlags) -> CallFlags {
        CallFlags(self.0 | rhs.0)
    }
}

/// Nested call request handed across the boundary
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct CallMessage {
    /// Call kind
    pub kind: CallKind,
    /// Call flags
    pub flags: CallFlags,
    /// Call depth
    pub depth: u32,
    /// Gas limit for the call
    pub gas: Gas,
    /// Callee (unused for creates)
    pub destination: Address,
    /// Caller
    pub sender: Address,
    /// Call data, or init code for creates
    pub input: Bytes,
    /// Value transferred, big-endian
    pub value: H256,
    /// CREATE2 salt; meaningful only for `CallKind::Create2`
    pub create2_salt: H256,
}

impl CallMessage {
    /// Create a message with no input, no value and depth 0
    pub fn new(kind: CallKind, sender: Address, destination: Address, gas: Gas) -> Self {
        Self {
            kind,
            sender,
            destination,
            gas,
            ..Default::default()
        }
    }

    /// Set the call data
    pub fn with_input(mut self, input: impl Into<Bytes>) -> Self {
        self.input = input.into();
        self
    }

    /// Set the transferred value
    pub fn with_value(mut self, value: U256) -> Self {
        self.value = H256::from_u256(value);
        self
    }

    /// Set the flags
    pub fn with_flags(mut self, flags: CallFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Set the call depth
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Set the CREATE2 salt
    pub fn with_salt(mut self, salt: H256) -> Self {
        self.create2_salt = salt;
        self
    }

    /// Whether this is a static call
    pub fn is_static(&self) -> bool {
        self.flags.is_static()
    }

    /// Size of the encoded message
    pub fn encoded_len(&self) -> usize {
        CALL_MESSAGE_FIXED_LEN + self.input.len()
    }
}

/// Encode a call message into a buffer of at most `capacity` bytes
pub fn encode_call(msg: &CallMessage, capacity: usize) -> CodecResult<Bytes> {
    let mut buf = ScratchBuffer::with_capacity(capacity);
    buf.ensure(msg.encoded_len())?;

    buf.put_u8(msg.kind as u8)?;
    buf.put_u32_le(msg.flags.bits())?;
    buf.put_u32_le(msg.depth)?;
    buf.put_u64_le(msg.gas)?;
    buf.put_slice(msg.destination.as_bytes())?;
    buf.put_slice(msg.sender.as_bytes())?;
    buf.put_var_slice(&msg.input)?;
    buf.put_slice(msg.value.as_bytes())?;
    buf.put_slice(msg.create2_salt.as_bytes())?;

    tracing::trace!(kind = %msg.kind, len = buf.len(), "encoded call message");
    Ok(buf.freeze())
}

/// Parse a call message; the whole input must be consumed
pub fn decode_call(bytes: &[u8]) -> CodecResult<CallMessage> {
    let mut reader = ByteReader::new(bytes);
    let kind = CallKind::try_from(reader.u8()?)?;
    let flags = CallFlags::from_bits(reader.u32_le()?);
    let depth = reader.u32_le()?;
    let gas = reader.u64_le()?;
    let destination = reader.address()?;
    let sender = reader.address()?;
    let input = Bytes::copy_from_slice(reader.var_slice()?);
    let value = reader.h256()?;
    let create2_salt = reader.h256()?;
    if !reader.is_empty() {
        return Err(CodecError::MalformedMessage(format!(
            "{} trailing bytes after call message",
            reader.remaining()
        )));
    }
    Ok(CallMessage {
        kind,
        flags,
        depth,
        gas,
        destination,
        sender,
        input,
        value,
        create2_salt,
    })
}
