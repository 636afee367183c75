//! Program record: the entry call a sandboxed execution starts from

use crate::buffer::{ByteReader, ScratchBuffer};
use crate::call::{CallFlags, CallKind};
use crate::error::{CodecError, CodecResult};
use bytes::Bytes;
use sandhost_primitives::Address;

/// Size of a program record with empty code and input
pub const PROGRAM_FIXED_LEN: usize = 1 + 4 + 4 + 20 + 20 + 4 + 4;

/// Entry call handed to the sandbox.
///
/// Unlike [`CallMessage`](crate::CallMessage) it carries the contract code
/// next to the input and has no gas, value or salt. The sender comes before
/// the destination on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Program {
    /// Call kind
    pub kind: CallKind,
    /// Call flags
    pub flags: CallFlags,
    /// Call depth
    pub depth: u32,
    /// Caller
    pub sender: Address,
    /// Contract being run; zero for creates
    pub destination: Address,
    /// Contract code, or init code for creates
    pub code: Bytes,
    /// Call data
    pub input: Bytes,
}

impl Program {
    /// Deploy `code` from `sender` at depth 0
    pub fn new_create(sender: Address, code: impl Into<Bytes>) -> Self {
        Self {
            kind: CallKind::Create,
            sender,
            code: code.into(),
            ..Default::default()
        }
    }

    /// Run `code` at `destination` with `input`
    pub fn new_call(
        sender: Address,
        destination: Address,
        code: impl Into<Bytes>,
        input: impl Into<Bytes>,
    ) -> Self {
        Self {
            kind: CallKind::Call,
            sender,
            destination,
            code: code.into(),
            input: input.into(),
            ..Default::default()
        }
    }

    /// Size of the encoded record
    pub fn encoded_len(&self) -> usize {
        PROGRAM_FIXED_LEN + self.code.len() + self.input.len()
    }
}

/// Encode a program into a buffer of at most `capacity` bytes
pub fn encode_program(program: &Program, capacity: usize) -> CodecResult<Bytes> {
    let mut buf = ScratchBuffer::with_capacity(capacity);
    buf.ensure(program.encoded_len())?;

    buf.put_u8(program.kind as u8)?;
    buf.put_u32_le(program.flags.bits())?;
    buf.put_u32_le(program.depth)?;
    buf.put_slice(program.sender.as_bytes())?;
    buf.put_slice(program.destination.as_bytes())?;
    buf.put_var_slice(&program.code)?;
    buf.put_var_slice(&program.input)?;

    tracing::trace!(kind = %program.kind, len = buf.len(), "encoded program");
    Ok(buf.freeze())
}

/// Parse a program record; the whole input must be consumed
pub fn decode_program(bytes: &[u8]) -> CodecResult<Program> {
    let mut reader = ByteReader::new(bytes);
    let kind = CallKind::try_from(reader.u8()?)?;
    let flags = CallFlags::from_bits(reader.u32_le()?);
    let depth = reader.u32_le()?;
    let sender = reader.address()?;
    let destination = reader.address()?;
    let code = Bytes::copy_from_slice(reader.var_slice()?);
    let input = Bytes::copy_from_slice(reader.var_slice()?);
    if !reader.is_empty() {
        return Err(CodecError::MalformedMessage(format!(
            "{} trailing bytes after program",
            reader.remaining()
        )));
    }
    Ok(Program {
        kind,
        flags,
        depth,
        sender,
        destination,
        code,
        input,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_CALL_BUFFER_CAPACITY;

    #[test]
    fn test_fixed_len() {
        assert_eq!(PROGRAM_FIXED_LEN, 57);
        assert_eq!(Program::default().encoded_len(), 57);
    }

    #[test]
    fn test_create_layout() {
        let program = Program::new_create(Address::from_bytes([0x22; 20]), &b"abcdef"[..]);
        let encoded = encode_program(&program, DEFAULT_CALL_BUFFER_CAPACITY).unwrap();

        assert_eq!(encoded.len(), 57 + 6);
        assert_eq!(encoded[0], CallKind::Create as u8);
        assert_eq!(&encoded[1..9], &[0u8; 8]);
        assert_eq!(&encoded[9..29], &[0x22; 20]);
        assert_eq!(&encoded[29..49], &[0u8; 20]);
        assert_eq!(&encoded[49..53], &6u32.to_le_bytes());
        assert_eq!(&encoded[53..59], b"abcdef");
        assert_eq!(&encoded[59..63], &0u32.to_le_bytes());
    }

    #[test]
    fn test_decode_matches_fields() {
        let mut program = Program::new_call(
            Address::from_bytes([1; 20]),
            Address::from_bytes([2; 20]),
            vec![0x60, 0x00],
            vec![0xaa, 0xbb, 0xcc],
        );
        program.flags = CallFlags::STATIC;
        program.depth = 4;
        let encoded = encode_program(&program, DEFAULT_CALL_BUFFER_CAPACITY).unwrap();
        assert_eq!(decode_program(&encoded).unwrap(), program);
    }

    #[test]
    fn test_decode_rejects_bad_input() {
        assert!(matches!(
            decode_program(&[]),
            Err(CodecError::Truncated { offset: 0, .. })
        ));

        let encoded = encode_program(&Program::default(), 64).unwrap();
        let mut bad_kind = encoded.to_vec();
        bad_kind[0] = 5;
        assert_eq!(decode_program(&bad_kind), Err(CodecError::InvalidCallKind(5)));

        let mut longer = encoded.to_vec();
        longer.push(0);
        assert!(matches!(
            decode_program(&longer),
            Err(CodecError::MalformedMessage(_))
        ));
    }

    #[test]
    fn test_capacity_boundary() {
        let program = Program::new_create(Address::ZERO, vec![0u8; 7]);
        assert_eq!(encode_program(&program, 64).unwrap().len(), 64);
        assert_eq!(
            encode_program(&program, 63),
            Err(CodecError::BufferOverflow {
                required: 64,
                capacity: 63
            })
        );
    }
}
