//! Codec error types

use thiserror::Error;

/// Errors from building or parsing boundary messages
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Message does not fit the scratch buffer
    #[error("buffer overflow: {required} bytes required, capacity is {capacity}")]
    BufferOverflow {
        /// Bytes the message needs
        required: usize,
        /// Bytes the buffer holds
        capacity: usize,
    },

    /// Call result inconsistent with its own length field
    #[error("malformed call result: {0}")]
    MalformedResult(String),

    /// Call message or log record that does not parse
    #[error("malformed message: {0}")]
    MalformedMessage(String),

    /// Unknown call kind byte
    #[error("invalid call kind: {0}")]
    InvalidCallKind(u8),

    /// Input ended before a field was complete
    #[error("truncated input: need {wanted} bytes at offset {offset}, {available} available")]
    Truncated {
        /// Offset of the field
        offset: usize,
        /// Bytes the field needs
        wanted: usize,
        /// Bytes left in the input
        available: usize,
    },
}

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            format!(
                "{}",
                CodecError::BufferOverflow {
                    required: 2049,
                    capacity: 2048
                }
            ),
            "buffer overflow: 2049 bytes required, capacity is 2048"
        );
        assert_eq!(
            format!("{}", CodecError::MalformedResult("negative length".into())),
            "malformed call result: negative length"
        );
        assert_eq!(format!("{}", CodecError::InvalidCallKind(9)), "invalid call kind: 9");
        assert_eq!(
            format!(
                "{}",
                CodecError::Truncated {
                    offset: 4,
                    wanted: 20,
                    available: 3
                }
            ),
            "truncated input: need 20 bytes at offset 4, 3 available"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(CodecError::InvalidCallKind(7), CodecError::InvalidCallKind(7));
        assert_ne!(
            CodecError::InvalidCallKind(7),
            CodecError::MalformedMessage("7".into())
        );
    }
}
