//! # sandhost-codec
//!
//! Binary layouts for everything that crosses the syscall boundary.
//!
//! All integers are little-endian. Every outbound message is built in a
//! [`ScratchBuffer`] with a fixed capacity; running past it is an error, never
//! a silent overwrite.
//!
//! Call message:
//!
//! ```text
//! kind:u8 | flags:u32 | depth:u32 | gas:u64 | destination:20 | sender:20
//!   | input_len:u32 | input | value:32 | create2_salt:32
//! ```
//!
//! Call result:
//!
//! ```text
//! output_len:i32 | output | created_address:20 [| gas_left:u64]
//! ```
//!
//! Log record:
//!
//! ```text
//! data_len:u32 | data | topic_count:u32 | topic:32 * topic_count
//! ```
//!
//! Program record (the entry call the sandbox starts from):
//!
//! ```text
//! kind:u8 | flags:u32 | depth:u32 | sender:20 | destination:20
//!   | code_len:u32 | code | input_len:u32 | input
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod buffer;
mod call;
mod error;
mod log;
mod program;
mod result;

pub use buffer::{ByteReader, ScratchBuffer};
pub use call::{decode_call, encode_call, CallFlags, CallKind, CallMessage, CALL_MESSAGE_FIXED_LEN};
pub use error::{CodecError, CodecResult};
pub use log::{decode_log, encode_log, LogEvent, LOG_FIXED_LEN};
pub use program::{decode_program, encode_program, Program, PROGRAM_FIXED_LEN};
pub use result::{
    decode_result, encode_result, CallResult, CallStatus, GasAccounting, CALL_RESULT_FIXED_LEN,
};

/// Scratch capacity for call messages and call results (10 KiB)
pub const DEFAULT_CALL_BUFFER_CAPACITY: usize = 10 * 1024;

/// Scratch capacity for log records (2 KiB)
pub const DEFAULT_LOG_BUFFER_CAPACITY: usize = 2 * 1024;
