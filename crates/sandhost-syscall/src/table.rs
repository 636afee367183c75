//! Syscall numbering

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operations that cross the boundary
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Syscall {
    /// Final output
    Return,
    /// Log record
    Log,
    /// Self-destruct notification
    SelfDestruct,
    /// Nested call
    Call,
}

impl Syscall {
    /// All operations, in table order
    pub const ALL: [Syscall; 4] = [
        Syscall::Return,
        Syscall::Log,
        Syscall::SelfDestruct,
        Syscall::Call,
    ];

    /// Lowercase name
    pub fn name(self) -> &'static str {
        match self {
            Syscall::Return => "return",
            Syscall::Log => "log",
            Syscall::SelfDestruct => "selfdestruct",
            Syscall::Call => "call",
        }
    }
}

impl fmt::Display for Syscall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Syscall number for each operation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyscallTable {
    /// `return`
    #[serde(rename = "return")]
    pub ret: u64,
    /// `log`
    pub log: u64,
    /// `selfdestruct`
    pub selfdestruct: u64,
    /// `call`
    pub call: u64,
}

impl Default for SyscallTable {
    fn default() -> Self {
        Self {
            ret: 3075,
            log: 3076,
            selfdestruct: 3077,
            call: 3078,
        }
    }
}

impl SyscallTable {
    /// Number for `syscall`
    pub fn number(&self, syscall: Syscall) -> u64 {
        match syscall {
            Syscall::Return => self.ret,
            Syscall::Log => self.log,
            Syscall::SelfDestruct => self.selfdestruct,
            Syscall::Call => self.call,
        }
    }

    /// First number assigned to more than one operation
    pub fn duplicate(&self) -> Option<u64> {
        let numbers = Syscall::ALL.map(|syscall| self.number(syscall));
        for (i, number) in numbers.iter().enumerate() {
            if numbers[i + 1..].contains(number) {
                return Some(*number);
            }
        }
        None
    }
}
