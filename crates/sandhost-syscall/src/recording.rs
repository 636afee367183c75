//! In-process boundary that records traffic

use crate::boundary::Boundary;
use std::collections::HashMap;
use std::fmt;

/// Produces the result bytes for a call message
pub type Responder = Box<dyn FnMut(&[u8]) -> Vec<u8>>;

/// Boundary that stays in the current process.
///
/// Payloads sent with [`Boundary::send`] are kept per syscall number, call
/// messages are kept in order and answered by the responder. A number can be
/// set to fail with a given status.
#[derive(Default)]
pub struct RecordingBoundary {
    sent: Vec<(u64, Vec<u8>)>,
    messages: Vec<Vec<u8>>,
    responder: Option<Responder>,
    failures: HashMap<u64, i64>,
}

impl RecordingBoundary {
    /// Boundary that answers every call with an empty result buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer call messages with `responder`
    pub fn with_responder(mut self, responder: impl FnMut(&[u8]) -> Vec<u8> + 'static) -> Self {
        self.responder = Some(Box::new(responder));
        self
    }

    /// Make syscall `number` report `code` instead of succeeding
    pub fn fail_with(mut self, number: u64, code: i64) -> Self {
        self.failures.insert(number, code);
        self
    }

    /// Every payload sent, with its syscall number, in order
    pub fn sent(&self) -> &[(u64, Vec<u8>)] {
        &self.sent
    }

    /// Payloads sent under `number`, in order
    pub fn sent_to(&self, number: u64) -> Vec<&[u8]> {
        self.sent
            .iter()
            .filter(|(n, _)| *n == number)
            .map(|(_, data)| data.as_slice())
            .collect()
    }

    /// Call messages received, in order
    pub fn messages(&self) -> &[Vec<u8>] {
        &self.messages
    }
}

impl Boundary for RecordingBoundary {
    fn send(&mut self, number: u64, data: &[u8]) -> i64 {
        if let Some(code) = self.failures.get(&number) {
            return *code;
        }
        self.sent.push((number, data.to_vec()));
        0
    }

    fn exchange(&mut self, number: u64, result: &mut [u8], message: &[u8]) -> i64 {
        if let Some(code) = self.failures.get(&number) {
            return *code;
        }
        self.messages.push(message.to_vec());
        let answer = match self.responder.as_mut() {
            Some(responder) => responder(message),
            None => Vec::new(),
        };
        if answer.len() > result.len() {
            return -1;
        }
        result[..answer.len()].copy_from_slice(&answer);
        0
    }
}

impl fmt::Debug for RecordingBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingBoundary")
            .field("sent", &self.sent.len())
            .field("messages", &self.messages.len())
            .field("responder", &self.responder.is_some())
            .field("failures", &self.failures)
            .finish()
    }
}
