//! End-to-end tests for SandboxHost over an in-process boundary

use proptest::prelude::*;
use sandhost_codec::{
    decode_call, decode_log, encode_result, CallFlags, CallKind, CallMessage,
    CALL_MESSAGE_FIXED_LEN, DEFAULT_CALL_BUFFER_CAPACITY,
};
use sandhost_evm::{
    ExecutionContext, FailureKind, Host, HostConfig, HostError, SandboxHost, StaticAccounts,
};
use sandhost_primitives::{Address, H256, U256};
use sandhost_storage::{ChangeSet, StorageOverlay, StorageStatus, StorageStatusMode};
use sandhost_syscall::RecordingBoundary;

fn addr(b: u8) -> Address {
    Address::from_bytes([b; 20])
}

fn word(b: u8) -> H256 {
    H256::from_bytes([b; 32])
}

/// Answers every call with its own input, created address = destination
fn echo_boundary() -> RecordingBoundary {
    RecordingBoundary::new().with_responder(|message| {
        let msg = decode_call(message).unwrap();
        encode_result(&msg.input, &msg.destination, None, DEFAULT_CALL_BUFFER_CAPACITY)
            .unwrap()
            .to_vec()
    })
}

fn host_with(boundary: RecordingBoundary, config: HostConfig) -> SandboxHost<RecordingBoundary> {
    SandboxHost::new(boundary, ExecutionContext::new(addr(0x0a)), config)
}

// =============================================================================
// Storage
// =============================================================================

mod storage {
    use super::*;

    #[test]
    fn seeded_values_are_visible() {
        let existing: ChangeSet = vec![(word(1), word(0xa1))].into_iter().collect();
        let context = ExecutionContext::with_storage(
            addr(0),
            StorageOverlay::from_parts(existing, ChangeSet::new()),
        );
        let host = SandboxHost::new(RecordingBoundary::new(), context, HostConfig::default());
        assert_eq!(host.get_storage(&addr(1), &word(1)), word(0xa1));
    }

    #[test]
    fn status_classification() {
        let mut host = host_with(RecordingBoundary::new(), HostConfig::default());
        let a = addr(1);
        assert_eq!(
            host.set_storage(&a, word(1), word(5)).unwrap(),
            StorageStatus::Added
        );
        assert_eq!(
            host.set_storage(&a, word(1), word(6)).unwrap(),
            StorageStatus::Modified
        );
        assert_eq!(
            host.set_storage(&a, word(1), word(6)).unwrap(),
            StorageStatus::Unchanged
        );
        assert_eq!(
            host.set_storage(&a, word(1), H256::ZERO).unwrap(),
            StorageStatus::Deleted
        );
    }

    #[test]
    fn always_added_mode() {
        let config = HostConfig {
            storage_status: StorageStatusMode::AlwaysAdded,
            ..Default::default()
        };
        let mut host = host_with(RecordingBoundary::new(), config);
        host.set_storage(&addr(1), word(1), word(5)).unwrap();
        assert_eq!(
            host.set_storage(&addr(1), word(1), H256::ZERO).unwrap(),
            StorageStatus::Added
        );
    }

    #[test]
    fn writes_land_in_both_sets() {
        let mut host = host_with(RecordingBoundary::new(), HostConfig::default());
        host.set_storage(&addr(1), word(1), word(2)).unwrap();
        let outcome = host.finish(false, &[]).unwrap();
        assert_eq!(outcome.changes.lookup(&word(1)), Some(word(2)));
        assert_eq!(outcome.existing_values.lookup(&word(1)), Some(word(2)));
    }
}

// =============================================================================
// Nested calls
// =============================================================================

mod calls {
    use super::*;

    #[test]
    fn plain_call_round_trip() {
        let mut host = host_with(echo_boundary(), HostConfig::default());
        let msg = CallMessage::new(CallKind::Call, addr(0xaa), addr(0xbb), 21000)
            .with_input(vec![1, 2, 3])
            .with_value(U256::from(7));
        let result = host.call(&msg).unwrap();
        assert!(result.is_success());
        assert_eq!(result.gas_left, 21000);
        assert_eq!(result.output.as_ref(), &[1, 2, 3]);
        assert_eq!(result.created_address, addr(0xbb));

        let sent = decode_call(&host.bridge().boundary().messages()[0]).unwrap();
        assert_eq!(sent, msg);
    }

    #[test]
    fn static_call_sets_flag() {
        let mut host = host_with(echo_boundary(), HostConfig::default());
        let msg = CallMessage::new(CallKind::Call, addr(1), addr(2), 10)
            .with_flags(CallFlags::STATIC);
        host.call(&msg).unwrap();
        let sent = &host.bridge().boundary().messages()[0];
        assert_eq!(u32::from_le_bytes(sent[1..5].try_into().unwrap()), 1);
    }

    #[test]
    fn oversized_input_is_buffer_overflow() {
        let mut host = host_with(echo_boundary(), HostConfig::default());
        let input = vec![0u8; DEFAULT_CALL_BUFFER_CAPACITY - CALL_MESSAGE_FIXED_LEN + 1];
        let msg = CallMessage::new(CallKind::Call, addr(1), addr(2), 10).with_input(input);
        let err = host.call(&msg).unwrap_err();
        assert_eq!(err.kind(), FailureKind::BufferOverflow);
        assert!(host.bridge().boundary().messages().is_empty());
    }

    #[test]
    fn garbage_answer_is_malformed_result() {
        let boundary = RecordingBoundary::new().with_responder(|_| (-5i32).to_le_bytes().to_vec());
        let mut host = host_with(boundary, HostConfig::default());
        let msg = CallMessage::new(CallKind::Call, addr(1), addr(2), 10);
        let err = host.call(&msg).unwrap_err();
        assert_eq!(err.kind(), FailureKind::MalformedResult);
    }

    #[test]
    fn failed_syscall_is_boundary_error() {
        let mut host = host_with(
            RecordingBoundary::new().fail_with(3078, 1),
            HostConfig::default(),
        );
        let msg = CallMessage::new(CallKind::Call, addr(1), addr(2), 10);
        assert_eq!(host.call(&msg).unwrap_err().kind(), FailureKind::BoundaryError);
    }

    proptest! {
        #[test]
        fn echo_reproduces_input(input in proptest::collection::vec(any::<u8>(), 0..512)) {
            let mut host = host_with(echo_boundary(), HostConfig::default());
            let msg = CallMessage::new(CallKind::Call, addr(1), addr(2), 5).with_input(input.clone());
            let result = host.call(&msg).unwrap();
            prop_assert_eq!(result.into_output().to_vec(), input);
        }
    }
}

// =============================================================================
// Logs, selfdestruct and finishing
// =============================================================================

mod lifecycle {
    use super::*;

    #[test]
    fn log_is_encoded_and_sent() {
        let mut host = host_with(RecordingBoundary::new(), HostConfig::default());
        host.emit_log(&addr(1), b"hi", &[word(1), word(2)]).unwrap();
        let sent = host.bridge().boundary().sent_to(3076);
        assert_eq!(sent.len(), 1);
        let event = decode_log(sent[0]).unwrap();
        assert_eq!(event.data.as_ref(), b"hi");
        assert_eq!(event.topics, vec![word(1), word(2)]);
    }

    #[test]
    fn empty_log_is_eight_bytes() {
        let mut host = host_with(RecordingBoundary::new(), HostConfig::default());
        host.emit_log(&addr(1), &[], &[]).unwrap();
        assert_eq!(host.bridge().boundary().sent_to(3076)[0], &[0u8; 8][..]);
    }

    #[test]
    fn oversized_log_is_not_sent() {
        let mut host = host_with(RecordingBoundary::new(), HostConfig::default());
        let err = host.emit_log(&addr(1), &[0u8; 2048], &[]).unwrap_err();
        assert!(matches!(err, HostError::Codec(_)));
        assert!(host.bridge().boundary().sent().is_empty());
    }

    #[test]
    fn selfdestruct_notifies_and_marks() {
        let mut host = host_with(RecordingBoundary::new(), HostConfig::default());
        assert!(host.selfdestruct(&addr(1), &addr(9)).unwrap());
        assert!(!host.selfdestruct(&addr(1), &addr(8)).unwrap());
        assert!(host.context().is_destructed());
        assert_eq!(host.bridge().boundary().sent_to(3077).len(), 2);
        assert_eq!(host.bridge().boundary().sent_to(3077)[0], &[9u8; 20][..]);

        let outcome = host.finish(true, b"").unwrap();
        assert!(outcome.destructed);
        assert_eq!(outcome.beneficiary, Some(addr(9)));
    }

    #[test]
    fn failed_selfdestruct_still_marks_context() {
        let mut host = host_with(
            RecordingBoundary::new().fail_with(3077, 1),
            HostConfig::default(),
        );
        let err = host.selfdestruct(&addr(1), &addr(9)).unwrap_err();
        assert_eq!(err.kind(), FailureKind::BoundaryError);
        assert!(host.context().is_destructed());
        assert!(host.bridge().boundary().sent().is_empty());

        let outcome = host.finish(false, &[]).unwrap();
        assert!(outcome.destructed);
        assert_eq!(outcome.beneficiary, Some(addr(9)));
    }

    #[test]
    fn failed_log_syscall_is_boundary_error() {
        let mut host = host_with(
            RecordingBoundary::new().fail_with(3076, 1),
            HostConfig::default(),
        );
        let err = host.emit_log(&addr(1), b"hi", &[word(1)]).unwrap_err();
        assert_eq!(err.kind(), FailureKind::BoundaryError);
        assert!(matches!(err, HostError::Boundary(_)));
    }

    #[test]
    fn write_after_destruct_warns_by_default() {
        let mut host = host_with(RecordingBoundary::new(), HostConfig::default());
        host.selfdestruct(&addr(1), &addr(9)).unwrap();
        assert!(host.set_storage(&addr(1), word(1), word(1)).is_ok());
    }

    #[test]
    fn write_after_destruct_rejected_when_strict() {
        let config = HostConfig {
            strict_destruct: true,
            ..Default::default()
        };
        let mut host = host_with(RecordingBoundary::new(), config);
        host.selfdestruct(&addr(1), &addr(9)).unwrap();
        let err = host.set_storage(&addr(1), word(1), word(1)).unwrap_err();
        assert_eq!(err.kind(), FailureKind::UsageError);
        assert_eq!(host.get_storage(&addr(1), &word(1)), H256::ZERO);
    }

    #[test]
    fn finish_success_sends_return() {
        let mut boundary = RecordingBoundary::new();
        let outcome = {
            let mut host = SandboxHost::new(
                &mut boundary,
                ExecutionContext::new(addr(0)),
                HostConfig::default(),
            );
            host.set_storage(&addr(1), word(1), word(1)).unwrap();
            host.finish(true, b"output").unwrap()
        };
        assert_eq!(boundary.sent_to(3075), vec![&b"output"[..]]);
        assert_eq!(outcome.changes.len(), 1);
    }

    #[test]
    fn failed_return_is_reported() {
        let host = host_with(
            RecordingBoundary::new().fail_with(3075, 4),
            HostConfig::default(),
        );
        let err = host.finish(true, b"x").unwrap_err();
        assert_eq!(err.kind(), FailureKind::BoundaryError);
    }

    #[test]
    fn finish_failure_sends_nothing() {
        let mut boundary = RecordingBoundary::new();
        {
            let host = SandboxHost::new(
                &mut boundary,
                ExecutionContext::new(addr(0)),
                HostConfig::default(),
            );
            host.finish(false, b"output").unwrap();
        }
        assert!(boundary.sent().is_empty());
    }

    #[test]
    fn custom_syscall_numbers_are_used() {
        let config = HostConfig::from_toml_str("[syscalls]\nlog = 10").unwrap();
        let mut host = host_with(RecordingBoundary::new(), config);
        host.emit_log(&addr(1), &[], &[]).unwrap();
        assert_eq!(host.bridge().boundary().sent_to(10).len(), 1);
    }
}

// =============================================================================
// Account providers
// =============================================================================

mod accounts {
    use super::*;

    #[test]
    fn static_accounts_answer_queries() {
        let accounts = StaticAccounts::new().with_account(addr(1), U256::from(99), vec![0xfe]);
        let host = SandboxHost::with_accounts(
            RecordingBoundary::new(),
            ExecutionContext::new(addr(0)),
            accounts,
            HostConfig::default(),
        );
        assert!(host.account_exists(&addr(1)));
        assert!(!host.account_exists(&addr(2)));
        assert_eq!(host.balance(&addr(1)), U256::from(99));
        assert_eq!(host.code_size(&addr(1)), 1);
        let mut buf = [0u8; 1];
        assert_eq!(host.copy_code(&addr(1), 0, &mut buf), 1);
        assert_eq!(buf, [0xfe]);
        assert_eq!(host.code_hash(&addr(1)), sandhost_evm::keccak256(&[0xfe]));
    }
}
