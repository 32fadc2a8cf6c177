//! Property-based tests for operation flag validation.
//!
//! These tests use proptest to generate every combination of operation
//! flags and verify that exactly-one selection holds.

#[cfg(test)]
mod proptest_tests {
    use crate::error::Error;
    use crate::request::{InvocationRequest, Operation, OperationFlags, ResetMode};
    use proptest::prelude::*;

    fn reset_mode() -> impl Strategy<Value = Option<ResetMode>> {
        prop_oneof![
            Just(None),
            Just(Some(ResetMode::Hard)),
            Just(Some(ResetMode::Soft)),
            Just(Some(ResetMode::Mixed)),
        ]
    }

    fn selected(flags: &OperationFlags) -> usize {
        usize::from(flags.push) + usize::from(flags.pull) + usize::from(flags.reset.is_some())
    }

    proptest! {
        /// Property: without --setup, anything but exactly one operation is a usage error
        #[test]
        fn wrong_selection_count_is_usage_error(
            push in any::<bool>(),
            pull in any::<bool>(),
            reset in reset_mode(),
        ) {
            let flags = OperationFlags { push, pull, reset, setup: false };
            let result = flags.operation();
            if selected(&flags) == 1 {
                prop_assert!(result.is_ok());
            } else {
                let is_usage = matches!(result, Err(Error::Usage { .. }));
                prop_assert!(is_usage, "expected a usage error, got {:?}", result);
            }
        }

        /// Property: --setup always wins, whatever else was passed
        #[test]
        fn setup_always_selects_setup(
            push in any::<bool>(),
            pull in any::<bool>(),
            reset in reset_mode(),
        ) {
            let flags = OperationFlags { push, pull, reset, setup: true };
            prop_assert_eq!(flags.operation().unwrap(), Operation::Setup);
        }

        /// Property: a reset request carries the mode it was given
        #[test]
        fn reset_keeps_its_mode(mode in reset_mode().prop_filter("some", |m| m.is_some())) {
            let flags = OperationFlags { reset: mode, ..OperationFlags::default() };
            let request = InvocationRequest::from_flags(&flags, "main", "msg", "origin").unwrap();
            prop_assert_eq!(request.operation, Operation::Reset(mode.unwrap()));
        }

        /// Property: the tracking ref is always remote/branch
        #[test]
        fn tracking_ref_joins_remote_and_branch(
            remote in "[a-z]{1,10}",
            branch in "[a-z][a-z0-9/-]{0,20}",
        ) {
            let request = InvocationRequest::new(Operation::Pull)
                .with_remote(remote.clone())
                .with_branch(branch.clone());
            prop_assert_eq!(request.tracking_ref(), format!("{}/{}", remote, branch));
        }
    }
}
