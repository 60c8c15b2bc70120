//! Property-based lifecycle invariants: the terminal state is absorbing for
//! every sequence of lifecycle calls.

use proptest::prelude::*;
use std::time::Duration;

use managed_thread::{from_fn, StopMode, Worker, WorkerConfig, WorkerState};

#[derive(Debug, Clone, Copy)]
enum Op {
    Start,
    Stop,
    Terminate,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![Just(Op::Start), Just(Op::Stop), Just(Op::Terminate)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn terminated_is_absorbing_for_any_op_sequence(
        ops in proptest::collection::vec(op_strategy(), 1..12),
    ) {
        let worker = Worker::new(
            WorkerConfig::default().with_stop_mode(StopMode::Suspend),
            from_fn(|| {
                std::thread::sleep(Duration::from_millis(1));
                Ok(())
            }),
        );

        let mut terminated = false;
        for op in ops {
            match op {
                Op::Start => {
                    let outcome = worker.start();
                    if terminated {
                        prop_assert!(outcome.is_err(), "start after terminate must fail");
                    } else {
                        prop_assert!(outcome.is_ok());
                    }
                }
                Op::Stop => worker.stop(),
                Op::Terminate => {
                    worker.terminate();
                    terminated = true;
                }
            }
            if terminated {
                prop_assert!(worker.is_terminated());
                prop_assert_eq!(worker.state(), WorkerState::Terminated);
            }
        }

        worker.terminate_and_wait().unwrap();
        prop_assert!(worker.is_terminated());
        prop_assert!(worker.start().is_err());
    }

    #[test]
    fn state_strings_round_trip(state in prop_oneof![
        Just(WorkerState::Stopped),
        Just(WorkerState::Running),
        Just(WorkerState::Terminated),
    ]) {
        let rendered = state.to_string();
        let parsed: WorkerState = rendered.parse().unwrap();
        prop_assert_eq!(parsed, state);

        let json = serde_json::to_string(&state).unwrap();
        let from_json: WorkerState = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(from_json, state);
    }
}
