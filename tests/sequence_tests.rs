// Integration tests for the Fibonacci stream

use fibtape::config::{MachineConfig, RunLimit};
use fibtape::engine::{CancelToken, Machine, RunError, StopReason};
use fibtape::tape::TapeError;

fn fibonacci(count: usize) -> Vec<u128> {
    let mut terms = Vec::with_capacity(count);
    let (mut a, mut b) = (0u128, 1u128);
    for _ in 0..count {
        terms.push(b);
        let next = a + b;
        a = b;
        b = next;
    }
    terms
}

fn run_terms(capacity: usize, terms: u64) -> Vec<u8> {
    let mut machine = Machine::new(&MachineConfig { capacity }).expect("seed failed");
    let mut out = Vec::new();
    machine
        .run(&mut out, RunLimit::Terms(terms), &CancelToken::new(), &mut ())
        .expect("run failed");
    out
}

#[test]
fn test_first_five_terms() {
    assert_eq!(run_terms(10_000, 5), b"1\n1\n2\n3\n5\n");
}

#[test]
fn test_matches_fibonacci() {
    let out = String::from_utf8(run_terms(10_000, 100)).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    let expected = fibonacci(100);

    assert_eq!(lines.len(), 100);
    for (n, (line, value)) in lines.iter().zip(&expected).enumerate() {
        assert_eq!(*line, value.to_string(), "term {} differs", n + 1);
    }
    assert_eq!(lines[99], "354224848179261915075");
}

#[test]
fn test_runs_are_deterministic() {
    assert_eq!(run_terms(10_000, 60), run_terms(10_000, 60));
}

#[test]
fn test_resuming_continues_the_sequence() {
    let mut machine = Machine::new(&MachineConfig { capacity: 10_000 }).unwrap();
    let cancel = CancelToken::new();
    let mut out = Vec::new();
    machine.run(&mut out, RunLimit::Terms(10), &cancel, &mut ()).unwrap();
    machine.run(&mut out, RunLimit::Terms(10), &cancel, &mut ()).unwrap();

    let expected: String = fibonacci(20).iter().map(|v| format!("{}\n", v)).collect();
    assert_eq!(String::from_utf8(out).unwrap(), expected);
    assert_eq!(machine.round(), 20);
}

#[test]
fn test_capacity_exhaustion_writes_only_whole_terms() {
    let mut machine = Machine::new(&MachineConfig { capacity: 100 }).unwrap();
    let mut out = Vec::new();
    let err = machine
        .run(&mut out, RunLimit::Unbounded, &CancelToken::new(), &mut ())
        .unwrap_err();

    assert!(err.is_capacity_exhausted(), "unexpected error: {}", err);
    assert!(matches!(
        err,
        RunError::Tape(TapeError::CapacityExceeded { capacity: 100, .. })
    ));

    let out = String::from_utf8(out).unwrap();
    assert!(out.ends_with('\n'));
    let lines: Vec<&str> = out.lines().collect();
    assert!(lines.len() >= 40, "only {} terms before exhaustion", lines.len());
    for (line, value) in lines.iter().zip(fibonacci(lines.len())) {
        assert_eq!(*line, value.to_string());
    }
}

#[test]
fn test_seed_needs_room() {
    let err = Machine::new(&MachineConfig { capacity: 40 }).unwrap_err();
    assert!(!err.is_invariant_violation());
}

#[test]
fn test_cancel_from_another_thread() {
    let mut machine = Machine::new(&MachineConfig::default()).unwrap();
    let cancel = CancelToken::new();
    let remote = cancel.clone();
    let handle = std::thread::spawn(move || remote.cancel());
    handle.join().unwrap();

    let mut out = Vec::new();
    let summary = machine
        .run(&mut out, RunLimit::Unbounded, &cancel, &mut ())
        .unwrap();
    assert_eq!(summary.stop, StopReason::Cancelled);
    assert_eq!(summary.terms, 0);
}
