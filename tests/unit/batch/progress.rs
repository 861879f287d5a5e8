use std::sync::Mutex;

use super::*;

#[derive(Default)]
struct Capture {
    seen: Mutex<Vec<u8>>,
}

impl BatchObserver for Capture {
    fn progress(&self, percent: u8) {
        self.seen.lock().unwrap().push(percent);
    }
}

#[test]
fn emits_monotone_percentages_reaching_100() {
    let capture = Capture::default();
    let tracker = ProgressTracker::new(4);
    for _ in 0..4 {
        tracker.settle(&capture);
    }
    let seen = capture.seen.lock().unwrap();
    assert_eq!(*seen, vec![25, 50, 75, 100]);
}

#[test]
fn rounding_follows_the_settled_ratio() {
    let capture = Capture::default();
    let tracker = ProgressTracker::new(3);
    for _ in 0..3 {
        tracker.settle(&capture);
    }
    let seen = capture.seen.lock().unwrap();
    assert_eq!(*seen, vec![33, 67, 100]);
}

#[test]
fn duplicate_percentages_are_suppressed() {
    let capture = Capture::default();
    let tracker = ProgressTracker::new(200);
    tracker.settle(&capture);
    tracker.settle(&capture);
    tracker.settle(&capture);
    let seen = capture.seen.lock().unwrap();
    assert_eq!(*seen, vec![1, 2]); // 0.5% rounds to 1, then 1% repeats, then 1.5% rounds to 2
}

#[test]
fn complete_emits_100_for_empty_batches() {
    let capture = Capture::default();
    let tracker = ProgressTracker::new(0);
    tracker.complete(&capture);
    tracker.complete(&capture);
    let seen = capture.seen.lock().unwrap();
    assert_eq!(*seen, vec![100]);
}

#[test]
fn complete_after_full_settlement_is_a_noop() {
    let capture = Capture::default();
    let tracker = ProgressTracker::new(1);
    tracker.settle(&capture);
    tracker.complete(&capture);
    let seen = capture.seen.lock().unwrap();
    assert_eq!(*seen, vec![100]);
}
