use super::*;
use std::rc::Rc;

fn record(tracker: &LoadingTracker) -> Rc<RefCell<Vec<bool>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    tracker.subscribe(move |s| sink.borrow_mut().push(s.busy));
    seen
}

#[test]
fn starts_idle() {
    let tracker = LoadingTracker::new();
    assert!(!tracker.is_busy());
    assert_eq!(tracker.pending(), 0);
    assert_eq!(tracker.snapshot(), LoadingSnapshot::default());
}

#[test]
fn overlapping_operations_stay_busy_until_last_settles() {
    let tracker = LoadingTracker::new();
    let seen = record(&tracker);

    tracker.begin();
    tracker.begin();
    tracker.begin();
    tracker.end();
    assert!(tracker.is_busy());
    tracker.end();
    assert!(tracker.is_busy());
    tracker.end();
    assert!(!tracker.is_busy());

    // One transition into busy, one out.
    assert_eq!(*seen.borrow(), vec![true, false]);
}

#[test]
fn end_without_begin_clamps_at_zero() {
    let tracker = LoadingTracker::new();
    let seen = record(&tracker);
    tracker.end();
    tracker.hide();
    assert_eq!(tracker.pending(), 0);
    assert!(seen.borrow().is_empty());

    tracker.begin();
    assert_eq!(tracker.pending(), 1);
}

#[test]
fn show_sets_message_and_hide_clears_it() {
    let tracker = LoadingTracker::new();
    tracker.show("Signing you in...");
    assert_eq!(tracker.snapshot(), LoadingSnapshot { busy: true, message: "Signing you in...".to_owned() });
    tracker.hide();
    assert_eq!(tracker.snapshot(), LoadingSnapshot::default());
}

#[test]
fn set_message_only_notifies_while_busy() {
    let tracker = LoadingTracker::new();
    let seen = record(&tracker);
    tracker.set_message("ignored while idle");
    assert!(seen.borrow().is_empty());

    tracker.begin();
    tracker.set_message("Processing transfer...");
    assert_eq!(tracker.snapshot().message, "Processing transfer...");
    assert_eq!(seen.borrow().len(), 2);
}

#[test]
fn force_hide_resets_counter() {
    let tracker = LoadingTracker::new();
    tracker.begin();
    tracker.begin();
    tracker.force_hide();
    assert_eq!(tracker.pending(), 0);
    assert!(!tracker.is_busy());
    tracker.end();
    assert_eq!(tracker.pending(), 0);
}
