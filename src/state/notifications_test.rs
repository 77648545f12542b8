use super::*;
use std::rc::Rc;

#[test]
fn helpers_assign_level_and_default_duration() {
    let center = NotificationCenter::new();
    center.success("Saved", "");
    center.error("Transfer Failed", "Insufficient funds");
    center.info("Logged Out", "You have been successfully logged out");

    let items = center.items();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].level, NotificationLevel::Success);
    assert_eq!(items[0].duration, Some(DEFAULT_DURATION));
    assert_eq!(items[1].level, NotificationLevel::Error);
    assert_eq!(items[1].duration, Some(ERROR_DURATION));
    assert_eq!(items[1].message, "Insufficient funds");
}

#[test]
fn ids_are_unique_and_remove_targets_one() {
    let center = NotificationCenter::new();
    let a = center.warning("a", "");
    let b = center.warning("b", "");
    assert_ne!(a, b);

    assert!(center.remove(a));
    assert!(!center.remove(a));
    assert_eq!(center.count(), 1);
    assert_eq!(center.items()[0].id, b);
}

#[test]
fn by_level_filters() {
    let center = NotificationCenter::new();
    center.error("x", "");
    center.info("y", "");
    center.error("z", "");
    let errors = center.by_level(NotificationLevel::Error);
    assert_eq!(errors.iter().map(|n| n.title.as_str()).collect::<Vec<_>>(), vec!["x", "z"]);
}

#[test]
fn subscribers_receive_current_list() {
    let center = NotificationCenter::new();
    let sizes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&sizes);
    center.subscribe(move |items| sink.borrow_mut().push(items.len()));

    let id = center.info("one", "");
    center.info("two", "");
    center.remove(id);
    center.clear();
    center.clear();

    assert_eq!(*sizes.borrow(), vec![1, 2, 1, 0]);
}
