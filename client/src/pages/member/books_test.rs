use super::*;

#[test]
fn summary_counts_shown_against_total() {
    assert_eq!(showing_summary(2, 10), "Showing 2 of 10 books");
    assert_eq!(showing_summary(0, 0), "Showing 0 of 0 books");
}

#[test]
fn empty_hint_only_while_searching() {
    assert_eq!(empty_hint(""), None);
    assert_eq!(empty_hint("   "), None);
    assert_eq!(empty_hint("dune"), Some("Try adjusting your search term"));
}

#[test]
fn action_failures_name_the_action() {
    assert_eq!(action_failure(LoanAction::Borrow), "Failed to borrow book");
    assert_eq!(action_failure(LoanAction::Return), "Failed to return book");
}

#[test]
fn status_classes_are_distinct() {
    let classes = [BookStatus::Available, BookStatus::BorrowedByYou, BookStatus::Unavailable].map(status_class);
    assert_ne!(classes[0], classes[1]);
    assert_ne!(classes[1], classes[2]);
    assert!(classes.iter().all(|class| class.starts_with("badge ")));
}
