use time::macros::datetime;

use super::*;
use crate::test_support::{book, loan};

fn history() -> Vec<BorrowRecord> {
    vec![
        loan(1, 10, "Dune", "2025-01-05T09:00:00Z", Some("2025-01-12T08:00:00Z")),
        loan(2, 11, "Emma", "2025-03-01T10:00:00Z", None),
        loan(3, 12, "Dracula", "2025-02-10T12:30:00.250000Z", Some("2025-02-11T12:30:00Z")),
    ]
}

// =============================================================
// Membership and status
// =============================================================

#[test]
fn active_and_returned_partition_history() {
    let records = history();
    let active: Vec<i64> = active_loans(&records).iter().map(|r| r.id).collect();
    let returned: Vec<i64> = returned_loans(&records).iter().map(|r| r.id).collect();
    assert_eq!(active, vec![2]);
    assert_eq!(returned, vec![1, 3]);
}

#[test]
fn is_borrowed_ignores_returned_loans() {
    let records = history();
    assert!(is_borrowed(11, &records));
    assert!(!is_borrowed(10, &records));
    assert!(!is_borrowed(99, &records));
}

#[test]
fn status_prefers_own_loan_over_availability() {
    let records = history();
    assert_eq!(BookStatus::of(&book(11, "Emma", "Jane Austen", false), &records), BookStatus::BorrowedByYou);
    assert_eq!(BookStatus::of(&book(10, "Dune", "Frank Herbert", true), &records), BookStatus::Available);
    assert_eq!(BookStatus::of(&book(13, "Ulysses", "James Joyce", false), &records), BookStatus::Unavailable);
}

#[test]
fn status_labels_and_actions() {
    assert_eq!(BookStatus::Available.label(), "Available");
    assert_eq!(BookStatus::BorrowedByYou.label(), "Borrowed by you");
    assert_eq!(BookStatus::Unavailable.label(), "Unavailable");
    assert_eq!(BookStatus::Available.action(), Some(LoanAction::Borrow));
    assert_eq!(BookStatus::BorrowedByYou.action().map(LoanAction::label), Some("Return"));
    assert_eq!(BookStatus::Unavailable.action(), None);
}

// =============================================================
// Search / filter / sort
// =============================================================

#[test]
fn book_search_matches_title_or_author_case_insensitively() {
    let books = vec![book(1, "Dune", "Frank Herbert", true), book(2, "Emma", "Jane Austen", true)];
    assert_eq!(search_books(&books, "AUSTEN").len(), 1);
    assert_eq!(search_books(&books, "dun")[0].id, 1);
    assert_eq!(search_books(&books, "  ").len(), 2);
    assert!(search_books(&books, "tolkien").is_empty());
}

#[test]
fn history_is_newest_first() {
    let ids: Vec<i64> = filter_history(&history(), HistoryFilter::All, "").iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![2, 3, 1]);
}

#[test]
fn history_filter_and_search_combine() {
    let records = history();
    assert_eq!(filter_history(&records, HistoryFilter::Active, "").len(), 1);
    let returned: Vec<i64> = filter_history(&records, HistoryFilter::Returned, "").iter().map(|r| r.id).collect();
    assert_eq!(returned, vec![3, 1]);
    assert!(filter_history(&records, HistoryFilter::Active, "dune").is_empty());
    assert_eq!(filter_history(&records, HistoryFilter::All, "DRAC")[0].id, 3);
}

#[test]
fn history_filter_parses_wire_names() {
    assert_eq!(HistoryFilter::parse("returned"), Some(HistoryFilter::Returned));
    assert_eq!(HistoryFilter::parse("borrowed"), None);
    assert_eq!(HistoryFilter::default(), HistoryFilter::All);
}

#[test]
fn admin_loans_default_to_newest_borrow() {
    let mut records = history();
    records[0].username = "zed".into();
    let ids: Vec<i64> = sort_loans(&records, "", LoanSort::default()).iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![2, 3, 1]);
}

#[test]
fn admin_loans_sort_by_text_fields() {
    let mut records = history();
    records[0].username = "zed".into();
    records[1].username = "amy".into();
    records[2].username = "Bob".into();

    let by_title: Vec<i64> = sort_loans(&records, "", LoanSort::TitleAsc).iter().map(|r| r.id).collect();
    assert_eq!(by_title, vec![3, 1, 2]);
    let by_user: Vec<i64> = sort_loans(&records, "", LoanSort::UsernameDesc).iter().map(|r| r.id).collect();
    assert_eq!(by_user, vec![1, 3, 2]);
    let oldest: Vec<i64> = sort_loans(&records, "", LoanSort::BorrowedAtAsc).iter().map(|r| r.id).collect();
    assert_eq!(oldest, vec![1, 3, 2]);
}

#[test]
fn admin_loans_search_title_or_username() {
    let mut records = history();
    records[1].username = "amy".into();
    assert_eq!(sort_loans(&records, "AMY", LoanSort::default()).len(), 1);
    assert_eq!(sort_loans(&records, "mia", LoanSort::default()).len(), 2);
    assert_eq!(sort_loans(&records, "emma", LoanSort::default())[0].id, 2);
}

#[test]
fn loan_sort_round_trips_wire_names() {
    for sort in LoanSort::ALL {
        assert_eq!(LoanSort::parse(sort.as_str()), Some(sort));
    }
}

// =============================================================
// Stats
// =============================================================

#[test]
fn member_stats_count_books_and_loans() {
    let books = vec![book(1, "A", "a", true), book(2, "B", "b", false), book(3, "C", "c", true)];
    let stats = MemberStats::compute(&books, &history());
    assert_eq!(stats, MemberStats { available_books: 2, currently_borrowed: 1, total_borrowed: 3 });
}

#[test]
fn admin_stats_count_catalog_and_active_loans() {
    let books = vec![book(1, "A", "a", true), book(2, "B", "b", false)];
    let stats = AdminStats::compute(&books, &active_loans(&history()));
    assert_eq!(stats, AdminStats { total_books: 2, available_books: 1, active_loans: 1 });
}

// =============================================================
// Dates
// =============================================================

#[test]
fn format_date_is_short_month_day_year() {
    assert_eq!(format_date(Some("2025-03-01T10:00:00Z")), "Mar 1, 2025");
    assert_eq!(format_date(Some("2024-12-25T23:59:59.999999+00:00")), "Dec 25, 2024");
    assert_eq!(format_date(None), "N/A");
    assert_eq!(format_date(Some("yesterday")), "yesterday");
}

#[test]
fn format_date_time_shows_utc_clock() {
    assert_eq!(format_date_time("2025-03-01T10:05:00+02:00"), "Mar 1, 2025 08:05");
}

#[test]
fn ceil_days_rounds_partial_days_up() {
    let start = datetime!(2025-03-01 10:00 UTC);
    assert_eq!(ceil_days(start, start), 0);
    assert_eq!(ceil_days(start, datetime!(2025-03-01 10:00:01 UTC)), 1);
    assert_eq!(ceil_days(start, datetime!(2025-03-03 10:00 UTC)), 2);
    assert_eq!(ceil_days(datetime!(2025-03-03 10:00 UTC), start), 2);
}

#[test]
fn loan_duration_marks_ongoing_loans() {
    let now = datetime!(2025-03-04 09:00 UTC);
    let records = history();
    assert_eq!(loan_duration(&records[0], now), "7 days");
    assert_eq!(loan_duration(&records[1], now), "3 days (ongoing)");
    assert_eq!(loan_duration(&records[2], now), "1 days");
}

#[test]
fn days_borrowed_counts_to_now() {
    let now = datetime!(2025-03-04 09:00 UTC);
    assert_eq!(days_borrowed("2025-03-01T10:00:00Z", now), Some(3));
    assert_eq!(days_borrowed("garbage", now), None);
}
