//! Derived views over books and borrow records.
//!
//! Everything here is a pure function of data already fetched plus, for
//! durations, the caller's notion of "now". Pages and CLI commands share
//! these so the two front ends never disagree on a label or an ordering.

#[cfg(test)]
#[path = "loans_test.rs"]
mod loans_test;

use std::cmp::Ordering;

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Duration, OffsetDateTime};

use crate::types::{Book, BorrowRecord};

const NOT_AVAILABLE: &str = "N/A";

// =============================================================================
// MEMBERSHIP
// =============================================================================

/// Loans that have not been returned.
#[must_use]
pub fn active_loans(records: &[BorrowRecord]) -> Vec<BorrowRecord> {
    records.iter().filter(|record| record.is_active()).cloned().collect()
}

#[must_use]
pub fn returned_loans(records: &[BorrowRecord]) -> Vec<BorrowRecord> {
    records.iter().filter(|record| !record.is_active()).cloned().collect()
}

/// Whether `book_id` appears among the caller's active loans. Linear scan.
#[must_use]
pub fn is_borrowed(book_id: i64, records: &[BorrowRecord]) -> bool {
    records.iter().any(|record| record.is_active() && record.book == book_id)
}

/// Per-row status on the member catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BookStatus {
    Available,
    BorrowedByYou,
    Unavailable,
}

/// What the row's button does, if anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoanAction {
    Borrow,
    Return,
}

impl LoanAction {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Borrow => "Borrow",
            Self::Return => "Return",
        }
    }
}

impl BookStatus {
    /// Own loans win over the availability flag: a book I hold is reported
    /// unavailable by the backend but is still mine to return.
    #[must_use]
    pub fn of(book: &Book, my_loans: &[BorrowRecord]) -> Self {
        if is_borrowed(book.id, my_loans) {
            Self::BorrowedByYou
        } else if book.available {
            Self::Available
        } else {
            Self::Unavailable
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::BorrowedByYou => "Borrowed by you",
            Self::Unavailable => "Unavailable",
        }
    }

    #[must_use]
    pub fn action(self) -> Option<LoanAction> {
        match self {
            Self::Available => Some(LoanAction::Borrow),
            Self::BorrowedByYou => Some(LoanAction::Return),
            Self::Unavailable => None,
        }
    }
}

// =============================================================================
// SEARCH, FILTER, SORT
// =============================================================================

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Case-insensitive substring match on title or author. An empty term
/// matches everything.
#[must_use]
pub fn search_books(books: &[Book], term: &str) -> Vec<Book> {
    let term = term.trim();
    books
        .iter()
        .filter(|book| contains_ignore_case(&book.title, term) || contains_ignore_case(&book.author, term))
        .cloned()
        .collect()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HistoryFilter {
    #[default]
    All,
    Active,
    Returned,
}

impl HistoryFilter {
    pub const ALL: [Self; 3] = [Self::All, Self::Active, Self::Returned];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Returned => "returned",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All Books",
            Self::Active => "Currently Borrowed",
            Self::Returned => "Returned",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|filter| filter.as_str() == raw.trim())
    }

    fn admits(self, record: &BorrowRecord) -> bool {
        match self {
            Self::All => true,
            Self::Active => record.is_active(),
            Self::Returned => !record.is_active(),
        }
    }
}

/// History rows matching `filter` and a title search, newest borrow first.
#[must_use]
pub fn filter_history(records: &[BorrowRecord], filter: HistoryFilter, term: &str) -> Vec<BorrowRecord> {
    let term = term.trim();
    let mut rows: Vec<BorrowRecord> = records
        .iter()
        .filter(|record| filter.admits(record) && contains_ignore_case(&record.book_title, term))
        .cloned()
        .collect();
    rows.sort_by(|a, b| by_borrowed_at(b, a));
    rows
}

/// Orderings offered on the admin loans table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoanSort {
    TitleAsc,
    TitleDesc,
    UsernameAsc,
    UsernameDesc,
    BorrowedAtAsc,
    #[default]
    BorrowedAtDesc,
}

impl LoanSort {
    pub const ALL: [Self; 6] = [
        Self::BorrowedAtDesc,
        Self::BorrowedAtAsc,
        Self::TitleAsc,
        Self::TitleDesc,
        Self::UsernameAsc,
        Self::UsernameDesc,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TitleAsc => "title_asc",
            Self::TitleDesc => "title_desc",
            Self::UsernameAsc => "username_asc",
            Self::UsernameDesc => "username_desc",
            Self::BorrowedAtAsc => "borrowed_at_asc",
            Self::BorrowedAtDesc => "borrowed_at_desc",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::TitleAsc => "Title (A-Z)",
            Self::TitleDesc => "Title (Z-A)",
            Self::UsernameAsc => "Username (A-Z)",
            Self::UsernameDesc => "Username (Z-A)",
            Self::BorrowedAtAsc => "Borrow Date (Oldest)",
            Self::BorrowedAtDesc => "Borrow Date (Newest)",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|sort| sort.as_str() == raw.trim())
    }

    fn compare(self, a: &BorrowRecord, b: &BorrowRecord) -> Ordering {
        match self {
            Self::TitleAsc => by_text(&a.book_title, &b.book_title),
            Self::TitleDesc => by_text(&b.book_title, &a.book_title),
            Self::UsernameAsc => by_text(&a.username, &b.username),
            Self::UsernameDesc => by_text(&b.username, &a.username),
            Self::BorrowedAtAsc => by_borrowed_at(a, b),
            Self::BorrowedAtDesc => by_borrowed_at(b, a),
        }
    }
}

/// Admin loans matching a title-or-username search, in `sort` order.
#[must_use]
pub fn sort_loans(records: &[BorrowRecord], term: &str, sort: LoanSort) -> Vec<BorrowRecord> {
    let term = term.trim();
    let mut rows: Vec<BorrowRecord> = records
        .iter()
        .filter(|record| contains_ignore_case(&record.book_title, term) || contains_ignore_case(&record.username, term))
        .cloned()
        .collect();
    rows.sort_by(|a, b| sort.compare(a, b));
    rows
}

fn by_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Unparseable timestamps order before every real one.
fn by_borrowed_at(a: &BorrowRecord, b: &BorrowRecord) -> Ordering {
    parse_timestamp(&a.borrowed_at).cmp(&parse_timestamp(&b.borrowed_at))
}

// =============================================================================
// DASHBOARD STATS
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemberStats {
    pub available_books: usize,
    pub currently_borrowed: usize,
    pub total_borrowed: usize,
}

impl MemberStats {
    #[must_use]
    pub fn compute(books: &[Book], history: &[BorrowRecord]) -> Self {
        Self {
            available_books: books.iter().filter(|book| book.available).count(),
            currently_borrowed: history.iter().filter(|record| record.is_active()).count(),
            total_borrowed: history.len(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AdminStats {
    pub total_books: usize,
    pub available_books: usize,
    pub active_loans: usize,
}

impl AdminStats {
    #[must_use]
    pub fn compute(books: &[Book], loans: &[BorrowRecord]) -> Self {
        Self {
            total_books: books.len(),
            available_books: books.iter().filter(|book| book.available).count(),
            active_loans: loans.len(),
        }
    }
}

// =============================================================================
// DATES
// =============================================================================

/// Parse a backend RFC 3339 timestamp.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(raw.trim(), &Rfc3339).ok()
}

/// `Mar 1, 2025`; `N/A` when absent. Unparseable input is shown as-is.
#[must_use]
pub fn format_date(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return NOT_AVAILABLE.to_owned();
    };
    let format = format_description!("[month repr:short] [day padding:none], [year]");
    parse_timestamp(raw).and_then(|ts| ts.format(format).ok()).unwrap_or_else(|| raw.to_owned())
}

/// `Mar 1, 2025 10:05` (UTC), used on the admin loans table.
#[must_use]
pub fn format_date_time(raw: &str) -> String {
    let format = format_description!("[month repr:short] [day padding:none], [year] [hour]:[minute]");
    parse_timestamp(raw)
        .and_then(|ts| ts.to_offset(time::UtcOffset::UTC).format(format).ok())
        .unwrap_or_else(|| raw.to_owned())
}

/// Whole days between two instants, rounded up. Order does not matter.
#[must_use]
pub fn ceil_days(from: OffsetDateTime, to: OffsetDateTime) -> u64 {
    let elapsed: Duration = (to - from).abs();
    let day_ms = u128::from(86_400_000_u32);
    let days = elapsed.whole_milliseconds().unsigned_abs().div_ceil(day_ms);
    u64::try_from(days).unwrap_or(u64::MAX)
}

/// Days an active loan has been out as of `now`.
#[must_use]
pub fn days_borrowed(borrowed_at: &str, now: OffsetDateTime) -> Option<u64> {
    parse_timestamp(borrowed_at).map(|start| ceil_days(start, now))
}

/// `N days` for a returned loan, `N days (ongoing)` for an active one.
#[must_use]
pub fn loan_duration(record: &BorrowRecord, now: OffsetDateTime) -> String {
    let Some(start) = parse_timestamp(&record.borrowed_at) else {
        return NOT_AVAILABLE.to_owned();
    };
    match record.returned_at.as_deref() {
        None => format!("{} days (ongoing)", ceil_days(start, now)),
        Some(returned) => match parse_timestamp(returned) {
            Some(end) => format!("{} days", ceil_days(start, end)),
            None => NOT_AVAILABLE.to_owned(),
        },
    }
}
