//! Plain-text rendering of command results.
//!
//! Every command can also print raw JSON (`--json`); these are the
//! human-readable rows. Labels and orderings come from `lending::loans`.

#[cfg(test)]
#[path = "output_test.rs"]
mod output_test;

use lending::loans::{BookStatus, days_borrowed, format_date, format_date_time, loan_duration};
use lending::{Book, BorrowRecord, User};
use serde_json::Value;
use time::OffsetDateTime;

use crate::error::CliError;

pub fn print_json(value: &Value) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

pub fn user_lines(user: &User) -> Vec<String> {
    let email = if user.email.trim().is_empty() { "No email available" } else { &user.email };
    vec![
        format!("{} (id {})", user.username, user.id),
        email.to_owned(),
        user.role.label().to_owned(),
    ]
}

/// Member catalog rows with the caller's status per book.
pub fn book_lines(books: &[Book], my_loans: &[BorrowRecord], total: usize) -> Vec<String> {
    if books.is_empty() {
        return vec!["No books found".to_owned()];
    }
    let mut lines: Vec<String> = books
        .iter()
        .map(|book| {
            let status = BookStatus::of(book, my_loans);
            format!("{:>5}  {}  by {}  [{}]", book.id, book.title, book.author, status.label())
        })
        .collect();
    lines.push(format!("Showing {} of {total} books", books.len()));
    lines
}

/// Admin catalog rows: availability only.
pub fn admin_book_lines(books: &[Book]) -> Vec<String> {
    if books.is_empty() {
        return vec!["No books found".to_owned()];
    }
    books
        .iter()
        .map(|book| {
            let status = if book.available { "Available" } else { "Borrowed" };
            format!("{:>5}  {}  by {}  [{status}]", book.id, book.title, book.author)
        })
        .collect()
}

pub fn history_lines(records: &[BorrowRecord], now: OffsetDateTime) -> Vec<String> {
    if records.is_empty() {
        return vec!["No borrowing history found".to_owned()];
    }
    records
        .iter()
        .map(|record| {
            format!(
                "{}  borrowed {}  returned {}  {}",
                record.book_title,
                format_date(Some(&record.borrowed_at)),
                format_date(record.returned_at.as_deref()),
                loan_duration(record, now),
            )
        })
        .collect()
}

pub fn loan_lines(records: &[BorrowRecord], now: OffsetDateTime) -> Vec<String> {
    if records.is_empty() {
        return vec!["No borrowed books found".to_owned()];
    }
    records
        .iter()
        .map(|record| {
            let days = days_borrowed(&record.borrowed_at, now).map_or_else(|| "N/A".to_owned(), |d| format!("{d} days"));
            format!(
                "{}  {}  since {}  ({days})",
                record.book_title,
                record.username,
                format_date_time(&record.borrowed_at),
            )
        })
        .collect()
}
