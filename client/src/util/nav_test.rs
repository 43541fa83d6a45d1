use super::*;

#[test]
fn admin_links_cover_admin_section() {
    let labels: Vec<&str> = nav_links(Role::Admin).iter().map(|l| l.label).collect();
    assert_eq!(labels, vec!["Dashboard", "Manage Books", "Borrowed Books"]);
    assert!(nav_links(Role::Admin).iter().all(|l| l.route.required_roles() == Some(&[Role::Admin][..])));
}

#[test]
fn member_links_cover_member_section() {
    let paths: Vec<&str> = nav_links(Role::Member).iter().map(|l| l.route.path()).collect();
    assert_eq!(paths, vec!["/dashboard", "/books", "/history"]);
}

#[test]
fn active_link_matches_current_path() {
    let books = nav_links(Role::Member)[1];
    assert_eq!(link_class(&books, "/books"), "navbar__link navbar__link--active");
    assert_eq!(link_class(&books, "/books/"), "navbar__link navbar__link--active");
    assert_eq!(link_class(&books, "/history"), "navbar__link");
}

#[test]
fn blank_email_shows_placeholder() {
    assert_eq!(display_email(""), "No email available");
    assert_eq!(display_email("mia@example.com"), "mia@example.com");
}
