use super::*;

#[test]
fn role_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    assert_eq!(serde_json::from_str::<Role>("\"member\"").unwrap(), Role::Member);
}

#[test]
fn role_rejects_unknown_wire_value() {
    assert!(serde_json::from_str::<Role>("\"librarian\"").is_err());
    assert_eq!(Role::parse("librarian"), None);
    assert_eq!(Role::parse(" admin "), Some(Role::Admin));
}

#[test]
fn role_labels_match_navbar_copy() {
    assert_eq!(Role::Admin.label(), "Administrator");
    assert_eq!(Role::Member.label(), "Member");
}

#[test]
fn login_response_flattens_into_user() {
    let body = r#"{"access":"a1","refresh":"r1","id":7,"username":"ann","email":"ann@x.io","role":"admin"}"#;
    let resp: LoginResponse = serde_json::from_str(body).unwrap();
    assert_eq!(resp.access, "a1");
    assert_eq!(
        resp.user(),
        User { id: 7, username: "ann".into(), email: "ann@x.io".into(), role: Role::Admin }
    );
}

#[test]
fn user_email_defaults_when_missing() {
    let user: User = serde_json::from_str(r#"{"id":1,"username":"bo","role":"member"}"#).unwrap();
    assert!(user.email.is_empty());
}

#[test]
fn borrow_record_active_iff_not_returned() {
    let mut record: BorrowRecord = serde_json::from_str(
        r#"{"id":1,"user":101,"book":2,"book_title":"Book B","username":"t","borrowed_at":"2024-02-20T12:00:00Z","returned_at":null}"#,
    )
    .unwrap();
    assert!(record.is_active());
    record.returned_at = Some("2024-02-22T12:00:00Z".into());
    assert!(!record.is_active());
}

#[test]
fn list_body_accepts_array() {
    let body: ListBody<Book> =
        serde_json::from_str(r#"[{"id":1,"title":"T","author":"A","available":true}]"#).unwrap();
    assert_eq!(body.into_vec().len(), 1);
}

#[test]
fn list_body_message_envelope_is_empty() {
    let body: ListBody<Book> = serde_json::from_str(r#"{"message":"No books available in the library"}"#).unwrap();
    assert!(body.into_vec().is_empty());
}

#[test]
fn refresh_response_rotation_is_optional() {
    let plain: RefreshResponse = serde_json::from_str(r#"{"access":"new"}"#).unwrap();
    assert_eq!(plain.refresh, None);
    let rotated: RefreshResponse = serde_json::from_str(r#"{"access":"new","refresh":"r2"}"#).unwrap();
    assert_eq!(rotated.refresh.as_deref(), Some("r2"));
}
