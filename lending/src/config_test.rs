use super::*;

#[test]
fn defaults_when_unset() {
    let cfg = ClientConfig::from_values(None, None);
    assert_eq!(cfg.api_url, "http://localhost:8000");
    assert!(!cfg.with_credentials);
    assert_eq!(ClientConfig::default(), cfg);
}

#[test]
fn blank_url_takes_default() {
    let cfg = ClientConfig::from_values(Some("   "), None);
    assert_eq!(cfg.api_url, "http://localhost:8000");
}

#[test]
fn trailing_slashes_are_trimmed() {
    let cfg = ClientConfig::from_values(Some("https://library.example.com//"), None);
    assert_eq!(cfg.api_url, "https://library.example.com");
}

#[test]
fn credentials_flag_requires_literal_true() {
    assert!(ClientConfig::from_values(None, Some("true")).with_credentials);
    assert!(!ClientConfig::from_values(None, Some("TRUE")).with_credentials);
    assert!(!ClientConfig::from_values(None, Some("1")).with_credentials);
    assert!(!ClientConfig::from_values(None, Some("false")).with_credentials);
}

#[test]
fn endpoint_joins_without_double_slash() {
    let cfg = ClientConfig::from_values(Some("http://api.test/"), None);
    assert_eq!(cfg.endpoint("/api/books/"), "http://api.test/api/books/");
    assert_eq!(cfg.endpoint("auth/login/"), "http://api.test/auth/login/");
}

#[test]
fn lookup_reads_both_variables() {
    let cfg = ClientConfig::from_lookup(|var| match var {
        API_URL_VAR => Some("https://library.example.com/".into()),
        WITH_CREDENTIALS_VAR => Some("true".into()),
        _ => None,
    });
    assert_eq!(cfg.api_url, "https://library.example.com");
    assert!(cfg.with_credentials);
}

#[test]
fn lookup_without_variables_matches_defaults() {
    assert_eq!(ClientConfig::from_lookup(|_| None), ClientConfig::default());
}

#[test]
fn explicit_url_overrides_environment_but_keeps_credentials() {
    let env = ClientConfig::from_values(Some("http://env.test"), Some("true"));
    let cfg = env.clone().with_api_url(Some("http://flag.test/"));
    assert_eq!(cfg.api_url, "http://flag.test");
    assert!(cfg.with_credentials);

    assert_eq!(env.clone().with_api_url(None), env);
    assert_eq!(env.clone().with_api_url(Some("  ")), env);
}
