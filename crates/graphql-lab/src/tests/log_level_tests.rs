use crate::parse_log_level;

#[test]
fn log_level_names_are_case_insensitive() {
    assert_eq!(parse_log_level("TRACE"), Some(tracing::Level::TRACE));
    assert_eq!(parse_log_level(" debug\n"), Some(tracing::Level::DEBUG));
    assert_eq!(parse_log_level("Verbose"), Some(tracing::Level::DEBUG));
    assert_eq!(parse_log_level("warn"), Some(tracing::Level::WARN));
}

#[test]
fn unknown_log_levels_are_rejected() {
    assert_eq!(parse_log_level("loud"), None);
    assert_eq!(parse_log_level(""), None);
}
