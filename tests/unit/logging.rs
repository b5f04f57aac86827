//! Unit tests for log format selection

use airwatch::logging::LogFormat;

#[test]
fn test_format_follows_environment() {
    assert_eq!(LogFormat::for_environment("production", None), LogFormat::Json);
    assert_eq!(LogFormat::for_environment("prod", None), LogFormat::Json);
    assert_eq!(LogFormat::for_environment("sandbox", None), LogFormat::Pretty);
}

#[test]
fn test_explicit_format_wins() {
    assert_eq!(LogFormat::for_environment("sandbox", Some("JSON")), LogFormat::Json);
    assert_eq!(LogFormat::for_environment("production", Some("pretty")), LogFormat::Pretty);
    assert_eq!(LogFormat::for_environment("production", Some("bogus")), LogFormat::Json);
}
