#[test]
fn test_calls_before_open_are_dropped() {
    daylog::close();
    daylog::error("nobody listens");
    daylog::warning!("nor here {}", 1);
    daylog::debug("nor here");
    daylog::flush();
    assert!(!daylog::is_open());
    assert_eq!(daylog::threshold(), None);
    daylog::close();
}

#[test]
fn test_invalid_level_keeps_logger_closed() {
    let config = daylog::Config {
        level: 5,
        ..Default::default()
    };
    let err = daylog::open(&config).unwrap_err();
    assert!(err.to_string().contains("between 0 and 4"));
    assert!(!daylog::is_open());
}
