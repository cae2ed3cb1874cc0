use super::*;

const INBOX_KEYS: &[&str] = &[
    "INBOX_MOBILE_BREAKPOINT_PX",
    "INBOX_RESIZE_DEBOUNCE_MS",
    "INBOX_SCROLL_SETTLE_MS",
    "INBOX_FOCUS_DELAY_MS",
    "INBOX_QUICK_ACTION_DELAY_MS",
    "INBOX_GENERATION_DELAY_MIN_MS",
    "INBOX_GENERATION_DELAY_MAX_MS",
    "INBOX_REPLY_DELAY_MIN_MS",
    "INBOX_REPLY_DELAY_MAX_MS",
    "INBOX_REPLY_PROBABILITY",
    "INBOX_RESPONDER_TIMEOUT_MS",
    "INBOX_RECENT_QUERY_LIMIT",
    "INBOX_RANDOM_SEED",
];

/// # Safety
/// Only `from_env_defaults_then_overrides` touches the `INBOX_*` keys.
unsafe fn clear_inbox_env() {
    for key in INBOX_KEYS {
        unsafe { std::env::remove_var(key) };
    }
}

// =============================================================================
// env_parse
// =============================================================================

#[test]
fn env_parse_missing_returns_default() {
    let val: u64 = env_parse("__INBOX_TEST_MISSING_KEY__", 42);
    assert_eq!(val, 42);
}

#[test]
fn env_parse_present_valid() {
    unsafe { std::env::set_var("__INBOX_TEST_VALID__", "0.75") };
    let val: f64 = env_parse("__INBOX_TEST_VALID__", 0.0);
    assert!((val - 0.75).abs() < f64::EPSILON);
    unsafe { std::env::remove_var("__INBOX_TEST_VALID__") };
}

#[test]
fn env_parse_present_invalid_returns_default() {
    unsafe { std::env::set_var("__INBOX_TEST_INVALID__", "soon") };
    let val: u32 = env_parse("__INBOX_TEST_INVALID__", 7);
    assert_eq!(val, 7);
    unsafe { std::env::remove_var("__INBOX_TEST_INVALID__") };
}

// =============================================================================
// from_env
// =============================================================================

#[test]
fn from_env_defaults_then_overrides() {
    unsafe { clear_inbox_env() };

    let cfg = InboxConfig::from_env().unwrap();
    assert_eq!(cfg, InboxConfig::default());
    assert_eq!(cfg.mobile_breakpoint_px, 1024);
    assert_eq!(cfg.resize_debounce, Duration::from_millis(150));
    assert_eq!(cfg.generation_delay, DelayRange::new(1000, 2000));
    assert_eq!(cfg.reply_delay, DelayRange::new(2000, 5000));
    assert_eq!(cfg.recent_query_limit, 2);
    assert_eq!(cfg.random_seed, None);

    unsafe {
        std::env::set_var("INBOX_MOBILE_BREAKPOINT_PX", "768");
        std::env::set_var("INBOX_GENERATION_DELAY_MIN_MS", "10");
        std::env::set_var("INBOX_GENERATION_DELAY_MAX_MS", "20");
        std::env::set_var("INBOX_REPLY_PROBABILITY", "1.0");
        std::env::set_var("INBOX_RANDOM_SEED", "99");
    }
    let cfg = InboxConfig::from_env().unwrap();
    assert_eq!(cfg.mobile_breakpoint_px, 768);
    assert_eq!(cfg.generation_delay, DelayRange::new(10, 20));
    assert!((cfg.reply_probability - 1.0).abs() < f64::EPSILON);
    assert_eq!(cfg.random_seed, Some(99));

    unsafe { std::env::set_var("INBOX_REPLY_DELAY_MIN_MS", "9000") };
    assert_eq!(
        InboxConfig::from_env(),
        Err(ConfigError::InvalidRange { name: "reply_delay", min_ms: 9000, max_ms: 5000 })
    );

    let (_width, viewport) = tokio::sync::watch::channel(1280);
    let mounted = crate::inbox::spawn_inbox_from_env(viewport);
    assert!(matches!(
        mounted,
        Err(crate::error::InboxError::Config(ConfigError::InvalidRange { name: "reply_delay", .. }))
    ));

    unsafe { clear_inbox_env() };
}

// =============================================================================
// validate
// =============================================================================

#[test]
fn validate_accepts_defaults() {
    assert!(InboxConfig::default().validate().is_ok());
}

#[test]
fn validate_rejects_probability_out_of_range() {
    let cfg = InboxConfig { reply_probability: -0.1, ..InboxConfig::default() };
    assert_eq!(cfg.validate(), Err(ConfigError::InvalidProbability(-0.1)));
}

#[test]
fn validate_rejects_inverted_generation_range() {
    let cfg = InboxConfig { generation_delay: DelayRange::new(5, 1), ..InboxConfig::default() };
    assert!(matches!(
        cfg.validate(),
        Err(ConfigError::InvalidRange { name: "generation_delay", .. })
    ));
}

#[test]
fn validate_rejects_zero_breakpoint() {
    let cfg = InboxConfig { mobile_breakpoint_px: 0, ..InboxConfig::default() };
    assert_eq!(cfg.validate(), Err(ConfigError::ZeroBreakpoint));
}

#[test]
fn fixed_range_has_equal_bounds() {
    let range = DelayRange::fixed(250);
    assert_eq!(range.min_ms, 250);
    assert_eq!(range.max_ms, 250);
}
