use super::*;

/// # Safety
/// Tests must run with `--test-threads=1` to avoid env races.
unsafe fn clear_server_env() {
    unsafe {
        std::env::remove_var("PORT");
        std::env::remove_var("DATABASE_URL");
        std::env::remove_var("DB_MAX_CONNECTIONS");
        std::env::remove_var("STATIC_DIR");
    }
}

#[test]
fn env_parse_missing_returns_default() {
    let val: u32 = env_parse("__PALLETSCAN_TEST_MISSING__", 42);
    assert_eq!(val, 42);
}

#[test]
fn env_parse_present_invalid_returns_default() {
    unsafe { std::env::set_var("__PALLETSCAN_TEST_INVALID__", "notanumber") };
    let val: u16 = env_parse("__PALLETSCAN_TEST_INVALID__", 7);
    assert_eq!(val, 7);
    unsafe { std::env::remove_var("__PALLETSCAN_TEST_INVALID__") };
}

#[test]
fn from_env_defaults_then_overrides() {
    unsafe { clear_server_env() };

    let cfg = ServerConfig::from_env();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.database_url, DEFAULT_DATABASE_URL);
    assert_eq!(cfg.db_max_connections, DEFAULT_DB_MAX_CONNECTIONS);
    assert_eq!(cfg.static_dir, PathBuf::from(DEFAULT_STATIC_DIR));

    unsafe {
        std::env::set_var("PORT", "8081");
        std::env::set_var("DATABASE_URL", "sqlite::memory:");
        std::env::set_var("DB_MAX_CONNECTIONS", "2");
        std::env::set_var("STATIC_DIR", "/srv/palletscan");
    }

    let cfg = ServerConfig::from_env();
    assert_eq!(cfg.port, 8081);
    assert_eq!(cfg.database_url, "sqlite::memory:");
    assert_eq!(cfg.db_max_connections, 2);
    assert_eq!(cfg.static_dir, PathBuf::from("/srv/palletscan"));

    unsafe { clear_server_env() };
}
