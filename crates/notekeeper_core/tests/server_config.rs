use notekeeper_core::{ConfigError, ServerConfig, DEFAULT_NOTES_FILE_NAME};

#[test]
fn valid_arguments_produce_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = ServerConfig::from_args(" 127.0.0.1 ", "8080", dir.path()).unwrap();

    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 8080);
    assert_eq!(config.listen_addr(), "127.0.0.1:8080");
    assert_eq!(
        config.default_notes_file(),
        dir.path().join(DEFAULT_NOTES_FILE_NAME)
    );
}

#[test]
fn blank_host_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let err = ServerConfig::from_args("  ", "8080", dir.path()).unwrap_err();
    assert_eq!(err, ConfigError::MissingHost);
}

#[test]
fn port_outside_range_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let err = ServerConfig::from_args("localhost", "70000", dir.path()).unwrap_err();
    assert_eq!(err, ConfigError::InvalidPort("70000".to_string()));
    assert!(err.to_string().contains("1 to 65535"));
}

#[test]
fn missing_cache_dir_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    let err = ServerConfig::from_args("localhost", "8080", &missing).unwrap_err();
    assert_eq!(err, ConfigError::MissingCacheDir(missing));
}

#[test]
fn regular_file_as_cache_dir_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("file.txt");
    std::fs::write(&file, "x").unwrap();

    let err = ServerConfig::from_args("localhost", "8080", &file).unwrap_err();
    assert_eq!(err, ConfigError::NotADirectory(file));
}
