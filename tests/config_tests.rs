// tests/config_tests.rs
use std::path::Path;
use std::time::Duration;

use fernet_crypt::config::{self, Config};
use fernet_crypt::consts::CONFIG_ENV_VAR;
use fernet_crypt::error::{CoreError, ErrorKind};
use tempfile::tempdir;

#[test]
fn test_defaults() {
    let conf = Config::default();
    assert_eq!(conf.key.env_var, "FERNET_KEY");
    assert_eq!(conf.token.ttl_secs, None);
    assert_eq!(conf.ttl(), None);
    assert_eq!(conf.output.encrypted_extension, "enc");
    assert_eq!(conf.key_source().var(), "FERNET_KEY");
}

#[test]
fn test_load_full_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
        [key]
        env_var = "APP_FERNET_KEY"

        [token]
        ttl_secs = 3600

        [output]
        encrypted_extension = "fernet"
        "#,
    )
    .unwrap();

    let conf = config::load_from(&path).unwrap();
    assert_eq!(conf.key_source().var(), "APP_FERNET_KEY");
    assert_eq!(conf.ttl(), Some(Duration::from_secs(3600)));
    assert_eq!(
        conf.encrypted_path_for(Path::new("a/b.txt")),
        Path::new("a/b.txt.fernet")
    );
}

#[test]
fn test_partial_file_falls_back_per_section() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[token]\nttl_secs = 5\n[output]\n").unwrap();

    let conf = config::load_from(&path).unwrap();
    assert_eq!(conf.key.env_var, "FERNET_KEY");
    assert_eq!(conf.ttl(), Some(Duration::from_secs(5)));
    assert_eq!(conf.output.encrypted_extension, "enc");
}

#[test]
fn test_invalid_toml_is_config_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[token]\nttl_secs = \"soon\"\n").unwrap();

    let err = config::load_from(&path).err().expect("bad type must fail");
    assert!(matches!(err, CoreError::Config(_)));
    assert_eq!(err.kind(), ErrorKind::UnexpectedFailure);
}

#[test]
fn test_load_honours_env_override() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, "[key]\nenv_var = \"OVERRIDDEN\"\n").unwrap();

    std::env::set_var(CONFIG_ENV_VAR, &path);
    let conf = config::load().unwrap();
    assert_eq!(conf.key.env_var, "OVERRIDDEN");

    // pointing at a missing file yields defaults
    std::env::set_var(CONFIG_ENV_VAR, dir.path().join("absent.toml"));
    let conf = config::load().unwrap();
    assert_eq!(conf.key.env_var, "FERNET_KEY");

    std::env::remove_var(CONFIG_ENV_VAR);
}
