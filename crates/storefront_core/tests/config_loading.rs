use std::fs;
use storefront_core::config::{load_defaults, Loader};

#[test]
fn user_file_layers_over_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storefront.toml");
    fs::write(
        &path,
        "[api]\nbase_url = \"https://shop.example/api\"\n\n[menu]\nmax_depth = 2\n",
    )
    .unwrap();

    let config = Loader::new().with_file(&path).build().unwrap();

    assert_eq!(config.api.base_url, "https://shop.example/api");
    assert_eq!(config.api.timeout_secs, 10);
    assert_eq!(config.menu.max_depth, 2);
    assert_eq!(config.menu.indent_width, 2);
}

#[test]
fn missing_optional_file_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Loader::new()
        .with_optional_file(dir.path().join("absent.toml"))
        .build()
        .unwrap();
    assert_eq!(config.api.base_url, load_defaults().unwrap().api.base_url);
}

#[test]
fn missing_required_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Loader::new()
        .with_file(dir.path().join("absent.toml"))
        .build()
        .is_err());
}

#[test]
fn logging_dir_can_be_configured() {
    let config = Loader::new()
        .set_override("logging.dir", "/var/log/storefront")
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(config.logging.dir.as_deref(), Some("/var/log/storefront"));
}

#[test]
fn env_layer_overrides_defaults() {
    std::env::set_var("STOREFRONT__API__TIMEOUT_SECS", "3");
    let config = Loader::new().with_env().build().unwrap();
    std::env::remove_var("STOREFRONT__API__TIMEOUT_SECS");
    assert_eq!(config.api.timeout_secs, 3);
}

#[test]
fn zero_timeout_is_rejected() {
    let err = Loader::new()
        .set_override("api.timeout_secs", 0_i64)
        .unwrap()
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("timeout_secs"), "{err}");
}
