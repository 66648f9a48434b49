use std::sync::Arc;

use partial::{Partial, record};
use partial_testhelpers::test;

#[derive(Clone, Debug, PartialEq)]
struct Settings {
    retries: u32,
    endpoint: String,
    proxy: Option<String>,
}

record! {
    impl Settings {
        RETRIES => retries: u32,
        ENDPOINT => endpoint: String,
        PROXY => proxy: Option<String>,
    }
}

fn defaults() -> Settings {
    Settings {
        retries: 3,
        endpoint: "https://localhost:8443".to_string(),
        proxy: Some("socks5://127.0.0.1:1080".to_string()),
    }
}

#[test]
fn overrides_on_top_of_defaults() {
    let mut settings = Partial::with_backing(defaults());
    settings
        .set_value(&Settings::RETRIES, 10)
        .set_optional_value(&Settings::PROXY, None);

    let built = settings.build()?;
    assert_eq!(built.retries, 10);
    assert_eq!(built.endpoint, defaults().endpoint);
    assert_eq!(built.proxy, None);
}

#[test]
fn shared_backing_is_not_copied() {
    let shared = Arc::new(defaults());
    let first = Partial::with_shared_backing(Arc::clone(&shared));
    let second = first.clone();

    assert!(std::ptr::eq(
        first.backing_value().unwrap(),
        second.backing_value().unwrap()
    ));
    assert_eq!(Arc::strong_count(&shared), 3);
}

#[test]
fn removing_an_override_restores_the_default() {
    let mut settings = Partial::with_backing(defaults());
    settings.set_value(&Settings::RETRIES, 0);
    assert_eq!(settings.value(&Settings::RETRIES)?, 0);

    settings.remove_value(&Settings::RETRIES);
    assert_eq!(settings.value(&Settings::RETRIES)?, 3);
    assert!(settings.is_empty());
}

#[test]
fn backing_value_is_never_mutated() {
    let mut settings = Partial::with_backing(defaults());
    settings
        .set_value(&Settings::ENDPOINT, "https://example.invalid".to_string())
        .set_optional_value(&Settings::PROXY, None);

    assert_eq!(settings.backing_value(), Some(&defaults()));
}
