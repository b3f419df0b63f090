use std::panic;
use std::thread;

use assert_rail::config::{self, local_context, with_local_context, LocalContext, Settings};

#[test]
fn nested_contexts_restore_in_order() {
    let before = config::settings();
    let depth = config::depth();

    {
        let _outer = local_context(false);
        assert!(!config::expect_raises());
        assert_eq!(config::depth(), depth + 1);
        {
            let _inner = local_context(true);
            assert!(config::expect_raises());
            assert_eq!(config::depth(), depth + 2);
        }
        assert!(!config::expect_raises());
    }

    assert_eq!(config::settings(), before);
    assert_eq!(config::depth(), depth);
}

#[test]
fn context_is_restored_after_panic() {
    let before = config::settings();
    let depth = config::depth();

    let result = panic::catch_unwind(|| {
        let _scope = local_context(!before.expect_raises);
        panic!("inside scope");
    });

    assert!(result.is_err());
    assert_eq!(config::settings(), before);
    assert_eq!(config::depth(), depth);
}

#[test]
fn with_local_context_returns_closure_value() {
    let value = with_local_context(true, || {
        assert!(config::expect_raises());
        42
    });
    assert_eq!(value, 42);
}

#[test]
fn set_expect_raises_only_touches_innermost_scope() {
    let before = config::expect_raises();
    {
        let _scope = LocalContext::new();
        config::set_expect_raises(!before);
        assert_eq!(config::expect_raises(), !before);
    }
    assert_eq!(config::expect_raises(), before);
}

#[test]
fn configure_mutates_settings() {
    let _scope = LocalContext::new().configure(|settings| settings.expect_raises = true);
    assert_eq!(config::settings(), Settings { expect_raises: true });

    config::configure(|settings| settings.expect_raises = false);
    assert!(!config::expect_raises());
}

#[test]
fn new_threads_start_from_defaults() {
    let _scope = local_context(!Settings::default().expect_raises);

    let seen = thread::spawn(|| (config::settings(), config::depth())).join().unwrap();

    assert_eq!(seen, (Settings::default(), 1));
}

#[test]
fn default_follows_build_profile() {
    assert_eq!(Settings::default().expect_raises, cfg!(debug_assertions));
}

#[test]
fn configure_callback_may_read_settings() {
    let _scope = local_context(false);

    config::configure(|settings| settings.expect_raises = !config::expect_raises());

    assert!(config::expect_raises());
}

#[test]
fn configure_callback_may_open_scopes() {
    let depth = config::depth();
    let _scope = local_context(true);

    config::configure(|settings| {
        let nested = local_context(false);
        settings.expect_raises = config::expect_raises();
        drop(nested);
    });

    assert!(!config::expect_raises());
    assert_eq!(config::depth(), depth + 1);

    let guarded = LocalContext::new().configure(|settings| {
        settings.expect_raises = !config::settings().expect_raises;
    });
    assert!(config::expect_raises());
    drop(guarded);
}
