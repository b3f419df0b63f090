use std::cell::Cell;
use std::io;
use std::num::ParseIntError;
use std::panic::{self, AssertUnwindSafe};

use assert_rail::{
    error_set, ignore_exception, log_exception, BoxError, ErrorFilter, ErrorSet, ExceptionHandler,
    ExceptionParent, Outcome, RecoveredException,
};

use crate::common::RecordingLogger;

fn parse(raw: &str) -> Result<u8, ParseIntError> {
    raw.parse()
}

#[test]
fn success_returns_value_and_skips_callback() {
    let calls = Cell::new(0);
    let mut handler = ExceptionHandler::builder()
        .handler(|_| {
            calls.set(calls.get() + 1);
            Outcome::Suppress
        })
        .build();

    assert_eq!(handler.run(|| parse("7")).unwrap(), Some(7));
    assert_eq!(calls.get(), 0);
}

#[test]
fn callback_decides_suppression() {
    let calls = Cell::new(0);
    let suppress = Cell::new(true);
    let mut handler = ExceptionHandler::builder()
        .handler(|caught| {
            assert!(caught.is_error());
            calls.set(calls.get() + 1);
            Outcome::suppress_if(suppress.get())
        })
        .build();

    assert_eq!(handler.run(|| parse("x")).unwrap(), None);

    suppress.set(false);
    let err = handler.run(|| parse("x")).unwrap_err();
    assert!(err.is::<ParseIntError>());

    assert_eq!(calls.get(), 2);
}

#[test]
fn callback_sees_the_error() {
    let seen = Cell::new(false);
    let mut handler = ExceptionHandler::builder()
        .handler(|caught| {
            let message = caught.error().map(|error| error.to_string());
            seen.set(message.as_deref() == Some("queue full"));
            Outcome::Suppress
        })
        .build();

    handler.run(|| Err::<(), BoxError>("queue full".into())).unwrap();
    assert!(seen.get());
}

#[test]
fn ignored_errors_skip_the_callback() {
    let calls = Cell::new(0);
    let mut handler = ignore_exception(error_set![ParseIntError, io::Error])
        .handler(|_| {
            calls.set(calls.get() + 1);
            Outcome::Propagate
        })
        .build();

    assert_eq!(handler.run(|| parse("x")).unwrap(), None);
    assert_eq!(handler.run(|| Err::<(), _>(io::Error::other("gone"))).unwrap(), None);
    assert_eq!(calls.get(), 0);

    let err = handler.run(|| Err::<(), BoxError>("other".into())).unwrap_err();
    assert_eq!(err.to_string(), "other");
    assert_eq!(calls.get(), 1);
}

#[test]
fn ignore_by_exception_family() {
    let mut handler = ignore_exception(ErrorFilter::exception::<ExceptionParent>()).build();

    assert_eq!(handler.run(|| Err::<(), _>(RecoveredException::new("recovered"))).unwrap(), None);
    assert!(handler.run(|| parse("x")).is_err());
}

#[test]
fn empty_ignore_set_suppresses_nothing() {
    let mut handler = ignore_exception(ErrorSet::none())
        .handler(|_| Outcome::Propagate)
        .build();

    assert!(handler.run(|| parse("x")).is_err());
}

#[test]
fn logger_records_every_failure() {
    let logger = RecordingLogger::shared();
    let mut handler = log_exception(logger.clone()).build();

    let err = handler.run(|| parse("x")).unwrap_err();
    assert!(err.is::<ParseIntError>());
    assert_eq!(handler.run(|| parse("1")).unwrap(), Some(1));

    let messages = logger.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("Exception caught"));
}

#[test]
fn ignored_failures_are_still_logged() {
    let logger = RecordingLogger::shared();
    let mut handler =
        ignore_exception(ErrorSet::of::<ParseIntError>()).logger(logger.clone()).build();

    assert_eq!(handler.run(|| parse("x")).unwrap(), None);
    assert_eq!(logger.messages().len(), 1);
}

#[test]
fn panics_bypass_callback_by_default() {
    let calls = Cell::new(0);
    let mut handler = ExceptionHandler::builder()
        .handler(|_| {
            calls.set(calls.get() + 1);
            Outcome::Suppress
        })
        .build();

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        handler.run(|| -> Result<(), BoxError> { panic!("interrupted") })
    }));

    assert!(result.is_err());
    assert_eq!(calls.get(), 0);
}

#[test]
fn panics_reach_callback_when_base_exceptions_are_handled() {
    let message = Cell::new(None);
    let mut handler = ExceptionHandler::builder()
        .handler(|caught| {
            message.set(caught.panic_message().map(str::to_owned));
            Outcome::Suppress
        })
        .handle_base_exception(true)
        .build();

    let result = handler.run(|| -> Result<(), BoxError> { panic!("interrupted") });

    assert_eq!(result.unwrap(), None);
    assert_eq!(message.take().as_deref(), Some("interrupted"));
}

#[test]
fn propagated_panic_keeps_its_payload() {
    let mut handler = ExceptionHandler::builder()
        .handler(|_| Outcome::Propagate)
        .handle_base_exception(true)
        .build();

    let payload = panic::catch_unwind(AssertUnwindSafe(|| {
        handler.run(|| -> Result<(), BoxError> { panic::panic_any(17_u32) })
    }))
    .unwrap_err();

    assert_eq!(payload.downcast_ref::<u32>(), Some(&17));
}

#[test]
fn ignored_panics_are_suppressed_without_base_handling() {
    let mut handler = ignore_exception(ErrorFilter::panic::<u32>()).build();

    let result = handler.run(|| -> Result<(), BoxError> { panic::panic_any(3_u32) });
    assert_eq!(result.unwrap(), None);

    let mut any = ignore_exception(ErrorFilter::any_panic()).build();
    assert_eq!(any.run(|| -> Result<(), BoxError> { panic!("stop") }).unwrap(), None);
}

#[test]
fn custom_filter() {
    fn is_not_found(caught: &assert_rail::Caught<'_>) -> bool {
        caught
            .error()
            .and_then(|error| error.downcast_ref::<io::Error>())
            .is_some_and(|error| error.kind() == io::ErrorKind::NotFound)
    }

    let mut handler = ignore_exception(ErrorFilter::when("not found", is_not_found)).build();

    let missing = handler.run(|| Err::<(), _>(io::Error::from(io::ErrorKind::NotFound)));
    assert_eq!(missing.unwrap(), None);

    let denied = handler.run(|| Err::<(), _>(io::Error::from(io::ErrorKind::PermissionDenied)));
    assert!(denied.is_err());
}

#[test]
#[should_panic(expected = "does nothing")]
fn handler_without_effect_is_rejected() {
    let _ = ExceptionHandler::builder().handle_base_exception(true).build();
}
