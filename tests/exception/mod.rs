use std::error::Error;
use std::fmt;

use assert_rail::{
    as_exception, recoverable, reason_kind, register_exception, AssertionException, BoxError,
    ErrorFilter, ErrorSet, Exception, ExceptionParent, FileExists, Info, Reason, RecoveredException,
    FILE_EXISTS, RECOVERED, UNSPECIFIC,
};

reason_kind! {
    static CAUSE: "CauseReason";
    static RERAISED: "ReraisedReason" => RECOVERED;
}

fn chained() -> RecoveredException {
    let cause =
        ExceptionParent::new("message").with_reason(Reason::new(&CAUSE).with_info("cause", true));
    RecoveredException::new("raised")
        .with_reason(Reason::new(&RERAISED).with_info("raise", "Yes"))
        .with_cause(cause)
}

#[test]
fn info_accumulates_along_causes() {
    let err = chained();

    let expected = Info::new().with("cause", true).with("raise", "Yes");
    assert_eq!(err.info(), expected);
    assert_eq!(err.info().to_string(), r#"{cause: true, raise: "Yes"}"#);
}

#[test]
fn outer_info_wins_on_conflicting_keys() {
    let inner =
        ExceptionParent::new("inner").with_reason(Reason::unspecific().with_info("attempt", 1));
    let outer = ExceptionParent::new("outer")
        .with_reason(Reason::unspecific().with_info("attempt", 2))
        .with_cause(inner);

    assert_eq!(outer.info(), Info::new().with("attempt", 2));
}

#[test]
fn display_mentions_message_cause_and_reason() {
    let rendered = chained().to_string();

    assert!(rendered.contains("raised"));
    assert!(rendered.contains("message"));
    assert!(rendered.contains("ReraisedReason"));
    assert!(rendered.contains("raise"));
    assert!(rendered.contains("Yes"));
    assert!(rendered.contains("(ExceptionParent)"));
}

#[test]
fn display_of_foreign_cause_has_no_type_tag() {
    let io = std::io::Error::other("disk gone");
    let err = ExceptionParent::new("write failed").with_cause(io);

    assert_eq!(err.to_string(), "Reason, {}\nwrite failed, from disk gone");
}

#[test]
fn default_info_is_empty_and_independent() {
    let first = ExceptionParent::new("first");
    let second =
        ExceptionParent::new("second").with_reason(Reason::unspecific().with_info("k", "v"));

    assert!(first.info().is_empty());
    assert!(first.reason().isa(&UNSPECIFIC));
    assert_eq!(second.info().len(), 1);
    assert!(first.info().is_empty());
}

#[test]
fn source_exposes_the_cause() {
    let err = chained();

    let source = err.source().unwrap();
    let cause = source.downcast_ref::<ExceptionParent>().unwrap();
    assert_eq!(cause.message(), "message");
    assert!(cause.source().is_none());
}

#[test]
fn catch_distinguishes_exception_types() {
    let recovered: BoxError = Box::new(RecoveredException::new("r"));
    let assertion: BoxError = Box::new(AssertionException::new("a", Info::new()));
    let plain: BoxError = "plain".into();

    assert!(RecoveredException::catch(&*recovered).is_some());
    assert!(RecoveredException::catch(&*assertion).is_none());
    assert!(AssertionException::catch(&*assertion).is_some());

    assert_eq!(ExceptionParent::catch(&*recovered).map(|e| e.message()), Some("r"));
    assert_eq!(ExceptionParent::catch(&*assertion).map(|e| e.message()), Some("a"));
    assert!(ExceptionParent::catch(&*plain).is_none());
}

#[test]
fn as_exception_reports_type_names() {
    let recovered: BoxError = Box::new(RecoveredException::new("r"));
    let assertion: BoxError = Box::new(AssertionException::new("a", Info::new()));

    assert_eq!(as_exception(&*recovered).map(|e| e.type_name()), Some("RecoveredException"));
    assert_eq!(as_exception(&*assertion).map(|e| e.type_name()), Some("AssertionException"));
}

#[test]
fn into_parent_and_take_cause() {
    let mut parent = chained().into_parent();
    assert_eq!(parent.message(), "raised");

    let cause = parent.take_cause().unwrap();
    assert!(cause.is::<ExceptionParent>());
    assert!(parent.cause().is_none());
    assert_eq!(parent.info(), Info::new().with("raise", "Yes"));
}

#[test]
fn file_exists_keeps_absolute_path() {
    let exists = FileExists::new("/tmp/report.csv");
    assert_eq!(exists.path(), "/tmp/report.csv");

    let reason = Reason::from(exists.with_info("size", 12));
    assert!(reason.isa(&FILE_EXISTS));
    assert_eq!(reason.info().get("path").and_then(|v| v.as_str()), Some("/tmp/report.csv"));
    assert!(reason.info().contains_key("size"));
}

#[test]
fn file_exists_resolves_relative_and_empty_paths() {
    let cwd = std::env::current_dir().unwrap();

    let relative = FileExists::new("report.csv");
    assert_eq!(relative.path(), cwd.join("report.csv").to_string_lossy());

    let empty = FileExists::new("");
    assert_eq!(empty.path(), cwd.to_string_lossy());
}

#[test]
fn exception_carries_file_exists_reason() {
    let err =
        RecoveredException::new("refusing to overwrite").with_reason(FileExists::new("/srv/out"));

    assert!(err.reason().isa(&FILE_EXISTS));
    assert_eq!(err.info().get("path").and_then(|v| v.as_str()), Some("/srv/out"));
}

#[derive(Debug)]
struct LedgerError(ExceptionParent);

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Error for LedgerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.0.source()
    }
}

impl Exception for LedgerError {
    fn parent(&self) -> &ExceptionParent {
        &self.0
    }

    fn type_name(&self) -> &'static str {
        "LedgerError"
    }
}

fn ledger_error() -> LedgerError {
    let parent =
        ExceptionParent::new("unbalanced").with_reason(Reason::new(&CAUSE).with_info("k", 1));
    LedgerError(parent)
}

#[test]
fn registered_user_exception_joins_chains() {
    register_exception::<LedgerError>();

    let err = recoverable(|| Err::<(), _>(ledger_error())).unwrap_err();
    let recovered = err.downcast_ref::<RecoveredException>().unwrap();

    assert_eq!(recovered.info(), Info::new().with("k", 1));
    assert!(recovered.to_string().contains("(LedgerError)"));

    let boxed: BoxError = Box::new(ledger_error());
    assert_eq!(as_exception(&*boxed).map(|e| e.type_name()), Some("LedgerError"));
    assert_eq!(ExceptionParent::catch(&*boxed).map(|e| e.message()), Some("unbalanced"));
    assert!(ErrorSet::from(ErrorFilter::exception::<ExceptionParent>()).matches_error(&*boxed));

    register_exception::<LedgerError>();
    assert!(LedgerError::catch(&*boxed).is_some());
}

#[test]
fn cause_is_callable_with_error_trait_in_scope() {
    let err = chained();

    let cause = err.cause().and_then(|cause| cause.downcast_ref::<ExceptionParent>()).unwrap();
    assert_eq!(cause.message(), "message");
    assert!(err.caused_by().is_some());

    let assertion = AssertionException::new("a", Info::new());
    assert!(assertion.cause().is_none());
}

#[test]
fn unicode_and_control_characters_are_kept_verbatim() {
    let err = ExceptionParent::new("\u{1F4A5} \t")
        .with_reason(Reason::unspecific().with_info("\u{0}材料", "\x07"));

    let info = err.info();
    assert_eq!(info.keys().collect::<Vec<_>>(), ["\u{0}材料"]);
    assert_eq!(info.get("\u{0}材料").and_then(|v| v.as_str()), Some("\x07"));
    assert_eq!(err.message(), "\u{1F4A5} \t");
}
