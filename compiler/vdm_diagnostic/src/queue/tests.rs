use super::*;
use crate::ErrorCode;
use pretty_assertions::assert_eq;

fn error(code: ErrorCode, at: u32, msg: &str) -> Diagnostic {
    Diagnostic::error(code)
        .with_message(msg)
        .with_label(Span::new(at, at + 1), "here")
}

#[test]
fn flush_keeps_report_order() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig::unlimited());
    queue.push(error(ErrorCode::E2005, 30, "third in source, first reported"));
    queue.push(error(ErrorCode::E2001, 10, "second"));
    queue.push(Diagnostic::warning(ErrorCode::W5001).with_message("warn"));

    let codes: Vec<_> = queue.flush().iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::E2005, ErrorCode::E2001, ErrorCode::W5001]);
    assert!(queue.is_empty());
    assert_eq!(queue.error_count(), 0);
}

#[test]
fn limit_applies_to_errors_only() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig {
        error_limit: 2,
        deduplicate: false,
    });
    assert!(queue.push(error(ErrorCode::E2004, 0, "a")));
    assert!(queue.push(error(ErrorCode::E2004, 5, "b")));
    assert!(queue.limit_reached());
    assert!(!queue.push(error(ErrorCode::E2004, 9, "c")));
    assert!(queue.push(Diagnostic::warning(ErrorCode::W5002).with_message("w")));
    assert_eq!(queue.error_count(), 2);
    assert_eq!(queue.len(), 3);
}

#[test]
fn repeated_error_at_same_place_is_dropped() {
    let mut queue = DiagnosticQueue::new();
    assert!(queue.push(error(ErrorCode::E1001, 4, "unable to resolve type name `T`")));
    assert!(!queue.push(error(ErrorCode::E1001, 4, "unable to resolve type name `T`")));
    assert!(queue.push(error(ErrorCode::E1001, 8, "unable to resolve type name `T`")));
    assert_eq!(queue.error_count(), 2);
}

#[test]
fn emitting_an_error_gives_proof() {
    let mut queue = DiagnosticQueue::new();
    assert!(queue.has_errors().is_none());
    let _proof = queue.emit_error(error(ErrorCode::E1003, 0, "undefined @T"));
    assert!(queue.has_errors().is_some());
}

#[test]
fn extend_counts_errors() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig::unlimited());
    queue.extend(vec![
        error(ErrorCode::E2006, 0, "x"),
        Diagnostic::note(ErrorCode::E1010).with_message("recursive"),
        error(ErrorCode::E2007, 2, "y"),
    ]);
    assert_eq!(queue.error_count(), 2);
    assert_eq!(queue.peek().count(), 3);
}

#[test]
fn dedup_compares_only_the_message_prefix() {
    let mut queue = DiagnosticQueue::new();
    let long = "a message that is long enough to be cut off";
    assert!(queue.push(error(ErrorCode::E2003, 4, &format!("{long} here"))));
    assert!(!queue.push(error(ErrorCode::E2003, 4, &format!("{long} there"))));
    assert!(queue.push(error(ErrorCode::E2002, 4, long)));
}

#[test]
fn default_config_caps_at_ten() {
    let mut queue = DiagnosticQueue::new();
    for at in 0..12 {
        queue.push(error(ErrorCode::E2001, at, "arity"));
    }
    assert_eq!(queue.error_count(), 10);
    assert_eq!(queue.flush().len(), 10);
    assert!(queue.push(error(ErrorCode::E2001, 0, "arity")));
}
