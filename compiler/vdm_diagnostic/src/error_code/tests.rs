use super::*;
use std::collections::HashSet;

#[test]
fn codes_are_unique() {
    let strs: HashSet<_> = ErrorCode::ALL.iter().map(ErrorCode::as_str).collect();
    assert_eq!(strs.len(), ErrorCode::ALL.len());
}

#[test]
fn class_follows_first_digit() {
    assert_eq!(ErrorCode::E1001.class(), ErrorClass::Resolution);
    assert_eq!(ErrorCode::E1011.class(), ErrorClass::Resolution);
    assert_eq!(ErrorCode::E2004.class(), ErrorClass::Binding);
    assert_eq!(ErrorCode::E9001.class(), ErrorClass::Internal);
    assert_eq!(ErrorCode::W5001.class(), ErrorClass::Warning);
}

#[test]
fn warnings_are_flagged() {
    let warnings: Vec<_> = ErrorCode::ALL.iter().filter(|c| c.is_warning()).collect();
    assert_eq!(warnings, vec![&ErrorCode::W5001, &ErrorCode::W5002]);
}

#[test]
fn every_code_has_a_description() {
    for code in ErrorCode::ALL {
        assert!(!code.description().is_empty(), "{code} has no description");
        assert_eq!(code.to_string(), code.as_str());
    }
}
