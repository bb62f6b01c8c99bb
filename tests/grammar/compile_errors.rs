//! Integration tests for rejected syntax specs

use parlance_grammar::{CompileErrorKind, compile};

#[test]
fn error_display_names_column_and_spec() {
    let err = compile("look [at <thing>").unwrap_err();
    assert_eq!(
        err.to_string(),
        "unclosed optional segment at column 6 in syntax `look [at <thing>`"
    );
    assert_eq!(err.spec, "look [at <thing>");
}

#[test]
fn structural_errors() {
    let cases = [
        ("look at]", CompileErrorKind::UnexpectedClose(']')),
        ("give <thing", CompileErrorKind::UnterminatedCapture),
        ("{north|south", CompileErrorKind::UnterminatedChoice),
        ("go {}", CompileErrorKind::EmptyChoice),
        ("look []", CompileErrorKind::EmptyOptional),
    ];
    for (spec, kind) in cases {
        assert_eq!(compile(spec).unwrap_err().kind, kind, "spec `{spec}`");
    }
}

#[test]
fn capture_name_errors() {
    assert_eq!(compile("<>").unwrap_err().kind, CompileErrorKind::EmptyCaptureName);
    assert_eq!(
        compile("<thing> in <thing>").unwrap_err().kind,
        CompileErrorKind::DuplicateCapture("thing".into())
    );
    assert!(matches!(
        compile("<a b>").unwrap_err().kind,
        CompileErrorKind::InvalidCaptureName(_)
    ));
}

#[test]
fn bad_sub_pattern() {
    let err = compile("<n:(> coins").unwrap_err();
    assert!(matches!(
        err.kind,
        CompileErrorKind::InvalidCapturePattern { ref name, .. } if name == "n"
    ));
}
