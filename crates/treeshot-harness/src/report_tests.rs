use std::path::PathBuf;

use indoc::indoc;

use crate::fixture::AssertionKind;
use crate::report::{Assertion, FixtureResult, FixtureStatus, Outcome, Report, diff};
use crate::store::Comparison;

fn assertion(kind: AssertionKind, outcome: Outcome) -> Assertion {
    Assertion {
        backend: "TreeSitter".to_owned(),
        kind,
        path: PathBuf::from(format!("snapshots/{kind}.shot")),
        outcome,
    }
}

fn ran(id: &str, assertions: Vec<Assertion>) -> FixtureResult {
    FixtureResult {
        id: id.to_owned(),
        status: FixtureStatus::Ran(assertions),
    }
}

#[test]
fn all_passing() {
    let report = Report {
        fixtures: vec![
            ran(
                "a/x",
                vec![
                    assertion(AssertionKind::Ast, Outcome::Compared(Comparison::Created)),
                    assertion(AssertionKind::Tokens, Outcome::Compared(Comparison::Matched)),
                    assertion(AssertionKind::Error, Outcome::Compared(Comparison::Matched)),
                ],
            ),
            FixtureResult {
                id: "a/y".to_owned(),
                status: FixtureStatus::Skipped,
            },
        ],
    };

    assert!(report.is_success());
    let counts = report.counts();
    assert_eq!((counts.passed, counts.failed, counts.created, counts.skipped), (3, 0, 1, 1));
    assert_eq!(
        report.summary(),
        "3 passed, 0 failed, 1 fixtures skipped (1 snapshots created)"
    );
    assert_eq!(report.failures(), "");
}

#[test]
fn failures_are_listed_with_diffs() {
    let report = Report {
        fixtures: vec![
            ran(
                "a/x",
                vec![
                    assertion(
                        AssertionKind::Ast,
                        Outcome::Compared(Comparison::Mismatch {
                            expected: "Program {\n  old\n}".to_owned(),
                            actual: "Program {\n  new\n}".to_owned(),
                        }),
                    ),
                    assertion(
                        AssertionKind::Tokens,
                        Outcome::Broken("malformed `Identifier` node: missing `range`".to_owned()),
                    ),
                    assertion(AssertionKind::Error, Outcome::Compared(Comparison::Matched)),
                ],
            ),
            FixtureResult {
                id: "a/z".to_owned(),
                status: FixtureStatus::Failed("cannot read".to_owned()),
            },
        ],
    };

    assert!(!report.is_success());
    assert_eq!(report.counts().failed, 2);
    assert_eq!(report.counts().errored, 1);
    assert_eq!(
        report.failures(),
        indoc! {"
            FAIL a/x [TreeSitter - AST]: snapshot mismatch at snapshots/AST.shot
             Program {
            -  old
            +  new
             }
            FAIL a/x [TreeSitter - Tokens]: malformed `Identifier` node: missing `range`
            FAIL a/z: cannot read
        "}
    );
}

#[test]
fn missing_snapshot_fails() {
    let report = Report {
        fixtures: vec![ran(
            "a/x",
            vec![assertion(
                AssertionKind::Error,
                Outcome::Compared(Comparison::Missing {
                    actual: "\"NO ERROR\"".to_owned(),
                }),
            )],
        )],
    };

    assert!(!report.is_success());
    assert!(report.failures().contains("snapshot missing at snapshots/Error.shot"));
}

#[test]
fn updated_counts_as_pass() {
    let report = Report {
        fixtures: vec![ran(
            "a/x",
            vec![assertion(
                AssertionKind::Ast,
                Outcome::Compared(Comparison::Updated {
                    expected: "old".to_owned(),
                }),
            )],
        )],
    };

    assert!(report.is_success());
    assert_eq!(report.summary(), "1 passed, 0 failed (1 snapshots updated)");
}

#[test]
fn diff_marks_lines() {
    assert_eq!(diff("a\nb", "a\nc"), " a\n-b\n+c\n");
}

#[test]
fn diff_of_unterminated_text_has_no_blank_lines() {
    let out = diff("Program {\n  a,\n}", "Program {\n  b,\n}");

    assert_eq!(out, " Program {\n-  a,\n+  b,\n }\n");
    assert!(!out.contains("\n\n"));
}

#[test]
fn diff_keeps_terminated_lines_single_spaced() {
    assert_eq!(diff("x\n", "y\n"), "-x\n+y\n");
}
