use treeshot_backends::{Backend, BackendError, ParseOptions, ParseOutput};
use treeshot_core::{Printer, Record, TagSet, Value};

use crate::capture::{Capture, capture};
use crate::fixture::AssertionKind;

struct Fixed(fn(&ParseOptions) -> Result<ParseOutput, BackendError>);

impl Backend for Fixed {
    fn name(&self) -> &str {
        "fixed"
    }

    fn label(&self) -> &str {
        "Fixed"
    }

    fn tags(&self) -> TagSet {
        TagSet::estree()
    }

    fn parse(&self, _source: &str, options: &ParseOptions) -> Result<ParseOutput, BackendError> {
        (self.0)(options)
    }
}

fn program() -> Value {
    Record::new().field("type", "Program").into()
}

#[test]
fn success_captures_tree_tokens_and_no_error() {
    let captured = capture(
        &Fixed(|_| {
            Ok(ParseOutput {
                ast: program(),
                tokens: vec![Value::from("t")],
                comments: vec![Value::from("dropped")],
            })
        }),
        "",
        false,
    );

    assert_eq!(captured.ast, program());
    assert_eq!(captured.tokens, Value::from(vec![Value::from("t")]));
    assert_eq!(captured.error, Value::from("NO ERROR"));
    assert!(!captured.is_error());
}

#[test]
fn failure_captures_sentinels_and_error_value() {
    let captured = capture(
        &Fixed(|_| {
            Err(BackendError::Syntax {
                message: "Unexpected token.".to_owned(),
                index: 0,
                line: 1,
                column: 0,
            })
        }),
        "",
        false,
    );

    assert!(captured.is_error());
    assert_eq!(captured.value(AssertionKind::Ast), &Value::from("ERROR"));
    assert_eq!(captured.value(AssertionKind::Tokens), &Value::from("ERROR"));
    let error = captured.value(AssertionKind::Error).as_record().unwrap();
    assert_eq!(error.class(), Some("ParseError"));
}

#[test]
fn sentinels_render_as_quoted_strings() {
    let captured = Capture::from_result(Err(BackendError::NoTree));
    let printer = Printer::new();

    assert_eq!(printer.render(&captured.ast).unwrap(), "\"ERROR\"");
    assert_eq!(
        printer.render(&Capture::from_result(Ok(ParseOutput {
            ast: program(),
            tokens: vec![],
            comments: vec![],
        }))
        .error)
        .unwrap(),
        "\"NO ERROR\""
    );
}

#[test]
fn jsx_flag_reaches_backend() {
    let backend = Fixed(|options| {
        Ok(ParseOutput {
            ast: Value::Bool(options.jsx),
            tokens: vec![],
            comments: vec![],
        })
    });

    assert_eq!(capture(&backend, "", true).ast, Value::Bool(true));
    assert_eq!(capture(&backend, "", false).ast, Value::Bool(false));
}

#[test]
fn panics_are_captured() {
    let captured = capture(&Fixed(|_| panic!("grammar exploded")), "", false);

    assert!(captured.is_error());
    let error = captured.error.as_record().unwrap();
    assert_eq!(error.class(), Some("BackendError"));
    assert_eq!(
        error.get("message").and_then(Value::as_str),
        Some("backend panicked: grammar exploded")
    );
}
