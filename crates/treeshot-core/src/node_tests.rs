use indoc::indoc;

use crate::node::compare_keys;
use crate::{Printer, Record, SerializeError, TagSet, Value, canonical_printer};

fn printer() -> Printer {
    canonical_printer(TagSet::estree())
}

fn position(line: u32, column: u32) -> Record {
    Record::new().field("line", line).field("column", column)
}

/// A node with `range` and `loc` on a single line starting at `start`.
fn node(type_name: &str, start: u32, end: u32) -> Record {
    Record::new()
        .field("type", type_name)
        .field("range", vec![Value::from(start), Value::from(end)])
        .field(
            "loc",
            Record::new()
                .field("start", position(1, start))
                .field("end", position(1, end)),
        )
}

fn render(record: Record) -> String {
    printer().render(&Value::from(record)).unwrap()
}

#[test]
fn identifier() {
    let out = render(node("Identifier", 0, 3).field("name", "foo"));

    assert_eq!(
        out,
        indoc! {r#"
            Identifier {
              type: "Identifier",
              name: "foo",

              range: [0, 3],
              loc: {
                start: { column: 0, line: 1 },
                end: { column: 3, line: 1 },
              },
            }"#}
    );
}

#[test]
fn token() {
    let out = render(node("Punctuator", 5, 6).field("value", ";"));

    insta::assert_snapshot!(out, @r#"
    Punctuator {
      type: "Punctuator",
      value: ";",

      range: [5, 6],
      loc: {
        start: { column: 5, line: 1 },
        end: { column: 6, line: 1 },
      },
    }
    "#);
}

#[test]
fn extra_fields_sorted_with_range_and_loc_last() {
    let out = render(
        node("ClassDeclaration", 0, 10)
            .field("superClass", Value::Null)
            .field("body", "b")
            .field("abstract", true),
    );

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[1], "  type: \"ClassDeclaration\",");
    assert_eq!(lines[2], "  abstract: true,");
    assert_eq!(lines[3], "  body: \"b\",");
    assert_eq!(lines[4], "  superClass: null,");
    assert_eq!(lines[5], "");
    assert_eq!(lines[6], "  range: [0, 10],");
    assert_eq!(lines[7], "  loc: {");
}

#[test]
fn insertion_order_does_not_matter() {
    let forward = Record::new()
        .field("type", "Identifier")
        .field("name", "x")
        .field("optional", false)
        .field("range", vec![Value::from(0), Value::from(1)])
        .field(
            "loc",
            Record::new()
                .field("start", position(1, 0))
                .field("end", position(1, 1)),
        );
    let backward = Record::new()
        .field(
            "loc",
            Record::new()
                .field("end", Record::new().field("column", 1).field("line", 1))
                .field("start", Record::new().field("column", 0).field("line", 1)),
        )
        .field("range", vec![Value::from(0), Value::from(1)])
        .field("optional", false)
        .field("name", "x")
        .field("type", "Identifier");

    assert_eq!(render(forward), render(backward));
}

#[test]
fn undefined_fields_are_omitted() {
    let out = render(
        node("Identifier", 0, 1)
            .field("name", "x")
            .field("typeAnnotation", Value::Undefined)
            .field("decorators", Option::<Value>::None),
    );

    assert!(!out.contains("typeAnnotation"));
    assert!(!out.contains("decorators"));
    assert!(!out.contains("undefined"));
    assert!(out.contains("  name: \"x\","));
}

#[test]
fn null_fields_are_kept() {
    let out = render(node("ReturnStatement", 0, 7).field("argument", Value::Null));
    assert!(out.contains("  argument: null,"));
}

#[test]
fn no_extra_fields() {
    let out = render(node("EmptyStatement", 0, 1));

    assert_eq!(
        out,
        indoc! {r#"
            EmptyStatement {
              type: "EmptyStatement",

              range: [0, 1],
              loc: {
                start: { column: 0, line: 1 },
                end: { column: 1, line: 1 },
              },
            }"#}
    );
}

#[test]
fn nested_nodes_in_arrays() {
    let program = node("Program", 0, 1)
        .field("sourceType", "script")
        .field(
            "body",
            vec![Value::from(node("Identifier", 0, 1).field("name", "x"))],
        );

    assert_eq!(
        render(program),
        indoc! {r#"
            Program {
              type: "Program",
              body: Array [
                Identifier {
                  type: "Identifier",
                  name: "x",

                  range: [0, 1],
                  loc: {
                    start: { column: 0, line: 1 },
                    end: { column: 1, line: 1 },
                  },
                },
              ],
              sourceType: "script",

              range: [0, 1],
              loc: {
                start: { column: 0, line: 1 },
                end: { column: 1, line: 1 },
              },
            }"#}
    );
}

#[test]
fn nested_plain_record_uses_fallback() {
    let out = render(node("Literal", 0, 4).field("regex", Record::new().field("flags", "g")));

    assert!(out.contains("  regex: Object {\n    \"flags\": \"g\",\n  },"));
}

#[test]
fn classed_record_is_not_a_node() {
    let wrapper = Record::with_class("Wrapper")
        .field("type", "Identifier")
        .field("name", "x");

    assert_eq!(
        render(wrapper),
        indoc! {r#"
            Wrapper {
              "name": "x",
              "type": "Identifier",
            }"#}
    );
}

#[test]
fn unknown_type_tag_is_not_a_node() {
    let record = Record::new().field("type", "NotANode").field("value", 1);

    assert_eq!(
        render(record),
        indoc! {r#"
            Object {
              "type": "NotANode",
              "value": 1,
            }"#}
    );
}

#[test]
fn custom_tag_set() {
    let mut tags = TagSet::new();
    tags.add_node("LexicalDeclaration");
    let printer = canonical_printer(tags);

    let known = Value::from(node("LexicalDeclaration", 0, 1));
    let unknown = Value::from(node("Program", 0, 1));

    assert!(printer.render(&known).unwrap().starts_with("LexicalDeclaration {"));
    assert!(printer.render(&unknown).unwrap().starts_with("Object {"));
}

#[test]
fn missing_loc_fails_loudly() {
    let record = Record::new()
        .field("type", "Identifier")
        .field("range", vec![Value::from(0), Value::from(1)]);

    let err = printer().render(&Value::from(record)).unwrap_err();
    assert_eq!(
        err,
        SerializeError::MalformedNode {
            type_name: "Identifier".to_owned(),
            reason: "missing `loc` record".to_owned(),
        }
    );
}

#[test]
fn missing_range_fails_loudly() {
    let record = Record::new().field("type", "Identifier");

    let err = printer().render(&Value::from(record)).unwrap_err();
    assert_eq!(err.to_string(), "malformed `Identifier` node: missing `range`");
}

#[test]
fn short_range_fails_loudly() {
    let mut record = node("Identifier", 0, 1);
    record.insert("range", vec![Value::from(0)]);

    let err = printer().render(&Value::from(record)).unwrap_err();
    assert!(matches!(
        err,
        SerializeError::MalformedNode { ref reason, .. } if reason == "`range` must have exactly two offsets"
    ));
}

#[test]
fn malformed_nested_node_fails_the_whole_render() {
    let broken = Record::new().field("type", "Identifier").field("name", "x");
    let program = node("Program", 0, 1).field("body", vec![Value::from(broken)]);

    assert!(printer().render(&Value::from(program)).is_err());
}

#[test]
fn key_comparison_is_case_insensitive_first() {
    use std::cmp::Ordering;

    assert_eq!(compare_keys("a", "B"), Ordering::Less);
    assert_eq!(compare_keys("B", "a"), Ordering::Greater);
    assert_eq!(compare_keys("a", "A"), Ordering::Less);
    assert_eq!(compare_keys("same", "same"), Ordering::Equal);

    let mut keys = vec!["typeParameters", "body", "Abstract", "abstract"];
    keys.sort_by(|a, b| compare_keys(a, b));
    assert_eq!(keys, ["abstract", "Abstract", "body", "typeParameters"]);
}

#[test]
fn key_order_puts_punctuation_before_digits_before_letters() {
    let mut keys = vec!["ab", "a1", "a_b", "A2"];
    keys.sort_by(|a, b| compare_keys(a, b));
    assert_eq!(keys, ["a_b", "a1", "A2", "ab"]);
}
