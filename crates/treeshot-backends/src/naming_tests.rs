use crate::naming::{field_name, label, type_name};

#[test]
fn type_names() {
    assert_eq!(type_name("program"), "Program");
    assert_eq!(type_name("lexical_declaration"), "LexicalDeclaration");
    assert_eq!(type_name("jsx_opening_element"), "JSXOpeningElement");
    assert_eq!(type_name("abstract_class_declaration"), "AbstractClassDeclaration");
    assert_eq!(type_name("ERROR"), "ERROR");
    assert_eq!(type_name("Identifier"), "Identifier");
}

#[test]
fn type_names_keep_acronyms_only_as_whole_words() {
    assert_eq!(type_name("ts_node"), "TSNode");
    assert_eq!(type_name("tsx_thing"), "TsxThing");
    assert_eq!(type_name("this"), "This");
}

#[test]
fn field_names() {
    assert_eq!(field_name("body"), "body");
    assert_eq!(field_name("type_parameters"), "typeParameters");
    assert_eq!(field_name("return_type"), "returnType");
}

#[test]
fn labels() {
    assert_eq!(label("tree-sitter"), "TreeSitter");
    assert_eq!(label("TSESTree"), "TSESTree");
    assert_eq!(label("babel"), "Babel");
}
