//! Node and token type vocabularies.
//!
//! A record is only treated as an AST node or token when its `type` tag is
//! a member of a known vocabulary. Backends contribute their own
//! vocabularies; `TagSet::estree()` covers the ESTree/TSESTree shapes that
//! external parsers produce.

use std::collections::BTreeSet;

/// Node-type tags of the ESTree family, including the TypeScript and JSX extensions.
pub const ESTREE_NODE_TYPES: &[&str] = &[
    "AccessorProperty",
    "ArrayExpression",
    "ArrayPattern",
    "ArrowFunctionExpression",
    "AssignmentExpression",
    "AssignmentPattern",
    "AwaitExpression",
    "BinaryExpression",
    "BlockStatement",
    "BreakStatement",
    "CallExpression",
    "CatchClause",
    "ChainExpression",
    "ClassBody",
    "ClassDeclaration",
    "ClassExpression",
    "ConditionalExpression",
    "ContinueStatement",
    "DebuggerStatement",
    "Decorator",
    "DoWhileStatement",
    "EmptyStatement",
    "ExportAllDeclaration",
    "ExportDefaultDeclaration",
    "ExportNamedDeclaration",
    "ExportSpecifier",
    "ExpressionStatement",
    "ForInStatement",
    "ForOfStatement",
    "ForStatement",
    "FunctionDeclaration",
    "FunctionExpression",
    "Identifier",
    "IfStatement",
    "ImportAttribute",
    "ImportDeclaration",
    "ImportDefaultSpecifier",
    "ImportExpression",
    "ImportNamespaceSpecifier",
    "ImportSpecifier",
    "JSXAttribute",
    "JSXClosingElement",
    "JSXClosingFragment",
    "JSXElement",
    "JSXEmptyExpression",
    "JSXExpressionContainer",
    "JSXFragment",
    "JSXIdentifier",
    "JSXMemberExpression",
    "JSXNamespacedName",
    "JSXOpeningElement",
    "JSXOpeningFragment",
    "JSXSpreadAttribute",
    "JSXSpreadChild",
    "JSXText",
    "LabeledStatement",
    "Literal",
    "LogicalExpression",
    "MemberExpression",
    "MetaProperty",
    "MethodDefinition",
    "NewExpression",
    "ObjectExpression",
    "ObjectPattern",
    "PrivateIdentifier",
    "Program",
    "Property",
    "PropertyDefinition",
    "RestElement",
    "ReturnStatement",
    "SequenceExpression",
    "SpreadElement",
    "StaticBlock",
    "Super",
    "SwitchCase",
    "SwitchStatement",
    "TaggedTemplateExpression",
    "TemplateElement",
    "TemplateLiteral",
    "ThisExpression",
    "ThrowStatement",
    "TryStatement",
    "UnaryExpression",
    "UpdateExpression",
    "VariableDeclaration",
    "VariableDeclarator",
    "WhileStatement",
    "WithStatement",
    "YieldExpression",
    "TSAbstractAccessorProperty",
    "TSAbstractKeyword",
    "TSAbstractMethodDefinition",
    "TSAbstractPropertyDefinition",
    "TSAnyKeyword",
    "TSArrayType",
    "TSAsExpression",
    "TSAsyncKeyword",
    "TSBigIntKeyword",
    "TSBooleanKeyword",
    "TSCallSignatureDeclaration",
    "TSClassImplements",
    "TSConditionalType",
    "TSConstructorType",
    "TSConstructSignatureDeclaration",
    "TSDeclareFunction",
    "TSDeclareKeyword",
    "TSEmptyBodyFunctionExpression",
    "TSEnumDeclaration",
    "TSEnumMember",
    "TSExportAssignment",
    "TSExportKeyword",
    "TSExternalModuleReference",
    "TSFunctionType",
    "TSImportEqualsDeclaration",
    "TSImportType",
    "TSIndexedAccessType",
    "TSIndexSignature",
    "TSInferType",
    "TSInstantiationExpression",
    "TSInterfaceBody",
    "TSInterfaceDeclaration",
    "TSInterfaceHeritage",
    "TSIntersectionType",
    "TSIntrinsicKeyword",
    "TSLiteralType",
    "TSMappedType",
    "TSMethodSignature",
    "TSModuleBlock",
    "TSModuleDeclaration",
    "TSNamedTupleMember",
    "TSNamespaceExportDeclaration",
    "TSNeverKeyword",
    "TSNonNullExpression",
    "TSNullKeyword",
    "TSNumberKeyword",
    "TSObjectKeyword",
    "TSOptionalType",
    "TSParameterProperty",
    "TSPrivateKeyword",
    "TSPropertySignature",
    "TSProtectedKeyword",
    "TSPublicKeyword",
    "TSQualifiedName",
    "TSReadonlyKeyword",
    "TSRestType",
    "TSSatisfiesExpression",
    "TSStaticKeyword",
    "TSStringKeyword",
    "TSSymbolKeyword",
    "TSTemplateLiteralType",
    "TSThisType",
    "TSTupleType",
    "TSTypeAliasDeclaration",
    "TSTypeAnnotation",
    "TSTypeAssertion",
    "TSTypeLiteral",
    "TSTypeOperator",
    "TSTypeParameter",
    "TSTypeParameterDeclaration",
    "TSTypeParameterInstantiation",
    "TSTypePredicate",
    "TSTypeQuery",
    "TSTypeReference",
    "TSUndefinedKeyword",
    "TSUnionType",
    "TSUnknownKeyword",
    "TSVoidKeyword",
];

/// Token-type tags of the ESTree family. `Block` and `Line` are comment tokens.
pub const ESTREE_TOKEN_TYPES: &[&str] = &[
    "Boolean",
    "Identifier",
    "JSXIdentifier",
    "JSXText",
    "Keyword",
    "Null",
    "Numeric",
    "Punctuator",
    "RegularExpression",
    "String",
    "Template",
    "Block",
    "Line",
];

/// A set of recognized node-type and token-type tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    nodes: BTreeSet<String>,
    tokens: BTreeSet<String>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The ESTree/TSESTree vocabulary.
    pub fn estree() -> Self {
        let mut tags = Self::new();
        tags.extend_nodes(ESTREE_NODE_TYPES.iter().copied());
        tags.extend_tokens(ESTREE_TOKEN_TYPES.iter().copied());
        tags
    }

    pub fn add_node(&mut self, tag: impl Into<String>) {
        self.nodes.insert(tag.into());
    }

    pub fn add_token(&mut self, tag: impl Into<String>) {
        self.tokens.insert(tag.into());
    }

    pub fn extend_nodes<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nodes.extend(tags.into_iter().map(Into::into));
    }

    pub fn extend_tokens<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tokens.extend(tags.into_iter().map(Into::into));
    }

    /// Add every tag of `other` to this set.
    pub fn merge(&mut self, other: &TagSet) {
        self.nodes.extend(other.nodes.iter().cloned());
        self.tokens.extend(other.tokens.iter().cloned());
    }

    pub fn is_node(&self, tag: &str) -> bool {
        self.nodes.contains(tag)
    }

    pub fn is_token(&self, tag: &str) -> bool {
        self.tokens.contains(tag)
    }

    /// Whether `tag` names a node or a token.
    pub fn contains(&self, tag: &str) -> bool {
        self.is_node(tag) || self.is_token(tag)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.tokens.is_empty()
    }
}

impl<'a> FromIterator<&'a TagSet> for TagSet {
    fn from_iter<I: IntoIterator<Item = &'a TagSet>>(iter: I) -> Self {
        let mut union = TagSet::new();
        for tags in iter {
            union.merge(tags);
        }
        union
    }
}
