//! Language selection and node type mappings for the C family grammars.
//!
//! Maps tree-sitter node types to [`CursorKind`] and reshapes the concrete
//! syntax tree into declaration-oriented children: one cursor per
//! declarator, record bodies flattened into their members, comments and
//! preprocessor conditionals looked through.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tree_sitter::Node;

/// Source languages understood by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    C,
    Cpp,
}

impl Language {
    /// Get the tree-sitter language name for this language.
    pub fn tree_sitter_name(&self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Cpp => "cpp",
        }
    }

    /// Get the tree-sitter grammar for this language.
    pub fn tree_sitter_language(&self) -> tree_sitter::Language {
        match self {
            Language::C => tree_sitter_c::language(),
            Language::Cpp => tree_sitter_cpp::language(),
        }
    }

    /// Parse a language name as given to `-x` or in configuration.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "c" | "c-header" => Some(Language::C),
            "c++" | "cpp" | "cxx" | "c++-header" => Some(Language::Cpp),
            _ => None,
        }
    }

    /// Detect the language from a file extension.
    ///
    /// `.h` is ambiguous and yields `None`. Upper-case `.C` is C++, as
    /// compilers treat it.
    pub fn from_extension(path: &str) -> Option<Self> {
        let extension = Path::new(path).extension()?.to_str()?;
        match extension {
            "c" => Some(Language::C),
            "C" | "cc" | "cpp" | "cxx" | "c++" | "hpp" | "hh" | "hxx" | "h++" => Some(Language::Cpp),
            _ => None,
        }
    }

    /// Detect the language from compiler arguments.
    ///
    /// An explicit `-x`/`--language` wins over a `-std=` hint.
    pub fn from_args(args: &[String]) -> Option<Self> {
        let mut explicit = None;
        let mut standard = None;

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            if arg == "-x" || arg == "--language" {
                if let Some(value) = iter.next() {
                    explicit = Language::from_name(value).or(explicit);
                }
            } else if let Some(value) = arg.strip_prefix("--language=") {
                explicit = Language::from_name(value).or(explicit);
            } else if let Some(value) = arg.strip_prefix("-x") {
                explicit = Language::from_name(value).or(explicit);
            } else if let Some(value) = arg.strip_prefix("-std=") {
                standard = Self::from_standard(value).or(standard);
            }
        }

        explicit.or(standard)
    }

    fn from_standard(standard: &str) -> Option<Self> {
        if standard.starts_with("c++") || standard.starts_with("gnu++") {
            Some(Language::Cpp)
        } else if standard.starts_with('c') || standard.starts_with("gnu") || standard.starts_with("iso9899") {
            Some(Language::C)
        } else {
            None
        }
    }

    /// Pick the language for a source: arguments, then extension, then default.
    pub fn detect(filename: &str, args: &[String], default: Language) -> Self {
        Self::from_args(args)
            .or_else(|| Self::from_extension(filename))
            .unwrap_or(default)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tree_sitter_name())
    }
}

/// Syntactic role of a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorKind {
    TranslationUnit,
    Namespace,
    ClassDecl,
    StructDecl,
    UnionDecl,
    EnumDecl,
    EnumConstantDecl,
    FieldDecl,
    VarDecl,
    FunctionDecl,
    CxxMethod,
    ParmDecl,
    TypedefDecl,
    AccessSpecDecl,
    CxxBaseSpecifier,
    TypeRef,
    UnexposedExpr,
    CompoundStmt,
    UnexposedStmt,
    UnexposedAttr,
    InvalidCode,
    Unexposed,
}

impl CursorKind {
    pub fn is_declaration(&self) -> bool {
        matches!(
            self,
            CursorKind::Namespace
                | CursorKind::ClassDecl
                | CursorKind::StructDecl
                | CursorKind::UnionDecl
                | CursorKind::EnumDecl
                | CursorKind::EnumConstantDecl
                | CursorKind::FieldDecl
                | CursorKind::VarDecl
                | CursorKind::FunctionDecl
                | CursorKind::CxxMethod
                | CursorKind::ParmDecl
                | CursorKind::TypedefDecl
                | CursorKind::AccessSpecDecl
        )
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, CursorKind::TypeRef)
    }

    pub fn is_expression(&self) -> bool {
        matches!(self, CursorKind::UnexposedExpr)
    }

    pub fn is_statement(&self) -> bool {
        matches!(self, CursorKind::CompoundStmt | CursorKind::UnexposedStmt)
    }

    pub fn is_attribute(&self) -> bool {
        matches!(self, CursorKind::UnexposedAttr)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, CursorKind::InvalidCode)
    }

    /// Whether the kind names a record (class, struct or union).
    pub fn is_record(&self) -> bool {
        matches!(
            self,
            CursorKind::ClassDecl | CursorKind::StructDecl | CursorKind::UnionDecl
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CursorKind::TranslationUnit => "TRANSLATION_UNIT",
            CursorKind::Namespace => "NAMESPACE",
            CursorKind::ClassDecl => "CLASS_DECL",
            CursorKind::StructDecl => "STRUCT_DECL",
            CursorKind::UnionDecl => "UNION_DECL",
            CursorKind::EnumDecl => "ENUM_DECL",
            CursorKind::EnumConstantDecl => "ENUM_CONSTANT_DECL",
            CursorKind::FieldDecl => "FIELD_DECL",
            CursorKind::VarDecl => "VAR_DECL",
            CursorKind::FunctionDecl => "FUNCTION_DECL",
            CursorKind::CxxMethod => "CXX_METHOD",
            CursorKind::ParmDecl => "PARM_DECL",
            CursorKind::TypedefDecl => "TYPEDEF_DECL",
            CursorKind::AccessSpecDecl => "CXX_ACCESS_SPEC_DECL",
            CursorKind::CxxBaseSpecifier => "CXX_BASE_SPECIFIER",
            CursorKind::TypeRef => "TYPE_REF",
            CursorKind::UnexposedExpr => "UNEXPOSED_EXPR",
            CursorKind::CompoundStmt => "COMPOUND_STMT",
            CursorKind::UnexposedStmt => "UNEXPOSED_STMT",
            CursorKind::UnexposedAttr => "UNEXPOSED_ATTR",
            CursorKind::InvalidCode => "INVALID_CODE",
            CursorKind::Unexposed => "UNEXPOSED",
        }
    }
}

impl fmt::Display for CursorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node plus, for multi-declarator declarations, the declarator it stands for.
pub(crate) type Member<'tree> = (Node<'tree>, Option<Node<'tree>>);

const SCOPED_SPECIFIERS: &[&str] = &[
    "class_specifier",
    "struct_specifier",
    "union_specifier",
    "enum_specifier",
];

const PARAMETER_KINDS: &[&str] = &[
    "parameter_declaration",
    "optional_parameter_declaration",
    "variadic_parameter_declaration",
];

/// Classify a node, or one declarator of it.
pub(crate) fn cursor_kind(node: Node<'_>, declarator: Option<Node<'_>>) -> CursorKind {
    if let Some(declarator) = declarator {
        return match node.kind() {
            "type_definition" => CursorKind::TypedefDecl,
            "field_declaration" | "declaration" if function_declarator(declarator).is_some() => {
                if in_record_body(node) {
                    CursorKind::CxxMethod
                } else {
                    CursorKind::FunctionDecl
                }
            }
            "field_declaration" if has_storage_class(node, "static") => CursorKind::VarDecl,
            "field_declaration" => CursorKind::FieldDecl,
            _ => CursorKind::VarDecl,
        };
    }

    match node.kind() {
        "translation_unit" => CursorKind::TranslationUnit,
        "namespace_definition" => CursorKind::Namespace,
        "class_specifier" => CursorKind::ClassDecl,
        "struct_specifier" => CursorKind::StructDecl,
        "union_specifier" => CursorKind::UnionDecl,
        "enum_specifier" => CursorKind::EnumDecl,
        "enumerator" => CursorKind::EnumConstantDecl,
        "function_definition" if in_record_body(node) => CursorKind::CxxMethod,
        "function_definition" => CursorKind::FunctionDecl,
        "access_specifier" => CursorKind::AccessSpecDecl,
        "base_class_clause" => CursorKind::CxxBaseSpecifier,
        "compound_statement" => CursorKind::CompoundStmt,
        "type_identifier" => CursorKind::TypeRef,
        "attribute_specifier" | "attribute_declaration" | "attribute" => CursorKind::UnexposedAttr,
        "ERROR" => CursorKind::InvalidCode,
        kind if PARAMETER_KINDS.contains(&kind) => CursorKind::ParmDecl,
        kind if kind.ends_with("_statement") => CursorKind::UnexposedStmt,
        kind if kind.ends_with("_expression") || kind.ends_with("_literal") => {
            CursorKind::UnexposedExpr
        }
        _ => CursorKind::Unexposed,
    }
}

/// Declaration-oriented children of a node.
pub(crate) fn semantic_children<'tree>(
    node: Node<'tree>,
    declarator: Option<Node<'tree>>,
) -> Vec<Member<'tree>> {
    let mut members = Vec::new();

    if let Some(declarator) = declarator {
        if let Some(function) = function_declarator(declarator) {
            push_parameters(function, &mut members);
        }
        return members;
    }

    match node.kind() {
        "translation_unit" => push_items(node, &mut members),
        "namespace_definition" | "linkage_specification" => {
            if let Some(body) = node.child_by_field_name("body") {
                if body.kind() == "declaration_list" {
                    push_items(body, &mut members);
                } else {
                    push_item(body, &mut members);
                }
            }
        }
        "class_specifier" | "struct_specifier" | "union_specifier" => {
            for child in named_children(node) {
                if child.kind() == "base_class_clause" {
                    members.push((child, None));
                }
            }
            if let Some(body) = node.child_by_field_name("body") {
                push_items(body, &mut members);
            }
        }
        "enum_specifier" => {
            if let Some(body) = node.child_by_field_name("body") {
                for child in named_children(body) {
                    if child.kind() == "enumerator" {
                        members.push((child, None));
                    }
                }
            }
        }
        "function_definition" => {
            if let Some(function) = node
                .child_by_field_name("declarator")
                .and_then(function_declarator)
            {
                push_parameters(function, &mut members);
            }
            if let Some(body) = node.child_by_field_name("body") {
                members.push((body, None));
            }
        }
        _ => {
            for child in named_children(node) {
                if !is_comment(child) {
                    members.push((child, None));
                }
            }
        }
    }

    members
}

/// Push the items of a scope body (translation unit, namespace, record).
fn push_items<'tree>(container: Node<'tree>, members: &mut Vec<Member<'tree>>) {
    // The guard of a conditional group is not part of its contents.
    let guards: Vec<usize> = ["name", "condition"]
        .iter()
        .filter_map(|field| container.child_by_field_name(field))
        .map(|guard| guard.id())
        .collect();

    for child in named_children(container) {
        if !guards.contains(&child.id()) {
            push_item(child, members);
        }
    }
}

fn push_item<'tree>(item: Node<'tree>, members: &mut Vec<Member<'tree>>) {
    match item.kind() {
        "comment" => {}
        "declaration" | "field_declaration" | "type_definition" => push_declaration(item, members),
        kind if is_preproc_conditional(kind) => push_items(item, members),
        _ => members.push((item, None)),
    }
}

fn push_declaration<'tree>(item: Node<'tree>, members: &mut Vec<Member<'tree>>) {
    let declarators = children_by_field(item, "declarator");

    if let Some(specifier) = item.child_by_field_name("type") {
        let defines_body = specifier.child_by_field_name("body").is_some();
        if SCOPED_SPECIFIERS.contains(&specifier.kind()) && (defines_body || declarators.is_empty()) {
            members.push((specifier, None));
        }
    }

    for declarator in declarators {
        members.push((item, Some(declarator)));
    }
}

fn push_parameters<'tree>(function: Node<'tree>, members: &mut Vec<Member<'tree>>) {
    for parameter in parameters(function) {
        members.push((parameter, None));
    }
}

/// Parameter nodes of a function declarator.
pub(crate) fn parameters(function: Node<'_>) -> Vec<Node<'_>> {
    function
        .child_by_field_name("parameters")
        .map(|list| {
            named_children(list)
                .into_iter()
                .filter(|child| PARAMETER_KINDS.contains(&child.kind()))
                .collect()
        })
        .unwrap_or_default()
}

/// The function declarator a declarator resolves to, looking through
/// pointer and reference wrappers. Function pointers are not functions.
pub(crate) fn function_declarator(declarator: Node<'_>) -> Option<Node<'_>> {
    let mut current = declarator;
    loop {
        match current.kind() {
            "function_declarator" => {
                let inner = current.child_by_field_name("declarator")?;
                return (inner.kind() != "parenthesized_declarator").then_some(current);
            }
            "pointer_declarator" | "reference_declarator" | "attributed_declarator" => {
                current = inner_declarator(current)?;
            }
            _ => return None,
        }
    }
}

/// The identifier a declarator (or name) ultimately declares.
pub(crate) fn declarator_name(declarator: Node<'_>) -> Option<Node<'_>> {
    let mut current = declarator;
    loop {
        current = match current.kind() {
            "identifier" | "field_identifier" | "type_identifier" | "namespace_identifier"
            | "destructor_name" | "operator_name" => return Some(current),
            "qualified_identifier" | "qualified_type_identifier" | "template_type"
            | "template_function" | "template_method" => current.child_by_field_name("name")?,
            _ => inner_declarator(current)?,
        };
    }
}

fn inner_declarator(node: Node<'_>) -> Option<Node<'_>> {
    node.child_by_field_name("declarator")
        .or_else(|| named_children(node).pop())
}

/// Whether a declaration carries the given storage class keyword.
pub(crate) fn has_storage_class(node: Node<'_>, keyword: &str) -> bool {
    named_children(node).into_iter().any(|child| {
        child.kind() == "storage_class_specifier"
            && child.child(0).map_or(false, |token| token.kind() == keyword)
    })
}

/// The member item and member list enclosing a node inside a record body.
pub(crate) fn member_item(node: Node<'_>) -> Option<(Node<'_>, Node<'_>)> {
    let mut item = node;
    loop {
        let parent = item.parent()?;
        match parent.kind() {
            "field_declaration_list" => return Some((item, parent)),
            "field_declaration" | "declaration" => item = parent,
            kind if is_preproc_conditional(kind) => item = parent,
            _ => return None,
        }
    }
}

fn in_record_body(node: Node<'_>) -> bool {
    member_item(node).is_some()
}

fn is_preproc_conditional(kind: &str) -> bool {
    matches!(
        kind,
        "preproc_if" | "preproc_ifdef" | "preproc_else" | "preproc_elif" | "preproc_elifdef"
    )
}

fn is_comment(node: Node<'_>) -> bool {
    node.kind() == "comment"
}

pub(crate) fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut walker = node.walk();
    let children = node.named_children(&mut walker).collect();
    children
}

fn children_by_field<'tree>(node: Node<'tree>, field: &str) -> Vec<Node<'tree>> {
    let mut walker = node.walk();
    let children = node.children_by_field_name(field, &mut walker).collect();
    children
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tree_sitter::{Parser, Tree};

    fn parse(source: &str, language: Language) -> Tree {
        let mut parser = Parser::new();
        parser.set_language(&language.tree_sitter_language()).unwrap();
        parser.parse(source, None).unwrap()
    }

    fn kinds(source: &str, language: Language) -> Vec<CursorKind> {
        let tree = parse(source, language);
        semantic_children(tree.root_node(), None)
            .into_iter()
            .map(|(node, declarator)| cursor_kind(node, declarator))
            .collect()
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_language_from_extension() {
        assert_eq!(Language::from_extension("main.c"), Some(Language::C));
        assert_eq!(Language::from_extension("INPUT.C"), Some(Language::Cpp));
        assert_eq!(Language::from_extension("shape.hpp"), Some(Language::Cpp));
        assert_eq!(Language::from_extension("shape.h"), None);
        assert_eq!(Language::from_extension("Makefile"), None);
    }

    #[test]
    fn test_language_from_args() {
        assert_eq!(Language::from_args(&args(&["-x", "c"])), Some(Language::C));
        assert_eq!(Language::from_args(&args(&["-xc++"])), Some(Language::Cpp));
        assert_eq!(Language::from_args(&args(&["--language=c"])), Some(Language::C));
        assert_eq!(Language::from_args(&args(&["-std=gnu11"])), Some(Language::C));
        assert_eq!(Language::from_args(&args(&["-std=c++17", "-x", "c"])), Some(Language::C));
        assert_eq!(Language::from_args(&args(&["-I/usr/include", "-DNDEBUG"])), None);
    }

    #[test]
    fn test_language_detect_precedence() {
        assert_eq!(Language::detect("a.c", &args(&["-x", "c++"]), Language::C), Language::Cpp);
        assert_eq!(Language::detect("a.c", &[], Language::Cpp), Language::C);
        assert_eq!(Language::detect("a.h", &[], Language::C), Language::C);
    }

    #[test]
    fn test_toplevel_kinds() {
        let found = kinds(
            "// leading comment\nnamespace a {}\nclass X;\nclass Y { int v; } y;\nint f(int);\nint g() { return 0; }\nextern int e;\ntypedef int Int;\n",
            Language::Cpp,
        );

        assert_eq!(
            found,
            vec![
                CursorKind::Namespace,
                CursorKind::ClassDecl,
                CursorKind::ClassDecl,
                CursorKind::VarDecl,
                CursorKind::FunctionDecl,
                CursorKind::FunctionDecl,
                CursorKind::VarDecl,
                CursorKind::TypedefDecl,
            ]
        );
    }

    #[test]
    fn test_member_kinds() {
        let tree = parse(
            "class S : public Base {\npublic:\n  int a, b;\n  static int count;\n  int area() const;\n  int (*callback)(int);\n  void run() {}\n};",
            Language::Cpp,
        );
        let class = semantic_children(tree.root_node(), None)[0].0;
        let found: Vec<_> = semantic_children(class, None)
            .into_iter()
            .map(|(node, declarator)| cursor_kind(node, declarator))
            .collect();

        assert_eq!(
            found,
            vec![
                CursorKind::CxxBaseSpecifier,
                CursorKind::AccessSpecDecl,
                CursorKind::FieldDecl,
                CursorKind::FieldDecl,
                CursorKind::VarDecl,
                CursorKind::CxxMethod,
                CursorKind::FieldDecl,
                CursorKind::CxxMethod,
            ]
        );
    }

    #[test]
    fn test_preprocessor_groups_are_flattened() {
        let found = kinds("#ifdef FEATURE\nclass A {};\n#else\nclass B {};\n#endif\n", Language::Cpp);
        assert_eq!(found, vec![CursorKind::ClassDecl, CursorKind::ClassDecl]);
    }

    #[test]
    fn test_c_struct_kinds() {
        let found = kinds("struct point { int x; int y; };\nunion u { int i; float f; };\n", Language::C);
        assert_eq!(found, vec![CursorKind::StructDecl, CursorKind::UnionDecl]);
    }

    #[test]
    fn test_declarator_name_through_wrappers() {
        let source = "int *const *p[3];";
        let tree = parse(source, Language::C);
        let (node, declarator) = semantic_children(tree.root_node(), None)[0];
        let name = declarator_name(declarator.unwrap()).unwrap();

        assert_eq!(node.kind(), "declaration");
        assert_eq!(name.utf8_text(source.as_bytes()).unwrap(), "p");
    }

    #[test]
    fn test_kind_predicates() {
        assert!(CursorKind::FieldDecl.is_declaration());
        assert!(!CursorKind::CompoundStmt.is_declaration());
        assert!(CursorKind::CompoundStmt.is_statement());
        assert!(CursorKind::UnexposedStmt.is_statement());
        assert!(CursorKind::TypeRef.is_reference());
        assert!(CursorKind::UnexposedExpr.is_expression());
        assert!(!CursorKind::UnexposedExpr.is_statement());
        assert!(CursorKind::UnexposedAttr.is_attribute());
        assert!(CursorKind::InvalidCode.is_invalid());
        assert!(CursorKind::UnionDecl.is_record());
        assert_eq!(CursorKind::AccessSpecDecl.to_string(), "CXX_ACCESS_SPEC_DECL");
    }

    #[test]
    fn test_reference_statement_and_expression_kinds() {
        let source = "class D : Base {};
int f() { return 1 + 2; }
";
        let tree = parse(source, Language::Cpp);
        let top = semantic_children(tree.root_node(), None);

        let (clause, _) = semantic_children(top[0].0, None)[0];
        assert_eq!(cursor_kind(clause, None), CursorKind::CxxBaseSpecifier);
        let (base, _) = semantic_children(clause, None)[0];
        assert_eq!(cursor_kind(base, None), CursorKind::TypeRef);

        let (body, _) = semantic_children(top[1].0, None)[0];
        assert_eq!(cursor_kind(body, None), CursorKind::CompoundStmt);
        let (ret, _) = semantic_children(body, None)[0];
        assert_eq!(cursor_kind(ret, None), CursorKind::UnexposedStmt);
        let (sum, _) = semantic_children(ret, None)[0];
        assert_eq!(cursor_kind(sum, None), CursorKind::UnexposedExpr);
        let (one, _) = semantic_children(sum, None)[0];
        assert_eq!(cursor_kind(one, None), CursorKind::UnexposedExpr);
    }

    #[test]
    fn test_attribute_kind() {
        let source = "[[nodiscard]] int f();
";
        let tree = parse(source, Language::Cpp);
        let (declaration, _) = semantic_children(tree.root_node(), None)[0];
        let attributes: Vec<_> = named_children(declaration)
            .into_iter()
            .map(|node| cursor_kind(node, None))
            .filter(CursorKind::is_attribute)
            .collect();

        assert_eq!(attributes, vec![CursorKind::UnexposedAttr]);
    }
}
