//! Cursor wrapper around tree-sitter nodes.
//!
//! A [`Cursor`] is a cheap, copyable view of one node of a translation
//! unit. Besides the node it carries the translation unit and the
//! [`Parser`] it was produced by, so observers can reach both without any
//! extra plumbing. Cursors borrow from the translation unit and cannot
//! outlive the parse that produced them.

use std::fmt;
use std::io::{self, Write};

use serde::{Deserialize, Serialize};
use tree_sitter::{Node, Point};

use crate::ast_engine::languages::{
    cursor_kind, declarator_name, function_declarator, has_storage_class, member_item,
    parameters, semantic_children,
};
use crate::ast_engine::{CursorKind, CursorType, Parser, TranslationUnit, TypeKind};
use crate::types::SourceLocation;

/// Member access level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessSpecifier {
    Public,
    Protected,
    Private,
}

impl AccessSpecifier {
    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.trim() {
            "public" => Some(AccessSpecifier::Public),
            "protected" => Some(AccessSpecifier::Protected),
            "private" => Some(AccessSpecifier::Private),
            _ => None,
        }
    }
}

impl fmt::Display for AccessSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessSpecifier::Public => write!(f, "public"),
            AccessSpecifier::Protected => write!(f, "protected"),
            AccessSpecifier::Private => write!(f, "private"),
        }
    }
}

/// A node of a translation unit with its traversal context attached.
#[derive(Clone, Copy)]
pub struct Cursor<'a> {
    node: Node<'a>,
    declarator: Option<Node<'a>>,
    tu: &'a TranslationUnit,
    parser: &'a Parser,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(
        node: Node<'a>,
        declarator: Option<Node<'a>>,
        tu: &'a TranslationUnit,
        parser: &'a Parser,
    ) -> Self {
        Self {
            node,
            declarator,
            tu,
            parser,
        }
    }

    /// The wrapped tree-sitter node.
    pub fn node(&self) -> Node<'a> {
        self.node
    }

    /// The declarator this cursor stands for, when its declaration
    /// declares several entities (`int x, y;`).
    pub fn declarator(&self) -> Option<Node<'a>> {
        self.declarator
    }

    /// The translation unit this cursor was produced from.
    pub fn tu(&self) -> &'a TranslationUnit {
        self.tu
    }

    /// The parser that produced this cursor.
    pub fn parser(&self) -> &'a Parser {
        self.parser
    }

    pub fn kind(&self) -> CursorKind {
        cursor_kind(self.node, self.declarator)
    }

    /// Declaration-oriented children, each carrying the same context.
    pub fn children(&self) -> Vec<Cursor<'a>> {
        semantic_children(self.node, self.declarator)
            .into_iter()
            .map(|(node, declarator)| Cursor::new(node, declarator, self.tu, self.parser))
            .collect()
    }

    /// Source text covered by the cursor.
    pub fn text(&self) -> &'a str {
        let end = self.declarator.unwrap_or(self.node).end_byte();
        self.tu
            .source()
            .get(self.node.start_byte()..end)
            .unwrap_or_default()
    }

    fn name_node(&self) -> Option<Node<'a>> {
        if let Some(declarator) = self.declarator {
            return declarator_name(declarator);
        }

        match self.node.kind() {
            "function_definition"
            | "parameter_declaration"
            | "optional_parameter_declaration" => self
                .node
                .child_by_field_name("declarator")
                .and_then(declarator_name),
            "class_specifier" | "struct_specifier" | "union_specifier" | "enum_specifier" => self
                .node
                .child_by_field_name("name")
                .and_then(declarator_name),
            "namespace_definition" | "enumerator" => self.node.child_by_field_name("name"),
            "type_identifier" => Some(self.node),
            _ => None,
        }
    }

    /// The plain name of the entity, empty when it has none.
    pub fn spelling(&self) -> String {
        if self.kind() == CursorKind::TranslationUnit {
            return self.tu.filename().to_string();
        }

        self.name_node()
            .map(|name| self.tu.text(name).to_string())
            .unwrap_or_default()
    }

    /// The name decorated with a signature for functions, e.g. `area(int, int)`.
    pub fn display_name(&self) -> String {
        let spelling = self.spelling();
        match self.kind() {
            CursorKind::FunctionDecl | CursorKind::CxxMethod => {
                let parameter_types: Vec<String> = self
                    .function()
                    .map(parameters)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|parameter| self.parameter_type(parameter))
                    .collect();
                format!("{}({})", spelling, parameter_types.join(", "))
            }
            _ => spelling,
        }
    }

    fn function(&self) -> Option<Node<'a>> {
        self.declarator
            .or_else(|| self.node.child_by_field_name("declarator"))
            .and_then(function_declarator)
    }

    /// Parameter text with the parameter name cut out.
    fn parameter_type(&self, parameter: Node<'a>) -> String {
        let text = self.tu.text(parameter);
        let name = parameter
            .child_by_field_name("declarator")
            .and_then(declarator_name);

        let stripped = match name {
            Some(name) => {
                let start = name.start_byte() - parameter.start_byte();
                let end = name.end_byte() - parameter.start_byte();
                match (text.get(..start), text.get(end..)) {
                    (Some(before), Some(after)) => format!("{}{}", before, after),
                    _ => text.to_string(),
                }
            }
            None => text.to_string(),
        };

        stripped.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Unified Symbol Resolution string, empty for cursors that do not
    /// declare a named entity.
    pub fn usr(&self) -> String {
        let kind = self.kind();
        let segment = match kind {
            CursorKind::Namespace => namespace_segment(&self.spelling(), self.node),
            CursorKind::ClassDecl | CursorKind::StructDecl => record_segment("S", &self.spelling(), self.node),
            CursorKind::UnionDecl => record_segment("U", &self.spelling(), self.node),
            CursorKind::EnumDecl => record_segment("E", &self.spelling(), self.node),
            CursorKind::FieldDecl => format!("@FI@{}", self.spelling()),
            CursorKind::FunctionDecl | CursorKind::CxxMethod => format!("@F@{}#", self.spelling()),
            CursorKind::TypedefDecl => format!("@T@{}", self.spelling()),
            CursorKind::VarDecl | CursorKind::EnumConstantDecl => format!("@{}", self.spelling()),
            _ => return String::new(),
        };

        format!("c:{}{}", self.scope_prefix(), segment)
    }

    /// USR segments of the enclosing namespaces and records, outermost first.
    fn scope_prefix(&self) -> String {
        let mut segments = Vec::new();
        let mut current = self.node.parent();

        while let Some(node) = current {
            let name = || {
                node.child_by_field_name("name")
                    .and_then(declarator_name)
                    .map(|name| self.tu.text(name))
                    .unwrap_or_default()
                    .to_string()
            };
            match node.kind() {
                "namespace_definition" => {
                    let name = node
                        .child_by_field_name("name")
                        .map(|name| self.tu.text(name))
                        .unwrap_or_default();
                    segments.push(namespace_segment(name, node));
                }
                "class_specifier" | "struct_specifier" => segments.push(record_segment("S", &name(), node)),
                "union_specifier" => segments.push(record_segment("U", &name(), node)),
                "enum_specifier" => segments.push(record_segment("E", &name(), node)),
                _ => {}
            }
            current = node.parent();
        }

        segments.reverse();
        segments.concat()
    }

    /// Start and end of the cursor's extent.
    pub fn extent(&self) -> (SourceLocation, SourceLocation) {
        let end = self.declarator.unwrap_or(self.node);
        (
            self.source_location(self.node.start_position(), self.node.start_byte()),
            self.source_location(end.end_position(), end.end_byte()),
        )
    }

    /// Where the entity's name appears, or the start of its extent.
    pub fn location(&self) -> SourceLocation {
        let anchor = self.name_node().unwrap_or(self.node);
        self.source_location(anchor.start_position(), anchor.start_byte())
    }

    fn source_location(&self, point: Point, offset: usize) -> SourceLocation {
        SourceLocation {
            file: self.tu.filename().to_string(),
            line: point.row + 1,
            column: point.column + 1,
            offset,
        }
    }

    /// Whether this occurrence fully defines its entity.
    pub fn is_definition(&self) -> bool {
        match self.kind() {
            CursorKind::ClassDecl
            | CursorKind::StructDecl
            | CursorKind::UnionDecl
            | CursorKind::EnumDecl => self.node.child_by_field_name("body").is_some(),
            CursorKind::FunctionDecl | CursorKind::CxxMethod => {
                self.declarator.is_none() && self.node.kind() == "function_definition"
            }
            CursorKind::Namespace
            | CursorKind::FieldDecl
            | CursorKind::EnumConstantDecl
            | CursorKind::TypedefDecl => true,
            // Static data members declared in a class body are only declarations.
            CursorKind::VarDecl => {
                self.node.kind() != "field_declaration" && !has_storage_class(self.node, "extern")
            }
            _ => false,
        }
    }

    /// Type of the entity.
    ///
    /// Declarations get the type written in their declaration, records and
    /// enums their own type, enumerators the type of their enum, type
    /// references the type they name. Everything
    /// else is [`TypeKind::Invalid`](crate::ast_engine::TypeKind::Invalid).
    pub fn cursor_type(&self) -> CursorType {
        let source = self.tu.source();
        match self.kind() {
            CursorKind::TypedefDecl => {
                let target = CursorType::from_declaration(self.node, self.declarator, source);
                CursorType::typedef(self.spelling(), target)
            }
            CursorKind::FieldDecl
            | CursorKind::VarDecl
            | CursorKind::FunctionDecl
            | CursorKind::CxxMethod
            | CursorKind::ParmDecl => {
                let declarator = self
                    .declarator
                    .or_else(|| self.node.child_by_field_name("declarator"));
                CursorType::from_declaration(self.node, declarator, source)
            }
            CursorKind::ClassDecl
            | CursorKind::StructDecl
            | CursorKind::UnionDecl
            | CursorKind::EnumDecl
            | CursorKind::TypeRef => CursorType::from_specifier(self.node, source),
            CursorKind::EnumConstantDecl => {
                let mut current = self.node.parent();
                while let Some(node) = current {
                    if node.kind() == "enum_specifier" {
                        return CursorType::from_specifier(node, source);
                    }
                    current = node.parent();
                }
                CursorType::invalid()
            }
            _ => CursorType::invalid(),
        }
    }

    pub fn is_pointer(&self) -> bool {
        self.cursor_type().is_pointer()
    }

    /// Kind of the pointed-to type, when the entity is a pointer.
    pub fn pointee_kind(&self) -> Option<TypeKind> {
        self.cursor_type().pointee_kind()
    }

    pub fn is_array(&self) -> bool {
        self.cursor_type().is_array()
    }

    /// Kind of the element type, when the entity is an array.
    pub fn array_kind(&self) -> Option<TypeKind> {
        self.cursor_type().array_kind()
    }

    /// Access level of a record member; `None` outside record bodies.
    pub fn access_specifier(&self) -> Option<AccessSpecifier> {
        if self.node.kind() == "access_specifier" {
            return AccessSpecifier::from_keyword(self.tu.text(self.node));
        }

        let (item, list) = member_item(self.node)?;
        let mut sibling = item.prev_named_sibling();
        while let Some(node) = sibling {
            if node.kind() == "access_specifier" {
                return AccessSpecifier::from_keyword(self.tu.text(node));
            }
            sibling = node.prev_named_sibling();
        }

        let record = list.parent()?;
        Some(if record.kind() == "class_specifier" {
            AccessSpecifier::Private
        } else {
            AccessSpecifier::Public
        })
    }

    /// Write a description of the cursor, useful when writing observers.
    pub fn dump<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        let kind = self.kind();
        let access = self
            .access_specifier()
            .map(|access| access.to_string())
            .unwrap_or_else(|| "none".to_string());

        let ty = self.cursor_type();
        let kind_of = |ty: Option<&CursorType>| ty.map_or(TypeKind::Invalid, CursorType::kind);

        writeln!(out, "CURSOR DUMP")?;
        writeln!(out, "  Kind:          {}", kind)?;
        writeln!(out, "    Declaration: {}", kind.is_declaration())?;
        writeln!(out, "    Reference:   {}", kind.is_reference())?;
        writeln!(out, "    Expression:  {}", kind.is_expression())?;
        writeln!(out, "    Statement:   {}", kind.is_statement())?;
        writeln!(out, "    Attribute:   {}", kind.is_attribute())?;
        writeln!(out, "    Invalid:     {}", kind.is_invalid())?;
        writeln!(out, "  Definition:    {}", self.is_definition())?;
        writeln!(out, "  USR:           {}", self.usr())?;
        writeln!(out, "  Spelling:      {}", self.spelling())?;
        writeln!(out, "  Display Name:  {}", self.display_name())?;
        writeln!(out, "  Location:      {}", self.location())?;
        writeln!(out, "  Access Level:  {}", access)?;
        writeln!(out, "  Type:")?;
        writeln!(out, "    Kind:          {}", ty.kind())?;
        writeln!(out, "    Spelling:      {}", ty.spelling())?;
        writeln!(out, "    Canonical:     {}", ty.canonical().kind())?;
        writeln!(out, "    Const:         {}", ty.is_const_qualified())?;
        writeln!(out, "    Volatile:      {}", ty.is_volatile_qualified())?;
        writeln!(out, "    Restrict:      {}", ty.is_restrict_qualified())?;
        writeln!(out, "    Pointee:       {}", kind_of(ty.pointee()))?;
        writeln!(out, "    Result:        {}", kind_of(ty.result_type()))?;
        writeln!(out, "    Array element: {}", kind_of(ty.element_type()))?;
        match ty.array_size() {
            Some(size) => writeln!(out, "    Array size:    {}", size)?,
            None => writeln!(out, "    Array size:    -1")?,
        }
        writeln!(out, "  # Children:    {}", self.children().len())
    }
}

impl fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("kind", &self.kind())
            .field("spelling", &self.spelling())
            .field("location", &self.location().to_string())
            .finish()
    }
}

fn namespace_segment(name: &str, node: Node<'_>) -> String {
    if name.is_empty() {
        return format!("@aN@{}", node.start_byte());
    }
    name.split("::")
        .map(|part| format!("@N@{}", part.trim()))
        .collect()
}

fn record_segment(tag: &str, name: &str, node: Node<'_>) -> String {
    if name.is_empty() {
        format!("@{}a@{}", tag, node.start_byte())
    } else {
        format!("@{}@{}", tag, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParserConfig;
    use pretty_assertions::assert_eq;

    fn parse(filename: &str, source: &str) -> TranslationUnit {
        TranslationUnit::parse(filename, source, Vec::new(), &ParserConfig::default()).unwrap()
    }

    /// Every cursor of the unit, in child-walk order.
    fn cursors<'a>(parser: &'a Parser, tu: &'a TranslationUnit) -> Vec<Cursor<'a>> {
        parser
            .emit_child_cursors(&tu.cursor(parser))
            .map(|(cursor, _)| cursor)
            .collect()
    }

    fn find<'a>(cursors: &[Cursor<'a>], kind: CursorKind, spelling: &str) -> Cursor<'a> {
        *cursors
            .iter()
            .find(|c| c.kind() == kind && c.spelling() == spelling)
            .unwrap_or_else(|| panic!("no {} named {}", kind, spelling))
    }

    const SHAPES: &str = "namespace geo {
namespace detail { struct Tag {}; }
class Shape : public Base {
  int id;
public:
  static int count;
  int area(int w, const char* label) const;
  void reset() { id = 0; }
protected:
  int x, y;
};
union Value { int i; float f; };
enum Color { Red, Green };
}
extern int shared;
int local = 1;
typedef unsigned long size_type;
";

    #[test]
    fn test_translation_unit_cursor() {
        let parser = Parser::new();
        let tu = parse("shapes.cpp", SHAPES);
        let root = tu.cursor(&parser);

        assert_eq!(root.kind(), CursorKind::TranslationUnit);
        assert_eq!(root.spelling(), "shapes.cpp");
        assert_eq!(root.usr(), "");
        assert!(!root.is_definition());
        assert!(std::ptr::eq(root.tu(), &tu));
        assert!(std::ptr::eq(root.parser(), &parser));
    }

    #[test]
    fn test_usrs() {
        let parser = Parser::new();
        let tu = parse("shapes.cpp", SHAPES);
        let all = cursors(&parser, &tu);

        assert_eq!(find(&all, CursorKind::Namespace, "geo").usr(), "c:@N@geo");
        assert_eq!(find(&all, CursorKind::StructDecl, "Tag").usr(), "c:@N@geo@N@detail@S@Tag");
        assert_eq!(find(&all, CursorKind::ClassDecl, "Shape").usr(), "c:@N@geo@S@Shape");
        assert_eq!(find(&all, CursorKind::FieldDecl, "y").usr(), "c:@N@geo@S@Shape@FI@y");
        assert_eq!(find(&all, CursorKind::CxxMethod, "area").usr(), "c:@N@geo@S@Shape@F@area#");
        assert_eq!(find(&all, CursorKind::VarDecl, "count").usr(), "c:@N@geo@S@Shape@count");
        assert_eq!(find(&all, CursorKind::UnionDecl, "Value").usr(), "c:@N@geo@U@Value");
        assert_eq!(find(&all, CursorKind::EnumConstantDecl, "Green").usr(), "c:@N@geo@E@Color@Green");
        assert_eq!(find(&all, CursorKind::VarDecl, "shared").usr(), "c:@shared");
        assert_eq!(find(&all, CursorKind::TypedefDecl, "size_type").usr(), "c:@T@size_type");
        assert_eq!(find(&all, CursorKind::ParmDecl, "w").usr(), "");
    }

    #[test]
    fn test_display_names() {
        let parser = Parser::new();
        let tu = parse("shapes.cpp", SHAPES);
        let all = cursors(&parser, &tu);

        assert_eq!(find(&all, CursorKind::CxxMethod, "area").display_name(), "area(int, const char*)");
        assert_eq!(find(&all, CursorKind::CxxMethod, "reset").display_name(), "reset()");
        assert_eq!(find(&all, CursorKind::FieldDecl, "x").display_name(), "x");
    }

    #[test]
    fn test_definitions() {
        let parser = Parser::new();
        let tu = parse("shapes.cpp", "class Fwd;\nclass Full {};\nint f(int);\nint g() { return 1; }\nextern int e;\nint v;\nstruct S { static int n; };\n");
        let all = cursors(&parser, &tu);

        assert!(!find(&all, CursorKind::ClassDecl, "Fwd").is_definition());
        assert!(find(&all, CursorKind::ClassDecl, "Full").is_definition());
        assert!(!find(&all, CursorKind::FunctionDecl, "f").is_definition());
        assert!(find(&all, CursorKind::FunctionDecl, "g").is_definition());
        assert!(!find(&all, CursorKind::VarDecl, "e").is_definition());
        assert!(find(&all, CursorKind::VarDecl, "v").is_definition());
        assert!(!find(&all, CursorKind::VarDecl, "n").is_definition());
    }

    #[test]
    fn test_extent_and_location() {
        let parser = Parser::new();
        let tu = parse("point.cpp", "class Point {\n  int x, y;\n};\n");
        let all = cursors(&parser, &tu);

        let class = find(&all, CursorKind::ClassDecl, "Point");
        let (start, end) = class.extent();
        assert_eq!(start.as_tuple(), ("point.cpp", 1, 1, 0));
        assert_eq!(end.as_tuple(), ("point.cpp", 3, 2, 27));
        assert_eq!(class.location().as_tuple(), ("point.cpp", 1, 7, 6));

        let y = find(&all, CursorKind::FieldDecl, "y");
        let (start, end) = y.extent();
        assert_eq!((start.line, start.column), (2, 3));
        assert_eq!((end.line, end.column), (2, 11));
        assert!(start <= end);
        assert_eq!(y.text(), "int x, y");
    }

    #[test]
    fn test_access_specifiers() {
        let parser = Parser::new();
        let tu = parse("shapes.cpp", SHAPES);
        let all = cursors(&parser, &tu);

        assert_eq!(find(&all, CursorKind::FieldDecl, "id").access_specifier(), Some(AccessSpecifier::Private));
        assert_eq!(find(&all, CursorKind::VarDecl, "count").access_specifier(), Some(AccessSpecifier::Public));
        assert_eq!(find(&all, CursorKind::FieldDecl, "x").access_specifier(), Some(AccessSpecifier::Protected));
        assert_eq!(find(&all, CursorKind::FieldDecl, "i").access_specifier(), Some(AccessSpecifier::Public));
        assert_eq!(find(&all, CursorKind::VarDecl, "shared").access_specifier(), None);
    }

    #[test]
    fn test_children_carry_context() {
        let parser = Parser::new();
        let tu = parse("shapes.cpp", SHAPES);
        let class = find(&cursors(&parser, &tu), CursorKind::ClassDecl, "Shape");

        for child in class.children() {
            assert!(std::ptr::eq(child.tu(), &tu));
            assert!(std::ptr::eq(child.parser(), &parser));
        }
    }

    #[test]
    fn test_types() {
        let parser = Parser::new();
        let tu = parse(
            "types.cpp",
            "class Buffer {\n  int *p;\n  char buf[8];\n  const Buffer &self;\n};\nenum Mode { On };\ntypedef unsigned long size_type;\n",
        );
        let all = cursors(&parser, &tu);

        let p = find(&all, CursorKind::FieldDecl, "p");
        assert!(p.is_pointer());
        assert!(!p.is_array());
        assert_eq!(p.pointee_kind(), Some(TypeKind::Int));
        assert_eq!(p.cursor_type().spelling(), "int *");

        let buf = find(&all, CursorKind::FieldDecl, "buf");
        assert!(buf.is_array());
        assert!(!buf.is_pointer());
        assert_eq!(buf.array_kind(), Some(TypeKind::CharS));
        assert_eq!(buf.cursor_type().array_size(), Some(8));
        assert_eq!(buf.pointee_kind(), None);

        let this = find(&all, CursorKind::FieldDecl, "self");
        assert_eq!(this.cursor_type().kind(), TypeKind::LValueReference);
        assert_eq!(this.cursor_type().spelling(), "const Buffer &");

        let class = find(&all, CursorKind::ClassDecl, "Buffer");
        assert_eq!(class.cursor_type().kind(), TypeKind::Record);
        assert_eq!(find(&all, CursorKind::EnumConstantDecl, "On").cursor_type().kind(), TypeKind::Enum);

        let alias = find(&all, CursorKind::TypedefDecl, "size_type").cursor_type();
        assert_eq!(alias.kind(), TypeKind::Typedef);
        assert_eq!(alias.canonical().kind(), TypeKind::ULong);

        assert_eq!(tu.cursor(&parser).cursor_type().kind(), TypeKind::Invalid);
    }

    #[test]
    fn test_method_type() {
        let parser = Parser::new();
        let tu = parse("shapes.cpp", SHAPES);
        let all = cursors(&parser, &tu);

        let area = find(&all, CursorKind::CxxMethod, "area").cursor_type();
        assert_eq!(area.kind(), TypeKind::FunctionProto);
        assert_eq!(area.result_type().map(CursorType::kind), Some(TypeKind::Int));
        assert_eq!(area.spelling(), "int (int, const char *)");

        let reset = find(&all, CursorKind::CxxMethod, "reset").cursor_type();
        assert_eq!(reset.spelling(), "void ()");
    }

    #[test]
    fn test_dump_type_block() {
        let parser = Parser::new();
        let tu = parse("fields.c", "struct s { int *p; char buf[8]; };");
        let all = cursors(&parser, &tu);

        let mut out = Vec::new();
        find(&all, CursorKind::FieldDecl, "p").dump(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("    Reference:   false\n"));
        assert!(text.contains("  Type:\n    Kind:          POINTER\n"));
        assert!(text.contains("    Pointee:       INT\n"));
        assert!(text.contains("    Array size:    -1\n"));

        let mut out = Vec::new();
        find(&all, CursorKind::FieldDecl, "buf").dump(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("    Kind:          CONSTANTARRAY\n"));
        assert!(text.contains("    Spelling:      char [8]\n"));
        assert!(text.contains("    Array element: CHAR_S\n"));
        assert!(text.contains("    Array size:    8\n"));
    }

    #[test]
    fn test_dump() {
        let parser = Parser::new();
        let tu = parse("point.cpp", "class Point { int x; };");
        let class = find(&cursors(&parser, &tu), CursorKind::ClassDecl, "Point");

        let mut out = Vec::new();
        class.dump(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("CURSOR DUMP\n"));
        assert!(text.contains("  Kind:          CLASS_DECL\n"));
        assert!(text.contains("  USR:           c:@S@Point\n"));
        assert!(text.contains("  Location:      point.cpp:1[7] (6)\n"));
        assert!(text.contains("    Reference:   false\n"));
        assert!(text.contains("    Expression:  false\n"));
        assert!(text.contains("    Attribute:   false\n"));
        assert!(text.contains("    Kind:          RECORD\n"));
        assert!(text.contains("    Array size:    -1\n"));
        assert!(text.contains("  # Children:    1\n"));
    }
}
