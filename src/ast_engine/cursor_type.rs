//! Types of declared entities.
//!
//! A type is read off the declaration syntax: the type specifier and its
//! qualifiers, then the pointer, reference, array and function wrappers of
//! the declarator, outermost first. Type names are not resolved, so a
//! `size_t` or a class name stays as written.

use std::fmt;

use serde::{Serialize, Serializer};
use tree_sitter::Node;

use crate::ast_engine::languages::{named_children, parameters};

/// Kind of a type, named after Clang's type kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Invalid,
    Unexposed,
    Void,
    Bool,
    CharS,
    SChar,
    UChar,
    WChar,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    LongLong,
    ULongLong,
    Float,
    Double,
    LongDouble,
    Pointer,
    LValueReference,
    RValueReference,
    Record,
    Enum,
    Typedef,
    Elaborated,
    FunctionProto,
    ConstantArray,
    IncompleteArray,
    Auto,
}

impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Invalid => "INVALID",
            TypeKind::Unexposed => "UNEXPOSED",
            TypeKind::Void => "VOID",
            TypeKind::Bool => "BOOL",
            TypeKind::CharS => "CHAR_S",
            TypeKind::SChar => "SCHAR",
            TypeKind::UChar => "UCHAR",
            TypeKind::WChar => "WCHAR",
            TypeKind::Short => "SHORT",
            TypeKind::UShort => "USHORT",
            TypeKind::Int => "INT",
            TypeKind::UInt => "UINT",
            TypeKind::Long => "LONG",
            TypeKind::ULong => "ULONG",
            TypeKind::LongLong => "LONGLONG",
            TypeKind::ULongLong => "ULONGLONG",
            TypeKind::Float => "FLOAT",
            TypeKind::Double => "DOUBLE",
            TypeKind::LongDouble => "LONGDOUBLE",
            TypeKind::Pointer => "POINTER",
            TypeKind::LValueReference => "LVALUEREFERENCE",
            TypeKind::RValueReference => "RVALUEREFERENCE",
            TypeKind::Record => "RECORD",
            TypeKind::Enum => "ENUM",
            TypeKind::Typedef => "TYPEDEF",
            TypeKind::Elaborated => "ELABORATED",
            TypeKind::FunctionProto => "FUNCTIONPROTO",
            TypeKind::ConstantArray => "CONSTANTARRAY",
            TypeKind::IncompleteArray => "INCOMPLETEARRAY",
            TypeKind::Auto => "AUTO",
        }
    }

    /// Kind of a builtin type spelled with the given keywords.
    fn builtin(text: &str) -> Self {
        let words: Vec<&str> = text.split_whitespace().collect();
        let has = |word: &str| words.contains(&word);
        let unsigned = has("unsigned");
        let longs = words.iter().filter(|w| **w == "long").count();

        if has("char") {
            if unsigned {
                TypeKind::UChar
            } else if has("signed") {
                TypeKind::SChar
            } else {
                TypeKind::CharS
            }
        } else if has("wchar_t") {
            TypeKind::WChar
        } else if has("bool") || has("_Bool") {
            TypeKind::Bool
        } else if has("void") {
            TypeKind::Void
        } else if has("float") {
            TypeKind::Float
        } else if has("double") {
            if longs > 0 {
                TypeKind::LongDouble
            } else {
                TypeKind::Double
            }
        } else if has("short") {
            if unsigned {
                TypeKind::UShort
            } else {
                TypeKind::Short
            }
        } else if longs >= 2 {
            if unsigned {
                TypeKind::ULongLong
            } else {
                TypeKind::LongLong
            }
        } else if longs == 1 {
            if unsigned {
                TypeKind::ULong
            } else {
                TypeKind::Long
            }
        } else if !words.is_empty()
            && words.iter().all(|w| matches!(*w, "int" | "signed" | "unsigned"))
        {
            if unsigned {
                TypeKind::UInt
            } else {
                TypeKind::Int
            }
        } else {
            // size_t, int32_t and friends
            TypeKind::Typedef
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The type of a declared entity.
///
/// Serializes as its spelling, e.g. `"const char *"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CursorType {
    kind: TypeKind,
    /// Written name for leaf types, size expression for arrays.
    name: String,
    is_const: bool,
    is_volatile: bool,
    is_restrict: bool,
    /// Pointee, array element, function result or typedef target.
    inner: Option<Box<CursorType>>,
    array_size: Option<u64>,
    parameters: Vec<CursorType>,
}

impl CursorType {
    fn leaf(kind: TypeKind, name: String) -> Self {
        Self {
            kind,
            name,
            is_const: false,
            is_volatile: false,
            is_restrict: false,
            inner: None,
            array_size: None,
            parameters: Vec::new(),
        }
    }

    fn wrap(kind: TypeKind, inner: CursorType) -> Self {
        Self {
            inner: Some(Box::new(inner)),
            ..Self::leaf(kind, String::new())
        }
    }

    pub(crate) fn invalid() -> Self {
        Self::leaf(TypeKind::Invalid, String::new())
    }

    /// Type of a declaration-like node (declaration, field, parameter,
    /// typedef or function definition) seen through one of its declarators.
    pub(crate) fn from_declaration(node: Node<'_>, declarator: Option<Node<'_>>, source: &str) -> Self {
        let Some(specifier) = node.child_by_field_name("type") else {
            return Self::invalid();
        };

        let mut base = Self::from_specifier(specifier, source);
        for child in named_children(node) {
            if child.kind() == "type_qualifier" {
                base.qualify(text(child, source));
            }
        }

        match declarator {
            Some(declarator) => base.derive(declarator, source),
            None => base,
        }
    }

    /// Type named by a specifier node on its own.
    pub(crate) fn from_specifier(specifier: Node<'_>, source: &str) -> Self {
        match specifier.kind() {
            "primitive_type" | "sized_type_specifier" => {
                let name = normalize(text(specifier, source));
                Self::leaf(TypeKind::builtin(&name), name)
            }
            "class_specifier" | "struct_specifier" | "union_specifier" | "enum_specifier" => {
                let keyword = specifier.child(0).map(|token| token.kind()).unwrap_or_default();
                let name = specifier
                    .child_by_field_name("name")
                    .map(|name| normalize(text(name, source)))
                    .unwrap_or_else(|| "(anonymous)".to_string());
                let kind = match (specifier.child_by_field_name("body"), keyword) {
                    (None, _) => TypeKind::Elaborated,
                    (Some(_), "enum") => TypeKind::Enum,
                    (Some(_), _) => TypeKind::Record,
                };
                Self::leaf(kind, format!("{} {}", keyword, name))
            }
            "type_identifier" | "qualified_identifier" | "qualified_type_identifier"
            | "template_type" | "dependent_type" => {
                Self::leaf(TypeKind::Elaborated, normalize(text(specifier, source)))
            }
            "placeholder_type_specifier" | "auto" => {
                Self::leaf(TypeKind::Auto, normalize(text(specifier, source)))
            }
            _ => Self::leaf(TypeKind::Unexposed, normalize(text(specifier, source))),
        }
    }

    /// A typedef named `name` standing for `target`.
    pub(crate) fn typedef(name: String, target: CursorType) -> Self {
        Self {
            name,
            ..Self::wrap(TypeKind::Typedef, target)
        }
    }

    fn qualify(&mut self, qualifier: &str) {
        match qualifier.trim() {
            "const" => self.is_const = true,
            "volatile" => self.is_volatile = true,
            "restrict" | "__restrict" | "__restrict__" => self.is_restrict = true,
            _ => {}
        }
    }

    /// Apply the declarator wrappers to `self`, outermost first.
    fn derive(mut self, declarator: Node<'_>, source: &str) -> Self {
        let mut current = Some(declarator);

        while let Some(node) = current {
            current = match node.kind() {
                "init_declarator" => node.child_by_field_name("declarator"),
                "attributed_declarator" | "parenthesized_declarator"
                | "abstract_parenthesized_declarator" => named_children(node).into_iter().next(),
                "pointer_declarator" | "abstract_pointer_declarator" => {
                    let mut pointer = Self::wrap(TypeKind::Pointer, self);
                    for child in named_children(node) {
                        if child.kind() == "type_qualifier" {
                            pointer.qualify(text(child, source));
                        }
                    }
                    self = pointer;
                    node.child_by_field_name("declarator")
                }
                "reference_declarator" | "abstract_reference_declarator" => {
                    let kind = match node.child(0).map(|token| token.kind()) {
                        Some("&&") => TypeKind::RValueReference,
                        _ => TypeKind::LValueReference,
                    };
                    self = Self::wrap(kind, self);
                    named_children(node).into_iter().next()
                }
                "array_declarator" | "abstract_array_declarator" => {
                    let size = node.child_by_field_name("size");
                    let mut array = match size {
                        Some(_) => Self::wrap(TypeKind::ConstantArray, self),
                        None => Self::wrap(TypeKind::IncompleteArray, self),
                    };
                    if let Some(size) = size {
                        array.name = normalize(text(size, source));
                        array.array_size = parse_size(&array.name);
                    }
                    self = array;
                    node.child_by_field_name("declarator")
                }
                "function_declarator" | "abstract_function_declarator" => {
                    let mut function = Self::wrap(TypeKind::FunctionProto, self);
                    function.parameters = parameters(node)
                        .into_iter()
                        .filter(|parameter| parameter.kind() != "variadic_parameter_declaration")
                        .map(|parameter| {
                            Self::from_declaration(parameter, parameter.child_by_field_name("declarator"), source)
                        })
                        .collect();
                    self = function;
                    node.child_by_field_name("declarator")
                }
                _ => None,
            };
        }

        self
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// C spelling of the type, e.g. `int (*)[3]`.
    pub fn spelling(&self) -> String {
        self.render(String::new())
    }

    /// The type with typedefs and elaborated record names resolved as far as
    /// the syntax allows.
    pub fn canonical(&self) -> CursorType {
        match (self.kind, self.inner.as_deref()) {
            (TypeKind::Typedef, Some(target)) => target.canonical(),
            (TypeKind::Elaborated, _) => {
                let kind = match self.name.split_whitespace().next() {
                    Some("struct" | "class" | "union") => TypeKind::Record,
                    Some("enum") => TypeKind::Enum,
                    _ => TypeKind::Elaborated,
                };
                Self { kind, ..self.clone() }
            }
            _ => self.clone(),
        }
    }

    pub fn is_const_qualified(&self) -> bool {
        self.is_const
    }

    pub fn is_volatile_qualified(&self) -> bool {
        self.is_volatile
    }

    pub fn is_restrict_qualified(&self) -> bool {
        self.is_restrict
    }

    pub fn is_pointer(&self) -> bool {
        self.kind == TypeKind::Pointer
    }

    /// Whether the type is an array, with or without a size.
    pub fn is_array(&self) -> bool {
        matches!(self.kind, TypeKind::ConstantArray | TypeKind::IncompleteArray)
    }

    /// The pointed-to type of a pointer or reference.
    pub fn pointee(&self) -> Option<&CursorType> {
        match self.kind {
            TypeKind::Pointer | TypeKind::LValueReference | TypeKind::RValueReference => {
                self.inner.as_deref()
            }
            _ => None,
        }
    }

    pub fn pointee_kind(&self) -> Option<TypeKind> {
        self.pointee().map(CursorType::kind)
    }

    pub fn element_type(&self) -> Option<&CursorType> {
        if self.is_array() {
            self.inner.as_deref()
        } else {
            None
        }
    }

    pub fn array_kind(&self) -> Option<TypeKind> {
        self.element_type().map(CursorType::kind)
    }

    /// Element count of an array whose size is an integer literal.
    pub fn array_size(&self) -> Option<u64> {
        self.array_size
    }

    pub fn result_type(&self) -> Option<&CursorType> {
        match self.kind {
            TypeKind::FunctionProto => self.inner.as_deref(),
            _ => None,
        }
    }

    pub fn parameter_types(&self) -> &[CursorType] {
        &self.parameters
    }

    fn render(&self, inner: String) -> String {
        match self.kind {
            TypeKind::Pointer | TypeKind::LValueReference | TypeKind::RValueReference => {
                let mut declarator = match self.kind {
                    TypeKind::Pointer => "*".to_string(),
                    TypeKind::LValueReference => "&".to_string(),
                    _ => "&&".to_string(),
                };
                let qualifiers = self.qualifiers();
                if !qualifiers.is_empty() {
                    declarator.push_str(&qualifiers.join(" "));
                    if !inner.is_empty() {
                        declarator.push(' ');
                    }
                }
                declarator.push_str(&inner);

                match self.inner.as_deref() {
                    Some(pointee) => {
                        if matches!(
                            pointee.kind,
                            TypeKind::ConstantArray | TypeKind::IncompleteArray | TypeKind::FunctionProto
                        ) {
                            declarator = format!("({})", declarator);
                        }
                        pointee.render(declarator)
                    }
                    None => declarator,
                }
            }
            TypeKind::ConstantArray | TypeKind::IncompleteArray => {
                let declarator = format!("{}[{}]", inner, self.name);
                match self.inner.as_deref() {
                    Some(element) => element.render(declarator),
                    None => declarator,
                }
            }
            TypeKind::FunctionProto => {
                let parameters: Vec<String> = self.parameters.iter().map(CursorType::spelling).collect();
                let declarator = format!("{}({})", inner, parameters.join(", "));
                match self.inner.as_deref() {
                    Some(result) => result.render(declarator),
                    None => declarator,
                }
            }
            _ => {
                let mut spelling = self.qualifiers().join(" ");
                if !spelling.is_empty() {
                    spelling.push(' ');
                }
                spelling.push_str(&self.name);
                if !inner.is_empty() {
                    spelling.push(' ');
                    spelling.push_str(&inner);
                }
                spelling
            }
        }
    }

    fn qualifiers(&self) -> Vec<&'static str> {
        [
            (self.is_const, "const"),
            (self.is_volatile, "volatile"),
            (self.is_restrict, "restrict"),
        ]
        .into_iter()
        .filter_map(|(set, keyword)| set.then_some(keyword))
        .collect()
    }
}

impl fmt::Display for CursorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.spelling())
    }
}

impl Serialize for CursorType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.spelling())
    }
}

fn text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    source.get(node.byte_range()).unwrap_or_default()
}

fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse an integer literal array size, ignoring suffixes.
fn parse_size(literal: &str) -> Option<u64> {
    let digits = literal.trim_end_matches(|c: char| matches!(c, 'u' | 'U' | 'l' | 'L'));
    let digits = digits.replace('\'', "");
    if let Some(hex) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).ok()
    } else if digits.len() > 1 && digits.starts_with('0') {
        u64::from_str_radix(&digits[1..], 8).ok()
    } else {
        digits.parse().ok()
    }
}
