//! Primitive type table
//!
//! Every type is an interned singleton. Two types are equal when their
//! kinds are equal; the name is only for display.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use std::fmt;

/// Type kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Not inferred, or inference failed
    Unknown,
    Int,
    Float,
    Bool,
    Nil,
    Str,
}

/// A primitive type
#[derive(Debug, Clone, Copy)]
pub struct Type {
    pub kind: TypeKind,
    pub name: &'static str,
}

impl Type {
    pub const UNKNOWN: Type = Type::new(TypeKind::Unknown, "unknown");
    pub const INT: Type = Type::new(TypeKind::Int, "Int");
    pub const FLOAT: Type = Type::new(TypeKind::Float, "Float");
    pub const BOOL: Type = Type::new(TypeKind::Bool, "Bool");
    pub const NIL: Type = Type::new(TypeKind::Nil, "Nil");
    pub const STR: Type = Type::new(TypeKind::Str, "Str");

    const fn new(
        kind: TypeKind,
        name: &'static str,
    ) -> Self {
        Self { kind, name }
    }

    /// Int or Float
    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self.kind, TypeKind::Int | TypeKind::Float)
    }

    #[inline]
    pub fn is_unknown(&self) -> bool {
        self.kind == TypeKind::Unknown
    }
}

impl PartialEq for Type {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.kind == other.kind
    }
}

impl Eq for Type {}

impl fmt::Display for Type {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Registry of the primitive types, keyed by display name
pub struct TypeTable {
    types: IndexMap<&'static str, Type>,
}

static PRIMITIVES: Lazy<TypeTable> = Lazy::new(|| {
    let types = [Type::INT, Type::FLOAT, Type::BOOL, Type::NIL, Type::STR]
        .into_iter()
        .map(|ty| (ty.name, ty))
        .collect();
    TypeTable { types }
});

impl TypeTable {
    /// The process-wide table
    pub fn global() -> &'static TypeTable {
        &PRIMITIVES
    }

    /// The singleton for a kind
    pub fn get(kind: TypeKind) -> Type {
        match kind {
            TypeKind::Unknown => Type::UNKNOWN,
            TypeKind::Int => Type::INT,
            TypeKind::Float => Type::FLOAT,
            TypeKind::Bool => Type::BOOL,
            TypeKind::Nil => Type::NIL,
            TypeKind::Str => Type::STR,
        }
    }

    /// Look a type up by its display name
    pub fn lookup(
        &self,
        name: &str,
    ) -> Option<Type> {
        self.types.get(name).copied()
    }

    /// Registered types in declaration order
    pub fn iter(&self) -> impl Iterator<Item = Type> + '_ {
        self.types.values().copied()
    }
}
