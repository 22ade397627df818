//! Entity model.
//!
//! This module contains the in-memory representation of metadata entities:
//! aliases, constants, enumerations, records (plain records, unions and
//! classes) and callables. Every entity shares an [`EntityBase`].

use crate::functions::{Argument, Function};
use std::fmt;

/// Attributes common to every entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityBase {
    /// Declared identifier.
    pub name: String,
    /// Native symbol name.
    pub c_name: String,
    /// Native type spelling (empty for untyped entities).
    pub c_type: String,
    /// Documentation text, possibly multi-line.
    pub doc: String,
    /// Deprecation notice, if the entity is deprecated.
    pub deprecated: Option<String>,
}

impl EntityBase {
    /// Creates a base whose native name defaults to `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            c_name: name.clone(),
            name,
            ..Self::default()
        }
    }

    /// Sets the native symbol name.
    #[must_use]
    pub fn with_c_name(mut self, c_name: impl Into<String>) -> Self {
        self.c_name = c_name.into();
        self
    }

    /// Sets the native type spelling.
    #[must_use]
    pub fn with_c_type(mut self, c_type: impl Into<String>) -> Self {
        self.c_type = c_type.into();
        self
    }

    /// Sets the documentation text.
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    /// Sets the deprecation notice.
    #[must_use]
    pub fn with_deprecated(mut self, notice: impl Into<String>) -> Self {
        self.deprecated = Some(notice.into());
        self
    }
}

/// Discriminator for entity kinds, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Type alias.
    Alias,
    /// Named constant.
    Constant,
    /// Enumeration or bitfield.
    Enumeration,
    /// Enumeration member.
    Member,
    /// Plain record.
    Record,
    /// Union record.
    Union,
    /// Class record.
    Class,
    /// Free function.
    Function,
    /// Method of a record.
    Method,
    /// Signal.
    Signal,
    /// Function argument.
    Argument,
}

impl EntityKind {
    /// Returns the human-readable label of this kind.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Alias => "Alias",
            Self::Constant => "Constant",
            Self::Enumeration => "Enumeration",
            Self::Member => "Member",
            Self::Record => "Record",
            Self::Union => "Union",
            Self::Class => "Class",
            Self::Function => "Function",
            Self::Method => "Method",
            Self::Signal => "Signal",
            Self::Argument => "Argument",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Reference to a type by name, with its native spelling when known.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeRef {
    /// Metadata type name.
    pub name: String,
    /// Native type spelling (may be empty).
    pub ctype: String,
}

impl TypeRef {
    /// Creates a type reference.
    #[must_use]
    pub fn new(name: impl Into<String>, ctype: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ctype: ctype.into(),
        }
    }

    /// Returns true if neither a name nor a native spelling is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.ctype.is_empty()
    }
}

/// Type alias definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    /// Common attributes.
    pub base: EntityBase,
    /// The type this alias stands for.
    pub aliased_type: TypeRef,
}

/// Named constant definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constant {
    /// Common attributes.
    pub base: EntityBase,
    /// Type of the constant.
    pub type_ref: TypeRef,
    /// Literal value as written in the metadata.
    pub value: String,
}

/// Enumeration member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Common attributes.
    pub base: EntityBase,
    /// Literal value as written in the metadata.
    pub value: String,
}

impl Member {
    /// Creates a new member.
    #[must_use]
    pub fn new(base: EntityBase, value: impl Into<String>) -> Self {
        Self {
            base,
            value: value.into(),
        }
    }
}

/// Enumeration definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enumeration {
    /// Common attributes.
    pub base: EntityBase,
    /// Members in declaration order.
    pub members: Vec<Member>,
}

impl Enumeration {
    /// Creates a new enumeration with no members.
    #[must_use]
    pub fn new(base: EntityBase) -> Self {
        Self {
            base,
            members: Vec::new(),
        }
    }

    /// Adds a member.
    pub fn add_member(&mut self, member: Member) {
        self.members.push(member);
    }

    /// Returns the native type backing the enumeration.
    #[must_use]
    pub fn backing_type(&self) -> &str {
        if self.base.c_type.is_empty() {
            &self.base.name
        } else {
            &self.base.c_type
        }
    }
}

/// Record definition, shared by plain records, unions and classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Common attributes.
    pub base: EntityBase,
    /// Identifier used for generated protocol and struct names.
    pub node: String,
    /// Native pointer target type.
    pub ctype: String,
    /// Name of the parent class, if any.
    pub parent: Option<String>,
    /// Methods in declaration order.
    pub methods: Vec<Function>,
    /// Signals in declaration order.
    pub signals: Vec<Function>,
}

impl Record {
    /// Creates a new record with no methods.
    ///
    /// The node name defaults to the entity name and the pointer target to the
    /// native type spelling (or the name, if no spelling is present).
    #[must_use]
    pub fn new(base: EntityBase) -> Self {
        let ctype = if base.c_type.is_empty() {
            base.name.clone()
        } else {
            base.c_type.clone()
        };
        Self {
            node: base.name.clone(),
            ctype,
            parent: None,
            methods: Vec::new(),
            signals: Vec::new(),
            base,
        }
    }

    /// Adds a method.
    pub fn add_method(&mut self, method: Function) {
        self.methods.push(method);
    }

    /// Adds a signal.
    pub fn add_signal(&mut self, signal: Function) {
        self.signals.push(signal);
    }

    /// Name of the protocol generated for this record.
    #[must_use]
    pub fn protocol_name(&self) -> String {
        format!("{}Type", self.node)
    }

    /// Name of the value type generated for this record.
    #[must_use]
    pub fn struct_name(&self) -> String {
        format!("{}Struct", self.node)
    }
}

/// A modelled metadata declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    /// Type alias.
    Alias(Alias),
    /// Named constant.
    Constant(Constant),
    /// Enumeration or bitfield.
    Enumeration(Enumeration),
    /// Plain record.
    Record(Record),
    /// Union record.
    Union(Record),
    /// Class record.
    Class(Record),
    /// Free function.
    Function(Function),
    /// Method declared outside a record.
    Method(Function),
    /// Signal.
    Signal(Function),
}

impl Entity {
    /// Returns the kind discriminator.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Alias(_) => EntityKind::Alias,
            Self::Constant(_) => EntityKind::Constant,
            Self::Enumeration(_) => EntityKind::Enumeration,
            Self::Record(_) => EntityKind::Record,
            Self::Union(_) => EntityKind::Union,
            Self::Class(_) => EntityKind::Class,
            Self::Function(_) => EntityKind::Function,
            Self::Method(_) => EntityKind::Method,
            Self::Signal(_) => EntityKind::Signal,
        }
    }

    /// Returns the common attributes.
    #[must_use]
    pub fn base(&self) -> &EntityBase {
        match self {
            Self::Alias(a) => &a.base,
            Self::Constant(c) => &c.base,
            Self::Enumeration(e) => &e.base,
            Self::Record(r) | Self::Union(r) | Self::Class(r) => &r.base,
            Self::Function(f) | Self::Method(f) | Self::Signal(f) => &f.base,
        }
    }

    /// Returns the declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.base().name
    }

    /// Returns the record payload for record-like kinds.
    #[must_use]
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(r) | Self::Union(r) | Self::Class(r) => Some(r),
            _ => None,
        }
    }

    /// Returns the callable payload for function-like kinds.
    #[must_use]
    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Self::Function(f) | Self::Method(f) | Self::Signal(f) => Some(f),
            _ => None,
        }
    }

    /// Returns true if the entity is private to the native library.
    #[must_use]
    pub fn is_private(&self) -> bool {
        let base = self.base();
        base.name.starts_with('_') || base.c_type.starts_with('_')
    }
}

/// Anything carrying documentation and a deprecation notice.
pub trait Documented {
    /// Returns the common attributes.
    fn base(&self) -> &EntityBase;
}

impl Documented for EntityBase {
    fn base(&self) -> &EntityBase {
        self
    }
}

impl Documented for Entity {
    fn base(&self) -> &EntityBase {
        Entity::base(self)
    }
}

macro_rules! impl_documented {
    ($($ty:ty),* $(,)?) => {
        $(impl Documented for $ty {
            fn base(&self) -> &EntityBase {
                &self.base
            }
        })*
    };
}

impl_documented!(Alias, Constant, Enumeration, Member, Record, Function, Argument);
