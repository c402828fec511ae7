//! Static type metadata for entity types.
//!
//! Every data-model type publishes a [`TypeInfo`] table: the entity marker
//! (present only on schema-backed types), its single structural parent, the
//! capability interfaces it implements, and its members with their field
//! metadata. Tables are plain `static` data, usually written with the
//! [`reflect!`](crate::reflect) macro:
//!
//! ```
//! use entity_schema::entity::{EntityMeta, FieldMeta, Member, Reflect, TypeInfo};
//! use entity_schema::schema::ValueKind;
//!
//! pub struct Address;
//! pub struct Person;
//!
//! entity_schema::reflect!(Address => TypeInfo {
//!     type_name: "Address",
//!     entity: Some(EntityMeta::DEFAULT),
//!     superclass: None,
//!     interfaces: &[],
//!     members: &[Member::field("street", FieldMeta::DEFAULT)],
//! });
//!
//! entity_schema::reflect!(Person => TypeInfo {
//!     type_name: "Person",
//!     entity: Some(EntityMeta::named("person")),
//!     superclass: None,
//!     interfaces: &[],
//!     members: &[
//!         Member::field("email", FieldMeta::DEFAULT.unique()),
//!         Member::method(
//!             "getHomeAddress",
//!             FieldMeta::DEFAULT
//!                 .kind(ValueKind::Link)
//!                 .target(<Address as Reflect>::type_info),
//!         ),
//!     ],
//! });
//!
//! assert!(Person::type_info().is_schema_backed());
//! ```
//!
//! Type references are function pointers ([`TypeRef`]) so that tables can
//! refer to each other, including cyclically, and are only resolved when the
//! engine walks them.

use std::fmt;

use crate::schema::ValueKind;

/// Lazily resolved reference to another type's table.
pub type TypeRef = fn() -> &'static TypeInfo;

/// Implemented by every type that publishes a metadata table.
pub trait Reflect {
    fn type_info() -> &'static TypeInfo;
}

/// Implement [`Reflect`] for a type from a const [`TypeInfo`] expression.
#[macro_export]
macro_rules! reflect {
    ($ty:ty => $info:expr $(,)?) => {
        impl $crate::entity::Reflect for $ty {
            fn type_info() -> &'static $crate::entity::TypeInfo {
                static INFO: $crate::entity::TypeInfo = $info;
                &INFO
            }
        }
    };
}

/// The entity marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityMeta {
    /// Class name override; `None` uses the bare type name.
    pub name: Option<&'static str>,
}

impl EntityMeta {
    pub const DEFAULT: EntityMeta = EntityMeta { name: None };

    pub const fn named(name: &'static str) -> Self {
        Self { name: Some(name) }
    }
}

/// Field metadata attached to a member.
///
/// `target: None` is the "no target declared" sentinel; it cannot be confused
/// with a real type.
#[derive(Clone, Copy)]
pub struct FieldMeta {
    /// Field name override; `None` derives the name from the member.
    pub name: Option<&'static str>,
    pub kind: ValueKind,
    pub unique: bool,
    pub target: Option<TypeRef>,
}

impl FieldMeta {
    /// A string-valued, non-unique field with a derived name and no target.
    pub const DEFAULT: FieldMeta = FieldMeta {
        name: None,
        kind: ValueKind::String,
        unique: false,
        target: None,
    };

    pub const fn named(self, name: &'static str) -> Self {
        Self {
            name: Some(name),
            ..self
        }
    }

    pub const fn kind(self, kind: ValueKind) -> Self {
        Self { kind, ..self }
    }

    pub const fn unique(self) -> Self {
        Self {
            unique: true,
            ..self
        }
    }

    pub const fn target(self, target: TypeRef) -> Self {
        Self {
            target: Some(target),
            ..self
        }
    }
}

impl Default for FieldMeta {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Debug for FieldMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldMeta")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("unique", &self.unique)
            .field("target", &self.target.map(|t| t().type_name))
            .finish()
    }
}

/// Category of a type member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    /// A structural field.
    Field,
    /// A getter-style method.
    Method,
    /// An associated constant.
    Constant,
}

/// One member of a type, with its field metadata if it carries any.
#[derive(Debug, Clone, Copy)]
pub struct Member {
    pub name: &'static str,
    pub kind: MemberKind,
    pub field: Option<FieldMeta>,
}

impl Member {
    pub const fn field(name: &'static str, meta: FieldMeta) -> Self {
        Self {
            name,
            kind: MemberKind::Field,
            field: Some(meta),
        }
    }

    pub const fn method(name: &'static str, meta: FieldMeta) -> Self {
        Self {
            name,
            kind: MemberKind::Method,
            field: Some(meta),
        }
    }

    pub const fn constant(name: &'static str, meta: FieldMeta) -> Self {
        Self {
            name,
            kind: MemberKind::Constant,
            field: Some(meta),
        }
    }

    /// A member without field metadata; ignored by the engine.
    pub const fn plain(name: &'static str, kind: MemberKind) -> Self {
        Self {
            name,
            kind,
            field: None,
        }
    }
}

/// The metadata table of one type.
pub struct TypeInfo {
    /// Bare type name, without module path.
    pub type_name: &'static str,
    /// Entity marker; `None` for types that are not schema-backed.
    pub entity: Option<EntityMeta>,
    /// Structural parent.
    pub superclass: Option<TypeRef>,
    /// Implemented capability interfaces.
    pub interfaces: &'static [TypeRef],
    /// Members in declaration order.
    pub members: &'static [Member],
}

impl TypeInfo {
    pub fn of<T: Reflect>() -> &'static TypeInfo {
        T::type_info()
    }

    pub fn is_schema_backed(&self) -> bool {
        self.entity.is_some()
    }

    /// Members of the given kind that carry field metadata, in declaration order.
    pub fn annotated(&self, kind: MemberKind) -> impl Iterator<Item = &'static Member> + use<> {
        let members: &'static [Member] = self.members;
        members
            .iter()
            .filter(move |m| m.kind == kind && m.field.is_some())
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("type_name", &self.type_name)
            .field("entity", &self.entity)
            .field("superclass", &self.superclass.map(|t| t().type_name))
            .field(
                "interfaces",
                &self.interfaces.iter().map(|t| t().type_name).collect::<Vec<_>>(),
            )
            .field("members", &self.members)
            .finish()
    }
}
