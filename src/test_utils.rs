//! Shared test utilities for schema reconciliation tests.
//!
//! Provides a small entity model covering the interesting ancestry shapes,
//! a mutation-counting engine wrapper, and a selector for running the same
//! test against every backend.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::entity::{EntityMeta, FieldMeta, Member, MemberKind, Reflect, TypeInfo};
use crate::schema::{
    CozoSchema, MemorySchema, SchemaClass, SchemaEngine, SchemaError, SchemaIndex, SchemaProperty,
    ValueKind,
};

// =============================================================================
// Backends
// =============================================================================

/// Schema engine backends under test.
#[derive(Debug, Clone, Copy)]
pub enum Backend {
    Memory,
    Cozo,
}

impl Backend {
    /// A fresh, empty schema of this backend.
    pub fn open(self) -> Box<dyn SchemaEngine> {
        match self {
            Backend::Memory => Box::new(MemorySchema::new()),
            Backend::Cozo => Box::new(CozoSchema::open_mem().expect("Failed to open in-memory CozoDB")),
        }
    }
}

/// Engine wrapper counting every mutating call that reaches the inner engine.
pub struct CountingSchema<'a> {
    inner: &'a dyn SchemaEngine,
    mutations: AtomicUsize,
}

impl<'a> CountingSchema<'a> {
    pub fn new(inner: &'a dyn SchemaEngine) -> Self {
        Self {
            inner,
            mutations: AtomicUsize::new(0),
        }
    }

    pub fn mutation_count(&self) -> usize {
        self.mutations.load(Ordering::SeqCst)
    }

    fn count(&self) {
        self.mutations.fetch_add(1, Ordering::SeqCst);
    }
}

impl SchemaEngine for CountingSchema<'_> {
    fn backend_name(&self) -> &'static str {
        self.inner.backend_name()
    }

    fn lookup_class(&self, name: &str) -> Result<Option<SchemaClass>, SchemaError> {
        self.inner.lookup_class(name)
    }

    fn create_class(&self, name: &str, parents: &[SchemaClass]) -> Result<SchemaClass, SchemaError> {
        self.count();
        self.inner.create_class(name, parents)
    }

    fn list_classes(&self) -> Result<Vec<SchemaClass>, SchemaError> {
        self.inner.list_classes()
    }

    fn get_property(
        &self,
        class: &SchemaClass,
        name: &str,
    ) -> Result<Option<SchemaProperty>, SchemaError> {
        self.inner.get_property(class, name)
    }

    fn get_properties(&self, class: &SchemaClass) -> Result<Vec<SchemaProperty>, SchemaError> {
        self.inner.get_properties(class)
    }

    fn create_property(
        &self,
        class: &SchemaClass,
        name: &str,
        kind: ValueKind,
    ) -> Result<SchemaProperty, SchemaError> {
        self.count();
        self.inner.create_property(class, name, kind)
    }

    fn get_indexes(&self, class: &SchemaClass) -> Result<Vec<SchemaIndex>, SchemaError> {
        self.inner.get_indexes(class)
    }

    fn create_unique_index(
        &self,
        class: &SchemaClass,
        index_name: &str,
        field_name: &str,
    ) -> Result<SchemaIndex, SchemaError> {
        self.count();
        self.inner.create_unique_index(class, index_name, field_name)
    }
}

/// Names of a class's parents, for compact assertions.
pub fn parent_names(schema: &dyn SchemaEngine, name: &str) -> Vec<String> {
    schema
        .lookup_class(name)
        .expect("lookup failed")
        .unwrap_or_else(|| panic!("class {} not found", name))
        .parents
}

/// Names of a class's properties, sorted.
pub fn property_names(schema: &dyn SchemaEngine, name: &str) -> Vec<String> {
    let class = schema
        .lookup_class(name)
        .expect("lookup failed")
        .unwrap_or_else(|| panic!("class {} not found", name));
    let mut names: Vec<_> = schema
        .get_properties(&class)
        .expect("get_properties failed")
        .into_iter()
        .map(|p| p.name)
        .collect();
    names.sort();
    names
}

// =============================================================================
// Entity model
// =============================================================================

/// Entity model shared by the reconciliation tests.
///
/// | Type        | Entity | Parents found                          |
/// |-------------|--------|----------------------------------------|
/// | Named       | yes    | -                                      |
/// | Timestamped | no     | (marker interface)                     |
/// | Plain       | no     | (plain superclass)                     |
/// | Address     | yes    | -                                      |
/// | Person      | yes    | Named, Address (link target)           |
/// | Employee    | yes    | Person, Named (diamond through Person) |
/// | Root        | yes    | -                                      |
/// | Middle      | no     | Root (but a gap for its subtypes)      |
/// | Leaf        | yes    | - (Middle is a gap)                    |
/// | Pet         | yes    | - (link without target)                |
/// | Sticker     | yes    | - (link to a non-entity)               |
/// | Badge       | yes    | Named, Root (plain superclass skipped) |
/// | Broken      | yes    | Root; fields fail on an annotated const |
/// | Invoice     | yes    | - (class name "invoice_v2")            |
/// | Chicken/Egg | yes    | each other (cycle)                     |
/// | Untagged    | no     | -                                      |
pub mod model {
    use super::*;

    pub struct Named;
    pub struct Timestamped;
    pub struct Plain;
    pub struct Address;
    pub struct Person;
    pub struct Employee;
    pub struct Root;
    pub struct Middle;
    pub struct Leaf;
    pub struct Pet;
    pub struct Sticker;
    pub struct Badge;
    pub struct Broken;
    pub struct Invoice;
    pub struct Chicken;
    pub struct Egg;
    pub struct Untagged;

    crate::reflect!(Named => TypeInfo {
        type_name: "Named",
        entity: Some(EntityMeta::DEFAULT),
        superclass: None,
        interfaces: &[],
        members: &[Member::method("getName", FieldMeta::DEFAULT.unique())],
    });

    crate::reflect!(Timestamped => TypeInfo {
        type_name: "Timestamped",
        entity: None,
        superclass: None,
        interfaces: &[],
        members: &[Member::method("getCreatedAt", FieldMeta::DEFAULT.kind(ValueKind::DateTime))],
    });

    crate::reflect!(Plain => TypeInfo {
        type_name: "Plain",
        entity: None,
        superclass: None,
        interfaces: &[],
        members: &[],
    });

    crate::reflect!(Address => TypeInfo {
        type_name: "Address",
        entity: Some(EntityMeta::DEFAULT),
        superclass: None,
        interfaces: &[],
        members: &[
            Member::field("street", FieldMeta::DEFAULT),
            Member::field("city", FieldMeta::DEFAULT),
        ],
    });

    crate::reflect!(Person => TypeInfo {
        type_name: "Person",
        entity: Some(EntityMeta::DEFAULT),
        superclass: None,
        interfaces: &[<Named as Reflect>::type_info, <Timestamped as Reflect>::type_info],
        members: &[
            Member::field("age", FieldMeta::DEFAULT.kind(ValueKind::Integer)),
            Member::method("getEmail", FieldMeta::DEFAULT.unique()),
            Member::plain("cache", MemberKind::Field),
            Member::method(
                "getHomeAddress",
                FieldMeta::DEFAULT
                    .kind(ValueKind::Link)
                    .target(<Address as Reflect>::type_info),
            ),
        ],
    });

    crate::reflect!(Employee => TypeInfo {
        type_name: "Employee",
        entity: Some(EntityMeta::DEFAULT),
        superclass: Some(<Person as Reflect>::type_info),
        interfaces: &[<Named as Reflect>::type_info],
        members: &[Member::field("badge", FieldMeta::DEFAULT.named("badge_no").unique())],
    });

    crate::reflect!(Root => TypeInfo {
        type_name: "Root",
        entity: Some(EntityMeta::DEFAULT),
        superclass: None,
        interfaces: &[],
        members: &[Member::field("id", FieldMeta::DEFAULT.kind(ValueKind::Long).unique())],
    });

    crate::reflect!(Middle => TypeInfo {
        type_name: "Middle",
        entity: None,
        superclass: Some(<Root as Reflect>::type_info),
        interfaces: &[],
        members: &[],
    });

    crate::reflect!(Leaf => TypeInfo {
        type_name: "Leaf",
        entity: Some(EntityMeta::DEFAULT),
        superclass: Some(<Middle as Reflect>::type_info),
        interfaces: &[],
        members: &[Member::field("color", FieldMeta::DEFAULT)],
    });

    crate::reflect!(Pet => TypeInfo {
        type_name: "Pet",
        entity: Some(EntityMeta::DEFAULT),
        superclass: None,
        interfaces: &[],
        members: &[Member::field("owner", FieldMeta::DEFAULT.kind(ValueKind::Link))],
    });

    crate::reflect!(Sticker => TypeInfo {
        type_name: "Sticker",
        entity: Some(EntityMeta::DEFAULT),
        superclass: None,
        interfaces: &[],
        members: &[Member::field(
            "label",
            FieldMeta::DEFAULT
                .kind(ValueKind::EmbeddedList)
                .target(<Plain as Reflect>::type_info),
        )],
    });

    crate::reflect!(Badge => TypeInfo {
        type_name: "Badge",
        entity: Some(EntityMeta::DEFAULT),
        superclass: Some(<Plain as Reflect>::type_info),
        interfaces: &[<Named as Reflect>::type_info, <Root as Reflect>::type_info],
        members: &[],
    });

    crate::reflect!(Broken => TypeInfo {
        type_name: "Broken",
        entity: Some(EntityMeta::DEFAULT),
        superclass: Some(<Root as Reflect>::type_info),
        interfaces: &[],
        members: &[
            Member::field(
                "address",
                FieldMeta::DEFAULT
                    .kind(ValueKind::Link)
                    .target(<Address as Reflect>::type_info),
            ),
            Member::constant("VERSION", FieldMeta::DEFAULT),
        ],
    });

    crate::reflect!(Invoice => TypeInfo {
        type_name: "Invoice",
        entity: Some(EntityMeta::named("invoice_v2")),
        superclass: None,
        interfaces: &[],
        members: &[Member::field("total", FieldMeta::DEFAULT.kind(ValueKind::Decimal))],
    });

    crate::reflect!(Chicken => TypeInfo {
        type_name: "Chicken",
        entity: Some(EntityMeta::DEFAULT),
        superclass: None,
        interfaces: &[],
        members: &[Member::field(
            "egg",
            FieldMeta::DEFAULT.kind(ValueKind::Link).target(<Egg as Reflect>::type_info),
        )],
    });

    crate::reflect!(Egg => TypeInfo {
        type_name: "Egg",
        entity: Some(EntityMeta::DEFAULT),
        superclass: None,
        interfaces: &[],
        members: &[Member::field(
            "chicken",
            FieldMeta::DEFAULT.kind(ValueKind::Link).target(<Chicken as Reflect>::type_info),
        )],
    });

    crate::reflect!(Untagged => TypeInfo {
        type_name: "Untagged",
        entity: None,
        superclass: None,
        interfaces: &[],
        members: &[Member::field("x", FieldMeta::DEFAULT)],
    });
}
