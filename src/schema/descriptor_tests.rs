//! Tests for type descriptors: naming, field collection, ancestry discovery
//! and idempotent creation.

use rstest::rstest;

use super::*;
use crate::entity::{MemberKind, Reflect, TypeRef};
use crate::test_utils::model::*;
use crate::test_utils::{parent_names, property_names, CountingSchema};

fn parent_type_names(info: TypeRef) -> Vec<&'static str> {
    TypeDescriptor::new(info())
        .find_parent_types()
        .iter()
        .map(|parent| parent.type_name())
        .collect()
}

// =============================================================================
// Naming and field collection
// =============================================================================

#[rstest]
#[case(<Person as Reflect>::type_info, "Person")]
#[case(<Invoice as Reflect>::type_info, "invoice_v2")]
#[case(<Untagged as Reflect>::type_info, "Untagged")]
fn test_canonical_name(#[case] info: TypeRef, #[case] expected: &str) {
    assert_eq!(TypeDescriptor::new(info()).canonical_name(), expected);
}

#[test]
fn test_descriptor_equality_is_by_type() {
    assert_eq!(TypeDescriptor::of::<Person>(), TypeDescriptor::new(Person::type_info()));
    assert_ne!(TypeDescriptor::of::<Person>(), TypeDescriptor::of::<Employee>());
}

#[test]
fn test_collect_fields_methods_before_fields() {
    let fields = TypeDescriptor::of::<Person>().collect_fields().unwrap();
    let names: Vec<_> = fields.iter().map(|f| f.name()).collect();
    assert_eq!(names, vec!["email", "homeAddress", "age"]);

    assert!(fields[0].is_unique());
    assert_eq!(fields[1].kind(), ValueKind::Link);
    assert!(fields[1].requires_target());
    assert_eq!(fields[1].target_info().map(|t| t.type_name), Some("Address"));
    assert_eq!(fields[2].kind(), ValueKind::Integer);
}

#[test]
fn test_collect_fields_fails_on_annotated_constant() {
    let err = TypeDescriptor::of::<Broken>().collect_fields().unwrap_err();
    match err {
        SchemaError::UnsupportedMemberKind { owner, member, kind } => {
            assert_eq!(owner, "Broken");
            assert_eq!(member, "VERSION");
            assert_eq!(kind, MemberKind::Constant);
        }
        other => panic!("Expected UnsupportedMemberKind, got {:?}", other),
    }
}

// =============================================================================
// Ancestry discovery
// =============================================================================

#[rstest]
#[case::interface_and_link_target(<Person as Reflect>::type_info, &["Named", "Address"])]
#[case::superclass_then_interface(<Employee as Reflect>::type_info, &["Person", "Named"])]
#[case::interfaces_over_plain_superclass(<Badge as Reflect>::type_info, &["Named", "Root"])]
#[case::non_entity_superclass_is_a_gap(<Leaf as Reflect>::type_info, &[])]
#[case::non_entity_sees_entity_parent(<Middle as Reflect>::type_info, &["Root"])]
#[case::link_without_target(<Pet as Reflect>::type_info, &[])]
#[case::link_to_non_entity(<Sticker as Reflect>::type_info, &[])]
#[case::broken_fields_keep_superclass(<Broken as Reflect>::type_info, &["Root"])]
#[case::no_parents(<Untagged as Reflect>::type_info, &[])]
fn test_find_parent_types(#[case] info: TypeRef, #[case] expected: &[&str]) {
    assert_eq!(parent_type_names(info), expected);
}

#[test]
fn test_find_parent_types_only_direct_parents() {
    // Named is reached through Person and directly; Address only through Person.
    let parents = parent_type_names(<Employee as Reflect>::type_info);
    assert!(!parents.contains(&"Address"));
}

// =============================================================================
// Class creation
// =============================================================================

schema_test! {
    fn test_create_in_schema_builds_ancestry(schema) {
        let class = TypeDescriptor::of::<Employee>().create_in_schema(schema).unwrap();

        assert_eq!(class.name, "Employee");
        assert_eq!(class.parents, vec!["Person".to_string(), "Named".to_string()]);
        assert_eq!(parent_names(schema, "Person"), vec!["Named".to_string(), "Address".to_string()]);
        assert!(parent_names(schema, "Named").is_empty());

        let names: Vec<_> = schema.list_classes().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Address", "Employee", "Named", "Person"]);
    }
}

schema_test! {
    fn test_create_in_schema_second_run_is_read_only(schema) {
        let first = TypeDescriptor::of::<Employee>().create_in_schema(schema).unwrap();

        let counting = CountingSchema::new(schema);
        let second = TypeDescriptor::of::<Employee>().create_in_schema(&counting).unwrap();

        assert_eq!(first, second);
        assert_eq!(counting.mutation_count(), 0);
    }
}

schema_test! {
    fn test_create_in_schema_diamond_creates_shared_ancestor_once(schema) {
        let counting = CountingSchema::new(schema);
        TypeDescriptor::of::<Employee>().create_in_schema(&counting).unwrap();
        assert_eq!(counting.mutation_count(), 4);
    }
}

schema_test! {
    fn test_existing_class_is_not_reparented(schema) {
        schema.create_class("Person", &[]).unwrap();

        let class = TypeDescriptor::of::<Person>().create_in_schema(schema).unwrap();

        assert!(class.parents.is_empty());
        assert!(schema.lookup_class("Named").unwrap().is_none());
    }
}

schema_test! {
    fn test_ancestry_gap_skips_hidden_ancestor(schema) {
        let class = TypeDescriptor::of::<Leaf>().create_in_schema(schema).unwrap();

        assert!(class.parents.is_empty());
        assert!(schema.lookup_class("Root").unwrap().is_none());
    }
}

schema_test! {
    fn test_renamed_entity_uses_override(schema) {
        let class = TypeDescriptor::of::<Invoice>().create_in_schema(schema).unwrap();
        assert_eq!(class.name, "invoice_v2");
        assert!(schema.lookup_class("Invoice").unwrap().is_none());
    }
}

schema_test! {
    fn test_cyclic_ancestry_is_rejected(schema) {
        let err = TypeDescriptor::of::<Chicken>().create_in_schema(schema).unwrap_err();
        match err {
            SchemaError::AncestryCycle { path } => {
                assert_eq!(path, vec!["Chicken", "Egg", "Chicken"]);
            }
            other => panic!("Expected AncestryCycle, got {:?}", other),
        }
        assert!(schema.list_classes().unwrap().is_empty());
    }
}

// =============================================================================
// Field configuration
// =============================================================================

schema_test! {
    fn test_configure_fields_creates_properties_and_unique_indexes(schema) {
        let descriptor = TypeDescriptor::of::<Person>();
        let class = descriptor.create_in_schema(schema).unwrap();
        descriptor.configure_fields(&class, schema).unwrap();

        assert_eq!(property_names(schema, "Person"), vec!["age", "email", "homeAddress"]);
        assert_eq!(
            schema.get_property(&class, "homeAddress").unwrap().unwrap().kind,
            ValueKind::Link
        );

        let indexes = schema.get_indexes(&class).unwrap();
        assert_eq!(indexes.len(), 1);
        assert_eq!(indexes[0].name, "email");
        assert_eq!(indexes[0].fields, vec!["email".to_string()]);
        assert_eq!(indexes[0].index_type, IndexType::Unique);

        // Parents are created bare.
        assert!(property_names(schema, "Named").is_empty());
    }
}

schema_test! {
    fn test_configure_fields_second_run_is_read_only(schema) {
        let descriptor = TypeDescriptor::of::<Person>();
        let class = descriptor.create_in_schema(schema).unwrap();
        descriptor.configure_fields(&class, schema).unwrap();

        let counting = CountingSchema::new(schema);
        descriptor.configure_fields(&class, &counting).unwrap();
        assert_eq!(counting.mutation_count(), 0);
    }
}

schema_test! {
    fn test_configure_fields_keeps_existing_property(schema) {
        let descriptor = TypeDescriptor::of::<Person>();
        let class = descriptor.create_in_schema(schema).unwrap();
        schema.create_property(&class, "age", ValueKind::Long).unwrap();
        schema.create_unique_index(&class, "email", "email").unwrap();

        descriptor.configure_fields(&class, schema).unwrap();

        assert_eq!(schema.get_property(&class, "age").unwrap().unwrap().kind, ValueKind::Long);
        assert_eq!(schema.get_indexes(&class).unwrap().len(), 1);
    }
}

schema_test! {
    fn test_link_without_target_still_gets_property(schema) {
        let descriptor = TypeDescriptor::of::<Pet>();
        let class = descriptor.create_in_schema(schema).unwrap();
        descriptor.configure_fields(&class, schema).unwrap();

        assert_eq!(schema.get_property(&class, "owner").unwrap().unwrap().kind, ValueKind::Link);
    }
}

schema_test! {
    fn test_unparseable_fields_are_skipped(schema) {
        let descriptor = TypeDescriptor::of::<Broken>();
        let class = descriptor.create_in_schema(schema).unwrap();
        assert_eq!(class.parents, vec!["Root".to_string()]);

        descriptor.configure_fields(&class, schema).unwrap();
        assert!(property_names(schema, "Broken").is_empty());
    }
}

schema_test! {
    fn test_has_index_is_scoped_to_class(schema) {
        let person = TypeDescriptor::of::<Person>();
        let class = person.create_in_schema(schema).unwrap();
        let named = schema.lookup_class("Named").unwrap().unwrap();

        assert!(!person.has_index("email", &class, schema).unwrap());
        person.configure_fields(&class, schema).unwrap();
        assert!(person.has_index("email", &class, schema).unwrap());
        assert!(!person.has_index("email", &named, schema).unwrap());
        assert!(!person.has_index("age", &class, schema).unwrap());
    }
}
