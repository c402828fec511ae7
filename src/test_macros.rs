//! Declarative macros for generating schema backend tests.
//!
//! Reconciliation must behave the same on every [`SchemaEngine`] backend.
//! Instead of writing one test per backend, declare the test body once and
//! let the macro generate an rstest case per backend.
//!
//! [`SchemaEngine`]: crate::schema::SchemaEngine

/// Generate a test that runs its body against every schema backend.
///
/// ```ignore
/// schema_test! {
///     fn test_creates_class(schema) {
///         ensure_type::<Person>(schema, true).unwrap();
///         assert!(schema.lookup_class("Person").unwrap().is_some());
///     }
/// }
/// ```
#[macro_export]
macro_rules! schema_test {
    ($(#[$meta:meta])* fn $name:ident($schema:ident) $body:block) => {
        $(#[$meta])*
        #[rstest::rstest]
        #[case::memory($crate::test_utils::Backend::Memory)]
        #[case::cozo($crate::test_utils::Backend::Cozo)]
        fn $name(#[case] backend: $crate::test_utils::Backend) {
            let engine = backend.open();
            let $schema: &dyn $crate::schema::SchemaEngine = engine.as_ref();
            $body
        }
    };
}
