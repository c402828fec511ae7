//! Entry points for external callers.
//!
//! Class creation and field configuration are separate steps: a caller may
//! create a whole ancestry of bare classes before configuring any of them.

use crate::entity::{Reflect, TypeInfo};

use super::{SchemaClass, SchemaEngine, SchemaError, TypeDescriptor};

fn entity_descriptor(info: &'static TypeInfo) -> Result<TypeDescriptor, SchemaError> {
    let descriptor = TypeDescriptor::new(info);
    if !descriptor.is_schema_backed() {
        return Err(SchemaError::InvalidType {
            type_name: info.type_name.to_string(),
            reason: "the type must carry the entity marker to have a schema class".to_string(),
        });
    }
    Ok(descriptor)
}

/// Fetch the class for `info`, optionally creating it (and its ancestry).
///
/// With `create_if_missing == false` this is a pure lookup.
///
/// # Errors
///
/// [`SchemaError::InvalidType`] if the type is not schema-backed.
pub fn ensure_type_info(
    info: &'static TypeInfo,
    schema: &dyn SchemaEngine,
    create_if_missing: bool,
) -> Result<Option<SchemaClass>, SchemaError> {
    let descriptor = entity_descriptor(info)?;
    match schema.lookup_class(descriptor.canonical_name())? {
        Some(class) => Ok(Some(class)),
        None if create_if_missing => descriptor.create_in_schema(schema).map(Some),
        None => Ok(None),
    }
}

/// Typed form of [`ensure_type_info`].
pub fn ensure_type<T: Reflect>(
    schema: &dyn SchemaEngine,
    create_if_missing: bool,
) -> Result<Option<SchemaClass>, SchemaError> {
    ensure_type_info(T::type_info(), schema, create_if_missing)
}

/// Configure the properties and unique indexes of `T`'s existing class.
///
/// Never creates the class.
///
/// # Errors
///
/// [`SchemaError::InvalidType`] if `T` is not schema-backed or its class does
/// not exist yet.
pub fn configure_base_fields<T: Reflect>(schema: &dyn SchemaEngine) -> Result<SchemaClass, SchemaError> {
    let info = T::type_info();
    let class = ensure_type_info(info, schema, false)?.ok_or_else(|| SchemaError::InvalidType {
        type_name: info.type_name.to_string(),
        reason: "type not found in schema; create the type before configuring it".to_string(),
    })?;
    configure_class_fields::<T>(&class, schema)?;
    Ok(class)
}

/// Configure `T`'s fields on a class the caller already holds.
pub fn configure_class_fields<T: Reflect>(
    class: &SchemaClass,
    schema: &dyn SchemaEngine,
) -> Result<(), SchemaError> {
    TypeDescriptor::of::<T>().configure_fields(class, schema)
}

/// Create `T`'s class with its ancestry if needed, then configure `T`'s own
/// fields on it. Ancestor classes are created bare.
pub fn sync_type<T: Reflect>(schema: &dyn SchemaEngine) -> Result<SchemaClass, SchemaError> {
    let class = ensure_type::<T>(schema, true)?.ok_or_else(|| SchemaError::ClassNotFound {
        name: TypeDescriptor::of::<T>().canonical_name().to_string(),
    })?;
    configure_class_fields::<T>(&class, schema)?;
    Ok(class)
}
