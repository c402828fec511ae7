//! Type descriptors: ancestry resolution and idempotent schema creation.

use std::fmt;

use tracing::{debug, warn};

use crate::entity::{MemberKind, Reflect, TypeInfo};

use super::{FieldDescriptor, SchemaClass, SchemaEngine, SchemaError};

/// Schema view of one entity type.
///
/// Descriptors are cheap and transient: a fresh one is made for every
/// reconciliation call and nothing it computes is cached.
#[derive(Clone, Copy)]
pub struct TypeDescriptor {
    info: &'static TypeInfo,
}

impl TypeDescriptor {
    pub fn new(info: &'static TypeInfo) -> Self {
        Self { info }
    }

    pub fn of<T: Reflect>() -> Self {
        Self::new(T::type_info())
    }

    pub fn info(&self) -> &'static TypeInfo {
        self.info
    }

    pub fn type_name(&self) -> &'static str {
        self.info.type_name
    }

    /// True iff the type carries the entity marker.
    pub fn is_schema_backed(&self) -> bool {
        self.info.is_schema_backed()
    }

    /// The class name: the marker's override, or the bare type name.
    pub fn canonical_name(&self) -> &'static str {
        self.info
            .entity
            .and_then(|entity| entity.name)
            .unwrap_or(self.info.type_name)
    }

    /// Field descriptors of the directly declared annotated members: all
    /// methods first, then all fields, each in declaration order.
    ///
    /// Fails as a whole on the first unsupported member.
    pub fn collect_fields(&self) -> Result<Vec<FieldDescriptor>, SchemaError> {
        let mut fields = Vec::new();
        self.collect_members(MemberKind::Method, &mut fields)?;
        self.collect_members(MemberKind::Field, &mut fields)?;
        self.collect_remaining(&mut fields)?;
        Ok(fields)
    }

    fn collect_members(
        &self,
        kind: MemberKind,
        fields: &mut Vec<FieldDescriptor>,
    ) -> Result<(), SchemaError> {
        for member in self.info.annotated(kind) {
            if let Some(meta) = &member.field {
                fields.push(FieldDescriptor::describe(self.type_name(), member, meta)?);
            }
        }
        Ok(())
    }

    // Annotated members of any other kind; describing them always fails.
    fn collect_remaining(&self, fields: &mut Vec<FieldDescriptor>) -> Result<(), SchemaError> {
        for member in self.info.members.iter().filter(|m| {
            m.field.is_some() && !matches!(m.kind, MemberKind::Method | MemberKind::Field)
        }) {
            if let Some(meta) = &member.field {
                fields.push(FieldDescriptor::describe(self.type_name(), member, meta)?);
            }
        }
        Ok(())
    }

    /// Direct schema-backed parents, in order: the superclass, then each
    /// interface, then the target of each link or embedded field.
    ///
    /// Only direct references count. A parent that is not schema-backed is a
    /// gap: nothing behind it is considered. A link or embedded field whose
    /// target is missing or not schema-backed is logged and skipped, as are
    /// all field targets when the fields cannot be collected. Duplicates are
    /// dropped, keeping the first occurrence.
    pub fn find_parent_types(&self) -> Vec<TypeDescriptor> {
        let mut parents: Vec<TypeDescriptor> = Vec::new();
        let mut push = |parent: TypeDescriptor| {
            if parent.is_schema_backed() && !parents.contains(&parent) {
                parents.push(parent);
            }
        };

        if let Some(superclass) = self.info.superclass {
            push(TypeDescriptor::new(superclass()));
        }
        for interface in self.info.interfaces {
            push(TypeDescriptor::new(interface()));
        }

        match self.collect_fields() {
            Ok(fields) => {
                for field in fields.iter().filter(|f| f.requires_target()) {
                    match field.target_info().map(TypeDescriptor::new) {
                        Some(target) if target.is_schema_backed() => push(target),
                        Some(target) => warn!(
                            type_name = self.type_name(),
                            field = field.name(),
                            target = target.type_name(),
                            "link target is not an entity type; parent skipped"
                        ),
                        None => warn!(
                            type_name = self.type_name(),
                            field = field.name(),
                            kind = %field.kind(),
                            "link field declares no target; parent skipped"
                        ),
                    }
                }
            }
            Err(e) => warn!(
                type_name = self.type_name(),
                error = %e,
                "unable to collect fields; field target parents skipped"
            ),
        }

        parents
    }

    /// Return this type's class, creating it and any missing ancestors first.
    ///
    /// An existing class is returned as is, whatever its parents. Otherwise
    /// parents are created depth-first before this class. Shared ancestors
    /// are found by name on the second visit; a type that is its own ancestor
    /// fails with [`SchemaError::AncestryCycle`].
    pub fn create_in_schema(&self, schema: &dyn SchemaEngine) -> Result<SchemaClass, SchemaError> {
        let mut path = Vec::new();
        self.create_with_path(schema, &mut path)
    }

    fn create_with_path(
        &self,
        schema: &dyn SchemaEngine,
        path: &mut Vec<&'static str>,
    ) -> Result<SchemaClass, SchemaError> {
        let name = self.canonical_name();
        if let Some(class) = schema.lookup_class(name)? {
            return Ok(class);
        }

        if path.contains(&name) {
            let mut cycle: Vec<String> = path.iter().map(|s| s.to_string()).collect();
            cycle.push(name.to_string());
            return Err(SchemaError::AncestryCycle { path: cycle });
        }

        path.push(name);
        let mut parent_classes = Vec::new();
        for parent in self.find_parent_types() {
            parent_classes.push(parent.create_with_path(schema, path)?);
        }
        path.pop();

        // A shared ancestor may have been created on the way back up.
        if let Some(class) = schema.lookup_class(name)? {
            return Ok(class);
        }

        debug!(
            class = name,
            parents = ?parent_classes.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            backend = schema.backend_name(),
            "creating class"
        );
        schema.create_class(name, &parent_classes)
    }

    /// Add the missing properties and unique indexes of this type to `class`.
    ///
    /// Existing properties and indexes are left untouched. If the fields
    /// cannot be collected the whole field set is skipped with a warning.
    pub fn configure_fields(
        &self,
        class: &SchemaClass,
        schema: &dyn SchemaEngine,
    ) -> Result<(), SchemaError> {
        let fields = match self.collect_fields() {
            Ok(fields) => fields,
            Err(e) => {
                warn!(
                    type_name = self.type_name(),
                    class = %class.name,
                    error = %e,
                    "cannot parse field metadata; fields skipped"
                );
                return Ok(());
            }
        };

        for field in &fields {
            if schema.get_property(class, field.name())?.is_none() {
                debug!(class = %class.name, property = field.name(), kind = %field.kind(), "creating property");
                schema.create_property(class, field.name(), field.kind())?;
            }
            if field.is_unique() && !self.has_index(field.name(), class, schema)? {
                debug!(class = %class.name, index = field.name(), "creating unique index");
                schema.create_unique_index(class, field.name(), field.name())?;
            }
        }

        Ok(())
    }

    /// Whether `class` has an index named exactly `index_name`.
    pub fn has_index(
        &self,
        index_name: &str,
        class: &SchemaClass,
        schema: &dyn SchemaEngine,
    ) -> Result<bool, SchemaError> {
        Ok(schema
            .get_indexes(class)?
            .iter()
            .any(|index| index.name == index_name))
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.info, other.info)
    }
}

impl Eq for TypeDescriptor {}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("type_name", &self.type_name())
            .field("canonical_name", &self.canonical_name())
            .field("schema_backed", &self.is_schema_backed())
            .finish()
    }
}
