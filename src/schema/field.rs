//! Field descriptors: one member's metadata normalized into a canonical form.

use std::fmt;

use crate::entity::{FieldMeta, Member, MemberKind, TypeInfo, TypeRef};

use super::{SchemaError, ValueKind};

/// Conventional accessor prefix stripped from method names.
pub const ACCESSOR_PREFIX: &str = "get";

/// Canonical description of one field.
///
/// Built fresh from metadata on every reconciliation pass and never cached.
/// The target type is recorded as declared; resolving it is left to the
/// type descriptor.
#[derive(Clone)]
pub struct FieldDescriptor {
    name: String,
    kind: ValueKind,
    unique: bool,
    target: Option<TypeRef>,
}

impl FieldDescriptor {
    /// Build a descriptor directly, bypassing member metadata.
    pub fn new(name: impl Into<String>, kind: ValueKind, unique: bool, target: Option<TypeRef>) -> Self {
        Self {
            name: name.into(),
            kind,
            unique,
            target,
        }
    }

    /// Describe `member` of the type named `owner` from its field metadata.
    ///
    /// Name resolution: an explicit name is used verbatim. Otherwise a field
    /// keeps its own name and a method goes through [`accessor_field_name`].
    ///
    /// # Errors
    ///
    /// [`SchemaError::UnsupportedMemberKind`] for members that are neither
    /// fields nor methods.
    pub fn describe(owner: &str, member: &Member, meta: &FieldMeta) -> Result<Self, SchemaError> {
        let default_name = match member.kind {
            MemberKind::Field => member.name.to_string(),
            MemberKind::Method => accessor_field_name(member.name),
            MemberKind::Constant => {
                return Err(SchemaError::UnsupportedMemberKind {
                    owner: owner.to_string(),
                    member: member.name.to_string(),
                    kind: member.kind,
                });
            }
        };

        let name = match meta.name {
            Some(name) => name.to_string(),
            None => default_name,
        };

        Ok(Self::new(name, meta.kind, meta.unique, meta.target))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn is_unique(&self) -> bool {
        self.unique
    }

    /// Whether the value kind needs a target type (link or embedded family).
    pub fn requires_target(&self) -> bool {
        self.kind.requires_target()
    }

    /// The declared target, if any.
    pub fn target(&self) -> Option<TypeRef> {
        self.target
    }

    /// Resolve the declared target's metadata table.
    pub fn target_info(&self) -> Option<&'static TypeInfo> {
        self.target.map(|target| target())
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("unique", &self.unique)
            .field("target", &self.target_info().map(|t| t.type_name))
            .finish()
    }
}

/// Derive a field name from a getter-style method name.
///
/// `getHomeAddress` becomes `homeAddress`. A name that is exactly the prefix,
/// or does not start with it, is returned unchanged.
pub fn accessor_field_name(method: &str) -> String {
    match method.strip_prefix(ACCESSOR_PREFIX) {
        Some(rest) if !rest.is_empty() => {
            let mut chars = rest.chars();
            match chars.next() {
                Some(first) => first.to_lowercase().chain(chars).collect(),
                None => method.to_string(),
            }
        }
        _ => method.to_string(),
    }
}
