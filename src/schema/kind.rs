//! Database value kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::SchemaError;

/// The value kind of a schema property.
///
/// Link kinds reference records of another class; embedded kinds contain
/// them by value. Both families need a target type (see
/// [`ValueKind::requires_target`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValueKind {
    Boolean,
    Integer,
    Short,
    Long,
    Float,
    Double,
    DateTime,
    #[default]
    String,
    Binary,
    Embedded,
    EmbeddedList,
    EmbeddedSet,
    EmbeddedMap,
    Link,
    LinkList,
    LinkSet,
    LinkMap,
    Byte,
    Transient,
    Date,
    Custom,
    Decimal,
    LinkBag,
    Any,
}

impl ValueKind {
    pub const ALL: &'static [ValueKind] = &[
        ValueKind::Boolean,
        ValueKind::Integer,
        ValueKind::Short,
        ValueKind::Long,
        ValueKind::Float,
        ValueKind::Double,
        ValueKind::DateTime,
        ValueKind::String,
        ValueKind::Binary,
        ValueKind::Embedded,
        ValueKind::EmbeddedList,
        ValueKind::EmbeddedSet,
        ValueKind::EmbeddedMap,
        ValueKind::Link,
        ValueKind::LinkList,
        ValueKind::LinkSet,
        ValueKind::LinkMap,
        ValueKind::Byte,
        ValueKind::Transient,
        ValueKind::Date,
        ValueKind::Custom,
        ValueKind::Decimal,
        ValueKind::LinkBag,
        ValueKind::Any,
    ];

    /// Whether a property of this kind must declare a target type.
    pub const fn requires_target(&self) -> bool {
        matches!(
            self,
            ValueKind::Link
                | ValueKind::LinkBag
                | ValueKind::LinkList
                | ValueKind::LinkMap
                | ValueKind::LinkSet
                | ValueKind::Embedded
                | ValueKind::EmbeddedList
                | ValueKind::EmbeddedMap
                | ValueKind::EmbeddedSet
        )
    }

    /// Returns the stored name of this kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Boolean => "BOOLEAN",
            ValueKind::Integer => "INTEGER",
            ValueKind::Short => "SHORT",
            ValueKind::Long => "LONG",
            ValueKind::Float => "FLOAT",
            ValueKind::Double => "DOUBLE",
            ValueKind::DateTime => "DATETIME",
            ValueKind::String => "STRING",
            ValueKind::Binary => "BINARY",
            ValueKind::Embedded => "EMBEDDED",
            ValueKind::EmbeddedList => "EMBEDDEDLIST",
            ValueKind::EmbeddedSet => "EMBEDDEDSET",
            ValueKind::EmbeddedMap => "EMBEDDEDMAP",
            ValueKind::Link => "LINK",
            ValueKind::LinkList => "LINKLIST",
            ValueKind::LinkSet => "LINKSET",
            ValueKind::LinkMap => "LINKMAP",
            ValueKind::Byte => "BYTE",
            ValueKind::Transient => "TRANSIENT",
            ValueKind::Date => "DATE",
            ValueKind::Custom => "CUSTOM",
            ValueKind::Decimal => "DECIMAL",
            ValueKind::LinkBag => "LINKBAG",
            ValueKind::Any => "ANY",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueKind {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ValueKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| SchemaError::UnknownValueKind {
                name: s.to_string(),
            })
    }
}
