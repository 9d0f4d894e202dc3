//! The constraint model: entity identifiers and the closed set of
//! constraint variants.
//!
//! A [`Constraint`] pairs exactly one constrained property with a
//! [`ConstraintKind`]. The kind enum is closed on purpose: renderer
//! backends dispatch on it with exhaustive `match`, so adding a variant
//! forces every backend to handle it.

use thiserror::Error;

/// IRI base under which knowledge-base entities live.
///
/// System-wide constant, not per-call configuration: `P30` becomes
/// `http://www.wikidata.org/entity/P30`.
pub const ENTITY_PREFIX: &str = "http://www.wikidata.org/entity/";

/// Error returned when an identifier string does not have the canonical
/// `P<digits>` / `Q<digits>` shape.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("not a property id: `{0}` (expected P followed by digits)")]
    InvalidProperty(String),

    #[error("not an item id: `{0}` (expected Q followed by digits)")]
    InvalidItem(String),
}

fn has_id_shape(s: &str, initial: char) -> bool {
    let mut chars = s.chars();
    chars.next() == Some(initial) && {
        let rest = chars.as_str();
        !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit())
    }
}

/// A knowledge-base property identifier, e.g. `P30`.
///
/// Uppercased at construction; invalid shapes are rejected eagerly so the
/// parser and renderers never see a malformed id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyId(String);

impl PropertyId {
    pub fn new(id: &str) -> Result<Self, IdError> {
        let normalized = id.trim().to_ascii_uppercase();
        if has_id_shape(&normalized, 'P') {
            Ok(Self(normalized))
        } else {
            Err(IdError::InvalidProperty(id.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Full entity IRI for this property.
    pub fn iri(&self) -> String {
        format!("{}{}", ENTITY_PREFIX, self.0)
    }
}

impl std::fmt::Display for PropertyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A knowledge-base item identifier, e.g. `Q5`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: &str) -> Result<Self, IdError> {
        let normalized = id.trim().to_ascii_uppercase();
        if has_id_shape(&normalized, 'Q') {
            Ok(Self(normalized))
        } else {
            Err(IdError::InvalidItem(id.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Full entity IRI for this item.
    pub fn iri(&self) -> String {
        format!("{}{}", ENTITY_PREFIX, self.0)
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A property paired with an optional restriction on its values.
///
/// The three states carry distinct meaning and must never be collapsed:
/// - `values: None` — any value of this property is relevant,
/// - `values: Some(vec![])` — no value matches,
/// - `values: Some([...])` — only the listed items match.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyValues {
    pub property: PropertyId,
    pub values: Option<Vec<ItemId>>,
}

impl PropertyValues {
    /// A property with no restriction on its values.
    pub fn any(property: PropertyId) -> Self {
        Self {
            property,
            values: None,
        }
    }

    /// A property restricted to the given values (possibly none at all).
    pub fn restricted(property: PropertyId, values: Vec<ItemId>) -> Self {
        Self {
            property,
            values: Some(values),
        }
    }
}

/// One bound of a range constraint: a number, or the `now` sentinel used
/// by date ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeEndpoint {
    Number(f64),
    Now,
}

/// Relation flag of the Type / ValueType constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Instance,
    Subclass,
}

/// Permitted values of a OneOf constraint: item references, or exact
/// integer quantities.
#[derive(Debug, Clone, PartialEq)]
pub enum OneOfValues {
    Items(Vec<ItemId>),
    Quantities(Vec<i64>),
}

/// The closed set of constraint variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintKind {
    /// The property has at most one value per entity.
    SingleValue,
    /// No two entities share a value of the property.
    UniqueValue,
    /// String values match a regular-expression pattern.
    Format { pattern: String },
    /// Values come from a fixed, ordered list.
    OneOf { values: OneOfValues },
    /// The property is its own inverse.
    Symmetric,
    /// The property is the inverse of another property.
    Inverse { property: PropertyId },
    /// Values name an existing commons file.
    ExistingFile,
    /// The value entity must carry a claim for `property`, optionally
    /// restricted to `items`.
    TargetRequiredClaim {
        property: PropertyId,
        items: Option<Vec<ItemId>>,
    },
    /// The subject entity must carry a claim for `property`, optionally
    /// restricted to `items`.
    Item {
        property: PropertyId,
        items: Option<Vec<ItemId>>,
    },
    /// The subject entity is an instance/subclass of one of `classes`.
    Type {
        classes: Vec<ItemId>,
        relation: Relation,
    },
    /// The value entity is an instance/subclass of one of `classes`.
    ValueType {
        classes: Vec<ItemId>,
        relation: Relation,
    },
    /// Values fall between two bounds.
    Range {
        min: RangeEndpoint,
        max: RangeEndpoint,
    },
    /// The difference between this property's value and the base
    /// property's value falls between two bounds.
    DiffWithinRange {
        base_property: PropertyId,
        min: RangeEndpoint,
        max: RangeEndpoint,
    },
    /// The property normally carries more than one value.
    MultiValue,
    /// The subject must not carry any of the listed claims.
    ConflictsWith { list: Vec<PropertyValues> },
    /// Statements of this property may only use the listed qualifiers.
    Qualifiers { properties: Vec<PropertyId> },
    /// The property may only be used as a qualifier.
    Qualifier,
    /// The value is a person.
    Person,
    /// The value is a taxon.
    Taxon,
}

impl ConstraintKind {
    /// Stable CamelCase slug, used to key constraint resource IRIs.
    pub fn slug(&self) -> &'static str {
        match self {
            ConstraintKind::SingleValue => "SingleValue",
            ConstraintKind::UniqueValue => "UniqueValue",
            ConstraintKind::Format { .. } => "Format",
            ConstraintKind::OneOf { .. } => "OneOf",
            ConstraintKind::Symmetric => "Symmetric",
            ConstraintKind::Inverse { .. } => "Inverse",
            ConstraintKind::ExistingFile => "ExistingFile",
            ConstraintKind::TargetRequiredClaim { .. } => "TargetRequiredClaim",
            ConstraintKind::Item { .. } => "Item",
            ConstraintKind::Type { .. } => "Type",
            ConstraintKind::ValueType { .. } => "ValueType",
            ConstraintKind::Range { .. } => "Range",
            ConstraintKind::DiffWithinRange { .. } => "DiffWithinRange",
            ConstraintKind::MultiValue => "MultiValue",
            ConstraintKind::ConflictsWith { .. } => "ConflictsWith",
            ConstraintKind::Qualifiers { .. } => "Qualifiers",
            ConstraintKind::Qualifier => "Qualifier",
            ConstraintKind::Person => "Person",
            ConstraintKind::Taxon => "Taxon",
        }
    }
}

/// A parsed constraint declaration: one constrained property plus the
/// variant-specific payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    property: PropertyId,
    kind: ConstraintKind,
}

impl Constraint {
    pub fn new(property: PropertyId, kind: ConstraintKind) -> Self {
        Self { property, kind }
    }

    /// The property this constraint applies to.
    pub fn property(&self) -> &PropertyId {
        &self.property
    }

    pub fn kind(&self) -> &ConstraintKind {
        &self.kind
    }

    /// IRI of the constraint resource itself, keyed by kind and property.
    pub fn resource_iri(&self) -> String {
        format!("{}{}-{}", ENTITY_PREFIX, self.kind.slug(), self.property)
    }
}
