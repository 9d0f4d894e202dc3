//! IRI vocabulary shared by the renderer backends
//!
//! Entity IRIs come from the knowledge base's canonical entity base; the
//! constraint vocabulary itself lives under the ontology namespace. Both
//! prefixes are system-wide constants, not per-call configuration.

use oxrdf::{NamedNode, NamedNodeRef};

use crate::model::{ItemId, PropertyId};

pub use crate::model::ENTITY_PREFIX;

/// Namespace of the constraint vocabulary.
pub const ONTOLOGY_PREFIX: &str = "http://www.wikidata.org/ontology#";

macro_rules! wo_term {
    ($(#[$doc:meta])* $name:ident, $local:literal) => {
        $(#[$doc])*
        pub const $name: NamedNodeRef<'static> =
            NamedNodeRef::new_unchecked(concat!("http://www.wikidata.org/ontology#", $local));
    };
}

wo_term!(
    /// Links a constraint resource to the property it constrains.
    CONSTRAINED_PROPERTY,
    "constrainedProperty"
);
wo_term!(
    /// Regular-expression pattern of a Format constraint.
    PATTERN,
    "pattern"
);
wo_term!(
    /// Ordered collection of permitted item values.
    ALLOWED_VALUES,
    "allowedValues"
);
wo_term!(
    /// Ordered collection of permitted integer quantities.
    ALLOWED_QUANTITIES,
    "allowedQuantities"
);
wo_term!(
    /// Target property of Inverse / Item / TargetRequiredClaim.
    TARGET_PROPERTY,
    "targetProperty"
);
wo_term!(
    /// Base property of DiffWithinRange.
    BASE_PROPERTY,
    "baseProperty"
);
wo_term!(
    /// Ordered collection of permitted classes (Type / ValueType).
    CLASSES,
    "classes"
);
wo_term!(
    /// Relation flag of Type / ValueType.
    RELATION,
    "relation"
);
wo_term!(MIN_VALUE, "minValue");
wo_term!(MAX_VALUE, "maxValue");
wo_term!(
    /// Links a ConflictsWith constraint to one conflicting claim.
    CONFLICTS_WITH,
    "conflictsWith"
);
wo_term!(
    /// Property of a conflicting-claim node.
    PROPERTY,
    "property"
);
wo_term!(
    /// Ordered collection of permitted qualifier properties.
    QUALIFIER_PROPERTIES,
    "qualifierProperties"
);
wo_term!(
    /// Fixed class the constrained property's values must belong to.
    VALUE_CLASS,
    "valueClass"
);
wo_term!(
    /// Instance-of relation marker / auxiliary property.
    INSTANCE_OF,
    "instanceOf"
);
wo_term!(
    /// Subclass-of relation marker / auxiliary property.
    SUBCLASS_OF,
    "subclassOf"
);
wo_term!(
    /// Class of values that name an existing commons file.
    EXISTING_FILE,
    "ExistingFile"
);
wo_term!(
    /// Annotation carrying the DiffWithinRange bound (not expressible
    /// as an OWL class axiom).
    DIFF_WITHIN_RANGE,
    "diffWithinRange"
);
wo_term!(
    /// Annotation naming one allowed qualifier property.
    ALLOWED_QUALIFIER,
    "allowedQualifier"
);

/// OWL builtins used by both backends.
pub mod owl {
    use oxrdf::NamedNodeRef;

    pub const THING: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Thing");
    pub const NOTHING: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Nothing");
}

/// XSD facet IRIs (oxrdf's xsd vocabulary only covers datatypes).
pub mod xsd_facet {
    pub const PATTERN: &str = "http://www.w3.org/2001/XMLSchema#pattern";
    pub const MIN_INCLUSIVE: &str = "http://www.w3.org/2001/XMLSchema#minInclusive";
    pub const MAX_INCLUSIVE: &str = "http://www.w3.org/2001/XMLSchema#maxInclusive";
}

/// Item id of the class of persons.
pub const PERSON_CLASS: &str = "Q215627";
/// Item id of the class of taxa.
pub const TAXON_CLASS: &str = "Q16521";

/// Class IRI of a constraint kind, e.g. `wo:SingleValueConstraint`.
pub fn constraint_class(slug: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("{ONTOLOGY_PREFIX}{slug}Constraint"))
}

/// Entity node for a property id.
pub fn property_node(property: &PropertyId) -> NamedNode {
    NamedNode::new_unchecked(property.iri())
}

/// Entity node for an item id.
pub fn item_node(item: &ItemId) -> NamedNode {
    NamedNode::new_unchecked(item.iri())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_iris() {
        assert_eq!(
            CONSTRAINED_PROPERTY.as_str(),
            "http://www.wikidata.org/ontology#constrainedProperty"
        );
        assert_eq!(
            constraint_class("SingleValue").as_str(),
            "http://www.wikidata.org/ontology#SingleValueConstraint"
        );
    }

    #[test]
    fn test_entity_nodes() {
        let p = PropertyId::new("P30").unwrap();
        assert_eq!(property_node(&p).as_str(), "http://www.wikidata.org/entity/P30");
    }
}
