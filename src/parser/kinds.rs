//! One parsing strategy per constraint kind
//!
//! Every parser reads named parameters from the template by documented
//! key. A missing required parameter means the template is some other,
//! unsupported form of the same constraint family: the parser answers
//! `Ok(None)`. A malformed value inside a present parameter is a
//! reported error.

use crate::error::ConstraintParseError;
use crate::model::{ConstraintKind, ItemId, OneOfValues, PropertyId, Relation};
use crate::template::{Parameter, Template};

use super::values::{
    parse_item_list, parse_property_id, parse_property_id_list, parse_property_values_list,
    parse_quantity_list, parse_range_endpoint, remove_brackets, ParamContext,
};

/// Parsing strategy for one constraint kind.
pub(crate) type KindParser = fn(&Template) -> Result<Option<ConstraintKind>, ConstraintParseError>;

type ParseResult = Result<Option<ConstraintKind>, ConstraintParseError>;

fn ctx<'a>(template: &'a Template, key: &'a str, param: &'a Parameter) -> ParamContext<'a> {
    ParamContext {
        template: template.name(),
        parameter: key,
        span: param.span.clone(),
    }
}

/// Look up `keys` in order, returning the first present parameter.
fn first_named<'a>(
    template: &'a Template,
    keys: &[&'static str],
) -> Option<(&'static str, &'a Parameter)> {
    keys.iter()
        .find_map(|key| template.named(key).map(|param| (*key, param)))
}

pub(crate) fn single_value(_template: &Template) -> ParseResult {
    Ok(Some(ConstraintKind::SingleValue))
}

pub(crate) fn unique_value(_template: &Template) -> ParseResult {
    Ok(Some(ConstraintKind::UniqueValue))
}

pub(crate) fn format(template: &Template) -> ParseResult {
    let Some(param) = template.named("pattern") else {
        return Ok(None);
    };
    Ok(Some(ConstraintKind::Format {
        pattern: param.value.clone(),
    }))
}

pub(crate) fn one_of(template: &Template) -> ParseResult {
    let Some(param) = template.named("values") else {
        return Ok(None);
    };
    let ctx = ctx(template, "values", param);
    let stripped = remove_brackets(&param.value);
    let first_token = stripped.split(',').map(str::trim).find(|t| !t.is_empty());
    let values = match first_token {
        None => OneOfValues::Items(Vec::new()),
        Some(token) if token.starts_with('Q') || token.starts_with('q') => {
            OneOfValues::Items(parse_item_list(&param.value, &ctx)?)
        }
        // Quantity lists take the raw value: brackets are not legal there.
        Some(_) => OneOfValues::Quantities(parse_quantity_list(&param.value, &ctx)?),
    };
    Ok(Some(ConstraintKind::OneOf { values }))
}

pub(crate) fn symmetric(_template: &Template) -> ParseResult {
    Ok(Some(ConstraintKind::Symmetric))
}

pub(crate) fn inverse(template: &Template) -> ParseResult {
    let Some(param) = template.named("property") else {
        return Ok(None);
    };
    let property = parse_property_id(&param.value, &ctx(template, "property", param))?;
    Ok(Some(ConstraintKind::Inverse { property }))
}

pub(crate) fn existing_file(_template: &Template) -> ParseResult {
    Ok(Some(ConstraintKind::ExistingFile))
}

pub(crate) fn target_required_claim(template: &Template) -> ParseResult {
    let Some((property, items)) = parse_claim_parameters(template)? else {
        return Ok(None);
    };
    Ok(Some(ConstraintKind::TargetRequiredClaim { property, items }))
}

pub(crate) fn item(template: &Template) -> ParseResult {
    let Some((property, items)) = parse_claim_parameters(template)? else {
        return Ok(None);
    };
    Ok(Some(ConstraintKind::Item { property, items }))
}

/// Shared form of the Item / TargetRequiredClaim parameter set:
/// a required `property` and an optional `items` (or single `item`) list.
fn parse_claim_parameters(
    template: &Template,
) -> Result<Option<(PropertyId, Option<Vec<ItemId>>)>, ConstraintParseError> {
    let Some(param) = template.named("property") else {
        return Ok(None);
    };
    let property = parse_property_id(&param.value, &ctx(template, "property", param))?;
    let items = match first_named(template, &["items", "item"]) {
        Some((key, param)) => Some(parse_item_list(&param.value, &ctx(template, key, param))?),
        None => None,
    };
    Ok(Some((property, items)))
}

pub(crate) fn type_(template: &Template) -> ParseResult {
    let Some((classes, relation)) = parse_class_parameters(template)? else {
        return Ok(None);
    };
    Ok(Some(ConstraintKind::Type { classes, relation }))
}

pub(crate) fn value_type(template: &Template) -> ParseResult {
    let Some((classes, relation)) = parse_class_parameters(template)? else {
        return Ok(None);
    };
    Ok(Some(ConstraintKind::ValueType { classes, relation }))
}

/// Shared form of the Type / ValueType parameter set: a required
/// `classes` (or single `class`) list and an optional `relation` flag.
fn parse_class_parameters(
    template: &Template,
) -> Result<Option<(Vec<ItemId>, Relation)>, ConstraintParseError> {
    let Some((key, param)) = first_named(template, &["classes", "class"]) else {
        return Ok(None);
    };
    let classes = parse_item_list(&param.value, &ctx(template, key, param))?;
    let relation = match template.named("relation") {
        None => Relation::Instance,
        Some(param) => {
            let token = remove_brackets(&param.value).trim().to_ascii_lowercase();
            match token.as_str() {
                "" | "instance" => Relation::Instance,
                "subclass" => Relation::Subclass,
                _ => {
                    return Err(ConstraintParseError::InvalidRelation {
                        template: template.name().to_string(),
                        parameter: "relation".to_string(),
                        token,
                        span: param.span.clone(),
                    })
                }
            }
        }
    };
    Ok(Some((classes, relation)))
}

pub(crate) fn range(template: &Template) -> ParseResult {
    let (Some(min_param), Some(max_param)) = (template.named("min"), template.named("max")) else {
        return Ok(None);
    };
    let min = parse_range_endpoint(&min_param.value, &ctx(template, "min", min_param))?;
    let max = parse_range_endpoint(&max_param.value, &ctx(template, "max", max_param))?;
    Ok(Some(ConstraintKind::Range { min, max }))
}

pub(crate) fn diff_within_range(template: &Template) -> ParseResult {
    let Some(base_param) = template.named("base_property") else {
        return Ok(None);
    };
    let (Some(min_param), Some(max_param)) = (template.named("min"), template.named("max")) else {
        return Ok(None);
    };
    let base_property =
        parse_property_id(&base_param.value, &ctx(template, "base_property", base_param))?;
    let min = parse_range_endpoint(&min_param.value, &ctx(template, "min", min_param))?;
    let max = parse_range_endpoint(&max_param.value, &ctx(template, "max", max_param))?;
    Ok(Some(ConstraintKind::DiffWithinRange {
        base_property,
        min,
        max,
    }))
}

pub(crate) fn multi_value(_template: &Template) -> ParseResult {
    Ok(Some(ConstraintKind::MultiValue))
}

pub(crate) fn conflicts_with(template: &Template) -> ParseResult {
    let Some(param) = template.named("list") else {
        return Ok(None);
    };
    let list = parse_property_values_list(&param.value, &ctx(template, "list", param))?;
    Ok(Some(ConstraintKind::ConflictsWith { list }))
}

pub(crate) fn qualifiers(template: &Template) -> ParseResult {
    let Some(param) = template.named("list") else {
        return Ok(None);
    };
    let properties = parse_property_id_list(&param.value, &ctx(template, "list", param))?;
    Ok(Some(ConstraintKind::Qualifiers { properties }))
}

pub(crate) fn qualifier(_template: &Template) -> ParseResult {
    Ok(Some(ConstraintKind::Qualifier))
}

pub(crate) fn person(_template: &Template) -> ParseResult {
    Ok(Some(ConstraintKind::Person))
}

pub(crate) fn taxon(_template: &Template) -> ParseResult {
    Ok(Some(ConstraintKind::Taxon))
}
