//! Shared parameter-parsing primitives used by all constraint parsers
//!
//! Item and value lists in the template microsyntax arrive wrapped in
//! nested bracket markup, so every list parser strips punctuation first.
//! All primitives are tolerant of empty input; only malformed tokens
//! inside present values are reported.

use crate::error::ConstraintParseError;
use crate::model::{ItemId, PropertyId, PropertyValues, RangeEndpoint};
use crate::template::Span;

/// Where a value came from, for error attribution.
pub(crate) struct ParamContext<'a> {
    pub template: &'a str,
    pub parameter: &'a str,
    pub span: Span,
}

impl ParamContext<'_> {
    fn invalid_id(&self, token: &str) -> ConstraintParseError {
        ConstraintParseError::InvalidId {
            template: self.template.to_string(),
            parameter: self.parameter.to_string(),
            token: token.to_string(),
            span: self.span.clone(),
        }
    }
}

/// Remove wiki bracket/brace/pipe punctuation from a raw parameter value.
pub(crate) fn remove_brackets(value: &str) -> String {
    value
        .replace("[[", "")
        .replace("]]", "")
        .replace("{{", "")
        .replace("}}", "")
        .replace('|', "")
}

/// Parse a comma-separated list of item ids, e.g. `Q30, q31`.
///
/// Empty input yields an empty list, not an error.
pub(crate) fn parse_item_list(
    value: &str,
    ctx: &ParamContext<'_>,
) -> Result<Vec<ItemId>, ConstraintParseError> {
    remove_brackets(value)
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| ItemId::new(token).map_err(|_| ctx.invalid_id(token)))
        .collect()
}

/// Parse a comma-separated list of property ids, e.g. `P580, P582`.
pub(crate) fn parse_property_id_list(
    value: &str,
    ctx: &ParamContext<'_>,
) -> Result<Vec<PropertyId>, ConstraintParseError> {
    remove_brackets(value)
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| PropertyId::new(token).map_err(|_| ctx.invalid_id(token)))
        .collect()
}

/// Parse a single property id.
pub(crate) fn parse_property_id(
    value: &str,
    ctx: &ParamContext<'_>,
) -> Result<PropertyId, ConstraintParseError> {
    let stripped = remove_brackets(value);
    let token = stripped.trim();
    PropertyId::new(token).map_err(|_| ctx.invalid_id(token))
}

/// Parse a semicolon-separated list of property/values pairs.
///
/// A segment with a colon restricts the property to the item list after
/// it (possibly empty); a segment without a colon leaves the list
/// absent. The three resulting states are semantically distinct and are
/// preserved as-is.
pub(crate) fn parse_property_values_list(
    value: &str,
    ctx: &ParamContext<'_>,
) -> Result<Vec<PropertyValues>, ConstraintParseError> {
    let stripped = remove_brackets(value);
    let mut list = Vec::new();
    for segment in stripped.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        match segment.find(':') {
            None => {
                let property = PropertyId::new(segment).map_err(|_| ctx.invalid_id(segment))?;
                list.push(PropertyValues::any(property));
            }
            Some(pos) => {
                let token = segment[..pos].trim();
                let property = PropertyId::new(token).map_err(|_| ctx.invalid_id(token))?;
                let values = parse_item_list(&segment[pos + 1..], ctx)?;
                list.push(PropertyValues::restricted(property, values));
            }
        }
    }
    Ok(list)
}

/// Parse a comma-separated list of integer quantities.
///
/// Unlike the other list parsers, a non-numeric token here is a hard
/// parse failure: quantities are used for exact bounds and must not be
/// silently skipped.
pub(crate) fn parse_quantity_list(
    value: &str,
    ctx: &ParamContext<'_>,
) -> Result<Vec<i64>, ConstraintParseError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<i64>()
                .map_err(|_| ConstraintParseError::InvalidQuantity {
                    template: ctx.template.to_string(),
                    parameter: ctx.parameter.to_string(),
                    token: token.to_string(),
                    span: ctx.span.clone(),
                })
        })
        .collect()
}

/// Parse one range bound: a number, or the `now` sentinel of date ranges.
pub(crate) fn parse_range_endpoint(
    value: &str,
    ctx: &ParamContext<'_>,
) -> Result<RangeEndpoint, ConstraintParseError> {
    let token = value.trim();
    if token.eq_ignore_ascii_case("now") {
        return Ok(RangeEndpoint::Now);
    }
    token
        .parse::<f64>()
        .map(RangeEndpoint::Number)
        .map_err(|_| ConstraintParseError::InvalidRangeBound {
            template: ctx.template.to_string(),
            parameter: ctx.parameter.to_string(),
            token: token.to_string(),
            span: ctx.span.clone(),
        })
}
