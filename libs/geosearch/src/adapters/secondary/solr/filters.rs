use tracing::trace;

use super::configuration::{
    SearchSettings, NOW_KEYWORD, PARAMETER_NAME_CURSOR, PARAMETER_NAME_FILTER_QUERY,
    PARAMETER_NAME_HITS_PER_PAGE, PARAMETER_NAME_MAXIMUM_DISTANCE_FROM_POINT,
    PARAMETER_NAME_POINT_COORDINATES, PARAMETER_NAME_RETURN_FIELDS, STAR_WILDCARD,
};
use super::escape::escape;
use crate::domain::model::{
    filter::{DateSpan, Point, SearchFilter},
    parameters::{ParameterValue, SearchParameters},
};

/// A value on its way into the search parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// Query syntax built by us, taken over as is.
    Safe(ParameterValue),
    /// Anything derived from the request: texts are escaped, lists element
    /// by element.
    NeedsEscaping(ParameterValue),
}

impl Input {
    fn into_value(self) -> ParameterValue {
        match self {
            Input::Safe(value) => value,
            Input::NeedsEscaping(ParameterValue::Text(text)) => ParameterValue::Text(escape(&text)),
            Input::NeedsEscaping(ParameterValue::List(values)) => {
                ParameterValue::List(values.iter().map(|value| escape(value)).collect())
            }
            Input::NeedsEscaping(number) => number,
        }
    }
}

/// Maps the search filter onto Solr query parameters.
///
/// Filter parameters the filter leaves open are filled with the configured
/// defaults, and all filter clauses are merged into a single `fq` list.
/// For the Solr query parsers see
/// https://solr.apache.org/guide/8_8/spatial-search.html#searching-with-query-parsers
pub fn search_filter_to_parameters(
    search_filter: &SearchFilter,
    settings: &SearchSettings,
) -> SearchParameters {
    let mut parameters = SearchParameters::new();

    if let Some(center) = search_filter.spatial_center {
        add_parameter(
            &mut parameters,
            PARAMETER_NAME_FILTER_QUERY,
            Some(Input::Safe(settings.spatial_filter_clause().into())),
        );
        add_parameter(
            &mut parameters,
            PARAMETER_NAME_POINT_COORDINATES,
            Some(Input::NeedsEscaping(
                point_coordinates(&center, settings.coordinate_decimal_precision).into(),
            )),
        );
        add_parameter(
            &mut parameters,
            PARAMETER_NAME_MAXIMUM_DISTANCE_FROM_POINT,
            search_filter
                .radius
                .map(|radius| Input::NeedsEscaping(radius.into())),
        );
    }

    add_parameter(
        &mut parameters,
        PARAMETER_NAME_CURSOR,
        search_filter
            .cursor
            .as_deref()
            .map(|cursor| Input::NeedsEscaping(cursor.into())),
    );
    add_parameter(
        &mut parameters,
        PARAMETER_NAME_HITS_PER_PAGE,
        search_filter
            .hits_per_page
            .map(|hits| Input::NeedsEscaping(hits.into())),
    );
    add_parameter(
        &mut parameters,
        PARAMETER_NAME_RETURN_FIELDS,
        Some(Input::NeedsEscaping(
            search_filter.return_fields.clone().into(),
        )),
    );
    add_parameter(
        &mut parameters,
        &settings.date_field_name,
        generate_date_span_filter_query(search_filter.date_span.as_ref())
            .map(|range| Input::Safe(range.into())),
    );

    remove_empty_lists(&mut parameters);
    set_search_parameter_defaults(&mut parameters, settings);
    merge_filter_query_parameters(&mut parameters, &settings.filter_query_parameter_names());

    trace!(parameters = ?parameters, "Solr filter parameters");
    parameters
}

/// Adds the value under `name` unless there is no value.
pub fn add_parameter(parameters: &mut SearchParameters, name: &str, value: Option<Input>) {
    if let Some(value) = value {
        parameters.insert(name, value.into_value());
    }
}

pub fn remove_empty_lists(parameters: &mut SearchParameters) {
    parameters.retain(|_, value| !value.is_empty_list());
}

/// Sets `default` for `name`, unless a value is present already.
pub fn set_default(parameters: &mut SearchParameters, name: &str, default: ParameterValue) {
    if !parameters.contains(name) {
        parameters.insert(name, default);
    }
}

pub fn set_search_parameter_defaults(parameters: &mut SearchParameters, settings: &SearchSettings) {
    set_default(
        parameters,
        PARAMETER_NAME_CURSOR,
        settings.default_cursor.as_str().into(),
    );
    set_default(
        parameters,
        PARAMETER_NAME_HITS_PER_PAGE,
        settings.default_hits_per_page.into(),
    );
    set_default(
        parameters,
        PARAMETER_NAME_MAXIMUM_DISTANCE_FROM_POINT,
        settings.default_radius.into(),
    );
    set_default(
        parameters,
        PARAMETER_NAME_FILTER_QUERY,
        settings.spatial_filter_clause().into(),
    );
    set_default(
        parameters,
        PARAMETER_NAME_POINT_COORDINATES,
        settings.default_point_coordinates().into(),
    );
}

/// Moves every filter query parameter into the `fq` list, as
/// `<name>:<value>` clauses, ahead of the clauses already there.
pub fn merge_filter_query_parameters(parameters: &mut SearchParameters, names: &[&str]) {
    let mut clauses: Vec<String> = names
        .iter()
        .filter_map(|name| {
            parameters
                .remove(name)
                .map(|value| format!("{}:{}", name, value))
        })
        .collect();

    if let Some(existing) = parameters.remove(PARAMETER_NAME_FILTER_QUERY) {
        clauses.extend(existing.into_list());
    }

    parameters.insert(PARAMETER_NAME_FILTER_QUERY, ParameterValue::List(clauses));
}

/// Range expression for the date span, eg `[1923-01-01 TO NOW]`.
///
/// An open start becomes `*`, an open end becomes `NOW`. Without any bound
/// there is no expression at all.
pub fn generate_date_span_filter_query(date_span: Option<&DateSpan>) -> Option<String> {
    let date_span = date_span?;
    if date_span.is_unbounded() {
        return None;
    }

    let first_year = date_span
        .first_year
        .map(|date| date.to_string())
        .unwrap_or_else(|| STAR_WILDCARD.to_string());
    let last_year = date_span
        .last_year
        .map(|date| date.to_string())
        .unwrap_or_else(|| NOW_KEYWORD.to_string());

    Some(format!("[{} TO {}]", first_year, last_year))
}

/// `<lat>,<lon>` rounded to the given number of decimals.
pub fn point_coordinates(point: &Point, precision: u32) -> String {
    format!(
        "{},{}",
        round(point.latitude, precision),
        round(point.longitude, precision)
    )
}

fn round(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}
