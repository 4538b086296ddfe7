use super::configuration::{Conjunction, SearchSettings};
use super::escape::escape;
use crate::domain::model::query::Query;

/// Generates the Solr main query string out of the query terms.
///
/// Each term is escaped and double quoted, the terms are joined with the
/// conjunction and restricted to the term search field, eg
/// `taxa:("Fagus" OR "Quercus")`. Without any term, the match-all query
/// is returned.
pub fn generate_query_string(
    query: &Query,
    conjunction: Conjunction,
    settings: &SearchSettings,
) -> String {
    if query.is_empty() {
        return settings.default_query_string.clone();
    }

    let joined_terms = query
        .terms()
        .iter()
        .map(|term| format!("\"{}\"", escape(term)))
        .collect::<Vec<_>>()
        .join(&format!(" {} ", conjunction));

    format!("{}:({})", settings.term_search_field_name, joined_terms)
}

/// Query string matching exactly the document with the given identifier.
///
/// The id is escaped and quoted like a term, so whitespace and slashes are
/// part of the value and not query syntax.
pub fn generate_location_id_query(location_id: &str, settings: &SearchSettings) -> String {
    format!(
        "{}:\"{}\"",
        settings.location_id_field_name,
        escape(location_id)
    )
}
