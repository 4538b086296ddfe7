use serde::Deserialize;

/// The part of a Solr `select` answer we care about.
#[derive(Debug, Deserialize)]
pub struct SolrSearchResponse {
    pub response: SolrDocuments,
    #[serde(rename = "nextCursorMark")]
    pub next_cursor_mark: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SolrDocuments {
    #[serde(rename = "numFound")]
    pub num_found: u64,
    #[serde(default)]
    pub docs: Vec<serde_json::Value>,
}
