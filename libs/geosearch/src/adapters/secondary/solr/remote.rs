use async_trait::async_trait;
use snafu::{ResultExt, Snafu};
use tracing::{debug, instrument};
use url::Url;

use super::models::SolrSearchResponse;
use super::SolrStorageConfig;
use crate::domain::ports::secondary::search::{Error as SearchError, Parameters, Search};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("No Solr URL configured"))]
    MissingUrl,

    #[snafu(display("Invalid URL: {}, {}", details, source))]
    InvalidUrl {
        details: String,
        source: url::ParseError,
    },

    #[snafu(display("Solr Client Build Error: {}", source))]
    ClientBuild { source: reqwest::Error },

    #[snafu(display("Solr Request Error: {} [{}]", source, details))]
    Transport {
        details: String,
        source: reqwest::Error,
    },

    #[snafu(display("Solr Response: status {}: {}", status, details))]
    Status { status: u16, details: String },

    #[snafu(display("Solr Response Deserialization Error: {}", source))]
    Decoding { source: reqwest::Error },
}

/// Talks to the `select` handler of a single Solr core.
#[derive(Debug, Clone)]
pub struct SolrClient {
    http: reqwest::Client,
    select_url: Url,
    sort: Option<String>,
}

impl SolrClient {
    pub fn new(config: &SolrStorageConfig) -> Result<Self, Error> {
        let url = config.url.as_ref().ok_or(Error::MissingUrl)?;
        let select_url = select_url(url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context(ClientBuildSnafu)?;

        Ok(SolrClient {
            http,
            select_url,
            sort: config.sort.clone(),
        })
    }

    pub fn select_url(&self) -> &Url {
        &self.select_url
    }

    /// The complete list of query string pairs sent for the parameters.
    pub fn request_pairs(&self, parameters: &Parameters) -> Vec<(String, String)> {
        let mut pairs = vec![(String::from("q"), parameters.query.clone())];
        pairs.extend(parameters.filters.to_pairs());
        pairs.push((String::from("wt"), String::from("json")));
        if let Some(sort) = &self.sort {
            pairs.push((String::from("sort"), sort.clone()));
        }
        pairs
    }

    #[instrument(skip(self))]
    pub async fn select(&self, parameters: &Parameters) -> Result<SolrSearchResponse, Error> {
        let response = self
            .http
            .get(self.select_url.clone())
            .query(&self.request_pairs(parameters))
            .send()
            .await
            .context(TransportSnafu {
                details: format!("could not query {}", self.select_url),
            })?;

        let status = response.status();
        if !status.is_success() {
            let details = response.text().await.unwrap_or_default();
            return Err(Error::Status {
                status: status.as_u16(),
                details,
            });
        }

        let response = response
            .json::<SolrSearchResponse>()
            .await
            .context(DecodingSnafu)?;

        debug!(
            found = response.response.num_found,
            returned = response.response.docs.len(),
            next_cursor = ?response.next_cursor_mark,
            "Solr answered"
        );

        Ok(response)
    }
}

/// `<core url>/select`, whether or not the configured URL ends with a slash.
fn select_url(url: &Url) -> Result<Url, Error> {
    let mut base = url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("select").context(InvalidUrlSnafu {
        details: format!("could not build select URL from {}", url),
    })
}

#[async_trait]
impl Search for SolrClient {
    async fn search_documents(
        &self,
        parameters: Parameters,
    ) -> Result<Vec<serde_json::Value>, SearchError> {
        self.select(&parameters)
            .await
            .map(|response| response.response.docs)
            .map_err(|err| SearchError::DocumentRetrievalError { source: err.into() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::parameters::{ParameterValue, SearchParameters};

    fn config(url: &str) -> SolrStorageConfig {
        SolrStorageConfig {
            url: Some(Url::parse(url).unwrap()),
            ..SolrStorageConfig::default()
        }
    }

    #[test]
    fn should_append_select_to_core_url() {
        let client = SolrClient::new(&config("http://localhost:8983/solr/biofid")).unwrap();
        assert_eq!(
            client.select_url().as_str(),
            "http://localhost:8983/solr/biofid/select"
        );

        let client = SolrClient::new(&config("http://localhost:8983/solr/biofid/")).unwrap();
        assert_eq!(
            client.select_url().as_str(),
            "http://localhost:8983/solr/biofid/select"
        );
    }

    #[test]
    fn should_refuse_missing_url() {
        let res = SolrClient::new(&SolrStorageConfig {
            url: None,
            ..SolrStorageConfig::default()
        });
        assert!(matches!(res, Err(Error::MissingUrl)));
    }

    #[test]
    fn should_repeat_filter_queries_and_add_sort() {
        let client = SolrClient::new(&config("http://localhost:8983/solr/biofid")).unwrap();
        let filters: SearchParameters = vec![
            (
                "fq",
                ParameterValue::List(vec![
                    String::from("date:[1923-01-01 TO NOW]"),
                    String::from("{!bbox sfield=location}"),
                ]),
            ),
            ("rows", ParameterValue::Integer(100)),
        ]
        .into_iter()
        .collect();
        let parameters = Parameters {
            query: String::from("*:*"),
            filters,
        };

        let pairs = client.request_pairs(&parameters);

        let expected: Vec<(String, String)> = vec![
            ("q", "*:*"),
            ("fq", "date:[1923-01-01 TO NOW]"),
            ("fq", "{!bbox sfield=location}"),
            ("rows", "100"),
            ("wt", "json"),
            ("sort", "id asc"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert_eq!(pairs, expected);
    }
}
