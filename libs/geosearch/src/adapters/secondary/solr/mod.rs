use async_trait::async_trait;
use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::domain::model::{
    error::Error as ModelError, filter::SearchFilter, parameters::SearchParameters, query::Query,
};
use crate::domain::ports::primary::spatial_database::SpatialDatabase;
use crate::domain::ports::secondary::search::{Parameters, Search};
use crate::utils::deserialize::{deserialize_opt_duration, serialize_opt_duration};

pub mod configuration;
pub mod escape;
pub mod filters;
pub mod models;
pub mod query;
pub mod remote;
pub mod translation;

use configuration::{SearchSettings, PARAMETER_NAME_RETURN_FIELDS};
use filters::search_filter_to_parameters;
use query::{generate_location_id_query, generate_query_string};
use remote::SolrClient;

/// Where to find the Solr core and how to talk to it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SolrStorageConfig {
    /// URL of the core, eg `http://localhost:8983/solr/biofid`.
    pub url: Option<Url>,
    /// Sort order handed to Solr. Cursors need one ending on the unique key.
    pub sort: Option<String>,
    #[serde(
        deserialize_with = "deserialize_opt_duration",
        serialize_with = "serialize_opt_duration"
    )]
    pub timeout: Option<Duration>,
}

impl Default for SolrStorageConfig {
    fn default() -> Self {
        SolrStorageConfig {
            url: None,
            sort: Some(String::from("id asc")),
            timeout: None,
        }
    }
}

/// The spatial database backed by a Solr core.
#[derive(Debug, Clone)]
pub struct SolrSpatialDatabase<S = SolrClient> {
    remote: S,
    settings: SearchSettings,
}

impl SolrSpatialDatabase<SolrClient> {
    pub fn new(config: &SolrStorageConfig, settings: SearchSettings) -> Result<Self, ModelError> {
        let remote = SolrClient::new(config).map_err(|err| ModelError::Configuration {
            details: err.to_string(),
        })?;
        Ok(SolrSpatialDatabase { remote, settings })
    }
}

impl<S> SolrSpatialDatabase<S> {
    pub fn with_remote(remote: S, settings: SearchSettings) -> Self {
        SolrSpatialDatabase { remote, settings }
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    fn location_parameters(&self, location_id: &str) -> Parameters {
        let mut filters = SearchParameters::new();
        filters.insert(
            PARAMETER_NAME_RETURN_FIELDS,
            vec![self.settings.geojson_field_name.clone()],
        );
        Parameters {
            query: generate_location_id_query(location_id, &self.settings),
            filters,
        }
    }

    fn search_parameters(&self, query: &Query, search_filter: &SearchFilter) -> Parameters {
        let query_string = query.search_string_or_init(|| {
            generate_query_string(query, self.settings.term_conjunction, &self.settings)
        });
        Parameters {
            query: query_string.to_string(),
            filters: search_filter_to_parameters(search_filter, &self.settings),
        }
    }
}

impl<S: Search + Send + Sync> SolrSpatialDatabase<S> {
    async fn fetch_features(&self, parameters: Parameters) -> Result<FeatureCollection, ModelError> {
        let documents = self
            .remote
            .search_documents(parameters)
            .await
            .map_err(|err| ModelError::Backend { source: err.into() })?;

        translation::convert_documents_to_feature_collection(
            documents,
            &self.settings.geojson_field_name,
        )
    }
}

#[async_trait]
impl<S: Search + Send + Sync> SpatialDatabase for SolrSpatialDatabase<S> {
    #[instrument(skip(self))]
    async fn get_data_for_location_id(
        &self,
        location_id: &str,
    ) -> Result<FeatureCollection, ModelError> {
        let parameters = self.location_parameters(location_id);
        debug!(query = %parameters.query, "location lookup");
        self.fetch_features(parameters).await
    }

    #[instrument(skip(self))]
    async fn search_locations_related_to_query(
        &self,
        query: &Query,
        search_filter: &SearchFilter,
    ) -> Result<FeatureCollection, ModelError> {
        let parameters = self.search_parameters(query, search_filter);
        debug!(
            query = %parameters.query,
            filters = ?parameters.filters,
            "location search"
        );
        self.fetch_features(parameters).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{
        filter::{DateSpan, Point},
        parameters::ParameterValue,
    };
    use crate::domain::ports::secondary::search::{Error as SearchError, MockSearch};
    use chrono::NaiveDate;
    use mockall::predicate;
    use serde_json::json;

    const FEATURE: &str = r#"{"type":"Feature","geometry":{"type":"Point","coordinates":[8.68,50.11]},"properties":{}}"#;

    fn default_filters() -> SearchParameters {
        vec![
            (
                "fq",
                ParameterValue::List(vec![String::from("{!bbox sfield=location}")]),
            ),
            ("pt", "51.16336,10.44768".into()),
            ("d", 50.0.into()),
            ("rows", 100u32.into()),
            ("cursorMark", "*".into()),
        ]
        .into_iter()
        .collect()
    }

    #[tokio::test]
    async fn should_search_with_defaults() {
        let mut remote = MockSearch::new();
        remote
            .expect_search_documents_()
            .with(predicate::eq(Parameters {
                query: String::from("*:*"),
                filters: default_filters(),
            }))
            .times(1)
            .returning(|_| Ok(vec![json!({ "geojson": FEATURE })]));

        let database = SolrSpatialDatabase::with_remote(remote, SearchSettings::default());
        let collection = database
            .search_locations_related_to_query(
                &Query::new(Vec::<String>::new()),
                &SearchFilter::default(),
            )
            .await
            .unwrap();

        assert_eq!(collection.features.len(), 1);
    }

    #[tokio::test]
    async fn should_search_terms_within_dates_around_point() {
        let mut filters = default_filters();
        filters.insert(
            "fq",
            ParameterValue::List(vec![
                String::from("date:[1923-01-01 TO NOW]"),
                String::from("{!bbox sfield=location}"),
            ]),
        );
        filters.insert("pt", "8.6,50.1");
        filters.insert("d", 10.0);

        let mut remote = MockSearch::new();
        remote
            .expect_search_documents_()
            .with(predicate::eq(Parameters {
                query: String::from(r#"taxa:("Fagus" OR "Quercus")"#),
                filters,
            }))
            .times(1)
            .returning(|_| Ok(vec![]));

        let database = SolrSpatialDatabase::with_remote(remote, SearchSettings::default());
        let filter = SearchFilter::default()
            .with_spatial_center(Point::new(50.1, 8.6))
            .with_radius(10.0)
            .with_date_span(DateSpan::new(NaiveDate::from_ymd_opt(1923, 1, 1), None));
        let collection = database
            .search_locations_related_to_query(&Query::new(vec!["Fagus", "Quercus"]), &filter)
            .await
            .unwrap();

        assert!(collection.features.is_empty());
    }

    #[tokio::test]
    async fn should_look_up_location_by_escaped_id() {
        let mut filters = SearchParameters::new();
        filters.insert("fl", vec![String::from("geojson")]);

        let mut remote = MockSearch::new();
        remote
            .expect_search_documents_()
            .with(predicate::eq(Parameters {
                query: String::from(r#"id:"https\://www.biofid.de/document/1""#),
                filters,
            }))
            .times(1)
            .returning(|_| Ok(vec![json!({ "geojson": FEATURE })]));

        let database = SolrSpatialDatabase::with_remote(remote, SearchSettings::default());
        let collection = database
            .get_data_for_location_id("https://www.biofid.de/document/1")
            .await
            .unwrap();

        assert_eq!(collection.features.len(), 1);
    }

    #[tokio::test]
    async fn should_report_backend_failure() {
        let mut remote = MockSearch::new();
        remote.expect_search_documents_().returning(|_| {
            Err(SearchError::DocumentRetrievalError {
                source: "connection refused".into(),
            })
        });

        let database = SolrSpatialDatabase::with_remote(remote, SearchSettings::default());
        let res = database.get_data_for_location_id("42").await;

        assert!(matches!(res, Err(ModelError::Backend { .. })));
    }

    #[tokio::test]
    async fn should_report_malformed_hit() {
        let mut remote = MockSearch::new();
        remote
            .expect_search_documents_()
            .returning(|_| Ok(vec![json!({ "geojson": FEATURE }), json!({ "id": "2" })]));

        let database = SolrSpatialDatabase::with_remote(remote, SearchSettings::default());
        let res = database
            .search_locations_related_to_query(
                &Query::new(vec!["Fagus"]),
                &SearchFilter::default(),
            )
            .await;

        assert!(matches!(
            res,
            Err(ModelError::MalformedSearchResult { index: 1, .. })
        ));
    }

    #[test]
    fn should_reuse_search_string_of_query() {
        let database =
            SolrSpatialDatabase::with_remote(MockSearch::new(), SearchSettings::default());
        let query = Query::new(vec!["Fagus"]);

        let first = database.search_parameters(&query, &SearchFilter::default());
        assert_eq!(query.search_string(), Some(r#"taxa:("Fagus")"#));
        let second = database.search_parameters(&query, &SearchFilter::default());
        assert_eq!(first, second);
    }

    #[test]
    fn should_refuse_configuration_without_url() {
        let res = SolrSpatialDatabase::new(&SolrStorageConfig::default(), SearchSettings::default());
        assert!(matches!(res, Err(ModelError::Configuration { .. })));
    }

    #[test]
    fn should_read_timeout_in_milliseconds() {
        let config: SolrStorageConfig = serde_json::from_value(json!({
            "url": "http://localhost:8983/solr/biofid",
            "timeout": 1500
        }))
        .unwrap();
        assert_eq!(config.timeout, Some(Duration::from_millis(1500)));
        assert_eq!(config.sort.as_deref(), Some("id asc"));
    }
}
