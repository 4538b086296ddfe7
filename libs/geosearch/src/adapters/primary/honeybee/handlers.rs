use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};
use warp::reject::Reject;
use warp::reply::json;

use crate::{
    adapters::{
        primary::{
            common::{
                extract::RequestParameters,
                request::{
                    create_query_from_parameters, create_search_filter_from_parameters,
                    requested_format,
                },
            },
            honeybee::api::SpatialDataResponse,
        },
        secondary::solr::{configuration::SearchSettings, SolrStorageConfig},
    },
    domain::{model::error::Error, ports::primary::spatial_database::SpatialDatabase},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    /// Host on which we expose honeybee. Example: 'http://localhost', '0.0.0.0'
    pub host: String,
    /// Port on which we expose honeybee.
    pub port: u16,
}

impl Default for Service {
    fn default() -> Self {
        Service {
            host: String::from("0.0.0.0"),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    pub mode: String,
    pub solr: SolrStorageConfig,
    #[serde(default)]
    pub search: SearchSettings,
    pub service: Service,
    pub nb_threads: Option<usize>,
    /// Seconds a client may cache an answer.
    pub http_cache_duration: usize,
}

/// Everything a handler needs, cloned into each request.
pub struct Context<D> {
    pub database: Arc<D>,
    pub settings: Settings,
}

impl<D> Context<D> {
    pub fn new(database: D, settings: Settings) -> Self {
        Context {
            database: Arc::new(database),
            settings,
        }
    }
}

// Deriving would require `D: Clone`.
impl<D> Clone for Context<D> {
    fn clone(&self) -> Self {
        Context {
            database: self.database.clone(),
            settings: self.settings.clone(),
        }
    }
}

/// The request could not be turned into a search. The message is meant for
/// the user.
#[derive(Debug)]
pub struct UserInputError {
    pub message: String,
}

impl Reject for UserInputError {}

#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub enum InternalErrorReason {
    ConfigurationError,
    MalformedSearchResult,
    SearchBackendError,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct InternalError {
    pub reason: InternalErrorReason,
    pub info: String,
}

impl Reject for InternalError {}

fn reject(err: Error) -> warp::Rejection {
    if err.is_user_input() {
        info!("Invalid user input: {}", err);
        return warp::reject::custom(UserInputError {
            message: err.to_string(),
        });
    }

    error!("Could not answer map request: {}", err);
    let reason = match &err {
        Error::Configuration { .. } => InternalErrorReason::ConfigurationError,
        Error::MalformedSearchResult { .. } => InternalErrorReason::MalformedSearchResult,
        _ => InternalErrorReason::SearchBackendError,
    };
    warp::reject::custom(InternalError {
        reason,
        info: err.to_string(),
    })
}

#[instrument(skip(ctx))]
pub async fn search<D>(
    ctx: Context<D>,
    raw_query: String,
) -> Result<impl warp::Reply, warp::Rejection>
where
    D: SpatialDatabase + Send + Sync,
{
    let parameters = RequestParameters::from_query_string(&raw_query);

    let format = requested_format(&parameters).map_err(reject)?;
    let search_filter = create_search_filter_from_parameters(&parameters).map_err(reject)?;
    let query = create_query_from_parameters(&parameters).map_err(reject)?;
    debug!(format = %format, terms = ?query.terms(), "map search");

    let spatial_data = ctx
        .database
        .search_locations_related_to_query(&query, &search_filter)
        .await
        .map_err(reject)?;

    Ok(json(&SpatialDataResponse::from(spatial_data)))
}

#[instrument(skip(ctx))]
pub async fn location<D>(
    location_id: String,
    ctx: Context<D>,
) -> Result<impl warp::Reply, warp::Rejection>
where
    D: SpatialDatabase + Send + Sync,
{
    let location_id = urlencoding::decode(&location_id)
        .map_err(|_| {
            reject(Error::InvalidParameterFormat {
                name: String::from("id"),
                expected_type: "str",
            })
        })?
        .into_owned();

    let spatial_data = ctx
        .database
        .get_data_for_location_id(&location_id)
        .await
        .map_err(reject)?;

    Ok(json(&SpatialDataResponse::from(spatial_data)))
}
