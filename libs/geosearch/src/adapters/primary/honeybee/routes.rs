use std::convert::Infallible;
use warp::{
    http::StatusCode,
    path,
    reject::MethodNotAllowed,
    Filter, Rejection, Reply,
};

use super::api::ErrorResponse;
use super::handlers::{self, Context, InternalError, UserInputError};
use crate::domain::ports::primary::spatial_database::SpatialDatabase;

pub fn with_context<D>(
    ctx: Context<D>,
) -> impl Filter<Extract = (Context<D>,), Error = Infallible> + Clone
where
    D: Send + Sync,
{
    warp::any().map(move || ctx.clone())
}

/// The raw query string, empty when the request has none.
pub fn raw_query() -> impl Filter<Extract = (String,), Error = Infallible> + Clone {
    warp::query::raw()
        .or(warp::any().map(String::new))
        .unify()
}

/// `GET|POST /map/search`. Parameters are read from the query string for
/// both methods.
pub fn map_search<D>(
    ctx: Context<D>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone
where
    D: SpatialDatabase + Send + Sync + 'static,
{
    warp::get()
        .or(warp::post())
        .unify()
        .and(path!("map" / "search"))
        .and(with_context(ctx))
        .and(raw_query())
        .and_then(handlers::search)
}

/// `GET /map/location/{id}`, the id being percent encoded.
pub fn map_location<D>(
    ctx: Context<D>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone
where
    D: SpatialDatabase + Send + Sync + 'static,
{
    warp::get()
        .and(path!("map" / "location" / String))
        .and(with_context(ctx))
        .and_then(handlers::location)
}

/// All map endpoints, with errors turned into replies and cache headers set.
pub fn map_api<D>(
    ctx: Context<D>,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone
where
    D: SpatialDatabase + Send + Sync + 'static,
{
    let http_cache_duration = ctx.settings.http_cache_duration;
    let endpoints = map_search(ctx.clone())
        .or(map_location(ctx))
        .recover(report_invalid);
    cache_filter(endpoints, http_cache_duration)
}

/// Server faults are only detailed in the logs.
pub const INTERNAL_ERROR_MESSAGE: &str = "The search could not be completed.";

pub async fn report_invalid(rejection: Rejection) -> Result<impl Reply, Infallible> {
    let (message, status) = if let Some(err) = rejection.find::<UserInputError>() {
        (err.message.clone(), StatusCode::BAD_REQUEST)
    } else if let Some(err) = rejection.find::<InternalError>() {
        tracing::warn!("Internal error {:?}", err);
        (
            String::from(INTERNAL_ERROR_MESSAGE),
            StatusCode::INTERNAL_SERVER_ERROR,
        )
    } else if rejection.is_not_found() {
        (String::from("not found"), StatusCode::NOT_FOUND)
    } else if let Some(err) = rejection.find::<MethodNotAllowed>() {
        tracing::warn!("MethodNotAllowed {:?}", err);
        (String::from("no route"), StatusCode::NOT_FOUND)
    } else {
        tracing::warn!("Unhandled rejection {:?}", rejection);
        (
            String::from("INTERNAL_SERVER_ERROR"),
            StatusCode::INTERNAL_SERVER_ERROR,
        )
    };

    Ok(warp::reply::with_status(
        warp::reply::json(&ErrorResponse::new(message)),
        status,
    ))
}

pub fn cache_filter<F, T>(
    filter: F,
    http_cache_duration: usize,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone
where
    F: Filter<Extract = (T,), Error = Infallible> + Clone + Send + Sync,
    T: Reply,
{
    filter.map(move |reply| {
        warp::reply::with_header(
            reply,
            "cache-control",
            format!("max-age={}", http_cache_duration),
        )
    })
}
