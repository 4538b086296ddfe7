use async_trait::async_trait;
use geojson::FeatureCollection;

use crate::domain::model::{error::Error, filter::SearchFilter, query::Query};

/// A database holding georeferenced documents.
#[async_trait]
pub trait SpatialDatabase {
    /// Looks up a single location by its identifier. Nothing found is an empty
    /// collection, not an error.
    async fn get_data_for_location_id(&self, location_id: &str)
        -> Result<FeatureCollection, Error>;

    /// Returns the features of the current page of documents related to the
    /// query and narrowed down by the filter.
    async fn search_locations_related_to_query(
        &self,
        query: &Query,
        search_filter: &SearchFilter,
    ) -> Result<FeatureCollection, Error>;
}

#[async_trait]
impl<T: ?Sized> SpatialDatabase for Box<T>
where
    T: SpatialDatabase + Send + Sync,
{
    async fn get_data_for_location_id(
        &self,
        location_id: &str,
    ) -> Result<FeatureCollection, Error> {
        (**self).get_data_for_location_id(location_id).await
    }

    async fn search_locations_related_to_query(
        &self,
        query: &Query,
        search_filter: &SearchFilter,
    ) -> Result<FeatureCollection, Error> {
        (**self)
            .search_locations_related_to_query(query, search_filter)
            .await
    }
}
