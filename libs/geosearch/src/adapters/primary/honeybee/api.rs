use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};

/// Body of a successful map request.
#[derive(Debug, Serialize, Deserialize)]
pub struct SpatialDataResponse {
    #[serde(rename = "spatialData")]
    pub spatial_data: FeatureCollection,
}

impl From<FeatureCollection> for SpatialDataResponse {
    fn from(spatial_data: FeatureCollection) -> Self {
        SpatialDataResponse { spatial_data }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "error-message")]
    pub error_message: String,
}

impl ErrorResponse {
    pub fn new(error_message: impl Into<String>) -> Self {
        ErrorResponse {
            error_message: error_message.into(),
        }
    }
}
