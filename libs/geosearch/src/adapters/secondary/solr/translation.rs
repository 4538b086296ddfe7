use geojson::{Feature, FeatureCollection, GeoJson};
use serde_json::Value;

use crate::domain::model::error::Error;

/// Collects the GeoJSON features stored in the given field of each document.
///
/// The field holds the feature serialized as a JSON string. A single
/// document without it, or with something that is not a feature, fails the
/// whole batch.
pub fn convert_documents_to_feature_collection(
    documents: Vec<Value>,
    geojson_field_name: &str,
) -> Result<FeatureCollection, Error> {
    let features = documents
        .iter()
        .enumerate()
        .map(|(index, document)| parse_feature(index, document, geojson_field_name))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

fn parse_feature(index: usize, document: &Value, field: &str) -> Result<Feature, Error> {
    let raw = document
        .get(field)
        .ok_or_else(|| Error::MalformedSearchResult {
            index,
            details: format!("no field '{}'", field),
        })?;

    // Solr may hand back a stored single valued field as one element array.
    let raw = match raw {
        Value::Array(values) if values.len() == 1 => &values[0],
        other => other,
    };

    let serialized = raw.as_str().ok_or_else(|| Error::MalformedSearchResult {
        index,
        details: format!("field '{}' is not a string", field),
    })?;

    match serialized.parse::<GeoJson>() {
        Ok(GeoJson::Feature(feature)) => Ok(feature),
        Ok(_) => Err(Error::MalformedSearchResult {
            index,
            details: String::from("not a GeoJSON feature"),
        }),
        Err(err) => Err(Error::MalformedSearchResult {
            index,
            details: err.to_string(),
        }),
    }
}
