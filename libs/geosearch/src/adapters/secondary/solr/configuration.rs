use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use snafu::Snafu;
use std::fmt;
use std::str::FromStr;

use crate::domain::model::filter::Point;

pub const PARAMETER_NAME_FILTER_QUERY: &str = "fq";
pub const PARAMETER_NAME_POINT_COORDINATES: &str = "pt";
pub const PARAMETER_NAME_CURSOR: &str = "cursorMark";
pub const PARAMETER_NAME_MAXIMUM_DISTANCE_FROM_POINT: &str = "d";
pub const PARAMETER_NAME_RETURN_FIELDS: &str = "fl";
pub const PARAMETER_NAME_HITS_PER_PAGE: &str = "rows";

pub const NOW_KEYWORD: &str = "NOW";
pub const STAR_WILDCARD: &str = "*";

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Unknown term conjunction '{}', expected AND or OR", conjunction))]
    UnknownConjunction { conjunction: String },
}

/// Boolean operator joining the search terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conjunction {
    And,
    Or,
}

impl Conjunction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Conjunction::And => "AND",
            Conjunction::Or => "OR",
        }
    }
}

impl fmt::Display for Conjunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Conjunction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned = s.trim();
        if cleaned.eq_ignore_ascii_case("AND") {
            Ok(Conjunction::And)
        } else if cleaned.eq_ignore_ascii_case("OR") {
            Ok(Conjunction::Or)
        } else {
            Err(Error::UnknownConjunction {
                conjunction: s.to_string(),
            })
        }
    }
}

impl Serialize for Conjunction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Conjunction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Solr query parser used for the spatial filter.
/// See https://solr.apache.org/guide/8_8/spatial-search.html#searching-with-query-parsers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpatialQueryParser {
    /// Bounding box around the circle, cheaper but less exact.
    Bbox,
    /// Exact circle.
    Geofilt,
}

impl SpatialQueryParser {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpatialQueryParser::Bbox => "bbox",
            SpatialQueryParser::Geofilt => "geofilt",
        }
    }
}

/// Names of the Solr fields and the values used whenever the request
/// leaves something open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub geospatial_field_name: String,
    /// Field holding the JSON serialized GeoJSON feature of a document.
    pub geojson_field_name: String,
    pub term_search_field_name: String,
    pub date_field_name: String,
    pub location_id_field_name: String,
    pub term_conjunction: Conjunction,
    pub spatial_query_parser: SpatialQueryParser,
    pub coordinate_decimal_precision: u32,
    pub default_query_string: String,
    pub default_cursor: String,
    pub default_hits_per_page: u32,
    /// Radius in km.
    pub default_radius: f64,
    pub default_spatial_center: Point,
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings {
            geospatial_field_name: String::from("location"),
            geojson_field_name: String::from("geojson"),
            term_search_field_name: String::from("taxa"),
            date_field_name: String::from("date"),
            location_id_field_name: String::from("id"),
            term_conjunction: Conjunction::Or,
            spatial_query_parser: SpatialQueryParser::Bbox,
            coordinate_decimal_precision: 6,
            default_query_string: String::from("*:*"),
            default_cursor: String::from(STAR_WILDCARD),
            default_hits_per_page: 100,
            default_radius: 50.0,
            default_spatial_center: Point::new(10.44768, 51.16336),
        }
    }
}

impl SearchSettings {
    /// The filter clause selecting documents around the point given with
    /// the `pt` and `d` parameters, eg `{!bbox sfield=location}`.
    pub fn spatial_filter_clause(&self) -> String {
        format!(
            "{{!{} sfield={}}}",
            self.spatial_query_parser.as_str(),
            self.geospatial_field_name
        )
    }

    /// Names of the parameters that end up as clauses of the filter query.
    pub fn filter_query_parameter_names(&self) -> Vec<&str> {
        vec![self.date_field_name.as_str()]
    }

    pub fn default_point_coordinates(&self) -> String {
        format!(
            "{},{}",
            self.default_spatial_center.latitude, self.default_spatial_center.longitude
        )
    }
}
