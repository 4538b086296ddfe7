//! Query translation between map search requests and a Solr index holding
//! georeferenced documents.
//!
//! The crate is laid out in a hexagonal fashion: `domain` holds the value
//! objects and the ports, `adapters::secondary::solr` turns them into Solr
//! parameters and turns Solr hits back into GeoJSON, and
//! `adapters::primary::honeybee` exposes everything over HTTP.

pub mod adapters;
pub mod domain;
pub mod utils;
