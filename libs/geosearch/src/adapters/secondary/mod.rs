pub mod solr;
