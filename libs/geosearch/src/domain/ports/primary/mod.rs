pub mod spatial_database;
