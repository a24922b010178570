// Library for tests to access modules

pub mod collector;
pub mod config;
pub mod error;
pub mod exporter;
pub mod models;
pub mod routes;
pub mod version;
pub mod worker;
