pub mod aggregate;
pub mod dataset;
pub mod error;
pub mod model;
pub mod query;
pub mod report;
pub mod server;
