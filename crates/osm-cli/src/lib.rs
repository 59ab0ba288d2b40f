//! Library side of the osm-clean CLI: configuration, logging, pipeline stages
//! and terminal reports.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod summary;
