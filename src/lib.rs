pub mod comparison;
pub mod config;
pub mod dataset;
pub mod error;
pub mod export;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod percentile;
pub mod rankings;
pub mod state;
