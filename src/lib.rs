pub mod aggregate;
pub mod analyzer;
pub mod archive;
pub mod dataset;
pub mod error;
pub mod fetch;
pub mod output;
pub mod quiz;
pub mod stats;
