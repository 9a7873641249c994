#![allow(non_snake_case)]

// Declare the modules that form the library's public API.
// Binaries use them via `use TweetPulse::module_name;`.
pub mod classifier;
pub mod config;
pub mod data_model;
pub mod error;
pub mod ingest;
pub mod pipeline;
pub mod query;
pub mod server;
pub mod store;
pub mod utils;
