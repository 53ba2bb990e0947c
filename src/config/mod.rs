//! Configuration model for conncheck.
//!
//! Configuration is optional and read from a YAML file passed with
//! `--config`. Unknown fields are ignored, missing fields take defaults, and
//! values are validated before the menu starts.

mod model;
mod operations;
mod types;


pub use model::Config;
