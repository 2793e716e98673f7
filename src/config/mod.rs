//! Rate table configuration.
//!
//! Provides the built-in [`RateTable`] and the [`ConfigLoader`] for reading
//! an alternative table from a YAML file.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{MAX_CHILDREN_COUNTED, RateFile, RateTable};
