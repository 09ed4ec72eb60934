//! Configuration for pfind.
//!
//! Settings live in an optional `pfind.toml`:
//! - [load]: locating, reading and parsing the file into [Config].
//! - [search]: the `[search]` table, [SearchSection] as parsed and [SearchSettings] as used.
//!
//! Command-line flags are applied on top of whatever the file provides.

pub mod load;
pub mod search;

pub use load::Config;
pub use search::{SearchSection, SearchSettings};
