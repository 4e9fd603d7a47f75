//! Configuration loading for the compdb generator.
//!
//! Settings live in a `compdb.toml` file:
//!
//! ```toml
//! # compdb.toml
//! targets = ["//foo:bar", "//baz:qux"]
//! tool = "bazel"
//! working_directory = "."
//! repository_root = "compdb"
//!
//! [env]
//! CC = "clang"
//! ```
//!
//! The `targets` list is the one hard precondition: an absent file, an
//! absent key, or an empty list is rejected before any command is built.

mod error;
mod settings;

pub use error::{ConfigError, Result};
pub use settings::{Settings, CONFIG_FILE};
