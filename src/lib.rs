//! Config Injector Library
//!
//! Applies dotted-path value changes to YAML, JSON, TOML and properties
//! files, expanding `${NAME}` / `${NAME:DEFAULT}` placeholders against a
//! layered resolver chain.
//!
//! ```no_run
//! use config_injector::inject::{Change, FileEntry, Injector, Policy};
//! use config_injector::resolver::CompositeResolver;
//! use std::path::Path;
//!
//! let resolver = CompositeResolver::with_defaults(Path::new(".env"));
//! let entries = vec![FileEntry::new(
//!     "plugins/App/config.yml",
//!     vec![Change::new("database.host", "${DB_HOST:localhost}").unwrap()],
//! )];
//! let summary = Injector::new(".", &resolver, Policy::default()).apply(&entries).unwrap();
//! println!("{summary}");
//! ```

pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod expand;
pub mod inject;
pub mod logging;
pub mod resolver;
pub mod tree;
