//! Master configuration: the replacement list and run policy.
//!
//! The master file is YAML:
//!
//! ```yaml
//! stop-on-missing-required: true
//! stop-on-error: false
//! env-file: .env
//! replacements:
//!   - file: plugins/Foo/config.yml
//!     changes:
//!       - path: database.host
//!         value: "${DB_HOST:localhost}"
//! ```
//!
//! ## Environment Variables
//! - `CONFIG_INJECTOR_CONFIG_PATH` - Master config file (default: `<base>/config-injector.yml`)
//! - `CONFIG_INJECTOR_BASE_DIR` - Directory target files are resolved against (default: `.`)

mod loader;
mod types;

pub use loader::{ConfigLoader, ConfigPaths};
pub use types::{DEFAULT_CONFIG_FILE, DEFAULT_ENV_FILE, InjectorConfig};
