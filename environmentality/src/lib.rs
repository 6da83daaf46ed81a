//! Declarative environment variable binding
//!
//! `environmentality` populates typed fields from environment variables,
//! with required/optional semantics, defaults, escape-aware arrays and
//! allowed-value (enum) constraints. Problems are collected, not thrown:
//! every property is resolved, every error is recorded, and the error
//! policy decides what happens afterwards.
//!
//! # Features
//!
//! - **Declarative**: `#[derive(Environmentality)]` turns struct fields into declarations
//! - **Explicit core**: build [`PropertyDeclaration`]s by hand and call [`convert`] or [`resolve`]
//! - **Arrays**: comma-separated values with `\` escaping (`a\,b,c` → `["a,b", "c"]`)
//! - **Enums**: restrict values, or every array element, to a fixed set
//! - **Collected errors**: exit with a report, hand messages to a callback, or return them
//! - **File-based secrets**: optional `{VAR}_FILE` fallback
//!
//! # Value Parsing
//!
//! - Strings: taken as-is
//! - Numbers: JavaScript `Number()` rules (`42`, `1.5`, `1e3`, `0x1F`, `Infinity`)
//! - Booleans: `true`/`false`, case-insensitive
//!
//! An invalid boolean is still resolved (to `false`) alongside its error;
//! invalid strings and numbers resolve to `None`.
//!
//! # Example
//!
//! ```rust
//! use environmentality::Environmentality;
//!
//! #[derive(Debug, Environmentality)]
//! #[env(prefix = "MYAPP_")]
//! struct Config {
//!     #[env(default = "localhost".to_string())]
//!     pub host: String,
//!
//!     #[env(default = 3000)]
//!     pub port: u16,
//!
//!     #[env(enum_values = ["debug", "info", "warn"])]
//!     pub log_levels: Vec<String>,
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! #     std::env::set_var("MYAPP_LOG_LEVELS", "debug,warn");
//! #     let config = Config::from_env()?;
//! #     assert_eq!(config.port, 3000);
//! #     assert_eq!(config.log_levels, vec!["debug", "warn"]);
//! #     Ok(())
//! # }
//! ```
//!
//! # Without the derive macro
//!
//! ```rust
//! use environmentality::{convert, Options, PropertyDeclaration, Snapshot, Value};
//!
//! let decls = vec![
//!     PropertyDeclaration::new("PORT").number().with_default(3000),
//!     PropertyDeclaration::new("TAGS").array().optional(),
//! ];
//! let snapshot: Snapshot = [("TAGS", "a\\,b,c")].into_iter().collect();
//!
//! let resolved = convert(&decls, &snapshot, Options::default());
//! assert_eq!(resolved["PORT"], Some(Value::Number(3000.0)));
//! assert_eq!(resolved["TAGS"], Some(Value::from(vec!["a,b", "c"])));
//! ```
//!
//! # Attributes
//!
//! ## `#[env(name = "CUSTOM_NAME")]`
//!
//! Bind to a variable other than the upper-cased field name.
//!
//! ## `#[env(default)]` / `#[env(default = value)]`
//!
//! Value used when the variable is not set. Defaults are used as-is and are
//! not checked against `enum_values`.
//!
//! ## `#[env(enum_values = [..])]`
//!
//! Allowed values. For `Vec<T>` fields every element must be allowed.
//!
//! ## `#[env(from_file)]`
//!
//! Read the value from the file named by `{VAR}_FILE` when `VAR` is unset.
//!
//! ## `#[env(prefix = "APP_")]`, `#[env(case_insensitive)]` (struct level)
//!
//! Prefix every variable name; match names ignoring case.

pub mod array;
pub mod coerce;
pub mod declaration;
pub mod resolve;
pub mod sink;
pub mod snapshot;
pub mod value;

#[doc(hidden)]
pub mod de;

mod error;

pub use array::parse_array;
pub use coerce::{check_enum_values, coerce};
pub use declaration::PropertyDeclaration;
pub use environmentality_derive::Environmentality;
pub use error::EnvError;
pub use resolve::{convert, resolve, Options, Resolved};
pub use sink::{ErrorCallback, ErrorKind, ErrorPolicy, ErrorRecord, ErrorSink};
pub use snapshot::{CaseMode, Snapshot};
pub use value::{parse_number, EnvValue, PropertyType, Value};

// Re-export for macro-generated code
#[doc(hidden)]
pub use anyhow;
