//! Resolution of declarations against an environment snapshot

use crate::coerce::coerce;
use crate::declaration::PropertyDeclaration;
use crate::sink::{ErrorPolicy, ErrorSink};
use crate::snapshot::{CaseMode, Snapshot};
use crate::value::Value;
use indexmap::IndexMap;
use std::fs;

/// Resolved values keyed by variable name, in declaration order.
///
/// Every named declaration has an entry; `None` means the property could
/// not be resolved.
pub type Resolved = IndexMap<String, Option<Value>>;

/// Settings shared by every property of one binding.
#[derive(Debug, Default)]
pub struct Options {
    pub case: CaseMode,
    pub policy: ErrorPolicy,
}

impl Options {
    /// Collect errors instead of exiting.
    pub fn collecting() -> Self {
        Self {
            case: CaseMode::default(),
            policy: ErrorPolicy::Collect,
        }
    }

    pub fn case(mut self, case: CaseMode) -> Self {
        self.case = case;
        self
    }

    pub fn policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Resolve `decls` against `snapshot`, one-shot.
///
/// Builds a sink from `options.policy`, resolves, and finishes the sink if
/// anything was recorded. With the default [`ErrorPolicy::Exit`] the process
/// terminates on any error.
pub fn convert(decls: &[PropertyDeclaration], snapshot: &Snapshot, options: Options) -> Resolved {
    let mut sink = ErrorSink::new(options.policy);
    let resolved = resolve(decls, snapshot, options.case, &mut sink);
    if sink.has_errors() {
        sink.finish();
    }
    resolved
}

/// Resolve `decls` against `snapshot`, recording problems in `sink`.
///
/// Absent variables take the declared default verbatim; without a default
/// they resolve to `None`, and required ones also record a missing error.
/// Present variables are coerced.
pub fn resolve(
    decls: &[PropertyDeclaration],
    snapshot: &Snapshot,
    case: CaseMode,
    sink: &mut ErrorSink,
) -> Resolved {
    let mut resolved = Resolved::with_capacity(decls.len());

    for decl in decls {
        let Some(name) = decl.name.as_deref() else {
            tracing::warn!(?decl, "skipping declaration without a name");
            continue;
        };

        let value = match lookup(name, decl, snapshot, case, sink) {
            Lookup::Found(raw) => {
                tracing::debug!(name, "coercing value from environment");
                coerce(&raw, decl, sink)
            }
            Lookup::Failed => None,
            Lookup::Absent => match &decl.default {
                Some(default) => {
                    tracing::debug!(name, "using default value");
                    Some(default.clone())
                }
                None => {
                    tracing::debug!(name, required = decl.required, "variable not set");
                    if decl.required {
                        sink.missing_required(name);
                    }
                    None
                }
            },
        };

        resolved.insert(name.to_string(), value);
    }

    resolved
}

enum Lookup {
    Found(String),
    Absent,
    /// A `{name}_FILE` path was set but unreadable; already recorded.
    Failed,
}

/// Direct variable first, then the file named by `{name}_FILE` when enabled.
fn lookup(
    name: &str,
    decl: &PropertyDeclaration,
    snapshot: &Snapshot,
    case: CaseMode,
    sink: &mut ErrorSink,
) -> Lookup {
    if let Some(value) = snapshot.get(name, case) {
        return Lookup::Found(value.to_string());
    }

    if decl.from_file {
        let file_var_name = format!("{name}_FILE");
        if let Some(path) = snapshot.get(&file_var_name, case) {
            tracing::debug!(name, path, "reading value from file");
            return match fs::read_to_string(path) {
                Ok(contents) => Lookup::Found(contents.trim().to_string()),
                Err(e) => {
                    sink.file_read(path, name, e);
                    Lookup::Failed
                }
            };
        }
    }

    Lookup::Absent
}
