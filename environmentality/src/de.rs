//! Helpers for macro-generated code
//!
//! `#[derive(Environmentality)]` builds its declarations with [`declare`],
//! resolves them with [`resolve_all`], then moves each value into its field
//! with [`take_required`] or [`take_optional`].

use crate::declaration::PropertyDeclaration;
use crate::error::EnvError;
use crate::resolve::{resolve, Options, Resolved};
use crate::sink::ErrorSink;
use crate::snapshot::Snapshot;
use crate::value::EnvValue;

/// Declaration for a field of type `T` bound to `name`.
#[doc(hidden)]
pub fn declare<T: EnvValue>(name: &str) -> PropertyDeclaration {
    let decl = PropertyDeclaration::new(name).ty(T::property_type());
    if T::is_array() {
        decl.array()
    } else {
        decl
    }
}

/// Resolve every declaration, applying the error policy on failure.
///
/// Returns [`EnvError::Validation`] with every recorded message once the
/// policy has run. With [`ErrorPolicy::Exit`](crate::ErrorPolicy::Exit) the
/// process exits before returning.
#[doc(hidden)]
pub fn resolve_all(
    decls: &[PropertyDeclaration],
    snapshot: &Snapshot,
    options: Options,
) -> Result<Resolved, EnvError> {
    let mut sink = ErrorSink::new(options.policy);
    let resolved = resolve(decls, snapshot, options.case, &mut sink);

    if sink.has_errors() {
        let errors = sink.messages();
        sink.finish();
        return Err(EnvError::Validation { errors });
    }

    Ok(resolved)
}

/// Move a resolved value into a required field.
#[doc(hidden)]
pub fn take_required<T: EnvValue>(values: &mut Resolved, name: &str) -> Result<T, EnvError> {
    match take_optional(values, name)? {
        Some(value) => Ok(value),
        None => Err(EnvError::missing(name)),
    }
}

/// Move a resolved value into an `Option<T>` field.
#[doc(hidden)]
pub fn take_optional<T: EnvValue>(
    values: &mut Resolved,
    name: &str,
) -> Result<Option<T>, EnvError> {
    values
        .shift_remove(name)
        .flatten()
        .map(|value| T::from_value(value).map_err(|e| EnvError::parse_error::<T>(name, e)))
        .transpose()
}

/// Unwrap a load result, printing the error and exiting on failure.
#[doc(hidden)]
pub fn or_exit<T>(result: Result<T, EnvError>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
