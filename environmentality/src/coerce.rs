//! Conversion of raw strings into typed values

use crate::array::parse_array;
use crate::declaration::PropertyDeclaration;
use crate::sink::ErrorSink;
use crate::value::{parse_number, PropertyType, Value};

const MUST_BE_NUMBER: &str = "a number";
const MUST_BE_BOOLEAN: &str = "'true' or 'false'";

/// Coerce a raw environment value according to `decl`.
///
/// Problems are recorded in `sink`. Returns `None` when the value cannot
/// be used, except for booleans: an unrecognised boolean is still returned
/// (as `false`, or as whatever equality with `"true"` gives) alongside
/// the recorded error.
pub fn coerce(raw: &str, decl: &PropertyDeclaration, sink: &mut ErrorSink) -> Option<Value> {
    let name = decl.name.as_deref().unwrap_or_default();

    match &decl.ty {
        PropertyType::String => coerce_string(raw, name, decl, sink),
        PropertyType::Number => coerce_number(raw, name, decl, sink),
        PropertyType::Boolean => Some(coerce_boolean(raw, name, decl, sink)),
        PropertyType::Other(ty) => {
            sink.unsupported_type(ty, name);
            None
        }
    }
}

fn coerce_string(
    raw: &str,
    name: &str,
    decl: &PropertyDeclaration,
    sink: &mut ErrorSink,
) -> Option<Value> {
    let value = if decl.array {
        Value::Array(parse_array(raw).into_iter().map(Value::String).collect())
    } else {
        Value::String(raw.to_string())
    };

    check_enum_values(&value, name, decl, sink).then_some(value)
}

fn coerce_number(
    raw: &str,
    name: &str,
    decl: &PropertyDeclaration,
    sink: &mut ErrorSink,
) -> Option<Value> {
    let value = if decl.array {
        let mut valid = true;
        let numbers: Vec<Value> = parse_array(raw)
            .iter()
            .filter_map(|segment| match parse_number(segment) {
                Some(n) => Some(Value::Number(n)),
                None => {
                    sink.invalid_value(segment, name, Some(MUST_BE_NUMBER));
                    valid = false;
                    None
                }
            })
            .collect();
        if !valid {
            return None;
        }
        Value::Array(numbers)
    } else {
        match parse_number(raw) {
            Some(n) => Value::Number(n),
            None => {
                sink.invalid_value(raw, name, Some(MUST_BE_NUMBER));
                return None;
            }
        }
    };

    check_enum_values(&value, name, decl, sink).then_some(value)
}

// Never nulls the property, unlike the string and number paths.
fn coerce_boolean(raw: &str, name: &str, decl: &PropertyDeclaration, sink: &mut ErrorSink) -> Value {
    let mut parse = |segment: &str| {
        let lowered = segment.to_lowercase();
        if lowered != "true" && lowered != "false" {
            sink.invalid_value(segment, name, Some(MUST_BE_BOOLEAN));
        }
        Value::Boolean(lowered == "true")
    };

    if decl.array {
        Value::Array(parse_array(raw).iter().map(|s| parse(s)).collect())
    } else {
        parse(raw)
    }
}

/// Check `value` against the declaration's allowed values.
///
/// Always passes when no values are declared. For arrays every element is
/// checked and every failing element is reported; the check fails if any
/// one of them does.
pub fn check_enum_values(
    value: &Value,
    name: &str,
    decl: &PropertyDeclaration,
    sink: &mut ErrorSink,
) -> bool {
    let Some(allowed) = &decl.enum_values else {
        return true;
    };

    let candidates = match value {
        Value::Array(items) => items.as_slice(),
        scalar => std::slice::from_ref(scalar),
    };

    let mut valid = true;
    for candidate in candidates {
        if !allowed.contains(candidate) {
            sink.invalid_value(candidate, name, Some(enum_hint(allowed).as_str()));
            valid = false;
        }
    }
    valid
}

fn enum_hint(allowed: &[Value]) -> String {
    let quoted: Vec<String> = allowed.iter().map(|v| format!("'{v}'")).collect();
    format!("one of {}", quoted.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::ErrorKind;

    fn coerce_with(raw: &str, decl: PropertyDeclaration) -> (Option<Value>, ErrorSink) {
        let mut sink = ErrorSink::collecting();
        let value = coerce(raw, &decl, &mut sink);
        (value, sink)
    }

    #[test]
    fn test_string() {
        let (value, sink) = coerce_with("string", PropertyDeclaration::new("STRING"));
        assert_eq!(value, Some(Value::from("string")));
        assert!(!sink.has_errors());
    }

    #[test]
    fn test_string_array_with_escape() {
        let (value, sink) = coerce_with("a\\,b,c", PropertyDeclaration::new("TAGS").array());
        assert_eq!(value, Some(Value::from(vec!["a,b", "c"])));
        assert!(!sink.has_errors());
    }

    #[test]
    fn test_string_enum() {
        let decl = PropertyDeclaration::new("MODE").enum_values(["dev", "prod"]);

        let (value, sink) = coerce_with("dev", decl.clone());
        assert_eq!(value, Some(Value::from("dev")));
        assert!(!sink.has_errors());

        let (value, sink) = coerce_with("test", decl);
        assert_eq!(value, None);
        assert_eq!(
            sink.messages(),
            vec!["Invalid value 'test' for MODE, must be one of 'dev', 'prod'"]
        );
    }

    #[test]
    fn test_number_and_float() {
        let (value, sink) = coerce_with("1", PropertyDeclaration::new("NUMBER").number());
        assert_eq!(value, Some(Value::Number(1.0)));
        assert!(!sink.has_errors());

        let (value, _) = coerce_with("1.1", PropertyDeclaration::new("FLOAT").number());
        assert_eq!(value, Some(Value::Number(1.1)));
    }

    #[test]
    fn test_wrong_number() {
        let (value, sink) = coerce_with("wrong", PropertyDeclaration::new("WRONG").number());
        assert_eq!(value, None);
        assert_eq!(
            sink.messages(),
            vec!["Invalid value 'wrong' for WRONG, must be a number"]
        );
        assert_eq!(sink.records()[0].kind, ErrorKind::InvalidValue);
    }

    #[test]
    fn test_empty_number_is_invalid() {
        let (value, sink) = coerce_with("", PropertyDeclaration::new("EMPTY").number());
        assert_eq!(value, None);
        assert!(sink.has_errors());
    }

    #[test]
    fn test_number_array() {
        let (value, sink) =
            coerce_with("1.1,2.2,3.3", PropertyDeclaration::new("FLOATS").number().array());
        assert_eq!(value, Some(Value::from(vec![1.1, 2.2, 3.3])));
        assert!(!sink.has_errors());
    }

    #[test]
    fn test_number_array_reports_every_bad_element() {
        let (value, sink) =
            coerce_with("1,x,3,y", PropertyDeclaration::new("NUMS").number().array());
        assert_eq!(value, None);
        assert_eq!(
            sink.messages(),
            vec![
                "Invalid value 'x' for NUMS, must be a number",
                "Invalid value 'y' for NUMS, must be a number",
            ]
        );
    }

    #[test]
    fn test_number_enum_failure_nulls_scalar() {
        let decl = PropertyDeclaration::new("LEVEL").number().enum_values([1, 2, 3]);
        let (value, sink) = coerce_with("4", decl);
        assert_eq!(value, None);
        assert_eq!(
            sink.messages(),
            vec!["Invalid value '4' for LEVEL, must be one of '1', '2', '3'"]
        );
    }

    #[test]
    fn test_number_array_enum() {
        let decl = PropertyDeclaration::new("LEVELS")
            .number()
            .array()
            .enum_values([1, 2, 3]);
        let (value, _) = coerce_with("3,1", decl.clone());
        assert_eq!(value, Some(Value::from(vec![3, 1])));

        let (value, sink) = coerce_with("1,5,2,9", decl);
        assert_eq!(value, None);
        assert_eq!(sink.records().len(), 2);
    }

    #[test]
    fn test_boolean_variants() {
        for raw in ["true", "TRUE", "True"] {
            let (value, sink) = coerce_with(raw, PropertyDeclaration::new("B").boolean());
            assert_eq!(value, Some(Value::Boolean(true)));
            assert!(!sink.has_errors());
        }
        for raw in ["false", "FALSE", "False"] {
            let (value, sink) = coerce_with(raw, PropertyDeclaration::new("B").boolean());
            assert_eq!(value, Some(Value::Boolean(false)));
            assert!(!sink.has_errors());
        }
    }

    #[test]
    fn test_invalid_boolean_still_returns_value() {
        let (value, sink) = coerce_with("wrong", PropertyDeclaration::new("FLAG").boolean());
        assert_eq!(value, Some(Value::Boolean(false)));
        assert_eq!(
            sink.messages(),
            vec!["Invalid value 'wrong' for FLAG, must be 'true' or 'false'"]
        );
    }

    #[test]
    fn test_boolean_ignores_enum_values() {
        let decl = PropertyDeclaration::new("FLAG").boolean().enum_values([false]);
        let (value, sink) = coerce_with("true", decl);
        assert_eq!(value, Some(Value::Boolean(true)));
        assert!(!sink.has_errors());
    }

    #[test]
    fn test_boolean_array() {
        let (value, sink) = coerce_with(
            "true,false,TRUE",
            PropertyDeclaration::new("FLAGS").boolean().array(),
        );
        assert_eq!(value, Some(Value::from(vec![true, false, true])));
        assert!(!sink.has_errors());

        let (value, sink) =
            coerce_with("true,yes", PropertyDeclaration::new("FLAGS").boolean().array());
        assert_eq!(value, Some(Value::from(vec![true, false])));
        assert_eq!(sink.records().len(), 1);
    }

    #[test]
    fn test_unsupported_type() {
        let decl = PropertyDeclaration::new("WHEN").ty("date");
        let (value, sink) = coerce_with("2024-01-01", decl);
        assert_eq!(value, None);
        assert_eq!(sink.messages(), vec!["Unsupported type 'date' for WHEN"]);
        assert_eq!(sink.records()[0].kind, ErrorKind::UnsupportedType);
    }

    #[test]
    fn test_enum_mismatched_element_type() {
        let decl = PropertyDeclaration::new("PORT").number().enum_values(["80"]);
        let (value, sink) = coerce_with("80", decl);
        assert_eq!(value, None);
        assert!(sink.has_errors());
    }

    #[test]
    fn test_check_enum_values_unset_always_passes() {
        let mut sink = ErrorSink::collecting();
        let decl = PropertyDeclaration::new("ANY");
        assert!(check_enum_values(&Value::from("x"), "ANY", &decl, &mut sink));
        assert!(!sink.has_errors());
    }
}
