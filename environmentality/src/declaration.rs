//! Per-property declarations

use crate::error::EnvError;
use crate::value::{PropertyType, Value};
use serde::{Deserialize, Serialize};

/// Describes how one property is sourced and validated.
///
/// | required | default set | variable set | result                          |
/// |----------|-------------|--------------|---------------------------------|
/// | true     | no          | no           | missing-required error, `None`  |
/// | true     | no          | yes          | coerced variable                |
/// | true     | yes         | no           | default value                   |
/// | true     | yes         | yes          | coerced variable                |
/// | false    | no          | no           | `None`                          |
/// | false    | no          | yes          | coerced variable                |
/// | false    | yes         | no           | default value                   |
/// | false    | yes         | yes          | coerced variable                |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyDeclaration {
    /// Environment variable name. Declarations without one are skipped.
    pub name: Option<String>,

    pub required: bool,

    /// Used verbatim, without coercion, when the variable is absent.
    pub default: Option<Value>,

    #[serde(rename = "type")]
    pub ty: PropertyType,

    pub array: bool,

    /// Allowed values; every element is checked for array properties.
    ///
    /// Only string and number properties are checked. Boolean properties
    /// ignore this list.
    #[serde(alias = "enumValues")]
    pub enum_values: Option<Vec<Value>>,

    /// Fall back to reading the file named by `{name}_FILE`.
    pub from_file: bool,
}

impl Default for PropertyDeclaration {
    fn default() -> Self {
        Self {
            name: None,
            required: true,
            default: None,
            ty: PropertyType::String,
            array: false,
            enum_values: None,
            from_file: false,
        }
    }
}

impl PropertyDeclaration {
    /// Required string property bound to `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn ty(mut self, ty: impl Into<PropertyType>) -> Self {
        self.ty = ty.into();
        self
    }

    pub fn number(self) -> Self {
        self.ty(PropertyType::Number)
    }

    pub fn boolean(self) -> Self {
        self.ty(PropertyType::Boolean)
    }

    pub fn array(mut self) -> Self {
        self.array = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn enum_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn from_file(mut self) -> Self {
        self.from_file = true;
        self
    }

    /// Load a declaration list from a JSON array.
    ///
    /// Missing fields take the same defaults as [`PropertyDeclaration::default`].
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, EnvError> {
        Ok(serde_json::from_str(json)?)
    }
}
