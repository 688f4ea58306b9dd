//! Parameter declaration and extraction.
//!
//! Tools declare their parameters as an ordered list of [`ParamSpec`]s, which
//! is turned into the JSON Schema advertised to clients. At call time the
//! arguments are read back with [`required_param`] / [`optional_param`]; both
//! report problems as soft [`ToolError`]s naming the offending parameter.

use serde_json::{Map, Value, json};

use super::error::ToolError;
use crate::domains::cloud::Page;
use crate::domains::translations::Translator;

/// Tool call arguments as received from the client.
pub type Arguments = Map<String, Value>;

/// JSON type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Integer { minimum: Option<u32>, maximum: Option<u32> },
}

/// Declaration of one tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    pub description: &'static str,
}

impl ParamSpec {
    /// A required string parameter.
    pub const fn required_string(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::String,
            required: true,
            description,
        }
    }
}

pub const ORG_NAME: ParamSpec = ParamSpec::required_string("org_name", "Organization name");
pub const ENV_NAME: ParamSpec = ParamSpec::required_string("env_name", "Environment name");
pub const INSTANCE_NAME: ParamSpec = ParamSpec::required_string("instance_name", "Instance name");

/// Optional page number.
pub const PAGE: ParamSpec = ParamSpec {
    name: "page",
    kind: ParamKind::Integer {
        minimum: Some(1),
        maximum: None,
    },
    required: false,
    description: "Page number for pagination (min 1)",
};

/// Optional page size.
pub const PER_PAGE: ParamSpec = ParamSpec {
    name: "perPage",
    kind: ParamKind::Integer {
        minimum: Some(1),
        maximum: Some(100),
    },
    required: false,
    description: "Results per page for pagination (min 1, max 100)",
};

/// Both pagination parameters.
pub const PAGINATION: [ParamSpec; 2] = [PAGE, PER_PAGE];

/// Build the input schema of a tool.
///
/// Parameter descriptions are looked up under
/// `TOOL_<TOOL_NAME>_<PARAM_NAME>_DESCRIPTION`.
pub fn input_schema(tool_name: &str, params: &[ParamSpec], translator: &Translator) -> Map<String, Value> {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for spec in params {
        let key = format!("TOOL_{}_{}_DESCRIPTION", tool_name, spec.name);
        let description = translator.lookup(&key, spec.description);

        let mut property = match spec.kind {
            ParamKind::String => json!({ "type": "string" }),
            ParamKind::Integer { .. } => json!({ "type": "integer" }),
        };
        if let (ParamKind::Integer { minimum, maximum }, Some(obj)) =
            (spec.kind, property.as_object_mut())
        {
            if let Some(min) = minimum {
                obj.insert("minimum".to_string(), json!(min));
            }
            if let Some(max) = maximum {
                obj.insert("maximum".to_string(), json!(max));
            }
        }
        if let Some(obj) = property.as_object_mut() {
            obj.insert("description".to_string(), Value::String(description));
        }

        properties.insert(spec.name.to_string(), property);
        if spec.required {
            required.push(Value::String(spec.name.to_string()));
        }
    }

    let mut schema = Map::new();
    schema.insert("type".to_string(), json!("object"));
    schema.insert("properties".to_string(), Value::Object(properties));
    schema.insert("required".to_string(), Value::Array(required));
    schema
}

/// A type that can be read from a JSON argument.
pub trait ParamType: Sized {
    /// Type name used in error messages.
    const TYPE_NAME: &'static str;

    fn from_value(value: &Value) -> Option<Self>;

    /// Whether the value counts as absent for a required parameter.
    fn is_zero(&self) -> bool;
}

impl ParamType for String {
    const TYPE_NAME: &'static str = "string";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl ParamType for u32 {
    const TYPE_NAME: &'static str = "integer";

    fn from_value(value: &Value) -> Option<Self> {
        if let Some(n) = value.as_u64() {
            return u32::try_from(n).ok();
        }
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX))
            .map(|f| f as u32)
    }

    fn is_zero(&self) -> bool {
        *self == 0
    }
}

/// Fetch a required parameter. Absent, `null` or zero values are missing.
pub fn required_param<T: ParamType>(args: &Arguments, name: &str) -> Result<T, ToolError> {
    match args.get(name) {
        None | Some(Value::Null) => Err(ToolError::missing_parameter(name)),
        Some(value) => {
            let value =
                T::from_value(value).ok_or_else(|| ToolError::invalid_type(name, T::TYPE_NAME))?;
            if value.is_zero() {
                return Err(ToolError::missing_parameter(name));
            }
            Ok(value)
        }
    }
}

/// Fetch an optional parameter. Absent or `null` gives `None`.
pub fn optional_param<T: ParamType>(args: &Arguments, name: &str) -> Result<Option<T>, ToolError> {
    match args.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => T::from_value(value)
            .map(Some)
            .ok_or_else(|| ToolError::invalid_type(name, T::TYPE_NAME)),
    }
}

/// Fetch an optional integer parameter, enforcing the bounds declared in its spec.
pub fn optional_bounded(args: &Arguments, spec: ParamSpec) -> Result<Option<u32>, ToolError> {
    let value = optional_param::<u32>(args, spec.name)?;
    if let (Some(v), ParamKind::Integer { minimum, maximum }) = (value, spec.kind) {
        if let Some(min) = minimum.filter(|min| v < *min) {
            return Err(ToolError::invalid_value(spec.name, format!("must be at least {min}")));
        }
        if let Some(max) = maximum.filter(|max| v > *max) {
            return Err(ToolError::invalid_value(spec.name, format!("must be at most {max}")));
        }
    }
    Ok(value)
}

/// Fetch the pagination parameters.
pub fn optional_pagination(args: &Arguments) -> Result<Page, ToolError> {
    Ok(Page {
        page: optional_bounded(args, PAGE)?,
        per_page: optional_bounded(args, PER_PAGE)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(value: Value) -> Arguments {
        value.as_object().cloned().unwrap()
    }

    fn translator() -> Translator {
        Translator::with_sources("KB_CLOUD_MCP_UNIT_TEST_UNSET_", HashMap::new())
    }

    #[test]
    fn test_required_string() {
        let a = args(json!({ "org_name": "acme" }));
        let org: String = required_param(&a, "org_name").unwrap();
        assert_eq!(org, "acme");
    }

    #[test]
    fn test_required_missing() {
        let a = args(json!({}));
        let err = required_param::<String>(&a, "env_name").unwrap_err();
        assert!(err.is_soft());
        assert_eq!(err.to_string(), "missing required parameter: env_name");
    }

    #[test]
    fn test_required_empty_counts_as_missing() {
        let a = args(json!({ "env_name": "" }));
        let err = required_param::<String>(&a, "env_name").unwrap_err();
        assert!(matches!(err, ToolError::MissingParameter(name) if name == "env_name"));
    }

    #[test]
    fn test_required_wrong_type() {
        let a = args(json!({ "org_name": 42 }));
        let err = required_param::<String>(&a, "org_name").unwrap_err();
        assert_eq!(err.to_string(), "parameter org_name is not of type string");
    }

    #[test]
    fn test_optional_integer() {
        let a = args(json!({ "page": 3, "perPage": 50.0 }));
        assert_eq!(optional_param::<u32>(&a, "page").unwrap(), Some(3));
        assert_eq!(optional_param::<u32>(&a, "perPage").unwrap(), Some(50));
        assert_eq!(optional_param::<u32>(&a, "missing").unwrap(), None);
    }

    #[test]
    fn test_optional_wrong_type_fails() {
        let a = args(json!({ "page": "two" }));
        let err = optional_pagination(&a).unwrap_err();
        assert_eq!(err.to_string(), "parameter page is not of type integer");

        let a = args(json!({ "perPage": 1.5 }));
        assert!(optional_pagination(&a).is_err());
    }

    #[test]
    fn test_pagination_out_of_range_is_soft_error() {
        let err = optional_pagination(&args(json!({ "page": 0 }))).unwrap_err();
        assert!(err.is_soft());
        assert_eq!(err.to_string(), "parameter page must be at least 1");

        let err = optional_pagination(&args(json!({ "page": 2, "perPage": 5000 }))).unwrap_err();
        assert_eq!(err.to_string(), "parameter perPage must be at most 100");

        let page = optional_pagination(&args(json!({ "page": 1, "perPage": 100 }))).unwrap();
        assert_eq!(
            page,
            Page {
                page: Some(1),
                per_page: Some(100),
            }
        );
    }

    #[test]
    fn test_pagination_defaults() {
        let page = optional_pagination(&args(json!({}))).unwrap();
        assert_eq!(page, Page::default());
    }

    #[test]
    fn test_input_schema() {
        let schema = input_schema("list_environments", &[ORG_NAME, PAGE, PER_PAGE], &translator());

        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["org_name"]));
        assert_eq!(schema["properties"]["org_name"]["type"], "string");
        assert_eq!(schema["properties"]["org_name"]["description"], "Organization name");
        assert_eq!(schema["properties"]["perPage"]["maximum"], 100);
        assert_eq!(schema["properties"]["page"]["minimum"], 1);

        let keys: Vec<_> = schema["properties"].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["org_name", "page", "perPage"]);
    }

    #[test]
    fn test_input_schema_descriptions_are_translated() {
        let mut file = HashMap::new();
        file.insert(
            "TOOL_GET_BACKUP_BACKUP_ID_DESCRIPTION".to_string(),
            "Backup identifier".to_string(),
        );
        let t = Translator::with_sources("KB_CLOUD_MCP_UNIT_TEST_UNSET_", file);
        let spec = ParamSpec::required_string("backup_id", "Backup ID");

        let schema = input_schema("get_backup", &[spec], &t);

        assert_eq!(schema["properties"]["backup_id"]["description"], "Backup identifier");
    }
}
