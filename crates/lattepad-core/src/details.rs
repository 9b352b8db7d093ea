use serde_json::Value;

use crate::error::CoreError;

/// Parse the details buffer into the JSON object whose values the rendering
/// service substitutes into the template.
///
/// The service decodes details into a string-keyed map, so valid JSON that is
/// not an object is rejected here instead of by the service. Returning an
/// explicit error keeps the submission path from ever issuing a request with
/// details it could not parse.
pub fn parse_details(source: &str) -> Result<Value, CoreError> {
    let value: Value = serde_json::from_str(source)?;
    if !value.is_object() {
        return Err(CoreError::DetailsNotObject(json_type_name(&value)));
    }
    Ok(value)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
