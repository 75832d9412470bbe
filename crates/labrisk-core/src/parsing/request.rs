use crate::config::ScoringConfig;
use crate::error::AnalysisError;
use crate::model::{AnalysisRequest, LabContext};
use crate::parsing::normalize::alphanumeric_len;
use crate::parsing::values::decimal_from_json;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

/// Accepted lab temperature range in °C, absolute zero to a furnace.
pub const MIN_TEMPERATURE_C: Decimal = dec!(-273.15);
pub const MAX_TEMPERATURE_C: Decimal = dec!(1000);

/// Parse a JSON analysis request.
///
/// Expected shape:
/// ```json
/// { "substances": ["Ethanol", "Acetone"],
///   "quantities": { "Ethanol": 500 },
///   "context": { "temperature_c": 25, "humidity_percent": 50, "ventilation": true } }
/// ```
///
/// Shape problems are collected and returned together as
/// [`AnalysisError::InvalidRequest`]. Content rules (count, name quality)
/// are checked by [`validate_request`].
pub fn parse_request(json: &str) -> Result<AnalysisRequest, AnalysisError> {
    let value: Value = serde_json::from_str(json).map_err(|e| AnalysisError::InvalidRequest {
        errors: vec![format!("request is not valid JSON: {e}")],
    })?;

    let Value::Object(root) = value else {
        return Err(invalid("request must be a JSON object"));
    };

    let mut errors = Vec::new();

    let substances = match root.get("substances") {
        None | Some(Value::Null) => {
            errors.push("field 'substances' is required".to_string());
            Vec::new()
        }
        Some(Value::Array(items)) => parse_names(items, &mut errors),
        Some(_) => {
            errors.push("field 'substances' must be a list of names".to_string());
            Vec::new()
        }
    };

    let quantities = match root.get("quantities") {
        None | Some(Value::Null) => BTreeMap::new(),
        Some(Value::Object(map)) => parse_quantities(map, &mut errors),
        Some(_) => {
            errors.push("field 'quantities' must be an object of name to amount".to_string());
            BTreeMap::new()
        }
    };

    let context = match root.get("context") {
        None | Some(Value::Null) => None,
        Some(Value::Object(map)) => Some(parse_context(map, &mut errors)),
        Some(_) => {
            errors.push("field 'context' must be an object".to_string());
            None
        }
    };

    if !errors.is_empty() {
        return Err(AnalysisError::InvalidRequest { errors });
    }

    Ok(AnalysisRequest {
        substances,
        quantities,
        context,
    })
}

/// Check the content rules of a request: 1 to `max_substances` names, each
/// carrying at least 2 alphanumeric characters, temperature within
/// [`MIN_TEMPERATURE_C`]..=[`MAX_TEMPERATURE_C`], humidity within 0–100 %.
pub fn validate_request(
    request: &AnalysisRequest,
    config: &ScoringConfig,
) -> Result<(), AnalysisError> {
    let mut errors = Vec::new();

    if request.substances.is_empty() {
        errors.push("the substance list must not be empty".to_string());
    } else if request.substances.len() > config.max_substances {
        errors.push(format!(
            "too many substances: {} given, maximum {} per analysis",
            request.substances.len(),
            config.max_substances
        ));
    }

    for name in &request.substances {
        if alphanumeric_len(name) < 2 {
            errors.push(format!(
                "invalid substance name '{name}': at least 2 letters or digits are required"
            ));
        }
    }

    if let Some(temperature) = request.context.as_ref().and_then(|c| c.temperature_c) {
        if temperature < MIN_TEMPERATURE_C || temperature > MAX_TEMPERATURE_C {
            errors.push(format!(
                "temperature must be between {MIN_TEMPERATURE_C} and {MAX_TEMPERATURE_C} °C, got {temperature}"
            ));
        }
    }

    if let Some(humidity) = request.context.as_ref().and_then(|c| c.humidity_percent) {
        if humidity < Decimal::ZERO || humidity > Decimal::ONE_HUNDRED {
            errors.push(format!("humidity must be between 0 and 100 %, got {humidity}"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AnalysisError::InvalidRequest { errors })
    }
}

fn parse_names(items: &[Value], errors: &mut Vec<String>) -> Vec<String> {
    let mut names = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        match item {
            Value::String(s) => names.push(s.clone()),
            other => errors.push(format!(
                "substance #{} must be a string, got {}",
                i + 1,
                json_type(other)
            )),
        }
    }
    names
}

fn parse_quantities(map: &Map<String, Value>, errors: &mut Vec<String>) -> BTreeMap<String, Decimal> {
    let mut quantities = BTreeMap::new();
    for (name, value) in map {
        match decimal_from_json(value) {
            Some(q) if q >= Decimal::ZERO => {
                quantities.insert(name.clone(), q);
            }
            Some(q) => errors.push(format!("quantity for '{name}' must not be negative, got {q}")),
            None => errors.push(format!("quantity for '{name}' must be a number")),
        }
    }
    quantities
}

fn parse_context(map: &Map<String, Value>, errors: &mut Vec<String>) -> LabContext {
    let temperature_c = optional_reading(map, "temperature_c", errors);
    let humidity_percent = optional_reading(map, "humidity_percent", errors);

    let ventilation = match map.get("ventilation") {
        None | Some(Value::Null) => None,
        Some(Value::Bool(b)) => Some(*b),
        Some(_) => {
            errors.push("context field 'ventilation' must be true or false".to_string());
            None
        }
    };

    LabContext {
        temperature_c,
        humidity_percent,
        ventilation,
    }
}

fn optional_reading(map: &Map<String, Value>, key: &str, errors: &mut Vec<String>) -> Option<Decimal> {
    match map.get(key) {
        None | Some(Value::Null) => None,
        Some(value) => {
            let parsed = decimal_from_json(value);
            if parsed.is_none() {
                errors.push(format!("context field '{key}' must be a number"));
            }
            parsed
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

fn invalid(message: &str) -> AnalysisError {
    AnalysisError::InvalidRequest {
        errors: vec![message.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_full_request() {
        let req = parse_request(
            r#"{"substances": ["Ethanol", "Acetone"],
                "quantities": {"Ethanol": 500},
                "context": {"temperature_c": 25.5, "humidity_percent": 40, "ventilation": false}}"#,
        )
        .unwrap();
        assert_eq!(req.substances, vec!["Ethanol", "Acetone"]);
        assert_eq!(req.quantities.get("Ethanol"), Some(&dec!(500)));
        let ctx = req.context.unwrap();
        assert_eq!(ctx.temperature_c, Some(dec!(25.5)));
        assert_eq!(ctx.humidity_percent, Some(dec!(40)));
        assert_eq!(ctx.ventilation, Some(false));
    }

    #[test]
    fn test_parse_minimal_request() {
        let req = parse_request(r#"{"substances": ["Water"]}"#).unwrap();
        assert_eq!(req.substances.len(), 1);
        assert!(req.context.is_none());
        assert!(req.quantities.is_empty());
    }

    #[test]
    fn test_missing_substances() {
        let err = parse_request(r#"{"context": {}}"#).unwrap_err();
        assert!(err.messages()[0].contains("'substances' is required"));
    }

    #[test]
    fn test_substances_not_a_list() {
        let err = parse_request(r#"{"substances": "Ethanol"}"#).unwrap_err();
        assert!(err.messages()[0].contains("must be a list"));
    }

    #[test]
    fn test_malformed_context_collects_all_errors() {
        let err = parse_request(
            r#"{"substances": [1], "context": {"temperature_c": "hot", "ventilation": "yes"}}"#,
        )
        .unwrap_err();
        let messages = err.messages();
        assert_eq!(messages.len(), 3, "{messages:?}");
    }

    #[test]
    fn test_context_not_object() {
        let err = parse_request(r#"{"substances": ["Water"], "context": [1, 2]}"#).unwrap_err();
        assert!(err.messages()[0].contains("'context' must be an object"));
    }

    #[test]
    fn test_not_json() {
        let err = parse_request("substances: water").unwrap_err();
        assert!(err.messages()[0].contains("not valid JSON"));
    }

    #[test]
    fn test_validate_empty_list() {
        let req = AnalysisRequest::new::<&str>(&[]);
        let err = validate_request(&req, &ScoringConfig::default()).unwrap_err();
        assert!(err.messages()[0].contains("must not be empty"));
    }

    #[test]
    fn test_validate_too_many() {
        let names: Vec<String> = (0..11).map(|i| format!("substance {i}")).collect();
        let req = AnalysisRequest::new(&names);
        let err = validate_request(&req, &ScoringConfig::default()).unwrap_err();
        assert!(err.messages()[0].contains("maximum 10"));
    }

    #[test]
    fn test_validate_short_names() {
        let req = AnalysisRequest::new(&["A", "--", "HCl"]);
        let err = validate_request(&req, &ScoringConfig::default()).unwrap_err();
        assert_eq!(err.messages().len(), 2);
    }

    #[test]
    fn test_validate_humidity_range() {
        let req = AnalysisRequest::new(&["Water"]).with_context(LabContext {
            temperature_c: Some(dec!(20)),
            humidity_percent: Some(dec!(120)),
            ventilation: None,
        });
        assert!(validate_request(&req, &ScoringConfig::default()).is_err());
    }

    #[test]
    fn test_validate_temperature_range() {
        let hot = AnalysisRequest::new(&["Water"]).with_context(LabContext {
            temperature_c: Some(dec!(70000000000000000000000000000)),
            humidity_percent: Some(dec!(90)),
            ventilation: Some(false),
        });
        match validate_request(&hot, &ScoringConfig::default()) {
            Err(AnalysisError::InvalidRequest { errors }) => {
                assert_eq!(errors.len(), 1);
                assert!(errors[0].contains("temperature"));
            }
            other => panic!("expected InvalidRequest, got {other:?}"),
        }

        let cold = AnalysisRequest::new(&["Water"]).with_context(LabContext {
            temperature_c: Some(dec!(-300)),
            humidity_percent: None,
            ventilation: None,
        });
        assert!(validate_request(&cold, &ScoringConfig::default()).is_err());

        let edge = AnalysisRequest::new(&["Water"]).with_context(LabContext {
            temperature_c: Some(MAX_TEMPERATURE_C),
            humidity_percent: None,
            ventilation: None,
        });
        assert!(validate_request(&edge, &ScoringConfig::default()).is_ok());
    }

    #[test]
    fn test_validate_ok() {
        let req = AnalysisRequest::new(&["Ethanol", "Xyz123"]);
        assert!(validate_request(&req, &ScoringConfig::default()).is_ok());
    }
}
