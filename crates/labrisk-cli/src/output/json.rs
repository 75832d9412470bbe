use labrisk_core::error::{AnalysisError, LabRiskError};
use labrisk_core::evaluate::outcome::AnalysisResult;

pub fn print(result: &AnalysisResult) -> Result<(), LabRiskError> {
    let mut value = serde_json::to_value(result)?;
    if let Some(obj) = value.as_object_mut() {
        obj.insert("success".into(), serde_json::Value::Bool(true));
    }
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

/// Failure document: `{ "success": false, "errors": [...] }`.
pub fn print_failure(error: &AnalysisError) -> Result<(), LabRiskError> {
    let value = serde_json::json!({
        "success": false,
        "errors": error.messages(),
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
