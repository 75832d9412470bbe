use labrisk_core::catalog::SubstanceCatalog;
use labrisk_core::config::ScoringConfig;
use labrisk_core::error::{AnalysisError, LabRiskError};
use labrisk_core::evaluate::outcome::AnalysisResult;
use labrisk_core::model::{AnalysisRequest, LabContext};
use std::path::Path;

use super::{open_catalog, open_config};
use crate::output;
use crate::{ContextArgs, RunArgs};

pub fn run_names(names: Vec<String>, context: &ContextArgs, args: &RunArgs) -> Result<(), LabRiskError> {
    let (catalog, config) = setup(args)?;
    let mut request = AnalysisRequest::new(&names);
    request.context = lab_context(context);
    let result = labrisk_core::analyze(&request, &catalog, &config);
    emit(result, args)
}

pub fn run_pair(a: &str, b: &str, context: &ContextArgs, args: &RunArgs) -> Result<(), LabRiskError> {
    let (catalog, config) = setup(args)?;
    let result = labrisk_core::analyze_pair(a, b, lab_context(context), &catalog, &config);
    emit(result, args)
}

pub fn run_single(name: &str, context: &ContextArgs, args: &RunArgs) -> Result<(), LabRiskError> {
    let (catalog, config) = setup(args)?;
    let result = labrisk_core::analyze_single(name, lab_context(context), &catalog, &config);
    emit(result, args)
}

pub fn run_file(request_file: &Path, args: &RunArgs) -> Result<(), LabRiskError> {
    let (catalog, config) = setup(args)?;
    let json = std::fs::read_to_string(request_file)?;
    let result = labrisk_core::analyze_json(&json, &catalog, &config);
    emit(result, args)
}

fn setup(args: &RunArgs) -> Result<(SubstanceCatalog, ScoringConfig), LabRiskError> {
    let catalog = open_catalog(args.catalog.as_deref())?;
    let config = open_config(args.config.as_deref())?;
    Ok((catalog, config))
}

/// Lab conditions, or `None` when no condition flag was given.
fn lab_context(args: &ContextArgs) -> Option<LabContext> {
    if args.temperature.is_none() && args.humidity.is_none() && !args.no_ventilation {
        return None;
    }
    Some(LabContext {
        temperature_c: args.temperature,
        humidity_percent: args.humidity,
        ventilation: Some(!args.no_ventilation),
    })
}

fn emit(result: Result<AnalysisResult, AnalysisError>, args: &RunArgs) -> Result<(), LabRiskError> {
    match (result, args.output.as_str()) {
        (Ok(result), "json") => output::json::print(&result),
        (Ok(result), _) => {
            output::table::print(&result, args.verbose);
            Ok(())
        }
        (Err(e), "json") => {
            output::json::print_failure(&e)?;
            Err(e.into())
        }
        (Err(e), _) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(temperature: Option<i64>, no_ventilation: bool) -> ContextArgs {
        ContextArgs {
            temperature: temperature.map(rust_decimal::Decimal::from),
            humidity: None,
            no_ventilation,
        }
    }

    #[test]
    fn test_no_flags_means_no_context() {
        assert!(lab_context(&context(None, false)).is_none());
    }

    #[test]
    fn test_no_ventilation_flag() {
        let ctx = lab_context(&context(None, true)).unwrap();
        assert_eq!(ctx.ventilation, Some(false));
        assert!(ctx.temperature_c.is_none());
    }

    #[test]
    fn test_temperature_implies_ventilated() {
        let ctx = lab_context(&context(Some(-5), false)).unwrap();
        assert_eq!(ctx.ventilation, Some(true));
        assert_eq!(ctx.temperature_c, Some(rust_decimal::Decimal::from(-5)));
    }
}
