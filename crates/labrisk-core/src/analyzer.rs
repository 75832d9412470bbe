use crate::catalog::SubstanceRepository;
use crate::config::{validate_config, ScoringConfig};
use crate::error::AnalysisError;
use crate::evaluate::advice::{
    build_recommendations, context_warnings, critical_scenario, risk_drivers,
};
use crate::evaluate::outcome::{
    AnalysisResult, CategoryMeans, CategoryScores, SubstanceAssessment,
};
use crate::evaluate::{
    adjust_for_environment, aggregate, evaluate_all_pairs, evaluate_flammability, evaluate_toxicity,
};
use crate::model::{AnalysisRequest, Substance};
use crate::parsing::validate_request;
use crate::rules::validate_rule_tables;
use crate::trace::{Trace, TraceSeverity, TraceStepType};
use rust_decimal::Decimal;

/// Run the full pipeline for one request.
///
/// Validate, resolve, evaluate each substance, evaluate every pair and look
/// for known dangerous reactions, aggregate, adjust for the environment,
/// then assemble the result. Validation failures short-circuit with
/// [`AnalysisError::InvalidRequest`].
pub fn run_analysis(
    request: &AnalysisRequest,
    repo: &dyn SubstanceRepository,
    config: &ScoringConfig,
) -> Result<AnalysisResult, AnalysisError> {
    validate_config(config)
        .and_then(|_| validate_rule_tables())
        .map_err(|e| AnalysisError::Internal(e.to_string()))?;
    validate_request(request, config)?;

    tracing::debug!(substances = request.substances.len(), "request accepted");

    let mut trace = Trace::default();

    // Resolve every requested name, falling back to a placeholder
    let mut resolved = Vec::with_capacity(request.substances.len());
    let mut found_flags = Vec::with_capacity(request.substances.len());
    for requested in &request.substances {
        let (substance, found) = resolve(requested, repo, &mut trace);
        trace.step(
            TraceStepType::Normalize,
            format!("'{}' -> '{}'", requested, substance.normalized_name),
        );
        resolved.push(substance);
        found_flags.push(found);
    }

    // Per-substance evaluation
    let mut assessments = Vec::with_capacity(resolved.len());
    for ((requested, substance), found) in request.substances.iter().zip(&resolved).zip(found_flags) {
        let flammability = evaluate_flammability(substance, &config.flammability);
        let toxicity = evaluate_toxicity(substance, &config.toxicity);
        trace.step(TraceStepType::Flammability, flammability.reason.clone());
        trace.step(TraceStepType::Toxicity, toxicity.reason.clone());
        if found && toxicity.default_applied {
            trace.warn_substance(
                &substance.name,
                TraceSeverity::Info,
                format!(
                    "Toxicity of '{}' unknown or unrecognized; precautionary level {} applied",
                    substance.name, toxicity.level
                ),
            );
        }

        assessments.push(SubstanceAssessment {
            requested_name: requested.clone(),
            name: substance.name.clone(),
            cas: substance.cas.clone(),
            found,
            quantity: request.quantities.get(requested).copied(),
            flammability,
            toxicity,
        });
    }

    let (max_flammability, mean_flammability) =
        max_and_mean(assessments.iter().map(|a| a.flammability.score));
    let (max_toxicity, mean_toxicity) = max_and_mean(assessments.iter().map(|a| a.toxicity.score));

    // Pairs and dangerous reactions
    let findings = evaluate_all_pairs(&resolved, repo.incompatibilities(), &config.incompatibility);
    if findings.pairs.is_empty() {
        trace.step(
            TraceStepType::Incompatibility,
            match resolved.len() {
                1 => "single substance, no pair to evaluate".to_string(),
                n => format!("{} pairs evaluated, no incompatibility found", n * (n - 1) / 2),
            },
        );
    }
    for pair in &findings.pairs {
        trace.step(TraceStepType::Incompatibility, pair.reason.clone());
    }
    let max_incompatibility = findings
        .pairs
        .first()
        .map(|p| p.score)
        .unwrap_or(Decimal::ZERO);

    if let Some(d) = &findings.dangerous {
        trace.step(
            TraceStepType::DangerousReaction,
            format!(
                "{} + {}: {} ({}) -> {}",
                d.substances[0], d.substances[1], d.product, d.product_formula, d.severity
            ),
        );
        trace.warn(
            TraceSeverity::Critical,
            format!(
                "Known dangerous reaction: {} + {} can release {} ({})",
                d.substances[0], d.substances[1], d.product, d.product_formula
            ),
        );
    }

    // Aggregate
    let raw = CategoryScores {
        flammability: max_flammability,
        toxicity: max_toxicity,
        incompatibility: max_incompatibility,
    };
    let means = CategoryMeans {
        flammability: mean_flammability,
        toxicity: mean_toxicity,
    };
    let dangerous = findings.dangerous.is_some();
    let mut breakdown = aggregate(&raw, means, dangerous, config);
    trace.step(TraceStepType::Aggregate, breakdown.reason.clone());

    // Environment
    let context = request.effective_context();
    let floor = if dangerous {
        config.dangerous_reaction.final_floor
    } else {
        Decimal::ZERO
    };
    let environment = adjust_for_environment(breakdown.base_score, &context, floor);
    trace.step(TraceStepType::Environment, environment.reason.clone());

    breakdown.final_score = environment.final_score;
    breakdown.risk_level = config.risk_level(environment.final_score);

    context_warnings(&mut trace, &context, &breakdown.raw, &environment);

    let recommendations = build_recommendations(
        resolved.len(),
        &findings.pairs,
        &breakdown.raw,
        breakdown.risk_level,
        findings.dangerous.as_ref(),
        config,
    );
    let drivers = risk_drivers(&breakdown.raw, config);
    let scenario = critical_scenario(&breakdown.raw, findings.dangerous.as_ref(), config);

    tracing::info!(
        substances = resolved.len(),
        incompatible_pairs = findings.pairs.len(),
        dangerous,
        final_score = %breakdown.final_score,
        level = %breakdown.risk_level,
        "analysis complete"
    );

    let (explanations, warnings) = trace.into_parts();

    Ok(AnalysisResult {
        breakdown,
        substances: assessments,
        incompatibilities: findings.pairs,
        dangerous_reaction: findings.dangerous,
        environment,
        risk_drivers: drivers,
        critical_scenario: scenario,
        recommendations,
        warnings,
        explanations,
    })
}

fn resolve(requested: &str, repo: &dyn SubstanceRepository, trace: &mut Trace) -> (Substance, bool) {
    match repo.find_substance(requested) {
        Some(substance) => {
            tracing::debug!(requested, resolved = %substance.name, "substance resolved");
            trace.step(
                TraceStepType::Resolve,
                format!("'{}' found in the catalog as {}", requested, substance.name),
            );
            (substance, true)
        }
        None => {
            trace.warn_substance(
                requested,
                TraceSeverity::Important,
                format!("Substance '{requested}' not found in the catalog; evaluated with default values"),
            );
            trace.step(
                TraceStepType::Resolve,
                format!("'{requested}' not found, placeholder used"),
            );
            (Substance::placeholder(requested), false)
        }
    }
}

/// Maximum and mean (one decimal) of a non-empty series; zeros when empty.
fn max_and_mean(scores: impl Iterator<Item = Decimal>) -> (Decimal, Decimal) {
    let mut max = Decimal::ZERO;
    let mut sum = Decimal::ZERO;
    let mut count = 0u32;
    for s in scores {
        max = max.max(s);
        sum += s;
        count += 1;
    }
    if count == 0 {
        return (Decimal::ZERO, Decimal::ZERO);
    }
    (max, (sum / Decimal::from(count)).round_dp(1))
}
