pub mod analyzer;
pub mod catalog;
pub mod config;
pub mod error;
pub mod evaluate;
pub mod model;
pub mod parsing;
pub mod rules;
pub mod trace;

use catalog::SubstanceRepository;
use config::ScoringConfig;
use error::AnalysisError;
use evaluate::outcome::AnalysisResult;
use model::{AnalysisRequest, LabContext};

/// Main API entry point: score the combined hazard of a set of substances.
///
/// The repository is only read; results are fully determined by the
/// request, the repository contents and the config.
pub fn analyze(
    request: &AnalysisRequest,
    repo: &dyn SubstanceRepository,
    config: &ScoringConfig,
) -> Result<AnalysisResult, AnalysisError> {
    analyzer::run_analysis(request, repo, config)
}

/// Analyze one substance under optional lab conditions.
pub fn analyze_single(
    name: &str,
    context: Option<LabContext>,
    repo: &dyn SubstanceRepository,
    config: &ScoringConfig,
) -> Result<AnalysisResult, AnalysisError> {
    let mut request = AnalysisRequest::new(&[name]);
    request.context = context;
    analyze(&request, repo, config)
}

/// Analyze a pair of substances under optional lab conditions.
pub fn analyze_pair(
    a: &str,
    b: &str,
    context: Option<LabContext>,
    repo: &dyn SubstanceRepository,
    config: &ScoringConfig,
) -> Result<AnalysisResult, AnalysisError> {
    let mut request = AnalysisRequest::new(&[a, b]);
    request.context = context;
    analyze(&request, repo, config)
}

/// Parse a JSON request and analyze it.
pub fn analyze_json(
    json: &str,
    repo: &dyn SubstanceRepository,
    config: &ScoringConfig,
) -> Result<AnalysisResult, AnalysisError> {
    let request = parsing::parse_request(json)?;
    analyze(&request, repo, config)
}
