use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceSeverity {
    Critical,
    Important,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceStepType {
    Normalize,
    Resolve,
    Flammability,
    Toxicity,
    Incompatibility,
    DangerousReaction,
    Aggregate,
    Environment,
}

/// One explained pipeline decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStep {
    pub step_type: TraceStepType,
    pub message: String,
}

/// A data-quality or contextual warning attached to a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceWarning {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substance: Option<String>,
    pub message: String,
    pub severity: TraceSeverity,
}

/// Accumulates explanations and warnings while an analysis runs.
#[derive(Debug, Default)]
pub struct Trace {
    steps: Vec<TraceStep>,
    warnings: Vec<TraceWarning>,
}

impl Trace {
    pub fn step(&mut self, step_type: TraceStepType, message: impl Into<String>) {
        self.steps.push(TraceStep {
            step_type,
            message: message.into(),
        });
    }

    pub fn warn(&mut self, severity: TraceSeverity, message: impl Into<String>) {
        self.push_warning(None, severity, message.into());
    }

    pub fn warn_substance(&mut self, substance: &str, severity: TraceSeverity, message: impl Into<String>) {
        self.push_warning(Some(substance.to_string()), severity, message.into());
    }

    fn push_warning(&mut self, substance: Option<String>, severity: TraceSeverity, message: String) {
        tracing::warn!(substance = substance.as_deref().unwrap_or("-"), "{message}");
        self.warnings.push(TraceWarning {
            substance,
            message,
            severity,
        });
    }

    pub fn into_parts(self) -> (Vec<TraceStep>, Vec<TraceWarning>) {
        (self.steps, self.warnings)
    }
}
