use crate::parsing::normalize::normalize;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A laboratory substance as known to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substance {
    /// CAS registry number, if known.
    pub cas: Option<String>,
    /// Display name.
    pub name: String,
    /// Canonical lookup key, see [`normalize`].
    pub normalized_name: String,
    /// Flash point in °C. Absent means non-flammable.
    pub flash_point_c: Option<Decimal>,
    /// Qualitative toxicity label, free text.
    pub toxicity: Option<String>,
    /// Chemical family used by generic incompatibility rules (e.g. "acid").
    pub family: Option<String>,
}

impl Substance {
    pub fn new(name: &str) -> Self {
        Substance {
            cas: None,
            name: name.trim().to_string(),
            normalized_name: normalize(name),
            flash_point_c: None,
            toxicity: None,
            family: None,
        }
    }

    pub fn with_cas(mut self, cas: &str) -> Self {
        self.cas = Some(cas.trim().to_string());
        self
    }

    pub fn with_flash_point(mut self, flash_point_c: Decimal) -> Self {
        self.flash_point_c = Some(flash_point_c);
        self
    }

    pub fn with_toxicity(mut self, label: &str) -> Self {
        self.toxicity = Some(label.to_string());
        self
    }

    pub fn with_family(mut self, family: &str) -> Self {
        self.family = Some(family.to_string());
        self
    }

    /// Conservative stand-in for a name the catalog does not know.
    ///
    /// No flash point (non-flammable), no toxicity label (the toxicity
    /// evaluator falls back to its precautionary default) and an
    /// unclassified family.
    pub fn placeholder(name: &str) -> Self {
        Substance::new(name).with_family("unclassified")
    }
}

/// Risk level documented for an incompatible pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncompatibilityLevel {
    None,
    Low,
    Moderate,
    High,
    Severe,
}

impl IncompatibilityLevel {
    /// Interpret a free-text risk level. Returns `None` when the label is
    /// not recognized; callers score that as moderate.
    pub fn from_str_loose(s: &str) -> Option<IncompatibilityLevel> {
        let lower = normalize(s);
        if lower.is_empty() {
            return None;
        }
        if lower.contains("severe") || lower.contains("critical") || lower.contains("extreme") {
            Some(IncompatibilityLevel::Severe)
        } else if lower.contains("high") {
            Some(IncompatibilityLevel::High)
        } else if lower.contains("moderate") || lower.contains("medium") {
            Some(IncompatibilityLevel::Moderate)
        } else if lower.contains("low") || lower.contains("minor") {
            Some(IncompatibilityLevel::Low)
        } else if lower == "none" || lower == "no" || lower == "compatible" {
            Some(IncompatibilityLevel::None)
        } else {
            None
        }
    }
}

impl fmt::Display for IncompatibilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncompatibilityLevel::None => write!(f, "NONE"),
            IncompatibilityLevel::Low => write!(f, "LOW"),
            IncompatibilityLevel::Moderate => write!(f, "MODERATE"),
            IncompatibilityLevel::High => write!(f, "HIGH"),
            IncompatibilityLevel::Severe => write!(f, "SEVERE"),
        }
    }
}

/// A documented incompatibility between two substances. The pair is
/// unordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncompatibilityRecord {
    pub substance_a: String,
    pub substance_b: String,
    /// `None` when the source label was not recognized.
    pub risk_level: Option<IncompatibilityLevel>,
    /// Raw reaction type tags, e.g. "exothermic, toxic gas".
    #[serde(default)]
    pub reaction_type: Option<String>,
    #[serde(default)]
    pub justification: Option<String>,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub product_formula: Option<String>,
    #[serde(default)]
    pub equation: Option<String>,
}

impl IncompatibilityRecord {
    pub fn new(substance_a: &str, substance_b: &str, risk_level: IncompatibilityLevel) -> Self {
        IncompatibilityRecord {
            substance_a: substance_a.to_string(),
            substance_b: substance_b.to_string(),
            risk_level: Some(risk_level),
            reaction_type: None,
            justification: None,
            product: None,
            product_formula: None,
            equation: None,
        }
    }

    pub fn with_reaction_type(mut self, reaction_type: &str) -> Self {
        self.reaction_type = Some(reaction_type.to_string());
        self
    }

    pub fn with_product(mut self, product: &str, formula: &str) -> Self {
        self.product = Some(product.to_string());
        self.product_formula = Some(formula.to_string());
        self
    }

    pub fn with_equation(mut self, equation: &str) -> Self {
        self.equation = Some(equation.to_string());
        self
    }

    pub fn with_justification(mut self, justification: &str) -> Self {
        self.justification = Some(justification.to_string());
        self
    }

    /// True if this record covers the pair of already-normalized keys, in
    /// either order.
    pub fn matches(&self, key_a: &str, key_b: &str) -> bool {
        let a = normalize(&self.substance_a);
        let b = normalize(&self.substance_b);
        (a == key_a && b == key_b) || (a == key_b && b == key_a)
    }
}

/// Three-tier qualitative risk classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "LOW"),
            RiskLevel::Moderate => write!(f, "MODERATE"),
            RiskLevel::High => write!(f, "HIGH"),
        }
    }
}

/// The three scored hazard categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardCategory {
    Flammability,
    Toxicity,
    Incompatibility,
}

impl fmt::Display for HazardCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HazardCategory::Flammability => write!(f, "flammability"),
            HazardCategory::Toxicity => write!(f, "toxicity"),
            HazardCategory::Incompatibility => write!(f, "incompatibility"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlammabilityClass {
    VeryFlammable,
    Flammable,
    SlightlyFlammable,
    NonFlammable,
}

impl fmt::Display for FlammabilityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlammabilityClass::VeryFlammable => write!(f, "VERY_FLAMMABLE"),
            FlammabilityClass::Flammable => write!(f, "FLAMMABLE"),
            FlammabilityClass::SlightlyFlammable => write!(f, "SLIGHTLY_FLAMMABLE"),
            FlammabilityClass::NonFlammable => write!(f, "NON_FLAMMABLE"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ToxicityLevel {
    VeryToxic,
    Toxic,
    Harmful,
    Irritant,
    SlightlyToxic,
    NonToxic,
}

impl ToxicityLevel {
    /// All levels, most severe first.
    pub const ALL: [ToxicityLevel; 6] = [
        ToxicityLevel::VeryToxic,
        ToxicityLevel::Toxic,
        ToxicityLevel::Harmful,
        ToxicityLevel::Irritant,
        ToxicityLevel::SlightlyToxic,
        ToxicityLevel::NonToxic,
    ];

    /// Canonical name in normalized form ("very toxic").
    pub fn canonical_key(&self) -> &'static str {
        match self {
            ToxicityLevel::VeryToxic => "very toxic",
            ToxicityLevel::Toxic => "toxic",
            ToxicityLevel::Harmful => "harmful",
            ToxicityLevel::Irritant => "irritant",
            ToxicityLevel::SlightlyToxic => "slightly toxic",
            ToxicityLevel::NonToxic => "non toxic",
        }
    }
}

impl fmt::Display for ToxicityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToxicityLevel::VeryToxic => write!(f, "VERY_TOXIC"),
            ToxicityLevel::Toxic => write!(f, "TOXIC"),
            ToxicityLevel::Harmful => write!(f, "HARMFUL"),
            ToxicityLevel::Irritant => write!(f, "IRRITANT"),
            ToxicityLevel::SlightlyToxic => write!(f, "SLIGHTLY_TOXIC"),
            ToxicityLevel::NonToxic => write!(f, "NON_TOXIC"),
        }
    }
}

/// Ambient laboratory conditions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabContext {
    pub temperature_c: Option<Decimal>,
    pub humidity_percent: Option<Decimal>,
    /// `None` is treated as ventilated.
    pub ventilation: Option<bool>,
}

impl LabContext {
    /// Conditions assumed when a request carries no context at all:
    /// ventilated room at 22 °C, humidity unknown.
    pub fn standard() -> Self {
        LabContext {
            temperature_c: Some(Decimal::from(22)),
            humidity_percent: None,
            ventilation: Some(true),
        }
    }

    pub fn is_ventilated(&self) -> bool {
        self.ventilation.unwrap_or(true)
    }
}

/// A request to score a set of substances handled together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub substances: Vec<String>,
    /// Quantity per requested name (mL or g). Reported, not scored.
    #[serde(default)]
    pub quantities: BTreeMap<String, Decimal>,
    #[serde(default)]
    pub context: Option<LabContext>,
}

impl AnalysisRequest {
    pub fn new<S: AsRef<str>>(names: &[S]) -> Self {
        AnalysisRequest {
            substances: names.iter().map(|n| n.as_ref().to_string()).collect(),
            quantities: BTreeMap::new(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: LabContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_quantity(mut self, name: &str, quantity: Decimal) -> Self {
        self.quantities.insert(name.to_string(), quantity);
        self
    }

    /// The context to analyze under, falling back to [`LabContext::standard`].
    pub fn effective_context(&self) -> LabContext {
        self.context.clone().unwrap_or_else(LabContext::standard)
    }
}
