use crate::config::schema::FlammabilityScoring;
use crate::evaluate::outcome::FlammabilityAssessment;
use crate::model::{FlammabilityClass, Substance};
use rust_decimal::Decimal;

/// Classify a flash point. Absent means the substance is not flammable.
pub fn classify_by_flash_point(
    flash_point_c: Option<Decimal>,
    scoring: &FlammabilityScoring,
) -> (FlammabilityClass, Decimal) {
    match flash_point_c {
        None => (FlammabilityClass::NonFlammable, scoring.non_flammable),
        Some(fp) if fp < scoring.very_flammable_below => {
            (FlammabilityClass::VeryFlammable, scoring.very_flammable)
        }
        Some(fp) if fp < scoring.flammable_below => (FlammabilityClass::Flammable, scoring.flammable),
        Some(fp) if fp < scoring.slightly_flammable_below => {
            (FlammabilityClass::SlightlyFlammable, scoring.slightly_flammable)
        }
        Some(_) => (FlammabilityClass::NonFlammable, scoring.non_flammable),
    }
}

/// Score the flammability hazard of a substance from its flash point.
pub fn evaluate_flammability(substance: &Substance, scoring: &FlammabilityScoring) -> FlammabilityAssessment {
    let (class, score) = classify_by_flash_point(substance.flash_point_c, scoring);
    let name = &substance.name;

    let reason = match substance.flash_point_c {
        None => format!("{name}: no flash point -> {class}"),
        Some(fp) => match class {
            FlammabilityClass::VeryFlammable => format!(
                "{name}: flash point {fp} °C < {} °C -> {class}",
                scoring.very_flammable_below
            ),
            FlammabilityClass::Flammable => format!(
                "{name}: flash point {fp} °C in [{}, {}) °C -> {class}",
                scoring.very_flammable_below, scoring.flammable_below
            ),
            FlammabilityClass::SlightlyFlammable => format!(
                "{name}: flash point {fp} °C in [{}, {}) °C -> {class}",
                scoring.flammable_below, scoring.slightly_flammable_below
            ),
            FlammabilityClass::NonFlammable => format!(
                "{name}: flash point {fp} °C >= {} °C -> {class}",
                scoring.slightly_flammable_below
            ),
        },
    };

    FlammabilityAssessment {
        score,
        class,
        flash_point_c: substance.flash_point_c,
        reason,
    }
}
