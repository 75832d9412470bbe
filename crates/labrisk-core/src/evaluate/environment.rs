use crate::evaluate::outcome::{clamp_score, EnvironmentAdjustment};
use crate::model::LabContext;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Multiplier for a lab temperature in °C.
///
/// < 20 → 0.70, 20..=30 → 1.00, 30..=50 → +2 % per degree above 30,
/// > 50 → 1.40 plus 4 % per degree above 50.
pub fn temperature_factor(temperature_c: Decimal) -> Decimal {
    if temperature_c < dec!(20) {
        dec!(0.70)
    } else if temperature_c <= dec!(30) {
        dec!(1.00)
    } else if temperature_c <= dec!(50) {
        dec!(1) + (temperature_c - dec!(30)) * dec!(0.02)
    } else {
        (temperature_c - dec!(50))
            .checked_mul(dec!(0.04))
            .and_then(|extra| extra.checked_add(dec!(1.40)))
            .unwrap_or(Decimal::MAX)
    }
}

/// Multiplier for relative humidity in percent.
pub fn humidity_factor(humidity_percent: Decimal) -> Decimal {
    if humidity_percent < dec!(20) {
        dec!(0.95)
    } else if humidity_percent <= dec!(40) {
        dec!(0.98)
    } else if humidity_percent <= dec!(60) {
        dec!(1.00)
    } else if humidity_percent <= dec!(80) {
        dec!(1.02)
    } else {
        dec!(1.05)
    }
}

pub fn ventilation_factor(ventilated: bool) -> Decimal {
    if ventilated {
        dec!(0.85)
    } else {
        dec!(1.00)
    }
}

/// Apply the environmental multipliers to a base score.
///
/// Multipliers apply only when both temperature and humidity are known;
/// otherwise the base score passes through. The floor (100 for a known
/// dangerous reaction, else 0) applies in both cases.
pub fn adjust_for_environment(base_score: Decimal, context: &LabContext, floor: Decimal) -> EnvironmentAdjustment {
    let ventilated = context.is_ventilated();

    let (applied, t, h, v, adjusted) = match (context.temperature_c, context.humidity_percent) {
        (Some(temperature), Some(humidity)) => {
            let t = temperature_factor(temperature);
            let h = humidity_factor(humidity);
            let v = ventilation_factor(ventilated);
            // Saturate instead of overflowing; the result is clamped to 100 anyway.
            let product = base_score
                .checked_mul(t)
                .and_then(|x| x.checked_mul(h))
                .and_then(|x| x.checked_mul(v))
                .unwrap_or(Decimal::MAX);
            (true, t, h, v, product)
        }
        _ => (false, Decimal::ONE, Decimal::ONE, Decimal::ONE, base_score),
    };

    let final_score = clamp_score(adjusted).max(floor);

    tracing::debug!(
        applied,
        temperature_factor = %t,
        humidity_factor = %h,
        ventilation_factor = %v,
        floor = %floor,
        final_score = %final_score,
        "environment adjusted"
    );

    let reason = if applied {
        let mut r = format!(
            "base {} × temperature {} × humidity {} × ventilation {} -> {}",
            base_score.round_dp(2),
            t.normalize(),
            h.normalize(),
            v.normalize(),
            clamp_score(adjusted).round_dp(2)
        );
        if final_score > clamp_score(adjusted) {
            r.push_str(&format!(", raised to the dangerous-reaction floor {floor}"));
        }
        r
    } else if final_score > base_score {
        format!(
            "temperature or humidity unknown, multipliers skipped; base {} raised to the dangerous-reaction floor {floor}",
            base_score.round_dp(2)
        )
    } else {
        "temperature or humidity unknown, multipliers skipped".to_string()
    };

    EnvironmentAdjustment {
        applied,
        temperature_c: context.temperature_c,
        humidity_percent: context.humidity_percent,
        ventilated,
        temperature_factor: t,
        humidity_factor: h,
        ventilation_factor: v,
        floor,
        base_score,
        final_score,
        reason,
    }
}
