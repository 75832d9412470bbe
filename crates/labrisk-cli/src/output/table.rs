use labrisk_core::evaluate::outcome::AnalysisResult;
use labrisk_core::trace::TraceSeverity;

pub fn print(result: &AnalysisResult, verbose: bool) {
    let b = &result.breakdown;

    println!("=== Risk analysis ===\n");
    println!(
        "  Overall: {} ({}/100)\n",
        b.risk_level,
        b.final_score.round_dp(1).normalize()
    );
    println!("  {}", b.reason);
    println!("  Critical scenario: {}\n", result.critical_scenario);

    // Category scores
    println!("  {:<16}  {:>5}  {:>5}  {:>8}", "Category", "Max", "Mean", "Weighted");
    println!("  {}", "-".repeat(40));
    println!(
        "  {:<16}  {:>5}  {:>5}  {:>8}",
        "flammability",
        b.raw.flammability.normalize(),
        b.means.flammability.normalize(),
        b.weighted.flammability.round_dp(2).normalize()
    );
    println!(
        "  {:<16}  {:>5}  {:>5}  {:>8}",
        "toxicity",
        b.raw.toxicity.normalize(),
        b.means.toxicity.normalize(),
        b.weighted.toxicity.round_dp(2).normalize()
    );
    println!(
        "  {:<16}  {:>5}  {:>5}  {:>8}",
        "incompatibility",
        b.applied.incompatibility.normalize(),
        "-",
        b.weighted.incompatibility.round_dp(2).normalize()
    );
    println!();

    // Per-substance results
    let max_name = result
        .substances
        .iter()
        .map(|s| s.name.chars().count())
        .max()
        .unwrap_or(10);
    println!("  Substances:");
    for s in &result.substances {
        let marker = if s.found { "" } else { " (not in catalog)" };
        println!(
            "    {:<width$}  {:<18} {:>3}  {:<14} {:>3}{}",
            s.name,
            s.flammability.class.to_string(),
            s.flammability.score.normalize(),
            s.toxicity.level.to_string(),
            s.toxicity.score.normalize(),
            marker,
            width = max_name
        );
        if verbose {
            println!("      {}", s.flammability.reason);
            println!("      {}", s.toxicity.reason);
        }
    }
    println!();

    if !result.incompatibilities.is_empty() {
        println!("  Incompatible pairs:");
        for pair in &result.incompatibilities {
            let level = pair
                .level
                .map(|l| l.to_string())
                .unwrap_or_else(|| "UNKNOWN".into());
            let danger = if pair.is_dangerous { "  [DANGEROUS]" } else { "" };
            println!(
                "    {} + {} -> {} ({}){}",
                pair.substances[0],
                pair.substances[1],
                level,
                pair.score.normalize(),
                danger
            );
            if verbose {
                println!("      {}", pair.reason);
            }
        }
        println!();
    }

    if let Some(d) = &result.dangerous_reaction {
        println!(
            "  Dangerous reaction: {} + {} -> {} ({}), {}\n",
            d.substances[0], d.substances[1], d.product, d.product_formula, d.severity
        );
    }

    println!("  Environment: {}\n", result.environment.reason);

    if !result.warnings.is_empty() {
        println!("  Warnings:");
        for w in &result.warnings {
            let tag = match w.severity {
                TraceSeverity::Critical => "!!",
                TraceSeverity::Important => "! ",
                TraceSeverity::Info => "  ",
            };
            println!("    {} {}", tag, w.message);
        }
        println!();
    }

    if !result.recommendations.is_empty() {
        println!("  Recommendations:");
        for r in &result.recommendations {
            println!("    - {r}");
        }
        println!();
    }

    if verbose {
        println!("  Explanation:");
        for (i, step) in result.explanations.iter().enumerate() {
            println!("    {:>2}. [{:?}] {}", i + 1, step.step_type, step.message);
        }
        println!();
    }
}
