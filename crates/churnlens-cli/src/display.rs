//! Terminal rendering for verdicts, feature vectors and the field catalogue.

use std::fmt::Display;

use churnlens_ai::{Prediction, Severity};
use churnlens_core::FeatureVector;
use churnlens_core::catalogue::{FIELDS, FieldKind, Section};

const SECTIONS: [Section; 3] = [Section::Customer, Section::Services, Section::Billing];

/// Print one line (or JSON object) per prediction. Returns the failure count.
pub fn print_predictions<E: Display>(
    results: &[Result<Prediction, E>],
    json: bool,
) -> anyhow::Result<usize> {
    let mut failed = 0;
    for (i, result) in results.iter().enumerate() {
        if result.is_err() {
            failed += 1;
        }
        if json {
            println!("{}", serde_json::to_string(&prediction_json(result))?);
        } else {
            print_verdict(i + 1, results.len(), result);
        }
    }
    Ok(failed)
}

fn print_verdict<E: Display>(n: usize, total: usize, result: &Result<Prediction, E>) {
    let prefix = if total > 1 {
        format!("[{n}] ")
    } else {
        String::new()
    };
    match result {
        Ok(p) => {
            let icon = match p.verdict.severity() {
                Severity::Success => "✅",
                Severity::Error => "❌",
            };
            println!("{prefix}{icon} {}", p.verdict);
        }
        Err(e) => eprintln!("{prefix}prediction failed: {e:#}"),
    }
}

fn prediction_json<E: Display>(result: &Result<Prediction, E>) -> serde_json::Value {
    match result {
        Ok(p) => serde_json::json!({
            "label": p.label.code(),
            "verdict": p.verdict.message(),
            "severity": p.verdict.severity().as_str(),
        }),
        Err(e) => serde_json::json!({ "error": format!("{e:#}") }),
    }
}

/// Print the named feature slots of one encoded profile.
pub fn print_features(n: usize, features: &FeatureVector) {
    println!("=== profile {n} ===");
    for (name, value) in features.iter() {
        println!("  {:<20} {}", name, value);
    }
    println!();
}

/// Print the field catalogue grouped by form section.
pub fn print_fields() {
    for section in SECTIONS {
        println!("{}", section.title());
        for spec in FIELDS.iter().filter(|f| f.section == section) {
            let domain = match spec.kind {
                FieldKind::Choice(_) => spec
                    .choices()
                    .iter()
                    .map(|c| format!("{c:?}"))
                    .collect::<Vec<_>>()
                    .join(", "),
                FieldKind::Count => "whole number ≥ 0".to_string(),
                FieldKind::Amount => "number ≥ 0".to_string(),
            };
            println!("  {:<18} {:<18} {}", spec.name, spec.label, domain);
        }
        println!();
    }
}
