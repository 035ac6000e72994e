//! Compliance scoring for uploaded timetables.
//!
//! Issue detection and banding are the meaningful rules here. The headline
//! number comes from [`PlaceholderModel`], a fixed heuristic standing in for a
//! predictive model; it carries no learned weights.

use log::info;

use crate::data::{
    ComplianceAssessment, ComplianceBand, ModelIndicators, PERIODS_PER_DAY, TOTAL_SLOTS,
    TimetableRow,
};
use crate::error::TimetableError;

/// Slot values that do not count as academic periods.
const NON_ACADEMIC: [&str; 3] = ["PE", "Art", "Free"];
/// Slot values that satisfy the wellness rule.
const WELLNESS: [&str; 2] = ["PE", "Art"];
const MAX_ACADEMIC_PER_DAY: usize = 4;

/// Fixed-length numeric view of the first 30 slot values.
pub type SlotEncoding = [f64; TOTAL_SLOTS];

/// Scores a parsed table. Fails with `EmptyInput` when there are no rows.
pub fn score(rows: &[TimetableRow]) -> Result<ComplianceAssessment, TimetableError> {
    if rows.is_empty() {
        return Err(TimetableError::EmptyInput);
    }

    let encoding = encode(rows);
    let prediction = PlaceholderModel.predict(&encoding);
    let issues = detect_issues(rows);
    let band = ComplianceBand::from_score(prediction.compliance);

    info!(
        "Scored {} rows: {:.2}% ({band}), {} issues",
        rows.len(),
        prediction.compliance,
        issues.len()
    );

    Ok(ComplianceAssessment {
        score: prediction.compliance,
        band,
        issues,
        indicators: ModelIndicators {
            academic_balance: prediction.academic_balance,
            stress_risk: prediction.stress_risk,
        },
    })
}

/// Per-row rule checks, in row order.
pub fn detect_issues(rows: &[TimetableRow]) -> Vec<String> {
    let mut issues = Vec::new();
    for row in rows {
        let academic = row
            .slots
            .iter()
            .filter(|s| !NON_ACADEMIC.contains(&s.as_str()))
            .count();
        if academic > MAX_ACADEMIC_PER_DAY {
            issues.push(format!("{}: Too many academic periods", row.day));
        }
        if !row.slots.iter().any(|s| WELLNESS.contains(&s.as_str())) {
            issues.push(format!("{}: Missing wellness/art session", row.day));
        }
    }
    issues
}

/// "Free" -> 0, "PE" -> 0.5, anything else -> 1. Positions with no value are 0.
pub fn encode(rows: &[TimetableRow]) -> SlotEncoding {
    let mut encoding = [0.0; TOTAL_SLOTS];
    let values = rows.iter().flat_map(|r| r.slots.iter());
    for (slot, value) in encoding.iter_mut().zip(values) {
        *slot = match value.as_str() {
            "Free" => 0.0,
            "PE" => 0.5,
            _ => 1.0,
        };
    }
    encoding
}

/// Percentages produced by the placeholder model, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub compliance: f64,
    pub academic_balance: f64,
    pub stress_risk: f64,
}

/// Deterministic stand-in for a trained compliance model.
///
/// - compliance: `100 * (1 - |mean - 0.75| / 0.75)`, clamped to `[0, 100]`.
///   0.75 is the mean of a day with four academic periods, one PE and one
///   free period.
/// - academic balance: `100 * mean`.
/// - stress risk: share of adjacent slot pairs inside each six-slot day block
///   that are both academic.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderModel;

impl PlaceholderModel {
    pub const TARGET_LOAD: f64 = 0.75;

    pub fn predict(&self, encoding: &SlotEncoding) -> Prediction {
        let mean = encoding.iter().sum::<f64>() / TOTAL_SLOTS as f64;
        let compliance =
            (1.0 - (mean - Self::TARGET_LOAD).abs() / Self::TARGET_LOAD).clamp(0.0, 1.0);

        let mut pairs = 0usize;
        let mut heavy_pairs = 0usize;
        for day in encoding.chunks(PERIODS_PER_DAY) {
            for pair in day.windows(2) {
                pairs += 1;
                if pair[0] >= 1.0 && pair[1] >= 1.0 {
                    heavy_pairs += 1;
                }
            }
        }

        Prediction {
            compliance: round2(compliance * 100.0),
            academic_balance: round2(mean * 100.0),
            stress_risk: round2(heavy_pairs as f64 / pairs as f64 * 100.0),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
