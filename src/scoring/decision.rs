//! Decision and risk-tier mapping
//!
//! Pure mapping from probability and threshold to a loan decision, a
//! four-tier risk label, and a human-readable message.

use serde::Serialize;

/// Loan decision against the operating threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Decision {
    #[serde(rename = "ACCORDÉ")]
    Accepted,
    #[serde(rename = "REFUSÉ")]
    Rejected,
}

/// Risk tier over the probability alone, independent of the threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskTier {
    #[serde(rename = "FAIBLE")]
    Low,
    #[serde(rename = "MODÉRÉ")]
    Moderate,
    #[serde(rename = "ÉLEVÉ")]
    High,
    #[serde(rename = "TRÈS ÉLEVÉ")]
    VeryHigh,
}

/// Decide against the operating threshold. The boundary rejects.
pub fn decide(probability: f64, threshold: f64) -> Decision {
    if probability >= threshold {
        Decision::Rejected
    } else {
        Decision::Accepted
    }
}

/// Tier cut points: [0, 0.2) / [0.2, 0.4) / [0.4, 0.6) / [0.6, 1]
pub fn risk_tier(probability: f64) -> RiskTier {
    if probability < 0.2 {
        RiskTier::Low
    } else if probability < 0.4 {
        RiskTier::Moderate
    } else if probability < 0.6 {
        RiskTier::High
    } else {
        RiskTier::VeryHigh
    }
}

/// Response message with the probability as a one-decimal percentage.
pub fn message(decision: Decision, probability: f64) -> String {
    let pct = probability * 100.0;
    match decision {
        Decision::Accepted => format!("Crédit accordé. Risque de défaut : {:.1}%", pct),
        Decision::Rejected => format!("Crédit refusé. Risque de défaut trop élevé : {:.1}%", pct),
    }
}
