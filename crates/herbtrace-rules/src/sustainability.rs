//! # Sustainability Limit Check
//!
//! Regulated herbs carry a seasonal harvest cap and a conservation
//! vulnerability tier. The check compares the harvest quantity against the
//! cap and computes a 0-100 score: start at 100, subtract 30 for exceeding
//! the cap, 20 for a high-vulnerability species, 10 for a moderate one,
//! floored at 0. Validity follows the cap alone; the score is advisory and
//! feeds the consumer-facing aggregate.

use serde::{Deserialize, Serialize};

/// Conservation vulnerability tier of a species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vulnerability {
    High,
    Moderate,
    Low,
}

impl Vulnerability {
    /// Score penalty applied for this tier.
    pub fn penalty(&self) -> i32 {
        match self {
            Self::High => 20,
            Self::Moderate => 10,
            Self::Low => 0,
        }
    }
}

/// Per-herb seasonal harvest cap.
#[derive(Debug, Clone, Copy)]
pub struct Cap {
    pub herb: &'static str,
    /// Maximum quantity per batch for one season, kilograms.
    pub seasonal_cap_kg: f64,
    pub vulnerability: Vulnerability,
}

/// Seasonal caps per regulated herb.
pub const CAPS: &[Cap] = &[
    Cap {
        herb: "ashwagandha",
        seasonal_cap_kg: 500.0,
        vulnerability: Vulnerability::Moderate,
    },
    Cap {
        herb: "shatavari",
        seasonal_cap_kg: 200.0,
        vulnerability: Vulnerability::High,
    },
    Cap {
        herb: "brahmi",
        seasonal_cap_kg: 300.0,
        vulnerability: Vulnerability::Moderate,
    },
    Cap {
        herb: "tulsi",
        seasonal_cap_kg: 800.0,
        vulnerability: Vulnerability::Low,
    },
];

/// Outcome of a sustainability-limit check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SustainabilityCheck {
    /// True iff the quantity is within the seasonal cap (or the herb is
    /// unregulated).
    pub valid: bool,
    /// 0-100 conservation score.
    pub score: u32,
    /// The cap applied, if the herb is regulated.
    pub limit_kg: Option<f64>,
    /// The vulnerability tier, if the herb is regulated.
    pub vulnerability: Option<Vulnerability>,
}

/// Compare a harvest quantity (kilograms) against the herb's seasonal cap.
pub fn check(herb: &str, quantity_kg: f64) -> SustainabilityCheck {
    let Some(cap) = CAPS.iter().find(|c| c.herb.eq_ignore_ascii_case(herb)) else {
        return SustainabilityCheck {
            valid: true,
            score: 100,
            limit_kg: None,
            vulnerability: None,
        };
    };

    let over_cap = quantity_kg > cap.seasonal_cap_kg;
    let mut score: i32 = 100;
    if over_cap {
        score -= 30;
    }
    score -= cap.vulnerability.penalty();

    SustainabilityCheck {
        valid: !over_cap,
        score: score.max(0) as u32,
        limit_kg: Some(cap.seasonal_cap_kg),
        vulnerability: Some(cap.vulnerability),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn over_cap_high_vulnerability_scores_fifty() {
        // 200 kg cap, high tier: 100 - 30 - 20 = 50.
        let out = check("shatavari", 250.0);
        assert!(!out.valid);
        assert_eq!(out.score, 50);
        assert_eq!(out.limit_kg, Some(200.0));
        assert_eq!(out.vulnerability, Some(Vulnerability::High));
    }

    #[test]
    fn within_cap_keeps_tier_penalty_only() {
        let out = check("ashwagandha", 100.0);
        assert!(out.valid);
        assert_eq!(out.score, 90); // moderate tier
    }

    #[test]
    fn low_tier_within_cap_is_perfect() {
        let out = check("tulsi", 50.0);
        assert!(out.valid);
        assert_eq!(out.score, 100);
    }

    #[test]
    fn cap_boundary_is_within() {
        assert!(check("shatavari", 200.0).valid);
        assert!(!check("shatavari", 200.1).valid);
    }

    #[test]
    fn unknown_herb_passes_with_default_score() {
        let out = check("dandelion", 10_000.0);
        assert!(out.valid);
        assert_eq!(out.score, 100);
        assert!(out.limit_kg.is_none());
    }

    #[test]
    fn embedded_outcome_uses_camel_case_fields() {
        // The outcome is persisted verbatim inside batch documents.
        let json = serde_json::to_value(check("shatavari", 250.0)).unwrap();
        assert_eq!(json["valid"], false);
        assert_eq!(json["limitKg"], 200.0);
        assert_eq!(json["vulnerability"], "high");
    }
}
