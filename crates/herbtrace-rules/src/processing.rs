//! # Processing Condition Check
//!
//! Processing limits are keyed by (processing type, herb): a maximum
//! temperature, and for drying a minimum duration as well. Combinations
//! absent from the table pass unconditionally — the table only constrains
//! the steps known to degrade actives.

use serde::{Deserialize, Serialize};

/// Permitted envelope for one (processing type, herb) combination.
#[derive(Debug, Clone, Copy)]
pub struct ConditionLimit {
    pub processing_type: &'static str,
    pub herb: &'static str,
    /// Maximum process temperature, degrees Celsius.
    pub max_temp_c: f64,
    /// Minimum duration in hours, where the process has one (drying).
    pub min_duration_hours: Option<f64>,
}

/// Processing-condition limits.
pub const LIMITS: &[ConditionLimit] = &[
    ConditionLimit {
        processing_type: "drying",
        herb: "ashwagandha",
        max_temp_c: 60.0,
        min_duration_hours: Some(24.0),
    },
    ConditionLimit {
        processing_type: "drying",
        herb: "tulsi",
        max_temp_c: 45.0,
        min_duration_hours: Some(12.0),
    },
    ConditionLimit {
        processing_type: "drying",
        herb: "brahmi",
        max_temp_c: 50.0,
        min_duration_hours: Some(18.0),
    },
    ConditionLimit {
        processing_type: "grinding",
        herb: "ashwagandha",
        max_temp_c: 45.0,
        min_duration_hours: None,
    },
    ConditionLimit {
        processing_type: "extraction",
        herb: "brahmi",
        max_temp_c: 80.0,
        min_duration_hours: None,
    },
];

/// The conditions a processor reports for a step.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingConditions {
    /// Process temperature, degrees Celsius.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Process duration, hours.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_hours: Option<f64>,
    /// Free-form method note (e.g. "shade-dried").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

/// Outcome of a processing-condition check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingCheck {
    pub valid: bool,
    pub violations: Vec<String>,
}

/// Check reported conditions against the (type, herb) envelope.
///
/// When a limit row exists, the constrained quantities must be reported:
/// a missing temperature (or missing duration for drying) is a violation,
/// not a pass — unverifiable conditions do not get the benefit of the doubt.
pub fn check(processing_type: &str, herb: &str, conditions: &ProcessingConditions) -> ProcessingCheck {
    let Some(limit) = LIMITS.iter().find(|l| {
        l.processing_type.eq_ignore_ascii_case(processing_type) && l.herb.eq_ignore_ascii_case(herb)
    }) else {
        return ProcessingCheck {
            valid: true,
            violations: Vec::new(),
        };
    };

    let mut violations = Vec::new();

    match conditions.temperature {
        Some(t) if t > limit.max_temp_c => violations.push(format!(
            "temperature {t}°C exceeds maximum {}°C",
            limit.max_temp_c
        )),
        Some(_) => {}
        None => violations.push("temperature not recorded".to_string()),
    }

    if let Some(min_hours) = limit.min_duration_hours {
        match conditions.duration_hours {
            Some(h) if h < min_hours => violations.push(format!(
                "duration {h}h below minimum {min_hours}h"
            )),
            Some(_) => {}
            None => violations.push("duration not recorded".to_string()),
        }
    }

    ProcessingCheck {
        valid: violations.is_empty(),
        violations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn within_envelope_passes() {
        let out = check(
            "drying",
            "ashwagandha",
            &ProcessingConditions {
                temperature: Some(55.0),
                duration_hours: Some(36.0),
                method: None,
            },
        );
        assert!(out.valid);
    }

    #[test]
    fn over_temperature_fails() {
        let out = check(
            "drying",
            "ashwagandha",
            &ProcessingConditions {
                temperature: Some(70.0),
                duration_hours: Some(36.0),
                method: None,
            },
        );
        assert!(!out.valid);
        assert!(out.violations[0].contains("temperature"));
    }

    #[test]
    fn short_drying_fails() {
        let out = check(
            "drying",
            "tulsi",
            &ProcessingConditions {
                temperature: Some(40.0),
                duration_hours: Some(6.0),
                method: None,
            },
        );
        assert!(!out.valid);
        assert!(out.violations[0].contains("duration"));
    }

    #[test]
    fn unreported_conditions_fail_when_limited() {
        let out = check("drying", "ashwagandha", &ProcessingConditions::default());
        assert!(!out.valid);
        assert_eq!(out.violations.len(), 2);
    }

    #[test]
    fn unknown_combination_passes() {
        let out = check("fermentation", "ashwagandha", &ProcessingConditions::default());
        assert!(out.valid);
    }

    #[test]
    fn non_drying_step_ignores_duration() {
        let out = check(
            "grinding",
            "ashwagandha",
            &ProcessingConditions {
                temperature: Some(40.0),
                duration_hours: None,
                method: None,
            },
        );
        assert!(out.valid);
    }
}
