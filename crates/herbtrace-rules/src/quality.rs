//! # Quality Threshold Check
//!
//! Lab-reported metrics are compared against per-herb thresholds: maximum
//! moisture content, maximum pesticide residue, minimum purity. Breaching a
//! threshold is a hard issue; reaching 80% of a maximum produces a warning.
//! Overall validity is "no issues" — warnings do not fail a test.

use serde::{Deserialize, Serialize};

/// Per-herb quality thresholds.
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    pub herb: &'static str,
    /// Maximum moisture content, percent by weight.
    pub moisture_max: f64,
    /// Maximum pesticide residue, ppm.
    pub pesticide_max: f64,
    /// Minimum purity, percent.
    pub purity_min: f64,
}

/// Quality thresholds per regulated herb.
pub const THRESHOLDS: &[Thresholds] = &[
    Thresholds {
        herb: "ashwagandha",
        moisture_max: 12.0,
        pesticide_max: 0.5,
        purity_min: 95.0,
    },
    Thresholds {
        herb: "tulsi",
        moisture_max: 10.0,
        pesticide_max: 0.3,
        purity_min: 90.0,
    },
    Thresholds {
        herb: "brahmi",
        moisture_max: 11.0,
        pesticide_max: 0.4,
        purity_min: 92.0,
    },
    Thresholds {
        herb: "shatavari",
        moisture_max: 12.0,
        pesticide_max: 0.5,
        purity_min: 93.0,
    },
];

/// The metrics a laboratory reports for a batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityMetrics {
    /// Moisture content, percent by weight.
    pub moisture: f64,
    /// Pesticide residue, ppm.
    pub pesticide: f64,
    /// Purity, percent.
    pub purity: f64,
}

/// Outcome of a quality-threshold check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityCheck {
    /// True iff `issues` is empty.
    pub valid: bool,
    /// Hard threshold breaches.
    pub issues: Vec<String>,
    /// Metrics at or above 80% of a maximum threshold.
    pub warnings: Vec<String>,
}

/// Fraction of a maximum threshold at which a warning fires.
const WARN_FRACTION: f64 = 0.8;

/// Compare reported metrics against the herb's thresholds.
pub fn check(herb: &str, metrics: &QualityMetrics) -> QualityCheck {
    let Some(t) = THRESHOLDS
        .iter()
        .find(|t| t.herb.eq_ignore_ascii_case(herb))
    else {
        return QualityCheck {
            valid: true,
            issues: Vec::new(),
            warnings: Vec::new(),
        };
    };

    let mut issues = Vec::new();
    let mut warnings = Vec::new();

    if metrics.moisture > t.moisture_max {
        issues.push(format!(
            "moisture {}% exceeds maximum {}%",
            metrics.moisture, t.moisture_max
        ));
    } else if metrics.moisture >= t.moisture_max * WARN_FRACTION {
        warnings.push(format!(
            "moisture {}% approaching maximum {}%",
            metrics.moisture, t.moisture_max
        ));
    }

    if metrics.pesticide > t.pesticide_max {
        issues.push(format!(
            "pesticide residue {} ppm exceeds maximum {} ppm",
            metrics.pesticide, t.pesticide_max
        ));
    } else if metrics.pesticide >= t.pesticide_max * WARN_FRACTION {
        warnings.push(format!(
            "pesticide residue {} ppm approaching maximum {} ppm",
            metrics.pesticide, t.pesticide_max
        ));
    }

    if metrics.purity < t.purity_min {
        issues.push(format!(
            "purity {}% below minimum {}%",
            metrics.purity, t.purity_min
        ));
    }

    QualityCheck {
        valid: issues.is_empty(),
        issues,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn good_metrics() -> QualityMetrics {
        QualityMetrics {
            moisture: 8.0,
            pesticide: 0.1,
            purity: 98.0,
        }
    }

    #[test]
    fn clean_metrics_pass() {
        let out = check("ashwagandha", &good_metrics());
        assert!(out.valid);
        assert!(out.issues.is_empty());
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn breach_is_an_issue() {
        let out = check(
            "ashwagandha",
            &QualityMetrics {
                moisture: 13.5,
                ..good_metrics()
            },
        );
        assert!(!out.valid);
        assert_eq!(out.issues.len(), 1);
        assert!(out.issues[0].contains("moisture"));
    }

    #[test]
    fn eighty_percent_is_a_warning_not_an_issue() {
        // 80% of the 12% moisture max is 9.6%.
        let out = check(
            "ashwagandha",
            &QualityMetrics {
                moisture: 10.0,
                ..good_metrics()
            },
        );
        assert!(out.valid);
        assert!(out.issues.is_empty());
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn low_purity_fails() {
        let out = check(
            "tulsi",
            &QualityMetrics {
                moisture: 5.0,
                pesticide: 0.05,
                purity: 85.0,
            },
        );
        assert!(!out.valid);
        assert!(out.issues[0].contains("purity"));
    }

    #[test]
    fn multiple_breaches_all_reported() {
        let out = check(
            "brahmi",
            &QualityMetrics {
                moisture: 20.0,
                pesticide: 2.0,
                purity: 50.0,
            },
        );
        assert_eq!(out.issues.len(), 3);
    }

    #[test]
    fn unknown_herb_passes() {
        let out = check(
            "dandelion",
            &QualityMetrics {
                moisture: 99.0,
                pesticide: 99.0,
                purity: 1.0,
            },
        );
        assert!(out.valid);
    }
}
