//! Property tests for the rule engine: rule checks are total over their
//! input domains and their outcomes stay inside documented bounds.

use herbtrace_core::Timestamp;
use herbtrace_rules::{geo, quality, season, sustainability, QualityMetrics};
use proptest::prelude::*;

proptest! {
    /// The sustainability score never leaves 0..=100, for any herb name and
    /// any finite non-negative quantity.
    #[test]
    fn sustainability_score_bounded(herb in "[a-z]{1,12}", qty in 0.0f64..1e9) {
        let out = sustainability::check(&herb, qty);
        prop_assert!(out.score <= 100);
    }

    /// A quantity within the cap is always valid; over the cap never is.
    #[test]
    fn cap_decides_validity(qty in 0.0f64..1e6) {
        let out = sustainability::check("shatavari", qty);
        prop_assert_eq!(out.valid, qty <= 200.0);
    }

    /// Every month of the year gets a definite seasonal answer for every
    /// table herb, and the wraparound window accepts exactly the months
    /// outside [end+1, start-1].
    #[test]
    fn season_total_over_months(month in 1u32..=12) {
        let date = Timestamp::parse(&format!("2024-{month:02}-15")).unwrap();
        let out = season::check("ashwagandha", date);
        // Window [10, 3]: valid iff month >= 10 or month <= 3.
        prop_assert_eq!(out.valid, month >= 10 || month <= 3);
    }

    /// Geo checks are total over the coordinate plane and a reported zone
    /// implies validity.
    #[test]
    fn geo_zone_implies_valid(lat in -90.0f64..90.0, lon in -180.0f64..180.0) {
        let out = geo::check(lat, lon);
        prop_assert_eq!(out.zone.is_some(), out.valid);
    }

    /// Quality validity is exactly "no issues"; warnings never affect it.
    #[test]
    fn quality_valid_iff_no_issues(
        moisture in 0.0f64..30.0,
        pesticide in 0.0f64..2.0,
        purity in 0.0f64..100.0,
    ) {
        let out = quality::check(
            "ashwagandha",
            &QualityMetrics { moisture, pesticide, purity },
        );
        prop_assert_eq!(out.valid, out.issues.is_empty());
    }
}
