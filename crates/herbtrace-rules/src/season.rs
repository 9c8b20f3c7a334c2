//! # Seasonal Window Check
//!
//! Each regulated herb has a permitted harvest window `[start_month,
//! end_month]`. Windows may wrap the year boundary: `[10, 3]` means
//! October through March, so a January harvest is valid and a June
//! harvest is not. Herbs absent from the table pass unconditionally.

use herbtrace_core::Timestamp;
use serde::{Deserialize, Serialize};

/// A per-herb harvest window in calendar months (1-12), inclusive.
#[derive(Debug, Clone, Copy)]
pub struct Window {
    pub herb: &'static str,
    pub start_month: u32,
    pub end_month: u32,
}

/// Permitted harvest windows.
pub const WINDOWS: &[Window] = &[
    // Roots are dug after the monsoon growth season, through winter.
    Window {
        herb: "ashwagandha",
        start_month: 10,
        end_month: 3,
    },
    Window {
        herb: "tulsi",
        start_month: 6,
        end_month: 9,
    },
    Window {
        herb: "brahmi",
        start_month: 2,
        end_month: 5,
    },
    Window {
        herb: "shatavari",
        start_month: 11,
        end_month: 2,
    },
    Window {
        herb: "neem",
        start_month: 3,
        end_month: 6,
    },
];

/// Outcome of a seasonal-window check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonCheck {
    pub valid: bool,
    /// The `[start_month, end_month]` window applied, if the herb is regulated.
    pub window: Option<(u32, u32)>,
}

/// Check the harvest date's calendar month against the herb's window.
pub fn check(herb: &str, harvest_date: Timestamp) -> SeasonCheck {
    let Some(w) = WINDOWS
        .iter()
        .find(|w| w.herb.eq_ignore_ascii_case(herb))
    else {
        return SeasonCheck {
            valid: true,
            window: None,
        };
    };

    let month = harvest_date.month();
    let valid = if w.start_month <= w.end_month {
        month >= w.start_month && month <= w.end_month
    } else {
        // Wraparound window spanning the year boundary.
        month >= w.start_month || month <= w.end_month
    };

    SeasonCheck {
        valid,
        window: Some((w.start_month, w.end_month)),
    }
}
