//! # herbtrace-rules — Domain Validation Engine
//!
//! Five independent, pure, deterministic rule checks, each operating on a
//! static rule table compiled into the crate:
//!
//! - [`geo`] — is the harvest location inside an approved collection zone?
//! - [`season`] — is the harvest date inside the herb's seasonal window?
//! - [`quality`] — do the lab metrics satisfy the herb's thresholds?
//! - [`sustainability`] — is the harvest quantity within the seasonal cap?
//! - [`processing`] — are the processing conditions inside the permitted
//!   envelope for this herb and processing type?
//!
//! ## Determinism Invariant
//!
//! Rule checks never perform I/O, never read the clock, and never consult
//! anything beyond their arguments and the const tables. The same inputs
//! produce the same outcome on every ledger executor — a requirement for
//! any platform that validates transactions by re-execution.
//!
//! Each check returns a serializable outcome struct rather than a bare
//! bool; creation-time outcomes are embedded verbatim in the batch document
//! under `validationResults`.
//!
//! ## Crate Policy
//!
//! - Rule tables are `&'static` const slices — immutable, no runtime
//!   configuration surface.
//! - Herb names match case-insensitively; herbs absent from a table pass
//!   that table's check unconditionally.

pub mod geo;
pub mod processing;
pub mod quality;
pub mod season;
pub mod sustainability;

pub use geo::GeoCheck;
pub use processing::{ProcessingCheck, ProcessingConditions};
pub use quality::{QualityCheck, QualityMetrics};
pub use season::SeasonCheck;
pub use sustainability::{SustainabilityCheck, Vulnerability};
