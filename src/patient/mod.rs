//! Patient data model
//!
//! Baseline records supplied by a patient store and the transient
//! readings evaluated against them.

pub mod reading;
pub mod record;

pub use reading::Reading;
pub use record::{BloodPressure, HealthInfo, ParseBloodPressureError, PatientRecord};
