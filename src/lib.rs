//! Vitalwatch: Patient Vital-Sign Monitoring
//!
//! Compares new vital-sign readings against each patient's stored baseline
//! and sends an alert when a reading is abnormal.
//!
//! # Rules
//!
//! - **Blood pressure**: any reading that differs from the baseline in
//!   either component raises `Warning, patient with id: <id>, need help`.
//! - **Temperature**: a reading more than 1.5 degrees below the baseline
//!   raises `Warning, patient with id: <id>, температура ниже нормы: <reading>`.
//!   Readings above the baseline never alert.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use chrono::NaiveDate;
//! use vitalwatch::alerts::LogSink;
//! use vitalwatch::evaluator::VitalsEvaluator;
//! use vitalwatch::patient::{BloodPressure, HealthInfo, PatientRecord};
//! use vitalwatch::repository::InMemoryRepository;
//!
//! let repo = InMemoryRepository::with_records(vec![PatientRecord::new(
//!     "patient-ivanov",
//!     "Иван",
//!     "Иванов",
//!     NaiveDate::from_ymd_opt(1950, 1, 1).unwrap(),
//!     HealthInfo::new("36.6".parse().unwrap(), BloodPressure::new(120, 80)),
//! )]);
//!
//! let evaluator = VitalsEvaluator::new(Arc::new(repo), Arc::new(LogSink));
//! let verdict = evaluator
//!     .check_blood_pressure("patient-ivanov", BloodPressure::new(60, 120))
//!     .unwrap();
//! assert!(verdict.is_alerted());
//! ```

pub mod alerts;
pub mod cli;
pub mod config;
pub mod evaluator;
pub mod patient;
pub mod repository;

// Re-export commonly used types
pub use alerts::{AlertSink, SinkError};
pub use evaluator::{Verdict, VitalsError, VitalsEvaluator};
pub use patient::{BloodPressure, HealthInfo, PatientRecord, Reading};
pub use repository::{PatientLookup, PatientRepository, RepositoryError};
