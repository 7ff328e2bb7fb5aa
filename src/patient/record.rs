//! Baseline patient records

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Blood pressure measurement in mmHg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BloodPressure {
    pub systolic: i32,
    pub diastolic: i32,
}

impl BloodPressure {
    pub fn new(systolic: i32, diastolic: i32) -> Self {
        Self {
            systolic,
            diastolic,
        }
    }
}

impl fmt::Display for BloodPressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.systolic, self.diastolic)
    }
}

/// Error parsing a `systolic/diastolic` pair
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid blood pressure '{0}', expected <systolic>/<diastolic>")]
pub struct ParseBloodPressureError(pub String);

impl FromStr for BloodPressure {
    type Err = ParseBloodPressureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseBloodPressureError(s.to_string());

        let (systolic, diastolic) = s.split_once('/').ok_or_else(invalid)?;
        let systolic = systolic.trim().parse().map_err(|_| invalid())?;
        let diastolic = diastolic.trim().parse().map_err(|_| invalid())?;

        Ok(Self::new(systolic, diastolic))
    }
}

/// Baseline vital signs for a patient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthInfo {
    /// Normal body temperature, compared with exact decimal arithmetic
    pub normal_temperature: Decimal,
    /// Normal blood pressure
    pub blood_pressure: BloodPressure,
}

impl HealthInfo {
    pub fn new(normal_temperature: Decimal, blood_pressure: BloodPressure) -> Self {
        Self {
            normal_temperature,
            blood_pressure,
        }
    }
}

/// Stored patient record
///
/// Records are immutable once built; stores hand out clones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    id: String,
    name: String,
    surname: String,
    birthday: NaiveDate,
    health_info: HealthInfo,
}

impl PatientRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        surname: impl Into<String>,
        birthday: NaiveDate,
        health_info: HealthInfo,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            surname: surname.into(),
            birthday,
            health_info,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    pub fn birthday(&self) -> NaiveDate {
        self.birthday
    }

    pub fn health_info(&self) -> &HealthInfo {
        &self.health_info
    }

    /// "Name Surname"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}
