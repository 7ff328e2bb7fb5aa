//! Command-line interface for the vitalwatch binary

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use crate::patient::{BloodPressure, HealthInfo, PatientRecord};

/// Check patient vital signs against their personal baselines
#[derive(Parser, Debug)]
#[command(name = "vitalwatch")]
#[command(version)]
#[command(about = "Check patient vital signs against their personal baselines", long_about = None)]
pub struct Args {
    /// Patient store (overrides VITALWATCH_PATIENTS_FILE)
    #[arg(short = 'f', long)]
    pub patients_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check a blood pressure reading
    Bp {
        patient_id: String,
        /// Reading as systolic/diastolic, e.g. 120/80
        reading: BloodPressure,
    },

    /// Check a body temperature reading
    Temp {
        patient_id: String,
        reading: Decimal,
    },

    /// Register a patient with baseline vitals
    Add(AddArgs),

    /// List registered patients
    List,

    /// Remove a patient
    Remove { patient_id: String },
}

/// Patient details for the `add` command
#[derive(clap::Args, Debug)]
pub struct AddArgs {
    pub patient_id: String,
    pub name: String,
    pub surname: String,
    /// Date of birth, YYYY-MM-DD
    pub birthday: NaiveDate,
    /// Normal body temperature
    pub temperature: Decimal,
    /// Normal blood pressure as systolic/diastolic
    pub blood_pressure: BloodPressure,
}

impl AddArgs {
    pub fn to_record(&self) -> PatientRecord {
        PatientRecord::new(
            self.patient_id.clone(),
            self.name.clone(),
            self.surname.clone(),
            self.birthday,
            HealthInfo::new(self.temperature, self.blood_pressure),
        )
    }
}
