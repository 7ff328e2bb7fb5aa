//! Vital-sign readings

use std::fmt;

use rust_decimal::Decimal;

use super::record::BloodPressure;

/// A newly observed vital sign
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reading {
    BloodPressure(BloodPressure),
    Temperature(Decimal),
}

impl From<BloodPressure> for Reading {
    fn from(bp: BloodPressure) -> Self {
        Reading::BloodPressure(bp)
    }
}

impl From<Decimal> for Reading {
    fn from(temperature: Decimal) -> Self {
        Reading::Temperature(temperature)
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::BloodPressure(bp) => write!(f, "{}", bp),
            Reading::Temperature(t) => write!(f, "{}", t),
        }
    }
}
