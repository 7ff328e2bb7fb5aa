//! Vital-sign evaluation against patient baselines
//!
//! Each check fetches the patient's baseline record, applies a single
//! rule and, when the reading is abnormal, sends exactly one alert.
//! The evaluator keeps no state between calls.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::alerts::{AlertSink, SinkError};
use crate::patient::{BloodPressure, Reading};
use crate::repository::{PatientLookup, RepositoryError};

/// Outcome of a single check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Reading within baseline, nothing sent
    Normal,
    /// Reading abnormal, `message` was sent to the alert sink
    Alerted { message: String },
}

impl Verdict {
    pub fn is_alerted(&self) -> bool {
        matches!(self, Verdict::Alerted { .. })
    }
}

/// Evaluation errors
#[derive(Debug, thiserror::Error)]
pub enum VitalsError {
    #[error("Patient lookup failed: {0}")]
    Lookup(#[from] RepositoryError),

    #[error("Alert delivery failed: {0}")]
    Sink(#[from] SinkError),
}

/// Largest drop below baseline temperature that is still normal (1.5 degrees)
fn temperature_drop_tolerance() -> Decimal {
    Decimal::new(15, 1)
}

/// Checks readings against baselines and raises alerts
pub struct VitalsEvaluator {
    lookup: Arc<dyn PatientLookup>,
    sink: Arc<dyn AlertSink>,
}

impl VitalsEvaluator {
    pub fn new(lookup: Arc<dyn PatientLookup>, sink: Arc<dyn AlertSink>) -> Self {
        Self { lookup, sink }
    }

    /// Alert unless the reading matches the baseline exactly
    pub fn check_blood_pressure(
        &self,
        patient_id: &str,
        reading: BloodPressure,
    ) -> Result<Verdict, VitalsError> {
        let record = self.lookup.get_by_id(patient_id)?;
        let baseline = record.health_info().blood_pressure;

        if reading == baseline {
            tracing::debug!(patient_id = %patient_id, reading = %reading, "Blood pressure normal");
            return Ok(Verdict::Normal);
        }

        let message = format!("Warning, patient with id: {}, need help", patient_id);
        self.alert(patient_id, message)
    }

    /// Alert when the reading is more than 1.5 degrees below baseline
    ///
    /// Readings above baseline never alert, however high.
    pub fn check_temperature(
        &self,
        patient_id: &str,
        reading: Decimal,
    ) -> Result<Verdict, VitalsError> {
        let record = self.lookup.get_by_id(patient_id)?;
        let baseline = record.health_info().normal_temperature;

        // Overflow means the difference lies beyond the decimal range
        let too_low = match baseline.checked_sub(reading) {
            Some(delta) => delta > temperature_drop_tolerance(),
            None => reading < baseline,
        };

        if !too_low {
            tracing::debug!(patient_id = %patient_id, reading = %reading, "Temperature normal");
            return Ok(Verdict::Normal);
        }

        let message = format!(
            "Warning, patient with id: {}, температура ниже нормы: {}",
            patient_id, reading
        );
        self.alert(patient_id, message)
    }

    /// Dispatch on the reading kind
    pub fn check(&self, patient_id: &str, reading: &Reading) -> Result<Verdict, VitalsError> {
        match reading {
            Reading::BloodPressure(bp) => self.check_blood_pressure(patient_id, *bp),
            Reading::Temperature(t) => self.check_temperature(patient_id, *t),
        }
    }

    fn alert(&self, patient_id: &str, message: String) -> Result<Verdict, VitalsError> {
        tracing::info!(patient_id = %patient_id, "Abnormal reading, sending alert");
        self.sink.send(&message)?;
        Ok(Verdict::Alerted { message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patient::{HealthInfo, PatientRecord};
    use crate::repository::InMemoryRepository;
    use chrono::NaiveDate;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        messages: Mutex<Vec<String>>,
    }

    impl RecordingSink {
        fn messages(&self) -> Vec<String> {
            self.messages.lock().clone()
        }
    }

    impl AlertSink for RecordingSink {
        fn send(&self, message: &str) -> Result<(), SinkError> {
            self.messages.lock().push(message.to_string());
            Ok(())
        }
    }

    struct FailingSink;

    impl AlertSink for FailingSink {
        fn send(&self, _message: &str) -> Result<(), SinkError> {
            Err(SinkError::Webhook("connection refused".to_string()))
        }
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn make_patient(id: &str, temperature: &str, bp: BloodPressure) -> PatientRecord {
        PatientRecord::new(
            id,
            "Иван",
            "Иванов",
            NaiveDate::from_ymd_opt(1950, 1, 1).unwrap(),
            HealthInfo::new(dec(temperature), bp),
        )
    }

    fn setup(patients: Vec<PatientRecord>) -> (VitalsEvaluator, Arc<RecordingSink>) {
        let repo = Arc::new(InMemoryRepository::with_records(patients));
        let sink = Arc::new(RecordingSink::default());
        (VitalsEvaluator::new(repo, sink.clone()), sink)
    }

    #[test]
    fn test_blood_pressure_alert_message() {
        let (evaluator, sink) = setup(vec![make_patient(
            "patient-ivanov",
            "36.6",
            BloodPressure::new(120, 80),
        )]);

        let verdict = evaluator
            .check_blood_pressure("patient-ivanov", BloodPressure::new(60, 120))
            .unwrap();

        assert!(verdict.is_alerted());
        assert_eq!(
            sink.messages(),
            vec!["Warning, patient with id: patient-ivanov, need help".to_string()]
        );
    }

    #[test]
    fn test_blood_pressure_normal() {
        let (evaluator, sink) = setup(vec![make_patient(
            "patient-petrov",
            "36.6",
            BloodPressure::new(120, 80),
        )]);

        let verdict = evaluator
            .check_blood_pressure("patient-petrov", BloodPressure::new(120, 80))
            .unwrap();

        assert_eq!(verdict, Verdict::Normal);
        assert!(sink.messages().is_empty());
    }

    #[test]
    fn test_blood_pressure_single_component_differs() {
        let baseline = BloodPressure::new(110, 90);
        let readings = [
            BloodPressure::new(111, 90),
            BloodPressure::new(109, 90),
            BloodPressure::new(110, 91),
            BloodPressure::new(110, 89),
            BloodPressure::new(120, 80),
        ];

        for reading in readings {
            let (evaluator, sink) = setup(vec![make_patient("patient-elenina", "36.6", baseline)]);
            evaluator.check_blood_pressure("patient-elenina", reading).unwrap();
            assert_eq!(
                sink.messages(),
                vec!["Warning, patient with id: patient-elenina, need help".to_string()],
                "reading {} should alert",
                reading
            );
        }
    }

    #[test]
    fn test_temperature_small_drop_is_normal() {
        let (evaluator, sink) = setup(vec![make_patient(
            "patient-ivanov",
            "36.6",
            BloodPressure::new(120, 80),
        )]);

        let verdict = evaluator.check_temperature("patient-ivanov", dec("36.3")).unwrap();

        assert_eq!(verdict, Verdict::Normal);
        assert!(sink.messages().is_empty());
    }

    #[test]
    fn test_temperature_large_drop_alerts() {
        let (evaluator, sink) = setup(vec![make_patient(
            "patient-petrov",
            "36.6",
            BloodPressure::new(120, 80),
        )]);

        evaluator.check_temperature("patient-petrov", dec("33.3")).unwrap();

        assert_eq!(
            sink.messages(),
            vec!["Warning, patient with id: patient-petrov, температура ниже нормы: 33.3".to_string()]
        );
    }

    #[test]
    fn test_temperature_threshold_boundaries() {
        let cases = [
            ("36.6", false),  // equal to baseline
            ("35.6", false),  // delta 1.0
            ("35.1", false),  // delta exactly 1.5
            ("35.10", false), // same value, different scale
            ("35.09", true),  // delta 1.51
            ("34.6", true),   // delta 2.0
            ("39.6", false),  // fever, never flagged
            ("45.0", false),
        ];

        for (reading, expect_alert) in cases {
            let (evaluator, sink) = setup(vec![make_patient(
                "patient-tamarina",
                "36.6",
                BloodPressure::new(100, 70),
            )]);
            let verdict = evaluator
                .check_temperature("patient-tamarina", dec(reading))
                .unwrap();
            assert_eq!(verdict.is_alerted(), expect_alert, "reading {}", reading);
            assert_eq!(sink.messages().len(), usize::from(expect_alert), "reading {}", reading);
        }
    }

    #[test]
    fn test_temperature_extreme_reading() {
        let (evaluator, sink) = setup(vec![
            make_patient("patient-ivanov", "36.6", BloodPressure::new(120, 80)),
            make_patient("patient-cold", "-36.6", BloodPressure::new(120, 80)),
        ]);

        let verdict = evaluator.check_temperature("patient-ivanov", Decimal::MIN).unwrap();
        assert!(verdict.is_alerted());

        let verdict = evaluator.check_temperature("patient-ivanov", Decimal::MAX).unwrap();
        assert_eq!(verdict, Verdict::Normal);

        // Negative baseline minus MAX overflows below the range
        let verdict = evaluator.check_temperature("patient-cold", Decimal::MAX).unwrap();
        assert_eq!(verdict, Verdict::Normal);

        assert_eq!(
            sink.messages(),
            vec![format!(
                "Warning, patient with id: patient-ivanov, температура ниже нормы: {}",
                Decimal::MIN
            )]
        );
    }

    #[test]
    fn test_temperature_message_keeps_scale() {
        let (evaluator, sink) = setup(vec![make_patient(
            "patient-petrov",
            "36.6",
            BloodPressure::new(120, 80),
        )]);

        evaluator.check_temperature("patient-petrov", dec("33.30")).unwrap();

        assert_eq!(
            sink.messages(),
            vec!["Warning, patient with id: patient-petrov, температура ниже нормы: 33.30".to_string()]
        );
    }

    #[test]
    fn test_unknown_patient() {
        let (evaluator, sink) = setup(vec![]);

        let bp = evaluator.check_blood_pressure("ghost", BloodPressure::new(1, 1));
        let temp = evaluator.check_temperature("ghost", dec("20.0"));

        assert!(matches!(
            bp,
            Err(VitalsError::Lookup(RepositoryError::NotFound(ref id))) if id == "ghost"
        ));
        assert!(matches!(temp, Err(VitalsError::Lookup(RepositoryError::NotFound(_)))));
        assert!(sink.messages().is_empty());
    }

    #[test]
    fn test_sink_failure_propagates() {
        let repo = Arc::new(InMemoryRepository::with_records(vec![make_patient(
            "patient-ivanov",
            "36.6",
            BloodPressure::new(120, 80),
        )]));
        let evaluator = VitalsEvaluator::new(repo, Arc::new(FailingSink));

        let result = evaluator.check_blood_pressure("patient-ivanov", BloodPressure::new(60, 120));
        assert!(matches!(result, Err(VitalsError::Sink(SinkError::Webhook(_)))));

        let result = evaluator.check_temperature("patient-ivanov", dec("33.3"));
        assert!(matches!(result, Err(VitalsError::Sink(SinkError::Webhook(_)))));

        // Normal readings never touch the sink
        let result = evaluator.check_temperature("patient-ivanov", dec("36.6"));
        assert_eq!(result.unwrap(), Verdict::Normal);
    }

    #[test]
    fn test_check_dispatch() {
        let (evaluator, sink) = setup(vec![make_patient(
            "patient-ivanov",
            "36.6",
            BloodPressure::new(120, 80),
        )]);

        evaluator
            .check("patient-ivanov", &Reading::BloodPressure(BloodPressure::new(120, 80)))
            .unwrap();
        evaluator
            .check("patient-ivanov", &Reading::Temperature(dec("34.0")))
            .unwrap();

        assert_eq!(
            sink.messages(),
            vec!["Warning, patient with id: patient-ivanov, температура ниже нормы: 34.0".to_string()]
        );
    }

    #[test]
    fn test_repeated_checks_are_independent() {
        let (evaluator, sink) = setup(vec![make_patient(
            "patient-ivanov",
            "36.6",
            BloodPressure::new(120, 80),
        )]);

        for _ in 0..3 {
            evaluator
                .check_blood_pressure("patient-ivanov", BloodPressure::new(130, 80))
                .unwrap();
        }

        assert_eq!(sink.messages().len(), 3);
    }
}
