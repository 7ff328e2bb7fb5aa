//! Vitalwatch CLI
//!
//! Run with: cargo run -- <command>
//!
//! Environment variables:
//! - VITALWATCH_PATIENTS_FILE: Patient store path (default: patients.jsonl)
//! - VITALWATCH_WEBHOOK_URL: Webhook to post alerts to (default: unset)
//! - VITALWATCH_LOG_ALERTS: Log alerts (default: true)
//! - RUST_LOG: Log level (default: info)

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vitalwatch::alerts::Notifier;
use vitalwatch::cli::{Args, Commands};
use vitalwatch::config::MonitorConfig;
use vitalwatch::repository::{FileRepository, PatientRepository};
use vitalwatch::{Reading, Verdict, VitalsError, VitalsEvaluator};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vitalwatch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let mut config = MonitorConfig::from_env();
    if let Some(path) = &args.patients_file {
        config = config.with_patients_file(path);
    }

    tracing::debug!(
        patients_file = %config.patients_file.display(),
        targets = config.targets.len(),
        "Vitalwatch configuration"
    );

    let repo = Arc::new(FileRepository::open(&config.patients_file)?);

    match &args.command {
        Commands::Bp { patient_id, reading } => {
            check(repo, &config, patient_id, Reading::from(*reading))?;
        }
        Commands::Temp { patient_id, reading } => {
            check(repo, &config, patient_id, Reading::from(*reading))?;
        }
        Commands::Add(add) => {
            let id = repo.add(add.to_record())?;
            println!("Added {}", id);
        }
        Commands::List => {
            for record in repo.list() {
                let health = record.health_info();
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    record.id(),
                    record.full_name(),
                    record.birthday(),
                    health.normal_temperature,
                    health.blood_pressure
                );
            }
        }
        Commands::Remove { patient_id } => {
            let removed = repo.remove(patient_id)?;
            println!("Removed {}", removed.id());
        }
    }

    Ok(())
}

fn check(
    repo: Arc<FileRepository>,
    config: &MonitorConfig,
    patient_id: &str,
    reading: Reading,
) -> Result<(), VitalsError> {
    tracing::debug!(patient_id = %patient_id, reading = %reading, "Checking reading");

    let notifier = Notifier::from_targets(&config.targets);
    let evaluator = VitalsEvaluator::new(repo, Arc::new(notifier));

    match evaluator.check(patient_id, &reading)? {
        Verdict::Normal => println!("OK"),
        Verdict::Alerted { message } => println!("{}", message),
    }
    Ok(())
}
