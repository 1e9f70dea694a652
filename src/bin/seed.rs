//! Replace the database contents with a small demo data set.

use anyhow::Context;
use chrono::{Duration, Utc};
use rand::Rng;
use std::sync::Arc;

use hrms::config::Config;
use hrms::db::{ensure_schema, init_db};
use hrms::error::HrmResult;
use hrms::model::attendance::MarkConfirmation;
use hrms::service::Services;
use hrms::store::MySqlStore;

const EMPLOYEES: &[(&str, &str, &str, &str)] = &[
    ("EMP-9001", "Arjun Sharma", "arjun.s@company.com", "Engineering"),
    ("EMP-9002", "Priya Patel", "priya.p@company.com", "Product"),
    ("EMP-9003", "Rahul Verma", "rahul.verma@company.com", "Design"),
    ("EMP-9004", "Neha Gupta", "neha.gupta@company.com", "Engineering"),
    ("EMP-9005", "Vikram Singh", "vikram.s@company.com", "Human Resources"),
    ("EMP-9006", "Ananya Desai", "ananya.d@company.com", "Sales"),
    ("EMP-9007", "Rohan Iyer", "rohan.iyer@company.com", "Marketing"),
    ("EMP-9008", "Kavya Menon", "k.menon@company.com", "Finance"),
];

const DAYS: i64 = 5;
const PRESENT_PROBABILITY: f64 = 0.85;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let config = Config::from_env()?;
    let url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set to seed the database")?;

    let pool = init_db(url).await.context("Failed to connect to database")?;
    ensure_schema(&pool).await?;

    let store = MySqlStore::new(pool);
    store.clear().await?;
    tracing::info!("Existing data cleared");

    let services = Services::new(Arc::new(store));

    for (employee_id, full_name, email, department) in EMPLOYEES {
        if let Err(e) = services
            .registry
            .create(employee_id, full_name, email, department)
            .await
        {
            tracing::warn!(error = %e, employee_id, "Skipping employee");
        }
    }
    tracing::info!(count = EMPLOYEES.len(), "Seeded employees");

    let today = Utc::now().date_naive();
    let mut marks = Vec::new();
    {
        let mut rng = rand::thread_rng();
        for (employee_id, ..) in EMPLOYEES {
            for offset in 0..DAYS {
                let date = (today - Duration::days(offset)).format("%Y-%m-%d").to_string();
                let status = if rng.gen_bool(PRESENT_PROBABILITY) {
                    "Present"
                } else {
                    "Absent"
                };
                marks.push((*employee_id, date, status));
            }
        }
    }

    let results = futures::future::join_all(
        marks
            .iter()
            .map(|(employee_id, date, status)| services.ledger.mark(employee_id, date, status)),
    )
    .await;

    let failed = report_failed_marks(&marks, &results);
    tracing::info!(
        recorded = results.len() - failed,
        failed,
        "Seeded attendance records"
    );

    Ok(())
}

/// Log each failed mark with the day it was for; returns how many failed.
fn report_failed_marks(
    marks: &[(&str, String, &str)],
    results: &[HrmResult<MarkConfirmation>],
) -> usize {
    let mut failed = 0;
    for ((employee_id, date, _), result) in marks.iter().zip(results) {
        if let Err(e) = result {
            failed += 1;
            tracing::warn!(error = %e, employee_id, date = %date, "Failed to mark attendance");
        }
    }
    failed
}
