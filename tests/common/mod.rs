//! Common test utilities and helpers

/// Test data utilities
pub mod test_data {
    use fin_dashboard::models::Record;
    use serde_json::{json, Value};

    /// Create a test record
    pub fn create_test_record(date: &str, revenue: f64, net_income: f64) -> Record {
        Record {
            date: date.to_string(),
            revenue,
            net_income,
            gross_profit: revenue * 0.4,
            eps: net_income / 1_000.0,
            operating_income: revenue * 0.3,
        }
    }

    /// Deterministic pseudo-random record set, duplicates included
    pub fn generate_records(seed: u64, count: usize) -> Vec<Record> {
        let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let mut next = move || {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            state >> 33
        };

        (0..count)
            .map(|_| {
                let year = 2015 + next() % 10;
                let month = 1 + next() % 12;
                // Small ranges so equal keys show up
                let revenue = (next() % 20) as f64 * 1_000.0;
                let net_income = (next() % 40) as f64 * 100.0 - 1_500.0;
                create_test_record(&format!("{}-{:02}-28", year, month), revenue, net_income)
            })
            .collect()
    }

    /// JSON body in the `/data` envelope
    pub fn data_body(records: &[Record]) -> Value {
        json!({ "data": records })
    }
}

/// Logging utilities for tests
pub mod logging {
    use tracing::info;

    /// Log test step
    pub fn log_test_step(step: &str) {
        info!("🧪 Test Step: {}", step);
    }
}
