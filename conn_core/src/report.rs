//! # Connection Design Report
//!
//! Collects the limit-state results for one connection and identifies the
//! governing check. Reports serialize to human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! ConnectionReport
//! ├── id: Uuid
//! ├── meta: ReportMetadata (version, connection label, engineer, job, timestamps)
//! ├── settings: DesignSettings (resistance factors and limits used)
//! └── results: Vec<LimitStateResult> (in the order they were checked)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use conn_core::calculations::TensileYieldingCalculator;
//! use conn_core::materials::material;
//! use conn_core::members::{Plate, PlateDimensions};
//! use conn_core::report::ConnectionReport;
//! use conn_core::units::Quantity;
//!
//! let strap = Plate::new(0.5, material("A36").unwrap())
//!     .unwrap()
//!     .set_dimensions(PlateDimensions::new(12.0, 4.0).unwrap())
//!     .unwrap();
//!
//! let mut report = ConnectionReport::new("Strap", "Jane Engineer", "25-042");
//! report.check(&TensileYieldingCalculator::new(&strap), Quantity::kips(50.0)).unwrap();
//! assert!(report.passes());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{LimitState, LimitStateResult};
use crate::errors::{CalcError, CalcResult};
use crate::settings::DesignSettings;
use crate::units::Quantity;

/// Current schema version for serialized reports
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Report metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Schema version for forward compatibility
    pub version: String,

    /// Connection label (e.g., "BR-3 at Level 2")
    pub connection: String,

    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    pub created: DateTime<Utc>,

    /// Updated whenever a result is added
    pub modified: DateTime<Utc>,
}

/// Limit-state results for one connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionReport {
    pub id: Uuid,
    pub meta: ReportMetadata,
    pub settings: DesignSettings,
    pub results: Vec<LimitStateResult>,
}

impl ConnectionReport {
    pub fn new(connection: impl Into<String>, engineer: impl Into<String>, job_id: impl Into<String>) -> Self {
        let now = Utc::now();
        ConnectionReport {
            id: Uuid::new_v4(),
            meta: ReportMetadata {
                version: SCHEMA_VERSION.to_string(),
                connection: connection.into(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                created: now,
                modified: now,
            },
            settings: DesignSettings::default(),
            results: Vec::new(),
        }
    }

    /// Settings every checked limit state must be configured with
    pub fn with_settings(mut self, settings: DesignSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn add_result(&mut self, result: LimitStateResult) {
        log::info!(
            "{}: {} DCR = {:.3}{}",
            self.meta.connection,
            result.limit_state,
            result.dcr,
            if result.passes { "" } else { " (NG)" }
        );
        self.results.push(result);
        self.touch();
    }

    /// Evaluate a limit state against a demand and record the result.
    ///
    /// The limit state must use the report's settings, so every recorded
    /// result was produced with the factors and DCR limit the report carries.
    pub fn check(&mut self, limit_state: &dyn LimitState, demand: Quantity) -> CalcResult<&LimitStateResult> {
        if limit_state.settings() != &self.settings {
            return Err(CalcError::invalid_input(
                "settings",
                limit_state.name(),
                "Limit state is configured with settings other than the report's",
            ));
        }
        let result = limit_state.evaluate(demand)?;
        self.add_result(result);
        let last = self.results.len() - 1;
        Ok(&self.results[last])
    }

    /// Result with the highest DCR
    pub fn governing(&self) -> Option<&LimitStateResult> {
        self.results.iter().max_by(|a, b| a.dcr.total_cmp(&b.dcr))
    }

    /// True when at least one check was run and every check passes
    pub fn passes(&self) -> bool {
        !self.results.is_empty() && self.results.iter().all(|r| r.passes)
    }

    /// Results that fail
    pub fn failures(&self) -> impl Iterator<Item = &LimitStateResult> {
        self.results.iter().filter(|r| !r.passes)
    }

    /// Plain-text summary, one line per check
    pub fn summary(&self) -> String {
        let mut out = format!("{} ({})\n", self.meta.connection, self.meta.job_id);
        for result in &self.results {
            out.push_str(&format!("  {}\n", result));
        }
        if let Some(governing) = self.governing() {
            out.push_str(&format!("  Governing: {} (DCR = {:.3})\n", governing.limit_state, governing.dcr));
        }
        out
    }

    pub fn to_json(&self) -> CalcResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> CalcResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}
