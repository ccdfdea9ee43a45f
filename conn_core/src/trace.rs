//! # Calculation Trace
//!
//! An ordered record of the named quantities a limit-state calculation passes
//! through: inputs, intermediate values, and the final capacity. A disabled
//! trace records nothing, so calculators can thread one through every call
//! without cost when no one is looking.
//!
//! Every recorded entry is also sent to the `log` facade at debug level under
//! the `conn_core::trace` target.
//!
//! ## Example
//!
//! ```rust
//! use conn_core::trace::CalcTrace;
//! use conn_core::units::{Kips, Ksi};
//!
//! let mut trace = CalcTrace::enabled("Tensile Yielding");
//! trace.input("Fy", Ksi(50.0));
//! trace.output("phi*Rn", Kips(64.8));
//! assert_eq!(trace.entries().len(), 2);
//! println!("{}", trace.render());
//! ```

use serde::{Deserialize, Serialize};

use crate::units::Quantity;

/// Which block of the trace an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraceSection {
    Input,
    Calculation,
    Output,
}

impl TraceSection {
    pub fn display_name(&self) -> &'static str {
        match self {
            TraceSection::Input => "Inputs",
            TraceSection::Calculation => "Calculations",
            TraceSection::Output => "Output",
        }
    }
}

/// One named value in a trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub section: TraceSection,
    pub name: String,
    pub value: Quantity,
}

/// Ordered debug trace of a calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcTrace {
    title: String,
    enabled: bool,
    entries: Vec<TraceEntry>,
}

impl CalcTrace {
    /// A trace that records entries
    pub fn enabled(title: impl Into<String>) -> Self {
        CalcTrace {
            title: title.into(),
            enabled: true,
            entries: Vec::new(),
        }
    }

    /// A trace that drops everything
    pub fn disabled() -> Self {
        CalcTrace {
            title: String::new(),
            enabled: false,
            entries: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    /// Value of the first entry with the given name
    pub fn get(&self, name: &str) -> Option<Quantity> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.value)
    }

    fn record(&mut self, section: TraceSection, name: &str, value: Quantity) {
        if !self.enabled {
            return;
        }
        log::debug!(target: "conn_core::trace", "{}: {} = {}", self.title, name, value);
        self.entries.push(TraceEntry {
            section,
            name: name.to_string(),
            value,
        });
    }

    pub fn input(&mut self, name: &str, value: impl Into<Quantity>) {
        self.record(TraceSection::Input, name, value.into());
    }

    pub fn calc(&mut self, name: &str, value: impl Into<Quantity>) {
        self.record(TraceSection::Calculation, name, value.into());
    }

    pub fn output(&mut self, name: &str, value: impl Into<Quantity>) {
        self.record(TraceSection::Output, name, value.into());
    }

    /// Record a plain number (counts, factors, ratios)
    pub fn scalar(&mut self, section: TraceSection, name: &str, value: f64) {
        self.record(section, name, Quantity::dimensionless(value));
    }

    /// Render the trace as an aligned text block
    pub fn render(&self) -> String {
        let mut out = format!("--- DEBUG: {} ---\n", self.title);
        for section in [TraceSection::Input, TraceSection::Calculation, TraceSection::Output] {
            let mut rows = self.entries.iter().filter(|e| e.section == section).peekable();
            if rows.peek().is_none() {
                continue;
            }
            out.push_str(&format!("  {}:\n", section.display_name()));
            for entry in rows {
                out.push_str(&format!("    {:<35}: {}\n", entry.name, entry.value));
            }
        }
        out.push_str(&format!("--- END DEBUG: {} ---\n", self.title));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{Inches, Kips};

    #[test]
    fn test_disabled_trace_records_nothing() {
        let mut trace = CalcTrace::disabled();
        trace.input("t", Inches(1.0));
        trace.scalar(TraceSection::Calculation, "U", 0.8);
        assert!(trace.entries().is_empty());
        assert!(!trace.is_enabled());
    }

    #[test]
    fn test_entries_keep_order() {
        let mut trace = CalcTrace::enabled("Block Shear");
        trace.output("phi*Rn", Kips(936.0));
        trace.input("t", Inches(1.0));
        trace.scalar(TraceSection::Calculation, "Ubs", 1.0);

        let names: Vec<_> = trace.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["phi*Rn", "t", "Ubs"]);
        assert_eq!(trace.get("t"), Some(Quantity::inches(1.0)));
    }

    #[test]
    fn test_render_groups_sections() {
        let mut trace = CalcTrace::enabled("Bolt Shear");
        trace.output("phi*Rn", Kips(61.3));
        trace.input("d", Inches(0.875));
        let text = trace.render();
        let inputs = text.find("Inputs").unwrap();
        let output = text.find("Output").unwrap();
        assert!(inputs < output);
        assert!(text.contains("0.8750 in"));
    }
}
