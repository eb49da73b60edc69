use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use serde_json::json;

use super::outcome::{ExecutionOutcome, Status};
use crate::ui::prelude::*;

/// All outcomes of one run, in processing order.
#[derive(Debug, Clone, Default)]
pub struct ApplyReport {
    outcomes: Vec<ExecutionOutcome>,
}

impl ApplyReport {
    pub fn new(outcomes: Vec<ExecutionOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[ExecutionOutcome] {
        &self.outcomes
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn count(&self, status: Status) -> usize {
        self.outcomes.iter().filter(|o| o.status() == status).count()
    }

    /// One `<name> (<backend>) - Status: <STATUS>[ - Message: ...]` line per outcome.
    pub fn summary_lines(&self) -> Vec<String> {
        self.outcomes.iter().map(ToString::to_string).collect()
    }

    pub fn totals_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec!["Status", "Packages"]);
        for status in Status::ALL {
            table.add_row(vec![
                Cell::new(status.as_str()),
                Cell::new(self.count(status)),
            ]);
        }
        table.add_row(vec![Cell::new("TOTAL"), Cell::new(self.outcomes.len())]);
        table
    }

    pub fn print_summary(&self) {
        emit(Level::Info, "summary.start", "--- Apply Summary ---", None);

        if self.is_empty() {
            emit(
                Level::Info,
                "summary.empty",
                "No packages were processed.",
                None,
            );
        }

        for (outcome, line) in self.outcomes().iter().zip(self.summary_lines()) {
            emit(
                Level::Info,
                "summary.outcome",
                &line,
                serde_json::to_value(outcome).ok(),
            );
        }

        match get_output_format() {
            OutputFormat::Text => {
                separator();
                if !self.is_empty() {
                    println!("{}", self.totals_table());
                }
            }
            OutputFormat::Json => {
                let totals: serde_json::Map<String, serde_json::Value> = Status::ALL
                    .iter()
                    .map(|s| (s.as_str().to_string(), json!(self.count(*s))))
                    .collect();
                emit(
                    Level::Info,
                    "summary.totals",
                    "Totals",
                    Some(serde_json::Value::Object(totals)),
                );
            }
        }
    }
}
