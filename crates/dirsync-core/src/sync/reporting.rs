//! Sync run reporting and statistics

use std::fmt::Write;

use super::SyncResult;

/// Sync run reporter
pub struct SyncReporter;

impl SyncReporter {
    /// Generate a summary report
    #[must_use]
    pub fn generate_summary(result: &SyncResult) -> String {
        let mut output = String::new();

        output.push_str("\n=== Sync Summary ===\n");
        let _ = writeln!(output, "Copied:   {}", result.copied);
        let _ = writeln!(output, "Removed:  {}", result.removed);
        if result.declined > 0 {
            let _ = writeln!(output, "Declined: {}", result.declined);
        }
        if result.skipped_groups > 0 {
            let _ = writeln!(output, "Skipped jobs:    {}", result.skipped_groups);
        }
        if result.skipped_targets > 0 {
            let _ = writeln!(output, "Skipped targets: {}", result.skipped_targets);
        }

        if !result.errors.is_empty() {
            let _ = writeln!(output, "\nErrors ({}):", result.errors.len());
            for error in &result.errors {
                let _ = writeln!(output, "  - {error}");
            }
        }

        let _ = writeln!(output, "\nTotal operations: {}", result.total_operations());

        if result.is_success() {
            output.push_str("Status: ✓ Success\n");
        } else {
            output.push_str("Status: ✗ Completed with errors\n");
        }

        output
    }
}
