//! Output formatting for the CLI.

use crate::analytics::GraphAnalytics;
use crate::config::OutputFormat;
use crate::error::Result;
use adkg_domain::{EntityLabel, GraphCounts};
use adkg_extractor::ExtractionReport;
use adkg_loader::LoadReport;
use colored::*;
use serde_json::json;
use std::path::Path;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Whether progress may be drawn alongside the output.
    pub fn is_interactive(&self) -> bool {
        self.format == OutputFormat::Table
    }

    /// Format the result of an extraction run.
    pub fn extraction_report(&self, report: &ExtractionReport, output: &Path) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                "output": output.display().to_string(),
                "triples": report.triples.len(),
                "records_processed": report.records_processed,
                "records_skipped_short": report.records_skipped_short,
                "records_failed": report.records_failed,
                "total_attempts": report.total_attempts,
            }))?),
            OutputFormat::Quiet => Ok(report.triples.len().to_string()),
            OutputFormat::Table => {
                let mut lines = vec![self.success(&format!(
                    "Extracted {} triples from {} records into {}",
                    report.triples.len(),
                    report.records_processed,
                    output.display()
                ))];
                if report.records_skipped_short > 0 {
                    lines.push(self.info(&format!(
                        "{} records too short to extract",
                        report.records_skipped_short
                    )));
                }
                if report.records_failed > 0 {
                    lines.push(self.warning(&format!(
                        "{} records failed after all retries",
                        report.records_failed
                    )));
                }
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format the result of a load.
    pub fn load_report(&self, report: &LoadReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let skipped: Vec<_> = report
                    .skipped
                    .iter()
                    .map(|s| json!({ "position": s.position, "reason": s.reason.to_string() }))
                    .collect();
                Ok(serde_json::to_string_pretty(&json!({
                    "loaded": report.loaded,
                    "skipped": skipped,
                }))?)
            }
            OutputFormat::Quiet => Ok(report.loaded.to_string()),
            OutputFormat::Table => {
                let mut lines = vec![self.success(&format!("Loaded {} triples", report.loaded))];
                if !report.skipped.is_empty() {
                    lines.push(self.warning(&format!(
                        "Skipped {} malformed triples",
                        report.skipped.len()
                    )));
                }
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format graph statistics and the `top` most central entities.
    pub fn stats(
        &self,
        counts: &GraphCounts,
        analytics: &GraphAnalytics,
        top: usize,
        backend: &str,
    ) -> Result<String> {
        let central = analytics.top(top);
        match self.format {
            OutputFormat::Json => {
                let by_label: serde_json::Map<_, _> = counts
                    .by_label
                    .iter()
                    .map(|(label, n)| (label.as_str().to_string(), json!(n)))
                    .collect();
                let central: Vec<_> = central
                    .iter()
                    .map(|node| {
                        json!({
                            "name": node.name,
                            "label": node.label.as_str(),
                            "degree": node.degree,
                            "betweenness": node.betweenness,
                            "component": node.component,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json!({
                    "backend": backend,
                    "entities": counts.entities,
                    "relations": counts.relations,
                    "by_label": by_label,
                    "components": analytics.components,
                    "central": central,
                }))?)
            }
            OutputFormat::Quiet => Ok(format!("{} {}", counts.entities, counts.relations)),
            OutputFormat::Table => {
                if counts.entities == 0 {
                    return Ok(self.colorize("The graph is empty.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Label", "Entities"]);
                for label in EntityLabel::ALL {
                    let n = counts.by_label.get(&label).copied().unwrap_or(0);
                    builder.push_record([label.as_str().to_string(), n.to_string()]);
                }
                let mut labels = builder.build();
                labels
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));

                let mut sections = vec![
                    self.info(&format!(
                        "{} entities, {} relations ({})",
                        counts.entities, counts.relations, backend
                    )),
                    labels.to_string(),
                ];

                if !central.is_empty() {
                    let mut builder = Builder::default();
                    builder.push_record(["Entity", "Label", "Degree", "Betweenness", "Component"]);
                    for node in central {
                        builder.push_record([
                            node.name.clone(),
                            node.label.as_str().to_string(),
                            format!("{:.3}", node.degree),
                            format!("{:.3}", node.betweenness),
                            node.component.to_string(),
                        ]);
                    }
                    let mut scores = builder.build();
                    scores
                        .with(Style::rounded())
                        .with(Modify::new(Rows::first()).with(Alignment::center()));

                    sections.push(self.info(&format!(
                        "Most central of {} analyzed entities ({} components)",
                        analytics.nodes.len(),
                        analytics.components
                    )));
                    sections.push(scores.to_string());
                }

                Ok(sections.join("\n"))
            }
        }
    }

    /// Format an answer to a question.
    pub fn answer(&self, question: &str, answer: &str, facts: usize) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                "question": question,
                "answer": answer,
                "facts": facts,
            }))?),
            OutputFormat::Quiet | OutputFormat::Table => Ok(answer.to_string()),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
