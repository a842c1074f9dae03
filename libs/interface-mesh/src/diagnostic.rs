//! # Diagnostics
//!
//! Non-fatal events raised while generating an interface. Every diagnostic is
//! logged through `tracing` when reported and kept for the run report.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Notice,
    Warning,
}

/// Which branch the distribution generator fell back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistributionFallback {
    /// Stretched regions were regrown with a reduced target edge length.
    ReducedTarget,
    /// Stretching was abandoned for a uniform distribution.
    Uniform,
}

/// What happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// No spacing override for the segment; the global default was used.
    DefaultSpacing { segment: usize },
    /// A spacing override names a segment the profile does not have.
    UnusedSpacingOverride { key: String },
    /// The stretched regions of a segment overlapped.
    DistributionFallback {
        segment: usize,
        fallback: DistributionFallback,
    },
    /// More fixed layers were requested than the zone has stations.
    FixedLayersClamped { zone: String, requested: usize },
    /// Point spacing along a ring deviates from its first chord.
    ConsecutiveDistance {
        station: usize,
        position: usize,
        deviation: f64,
    },
    /// The output extension has no registered writer.
    UnsupportedFormat { extension: String, substitute: String },
}

/// A diagnostic message with severity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(severity: Severity, kind: DiagnosticKind) -> Self {
        Self { severity, kind }
    }

    pub fn notice(kind: DiagnosticKind) -> Self {
        Self::new(Severity::Notice, kind)
    }

    pub fn warning(kind: DiagnosticKind) -> Self {
        Self::new(Severity::Warning, kind)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::DefaultSpacing { segment } => {
                write!(f, "segment {segment}: no spacing override, using default spacing")
            }
            DiagnosticKind::UnusedSpacingOverride { key } => {
                write!(f, "spacing override '{key}' does not name a profile segment")
            }
            DiagnosticKind::DistributionFallback { segment, fallback } => match fallback {
                DistributionFallback::ReducedTarget => write!(
                    f,
                    "segment {segment}: stretched regions overlap, regrown with a reduced target edge"
                ),
                DistributionFallback::Uniform => write!(
                    f,
                    "segment {segment}: stretched regions overlap, using a uniform distribution"
                ),
            },
            DiagnosticKind::FixedLayersClamped { zone, requested } => write!(
                f,
                "{zone} zone: {requested} fixed layers exceed its stations, clamped to 1"
            ),
            DiagnosticKind::ConsecutiveDistance {
                station,
                position,
                deviation,
            } => write!(
                f,
                "ring at station {station}: point {position} deviates from the first chord by {deviation:e}"
            ),
            DiagnosticKind::UnsupportedFormat {
                extension,
                substitute,
            } => write!(
                f,
                "no writer for extension '{extension}', writing '{substitute}' instead"
            ),
        }
    }
}

/// Collects diagnostics over one run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs the diagnostic at its severity and records it.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Notice => tracing::info!("{diagnostic}"),
            Severity::Warning => tracing::warn!("{diagnostic}"),
        }
        self.entries.push(diagnostic);
    }

    pub fn notice(&mut self, kind: DiagnosticKind) {
        self.report(Diagnostic::notice(kind));
    }

    pub fn warning(&mut self, kind: DiagnosticKind) {
        self.report(Diagnostic::warning(kind));
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Returns the number of warnings.
    pub fn warning_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }
}
