//! The six presentation stages and the records produced while revealing them.
//!
//! `Stage` is what the stepper shows. `StageRecord` is what the notarization
//! ledger stores, one per revealed stage. `LogLine` is one line of the
//! orchestration log panel.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::workflow::RunId;

/// One of the six fixed phases of a run, each mapped to a conceptual agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Intake,
    Mapping,
    Extraction,
    Validation,
    Audit,
    Notarization,
}

impl Stage {
    /// Every stage in reveal order.
    pub const ALL: [Stage; 6] = [
        Stage::Intake,
        Stage::Mapping,
        Stage::Extraction,
        Stage::Validation,
        Stage::Audit,
        Stage::Notarization,
    ];

    /// 1-based position of the stage; equals the step index that reveals it.
    pub fn ordinal(self) -> u8 {
        match self {
            Stage::Intake => 1,
            Stage::Mapping => 2,
            Stage::Extraction => 3,
            Stage::Validation => 4,
            Stage::Audit => 5,
            Stage::Notarization => 6,
        }
    }

    /// Inverse of `ordinal()`.
    pub fn from_ordinal(ordinal: u8) -> Option<Stage> {
        Stage::ALL.into_iter().find(|s| s.ordinal() == ordinal)
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::Intake => "Intake",
            Stage::Mapping => "Mapping",
            Stage::Extraction => "Extraction",
            Stage::Validation => "Validation",
            Stage::Audit => "Audit",
            Stage::Notarization => "Notarization",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Stage::Intake => "Product Classification",
            Stage::Mapping => "Regulatory Requirements",
            Stage::Extraction => "AI Document Parsing",
            Stage::Validation => "Rules & Compliance Check",
            Stage::Audit => "Anomaly Detection",
            Stage::Notarization => "IOTA Blockchain Entry",
        }
    }
}

/// An immutable record of one revealed stage, appended to the ledger.
///
/// `payload` carries the result fields the stage reveals; the notarization
/// stage carries the whole result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageRecord {
    /// The run whose chain this record extends.
    pub run_id: RunId,
    /// Which of the six stages was revealed.
    pub stage: Stage,
    /// The slice of the result the stage revealed.
    pub payload: serde_json::Value,
    /// Wall-clock time the record was created (UTC).
    pub recorded_at: DateTime<Utc>,
}

/// One line of the orchestration log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    /// Local time the line was appended.
    pub at: DateTime<Local>,
    /// The line as shown, without the timestamp.
    pub text: String,
}

impl LogLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            at: Local::now(),
            text: text.into(),
        }
    }

    /// `HH:MM:SS`, as shown in the log panel gutter.
    pub fn clock(&self) -> String {
        self.at.format("%H:%M:%S").to_string()
    }

    /// Alert lines are highlighted by the renderers.
    pub fn is_alert(&self) -> bool {
        self.text.contains("ALERT")
    }
}
