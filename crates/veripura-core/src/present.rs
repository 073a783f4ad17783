//! Pure view derivation for the renderers.
//!
//! Everything here is a function of (selected industry, step index, result,
//! in-progress flag). Renderers draw what these functions return and hold no
//! decision logic of their own.

use veripura_contracts::{
    industry::{Industry, IndustryConfig},
    stage::Stage,
    workflow::{Routing, WorkflowResult},
};

/// Status of an agent card relative to the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardStatus {
    Idle,
    Processing,
    Done,
}

impl CardStatus {
    /// `Idle` before the stage is reached, `Processing` on it, `Done` after.
    pub fn at(step: u8, ordinal: u8) -> CardStatus {
        if step > ordinal {
            CardStatus::Done
        } else if step == ordinal {
            CardStatus::Processing
        } else {
            CardStatus::Idle
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CardStatus::Idle => "idle",
            CardStatus::Processing => "processing",
            CardStatus::Done => "done",
        }
    }
}

/// The six agent cards of the status panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentCard {
    Classification,
    RequirementMapper,
    DocumentExtraction,
    ValidationEngine,
    AnomalyDetection,
    ConfidenceScorer,
}

impl AgentCard {
    pub const ALL: [AgentCard; 6] = [
        AgentCard::Classification,
        AgentCard::RequirementMapper,
        AgentCard::DocumentExtraction,
        AgentCard::ValidationEngine,
        AgentCard::AnomalyDetection,
        AgentCard::ConfidenceScorer,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AgentCard::Classification => "Classification Agent",
            AgentCard::RequirementMapper => "Requirement Mapper",
            AgentCard::DocumentExtraction => "Document Extraction",
            AgentCard::ValidationEngine => "Validation Engine",
            AgentCard::AnomalyDetection => "Anomaly Detection",
            AgentCard::ConfidenceScorer => "Confidence Scorer",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            AgentCard::Classification => "🤖",
            AgentCard::RequirementMapper => "📋",
            AgentCard::DocumentExtraction => "📄",
            AgentCard::ValidationEngine => "⚖️",
            AgentCard::AnomalyDetection => "🔍",
            AgentCard::ConfidenceScorer => "📊",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AgentCard::Classification => "HS Code & Product ID",
            AgentCard::RequirementMapper => "Regulatory Checklist",
            AgentCard::DocumentExtraction => "OCR Multi-Agent Parsing",
            AgentCard::ValidationEngine => "Rules & MRL Verification",
            AgentCard::AnomalyDetection => "Fraud & Pattern Analysis",
            AgentCard::ConfidenceScorer => "Final Risk Weighting",
        }
    }

    /// The stage whose ordinal drives this card's status.
    ///
    /// Scoring shares the anomaly stage, so all six cards read `done` once
    /// the notarization stage is reached.
    pub fn stage(self) -> Stage {
        match self {
            AgentCard::Classification => Stage::Intake,
            AgentCard::RequirementMapper => Stage::Mapping,
            AgentCard::DocumentExtraction => Stage::Extraction,
            AgentCard::ValidationEngine => Stage::Validation,
            AgentCard::AnomalyDetection | AgentCard::ConfidenceScorer => Stage::Audit,
        }
    }

    /// Card body, once the result is available.
    ///
    /// Optional fields the model omitted render as an empty body.
    pub fn content(self, result: &WorkflowResult, hitm_threshold: f64) -> String {
        match self {
            AgentCard::Classification => format!(
                "Category: {}\nHS Code: {}",
                result.classification, result.hs_code
            ),
            AgentCard::RequirementMapper => result.requirements.join("\n"),
            AgentCard::DocumentExtraction => result.extraction_data.clone().unwrap_or_default(),
            AgentCard::ValidationEngine => result.validation_result.clone().unwrap_or_default(),
            AgentCard::AnomalyDetection if result.has_anomaly() => format!(
                "ALERT: {}",
                result.anomaly_detail.as_deref().unwrap_or_default()
            ),
            AgentCard::AnomalyDetection => "No anomalies detected.".to_string(),
            AgentCard::ConfidenceScorer => format!(
                "Score: {}%\nAction: {}",
                format_score(result.confidence_score),
                result.routing(hitm_threshold).action_label()
            ),
        }
    }
}

/// Everything needed to draw one agent card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub card: AgentCard,
    pub status: CardStatus,
    pub content: Option<String>,
}

/// Derive the six agent cards.
pub fn agent_cards(
    step: u8,
    result: Option<&WorkflowResult>,
    hitm_threshold: f64,
) -> Vec<CardView> {
    AgentCard::ALL
        .into_iter()
        .map(|card| CardView {
            card,
            status: CardStatus::at(step, card.stage().ordinal()),
            content: result
                .map(|r| card.content(r, hitm_threshold))
                .filter(|c| !c.is_empty()),
        })
        .collect()
}

/// Stepper entries: each stage with whether it has been reached.
pub fn stepper(step: u8) -> Vec<(Stage, bool)> {
    Stage::ALL
        .into_iter()
        .map(|stage| (stage, step >= stage.ordinal()))
        .collect()
}

/// Header title and blurb for the selected industry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub title: String,
    pub market_size: String,
    pub blurb: String,
    pub solution_points: Vec<String>,
}

pub fn header(industry: Industry, config: &IndustryConfig) -> HeaderView {
    HeaderView {
        title: format!("{} {}", config.icon, industry.label()),
        market_size: config.market_size.to_string(),
        blurb: format!(
            "The {} module handles {} in annual trade. {}",
            industry.label(),
            config.market_size,
            config.problem
        ),
        solution_points: config.solution_points.iter().map(|s| s.to_string()).collect(),
    }
}

/// The "Transaction Finalized" panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub title: &'static str,
    pub badges: [&'static str; 2],
    pub trust_framework: String,
    pub efficiency_gain: &'static str,
    pub efficiency_detail: &'static str,
    pub digital_passport: &'static str,
}

impl SummaryView {
    /// Every line of the panel, top to bottom.
    pub fn lines(&self) -> Vec<String> {
        vec![
            self.title.to_string(),
            self.badges.join("  "),
            self.trust_framework.clone(),
            self.efficiency_gain.to_string(),
            self.efficiency_detail.to_string(),
            self.digital_passport.to_string(),
        ]
    }
}

/// The summary panel, shown only once a result exists and no run is active.
pub fn summary(
    result: Option<&WorkflowResult>,
    in_progress: bool,
    hitm_threshold: f64,
) -> Option<SummaryView> {
    let result = result.filter(|_| !in_progress)?;
    let identity = match result.routing(hitm_threshold) {
        Routing::RouteToHitm => "awaiting Human validator signature.",
        Routing::AutoApprove => "fully verified.",
    };
    Some(SummaryView {
        title: "Transaction Finalized",
        badges: ["Notarized", "Token Reward: +15 VERI"],
        trust_framework: format!(
            "IOTA Trust Framework: \"Transaction anchored to IOTA Tangle. Decentralized ID {identity}\""
        ),
        efficiency_gain: "Efficiency Gain: Time saved: ~4.2 days",
        efficiency_detail: "Traditional processing: 5 days. VeriPura: 15 mins.",
        digital_passport: "Digital Passport: New DPP generated for batch. Consumer scan-ready.",
    })
}

/// Whole scores print without a decimal point.
fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{score:.0}")
    } else {
        format!("{score}")
    }
}
