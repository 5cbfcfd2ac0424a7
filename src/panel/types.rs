//! Panel Data Model
//!
//! Data shapes for the attack-analysis snapshot and the displayed state.
//! No merge or chart logic here - only definitions, seeded defaults and
//! the defensive extraction of a snapshot from a decoded JSON body.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// THREAT LEVEL
// ============================================================================

/// Severity classification reported by the analysis backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThreatLevel {
    Low,
    Medium,
    High,
}

impl ThreatLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatLevel::Low => "Low",
            ThreatLevel::Medium => "Medium",
            ThreatLevel::High => "High",
        }
    }

    pub fn severity_level(&self) -> u8 {
        match self {
            ThreatLevel::Low => 0,
            ThreatLevel::Medium => 1,
            ThreatLevel::High => 2,
        }
    }

    /// Badge color for the renderer
    pub fn color(&self) -> &'static str {
        match self {
            ThreatLevel::Low => "#10B981",    // Green
            ThreatLevel::Medium => "#F59E0B", // Yellow
            ThreatLevel::High => "#EF4444",   // Red
        }
    }

    /// Parse a backend string. Unrecognized levels come back as `None`
    /// and are treated like an absent field during reconciliation.
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("low") {
            Some(ThreatLevel::Low)
        } else if value.eq_ignore_ascii_case("medium") {
            Some(ThreatLevel::Medium)
        } else if value.eq_ignore_ascii_case("high") {
            Some(ThreatLevel::High)
        } else {
            None
        }
    }
}

impl std::fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// SNAPSHOT LEAVES
// ============================================================================

/// One bucket of the threat distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSlice {
    pub name: String,
    pub value: f64,
    /// Color token passed through to the renderer untouched
    pub color: String,
}

/// One row of the attack-type table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackTypeRow {
    #[serde(rename = "type")]
    pub attack_type: String,
    pub probability: f64,
    pub detected: u32,
}

/// Model quality metrics, conventionally in [0, 100] (not enforced)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    #[serde(rename = "f1Score")]
    pub f1_score: f64,
}

/// Dataset provenance - influences labeling only, never chart logic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    #[serde(rename = "type")]
    pub dataset_type: String,
    pub attacks_available: bool,
}

impl DatasetInfo {
    /// Label shown next to the panel title
    pub fn display_label(&self) -> String {
        if self.attacks_available {
            format!("{} (labeled attacks)", self.dataset_type)
        } else {
            self.dataset_type.clone()
        }
    }
}

// ============================================================================
// THREAT SNAPSHOT (wire format)
// ============================================================================

/// One payload from `GET /api/attack-analysis`.
///
/// Every field is optional: the backend may answer with any subset, and a
/// missing or wrong-shaped field simply keeps the displayed value during
/// reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ThreatSnapshot {
    pub threat_level: Option<ThreatLevel>,
    pub confidence_score: Option<f64>,
    pub threat_distribution: Option<Vec<DistributionSlice>>,
    pub attack_types: Option<Vec<AttackTypeRow>>,
    pub model_metrics: Option<ModelMetrics>,
    pub dataset_info: Option<DatasetInfo>,
}

impl ThreatSnapshot {
    /// Extract a snapshot from a decoded JSON body.
    ///
    /// The body must be an object; anything else is a malformed response.
    /// Individual fields are pulled out defensively - a wrong-typed field
    /// is treated as absent rather than failing the whole snapshot, and
    /// unknown fields are ignored.
    pub fn from_value(body: &Value) -> Option<Self> {
        let obj = body.as_object()?;

        Some(Self {
            threat_level: obj
                .get("threat_level")
                .and_then(Value::as_str)
                .and_then(ThreatLevel::parse),
            confidence_score: obj.get("confidence_score").and_then(Value::as_f64),
            threat_distribution: extract(obj, "threat_distribution"),
            attack_types: extract(obj, "attack_types"),
            model_metrics: extract(obj, "model_metrics"),
            dataset_info: extract(obj, "dataset_info"),
        })
    }
}

/// Deserialize one field, mapping any shape mismatch to `None`
fn extract<T: serde::de::DeserializeOwned>(
    obj: &serde_json::Map<String, Value>,
    key: &str,
) -> Option<T> {
    obj.get(key)
        .cloned()
        .and_then(|value| serde_json::from_value(value).ok())
}

// ============================================================================
// DISPLAY STATE
// ============================================================================

/// The state actually shown to the user.
///
/// Always fully populated: seeded with defaults at construction, then only
/// ever replaced field-by-field by values that passed reconciliation (plus
/// the drift adjustment to confidence). A failed or partial poll can never
/// blank a field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayState {
    pub threat_level: ThreatLevel,
    pub confidence_score: f64,
    pub threat_distribution: Vec<DistributionSlice>,
    pub attack_types: Vec<AttackTypeRow>,
    pub model_metrics: ModelMetrics,
    pub dataset_info: DatasetInfo,
}

impl Default for DisplayState {
    /// Seeded defaults shown before the first successful poll
    fn default() -> Self {
        Self {
            threat_level: ThreatLevel::Low,
            confidence_score: 94.7,
            threat_distribution: vec![
                slice("Normal", 85.0, "#10B981"),
                slice("Suspicious", 12.0, "#F59E0B"),
                slice("Malicious", 3.0, "#EF4444"),
            ],
            attack_types: vec![
                row("Flow Manipulation", 18.0, 2),
                row("Pressure Attack", 12.0, 1),
                row("Level Sensor Spoofing", 8.0, 0),
                row("Pump Control Attack", 15.0, 1),
                row("Quality Tampering", 5.0, 0),
            ],
            model_metrics: ModelMetrics {
                accuracy: 96.2,
                precision: 94.1,
                recall: 91.8,
                f1_score: 92.9,
            },
            dataset_info: DatasetInfo {
                dataset_type: "Generic".to_string(),
                attacks_available: false,
            },
        }
    }
}

fn slice(name: &str, value: f64, color: &str) -> DistributionSlice {
    DistributionSlice {
        name: name.to_string(),
        value,
        color: color.to_string(),
    }
}

fn row(attack_type: &str, probability: f64, detected: u32) -> AttackTypeRow {
    AttackTypeRow {
        attack_type: attack_type.to_string(),
        probability,
        detected,
    }
}

// ============================================================================
// TESTS
// ============================================================================
