//! Type definitions for DiaScreen
//! All core data structures for risk assessment

use serde::{Deserialize, Serialize};
use std::time::Instant;

/// The eight measurements of a screening form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormField {
    Pregnancies,
    Glucose,
    BloodPressure,
    SkinThickness,
    Insulin,
    Bmi,
    DiabetesPedigree,
    Age,
}

impl FormField {
    /// All fields in form order
    pub const ALL: [FormField; 8] = [
        FormField::Pregnancies,
        FormField::Glucose,
        FormField::BloodPressure,
        FormField::SkinThickness,
        FormField::Insulin,
        FormField::Bmi,
        FormField::DiabetesPedigree,
        FormField::Age,
    ];

    /// Slot index into a [`FormDraft`]
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Pregnancies => "pregnancies",
            FormField::Glucose => "glucose",
            FormField::BloodPressure => "blood_pressure",
            FormField::SkinThickness => "skin_thickness",
            FormField::Insulin => "insulin",
            FormField::Bmi => "bmi",
            FormField::DiabetesPedigree => "diabetes_pedigree",
            FormField::Age => "age",
        }
    }

    /// Parse a field name as typed at the prompt (accepts short aliases)
    pub fn parse(name: &str) -> Option<FormField> {
        match name.to_lowercase().as_str() {
            "pregnancies" => Some(FormField::Pregnancies),
            "glucose" => Some(FormField::Glucose),
            "blood_pressure" | "bp" => Some(FormField::BloodPressure),
            "skin_thickness" | "skin" => Some(FormField::SkinThickness),
            "insulin" => Some(FormField::Insulin),
            "bmi" => Some(FormField::Bmi),
            "diabetes_pedigree" | "pedigree" => Some(FormField::DiabetesPedigree),
            "age" => Some(FormField::Age),
            _ => None,
        }
    }
}

/// Raw form content: eight string slots, exactly what the user typed.
/// Unvalidated until it passes the input gate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    slots: [String; 8],
}

impl FormDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the raw value for a field (surrounding whitespace dropped)
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        self.slots[field.index()] = value.into().trim().to_string();
    }

    pub fn get(&self, field: FormField) -> &str {
        &self.slots[field.index()]
    }

    pub fn is_empty(&self, field: FormField) -> bool {
        self.slots[field.index()].is_empty()
    }

    /// Fields still holding no content, in form order
    pub fn missing_fields(&self) -> Vec<FormField> {
        FormField::ALL
            .iter()
            .copied()
            .filter(|f| self.is_empty(*f))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(|s| !s.is_empty())
    }

    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.clear();
        }
    }
}

/// A fully validated set of measurements, ready for scoring.
/// Ephemeral: built on submit, discarded on the next edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthProfile {
    pub pregnancies: u32,
    /// Plasma glucose, mg/dL
    pub glucose: u32,
    /// Diastolic blood pressure, mmHg
    pub blood_pressure: u32,
    /// Triceps skin fold, mm
    pub skin_thickness: u32,
    /// Serum insulin, μU/mL
    pub insulin: u32,
    pub bmi: f64,
    /// Diabetes pedigree function
    pub diabetes_pedigree: f64,
    pub age: u32,
}

/// Binary classification produced by the scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    /// Total score reached the classification threshold
    Diabetic,
    /// Total score stayed below the threshold
    NotDiabetic,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Diabetic => "DIABETIC",
            Classification::NotDiabetic => "NOT DIABETIC",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Classification::Diabetic => "🔴",
            Classification::NotDiabetic => "✅",
        }
    }
}

/// Individual factor contributing to the total score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreFactor {
    pub name: String,
    pub points: u8,
    pub reason: String,
}

/// Result of one completed scoring pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    /// Binary risk flag
    pub classification: Classification,
    /// Sum of all awarded band points
    pub total: u8,
    /// Per-factor breakdown for transparency
    pub breakdown: Vec<ScoreFactor>,
    /// End-to-end latency in milliseconds (includes the simulated delay)
    pub latency_ms: u64,
    /// Unix timestamp of the pass
    pub timestamp: u64,
}

impl Assessment {
    pub fn new(classification: Classification, total: u8, breakdown: Vec<ScoreFactor>) -> Self {
        Self {
            classification,
            total,
            breakdown,
            latency_ms: 0,
            timestamp: chrono::Utc::now().timestamp().max(0) as u64,
        }
    }

    /// Set the assessment latency
    pub fn set_latency(&mut self, start: Instant) {
        self.latency_ms = start.elapsed().as_millis() as u64;
    }

    /// Pretty print the assessment
    pub fn summary(&self) -> String {
        let mut output = format!(
            "\n{} Result: {} | Score: {}/12\n",
            self.classification.emoji(),
            self.classification.as_str(),
            self.total,
        );

        if !self.breakdown.is_empty() {
            output.push_str("   Factors:\n");
            for factor in &self.breakdown {
                output.push_str(&format!(
                    "     - {} (+{}): {}\n",
                    factor.name, factor.points, factor.reason
                ));
            }
        }
        output.push_str(&format!("   Latency: {}ms\n", self.latency_ms));

        output
    }
}

/// Displayed prediction state.
/// Set only after a successful scoring pass; reset to [`Prediction::Absent`]
/// whenever any input changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub enum Prediction {
    #[default]
    Absent,
    Classified(Assessment),
}

impl Prediction {
    pub fn is_absent(&self) -> bool {
        matches!(self, Prediction::Absent)
    }

    pub fn classification(&self) -> Option<Classification> {
        match self {
            Prediction::Absent => None,
            Prediction::Classified(a) => Some(a.classification),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_parse_aliases() {
        assert_eq!(FormField::parse("bp"), Some(FormField::BloodPressure));
        assert_eq!(FormField::parse("Pedigree"), Some(FormField::DiabetesPedigree));
        assert_eq!(FormField::parse("glucose"), Some(FormField::Glucose));
        assert_eq!(FormField::parse("cholesterol"), None);
    }

    #[test]
    fn test_draft_completeness() {
        let mut draft = FormDraft::new();
        assert!(!draft.is_complete());
        assert_eq!(draft.missing_fields().len(), 8);

        for field in FormField::ALL {
            draft.set(field, "1");
        }
        assert!(draft.is_complete());
        assert!(draft.missing_fields().is_empty());

        draft.set(FormField::Insulin, "   ");
        assert_eq!(draft.missing_fields(), vec![FormField::Insulin]);
    }

    #[test]
    fn test_draft_trims_input() {
        let mut draft = FormDraft::new();
        draft.set(FormField::Glucose, "  148  ");
        assert_eq!(draft.get(FormField::Glucose), "148");
    }

    #[test]
    fn test_prediction_default_absent() {
        let prediction = Prediction::default();
        assert!(prediction.is_absent());
        assert_eq!(prediction.classification(), None);
    }
}
