//! Configuration module for DiaScreen
//! Handles all configurable parameters and the declared field metadata

use crate::models::types::FormField;
use crate::utils::constants::{DEFAULT_DELAY_MS, DEFAULT_TELEMETRY_DIR};
use std::path::PathBuf;
use std::time::Duration;

/// Declared metadata for one form field: label, unit and input affordances.
/// Under the default bounds policy the min/max are also enforced by the
/// input gate, not just displayed.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub field: FormField,
    pub label: &'static str,
    pub unit: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// Whole numbers only
    pub integer: bool,
}

/// Field metadata table, in form order
pub const FIELD_SPECS: [FieldSpec; 8] = [
    FieldSpec {
        field: FormField::Pregnancies,
        label: "Pregnancies",
        unit: "",
        min: 0.0,
        max: 17.0,
        step: 1.0,
        integer: true,
    },
    FieldSpec {
        field: FormField::Glucose,
        label: "Glucose",
        unit: "mg/dL",
        min: 0.0,
        max: 300.0,
        step: 1.0,
        integer: true,
    },
    FieldSpec {
        field: FormField::BloodPressure,
        label: "Blood Pressure",
        unit: "mmHg",
        min: 0.0,
        max: 200.0,
        step: 1.0,
        integer: true,
    },
    FieldSpec {
        field: FormField::SkinThickness,
        label: "Skin Thickness",
        unit: "mm",
        min: 0.0,
        max: 100.0,
        step: 1.0,
        integer: true,
    },
    FieldSpec {
        field: FormField::Insulin,
        label: "Insulin",
        unit: "μU/mL",
        min: 0.0,
        max: 900.0,
        step: 1.0,
        integer: true,
    },
    FieldSpec {
        field: FormField::Bmi,
        label: "BMI",
        unit: "kg/m²",
        min: 10.0,
        max: 70.0,
        step: 0.1,
        integer: false,
    },
    FieldSpec {
        field: FormField::DiabetesPedigree,
        label: "Diabetes Pedigree",
        unit: "",
        min: 0.0,
        max: 2.5,
        step: 0.001,
        integer: false,
    },
    FieldSpec {
        field: FormField::Age,
        label: "Age",
        unit: "years",
        min: 1.0,
        max: 120.0,
        step: 1.0,
        integer: true,
    },
];

impl FieldSpec {
    /// Look up the spec for a field
    #[inline]
    pub fn of(field: FormField) -> &'static FieldSpec {
        &FIELD_SPECS[field.index()]
    }

    /// Short range hint for rendering, e.g. "0-300 mg/dL"
    pub fn range_hint(&self) -> String {
        if self.unit.is_empty() {
            format!("{}-{}", self.min, self.max)
        } else {
            format!("{}-{} {}", self.min, self.max, self.unit)
        }
    }
}

/// What the input gate does with values outside the declared range.
/// The source form only used the ranges as presentational hints; the
/// default here is to enforce them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundsPolicy {
    /// Reject out-of-range values with an error
    #[default]
    Reject,
    /// Pin out-of-range values to the declared bounds
    Clamp,
    /// Accept any parsed number (source behavior)
    Passthrough,
}

impl BoundsPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundsPolicy::Reject => "reject",
            BoundsPolicy::Clamp => "clamp",
            BoundsPolicy::Passthrough => "passthrough",
        }
    }

    /// Parse a policy name (case-insensitive)
    pub fn parse(s: &str) -> Option<BoundsPolicy> {
        match s.to_lowercase().as_str() {
            "reject" => Some(BoundsPolicy::Reject),
            "clamp" => Some(BoundsPolicy::Clamp),
            "passthrough" => Some(BoundsPolicy::Passthrough),
            _ => None,
        }
    }
}

/// Configuration for the screener
pub struct ScreenerConfig {
    /// Simulated processing pause before a result is revealed
    pub processing_delay: Duration,

    /// Out-of-range handling at the input gate
    pub bounds_policy: BoundsPolicy,

    /// Directory for telemetry export
    pub telemetry_dir: PathBuf,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        let delay_ms = std::env::var("SCREENER_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_DELAY_MS);

        let bounds_policy = std::env::var("SCREENER_BOUNDS")
            .ok()
            .and_then(|v| BoundsPolicy::parse(&v))
            .unwrap_or_default();

        let telemetry_dir = std::env::var("SCREENER_TELEMETRY_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_TELEMETRY_DIR));

        Self {
            processing_delay: Duration::from_millis(delay_ms),
            bounds_policy,
            telemetry_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_lookup() {
        let spec = FieldSpec::of(FormField::Glucose);
        assert_eq!(spec.field, FormField::Glucose);
        assert_eq!(spec.max, 300.0);
        assert!(spec.integer);

        let spec = FieldSpec::of(FormField::Bmi);
        assert_eq!(spec.min, 10.0);
        assert!(!spec.integer);
    }

    #[test]
    fn test_specs_cover_all_fields_in_order() {
        for (i, spec) in FIELD_SPECS.iter().enumerate() {
            assert_eq!(spec.field.index(), i, "spec table out of form order");
        }
    }

    #[test]
    fn test_bounds_policy_parse() {
        assert_eq!(BoundsPolicy::parse("Clamp"), Some(BoundsPolicy::Clamp));
        assert_eq!(BoundsPolicy::parse("REJECT"), Some(BoundsPolicy::Reject));
        assert_eq!(BoundsPolicy::parse("strict"), None);
    }

    #[test]
    fn test_range_hint() {
        assert_eq!(FieldSpec::of(FormField::Glucose).range_hint(), "0-300 mg/dL");
        assert_eq!(FieldSpec::of(FormField::Pregnancies).range_hint(), "0-17");
    }
}
