//! Input Gate Module
//! Boundary validation between the raw form draft and the scorer
//!
//! Checks run in order: completeness, numeric parse, declared bounds.
//! The scorer itself never sees unvalidated input, so a malformed value
//! can no longer slip through and silently score zero points.

use crate::models::config::{BoundsPolicy, FieldSpec};
use crate::models::errors::{AppError, AppResult};
use crate::models::types::{FormDraft, FormField, HealthProfile};

/// Validates a [`FormDraft`] into a [`HealthProfile`]
pub struct InputGate {
    policy: BoundsPolicy,
}

impl InputGate {
    pub fn new(policy: BoundsPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> BoundsPolicy {
        self.policy
    }

    /// Run the full gate over a draft
    pub fn validate(&self, draft: &FormDraft) -> AppResult<HealthProfile> {
        let missing = draft.missing_fields();
        if !missing.is_empty() {
            return Err(AppError::form_incomplete(&missing));
        }

        Ok(HealthProfile {
            pregnancies: self.integer_field(draft, FormField::Pregnancies)?,
            glucose: self.integer_field(draft, FormField::Glucose)?,
            blood_pressure: self.integer_field(draft, FormField::BloodPressure)?,
            skin_thickness: self.integer_field(draft, FormField::SkinThickness)?,
            insulin: self.integer_field(draft, FormField::Insulin)?,
            bmi: self.float_field(draft, FormField::Bmi)?,
            diabetes_pedigree: self.float_field(draft, FormField::DiabetesPedigree)?,
            age: self.integer_field(draft, FormField::Age)?,
        })
    }

    /// Parse one slot as a finite number
    fn numeric(&self, draft: &FormDraft, field: FormField) -> AppResult<f64> {
        let raw = draft.get(field);
        let value: f64 = raw
            .parse()
            .map_err(|_| AppError::not_numeric(field, raw))?;
        if !value.is_finite() {
            return Err(AppError::not_numeric(field, raw));
        }
        Ok(value)
    }

    /// Apply the bounds policy to a parsed value
    fn bounded(&self, field: FormField, value: f64) -> AppResult<f64> {
        let spec = FieldSpec::of(field);
        match self.policy {
            BoundsPolicy::Reject => {
                if value < spec.min || value > spec.max {
                    Err(AppError::out_of_range(field, value, spec.min, spec.max))
                } else {
                    Ok(value)
                }
            }
            BoundsPolicy::Clamp => Ok(value.clamp(spec.min, spec.max)),
            BoundsPolicy::Passthrough => Ok(value),
        }
    }

    fn float_field(&self, draft: &FormDraft, field: FormField) -> AppResult<f64> {
        let value = self.numeric(draft, field)?;
        self.bounded(field, value)
    }

    /// Integer fields reject fractional input under the default policy
    /// and truncate under the permissive ones
    fn integer_field(&self, draft: &FormDraft, field: FormField) -> AppResult<u32> {
        let value = self.numeric(draft, field)?;
        if self.policy == BoundsPolicy::Reject && value.fract() != 0.0 {
            return Err(AppError::not_whole(field, draft.get(field)));
        }
        let value = self.bounded(field, value.trunc())?;
        // Passthrough can leave negatives; saturate rather than wrap
        Ok(value.max(0.0) as u32)
    }
}

impl Default for InputGate {
    fn default() -> Self {
        Self::new(BoundsPolicy::default())
    }
}
