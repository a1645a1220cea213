//! Risk Scoring Module
//! Band-based threshold scoring over a validated health profile
//!
//! Each factor is evaluated independently against fixed bands; only the
//! highest matching band within a factor awards points. The total is
//! compared against a single classification threshold.

use crate::models::types::{Assessment, Classification, HealthProfile, ScoreFactor};

/// Total score at or above this classifies as diabetic
pub const CLASSIFICATION_THRESHOLD: u8 = 4;

/// Highest total the band table can produce (3+2+2+2+1+2)
pub const MAX_SCORE: u8 = 12;

/// Outcome of one scoring pass
#[derive(Debug, Clone)]
pub struct RiskScore {
    /// Sum of all awarded band points
    pub total: u8,
    /// Binary risk flag derived from the total
    pub classification: Classification,
    /// Detailed breakdown for transparency
    pub breakdown: Vec<ScoreFactor>,
}

impl From<RiskScore> for Assessment {
    fn from(score: RiskScore) -> Self {
        Assessment::new(score.classification, score.total, score.breakdown)
    }
}

/// Builder recording one banded factor at a time
pub struct ScoreCardBuilder {
    total: u8,
    factors: Vec<ScoreFactor>,
}

impl ScoreCardBuilder {
    pub fn new() -> Self {
        Self {
            total: 0,
            factors: Vec::new(),
        }
    }

    fn banded(mut self, name: &str, points: u8, reason: String) -> Self {
        self.total += points;
        self.factors.push(ScoreFactor {
            name: name.to_string(),
            points,
            reason,
        });
        self
    }

    /// Plasma glucose band (mg/dL)
    pub fn with_glucose(self, glucose: u32) -> Self {
        let (points, band) = if glucose >= 126 {
            (3, ">=126")
        } else if glucose >= 100 {
            (2, "100-125")
        } else {
            (0, "<100")
        };
        self.banded("glucose", points, format!("{} mg/dL, band {}", glucose, band))
    }

    /// Diastolic blood pressure band (mmHg)
    pub fn with_blood_pressure(self, bp: u32) -> Self {
        let (points, band) = if bp >= 140 {
            (2, ">=140")
        } else if bp >= 130 {
            (1, "130-139")
        } else {
            (0, "<130")
        };
        self.banded("blood_pressure", points, format!("{} mmHg, band {}", bp, band))
    }

    /// Body mass index band
    pub fn with_bmi(self, bmi: f64) -> Self {
        let (points, band) = if bmi >= 30.0 {
            (2, ">=30")
        } else if bmi >= 25.0 {
            (1, "25-29.9")
        } else {
            (0, "<25")
        };
        self.banded("bmi", points, format!("{:.1} kg/m², band {}", bmi, band))
    }

    /// Age band (years)
    pub fn with_age(self, age: u32) -> Self {
        let (points, band) = if age >= 65 {
            (2, ">=65")
        } else if age >= 45 {
            (1, "45-64")
        } else {
            (0, "<45")
        };
        self.banded("age", points, format!("{} years, band {}", age, band))
    }

    /// Pregnancy count band
    pub fn with_pregnancies(self, pregnancies: u32) -> Self {
        let (points, band) = if pregnancies >= 3 { (1, ">=3") } else { (0, "<3") };
        self.banded("pregnancies", points, format!("{}, band {}", pregnancies, band))
    }

    /// Diabetes pedigree function band
    pub fn with_pedigree(self, pedigree: f64) -> Self {
        let (points, band) = if pedigree >= 0.5 {
            (2, ">=0.5")
        } else if pedigree >= 0.3 {
            (1, "0.3-0.49")
        } else {
            (0, "<0.3")
        };
        self.banded("diabetes_pedigree", points, format!("{:.3}, band {}", pedigree, band))
    }

    /// Sum the awarded points and classify
    pub fn build(self) -> RiskScore {
        let classification = if self.total >= CLASSIFICATION_THRESHOLD {
            Classification::Diabetic
        } else {
            Classification::NotDiabetic
        };

        RiskScore {
            total: self.total,
            classification,
            breakdown: self.factors,
        }
    }
}

impl Default for ScoreCardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Score a validated profile. Pure and deterministic: the same profile
/// always yields the same result. Skin thickness and insulin are recorded
/// measurements but carry no bands.
pub fn assess(profile: &HealthProfile) -> RiskScore {
    ScoreCardBuilder::new()
        .with_glucose(profile.glucose)
        .with_blood_pressure(profile.blood_pressure)
        .with_bmi(profile.bmi)
        .with_age(profile.age)
        .with_pregnancies(profile.pregnancies)
        .with_pedigree(profile.diabetes_pedigree)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(
        pregnancies: u32,
        glucose: u32,
        blood_pressure: u32,
        bmi: f64,
        diabetes_pedigree: f64,
        age: u32,
    ) -> HealthProfile {
        HealthProfile {
            pregnancies,
            glucose,
            blood_pressure,
            skin_thickness: 20,
            insulin: 80,
            bmi,
            diabetes_pedigree,
            age,
        }
    }

    #[test]
    fn test_every_band_maxed_scores_twelve() {
        let score = assess(&profile(3, 126, 140, 30.0, 0.5, 65));
        assert_eq!(score.total, 12);
        assert_eq!(score.classification, Classification::Diabetic);
    }

    #[test]
    fn test_every_factor_below_lowest_band_scores_zero() {
        let score = assess(&profile(2, 99, 129, 24.9, 0.29, 44));
        assert_eq!(score.total, 0);
        assert_eq!(score.classification, Classification::NotDiabetic);
    }

    #[test]
    fn test_threshold_boundary() {
        // glucose 100-125 (+2) + bmi >=30 (+2) = 4 -> diabetic
        let at_threshold = assess(&profile(0, 100, 70, 31.0, 0.1, 30));
        assert_eq!(at_threshold.total, 4);
        assert_eq!(at_threshold.classification, Classification::Diabetic);

        // glucose >=126 (+3) = 3 -> not diabetic
        let below_threshold = assess(&profile(0, 130, 70, 20.0, 0.1, 30));
        assert_eq!(below_threshold.total, 3);
        assert_eq!(below_threshold.classification, Classification::NotDiabetic);
    }

    #[test]
    fn test_worked_example() {
        // glucose >=126 (+3), bp <130 (+0), bmi >=30 (+2), age 45-64 (+1),
        // pregnancies >=3 (+1), pedigree >=0.5 (+2) = 9
        let score = assess(&HealthProfile {
            pregnancies: 6,
            glucose: 148,
            blood_pressure: 72,
            skin_thickness: 35,
            insulin: 0,
            bmi: 33.6,
            diabetes_pedigree: 0.627,
            age: 50,
        });
        assert_eq!(score.total, 9);
        assert_eq!(score.classification, Classification::Diabetic);
    }

    #[test]
    fn test_bands_are_mutually_exclusive_per_factor() {
        // glucose 126 must award 3, not 3+2
        let score = ScoreCardBuilder::new().with_glucose(126).build();
        assert_eq!(score.total, 3);

        let score = ScoreCardBuilder::new().with_glucose(125).build();
        assert_eq!(score.total, 2);

        let score = ScoreCardBuilder::new().with_glucose(99).build();
        assert_eq!(score.total, 0);
    }

    #[test]
    fn test_bmi_band_edges() {
        assert_eq!(ScoreCardBuilder::new().with_bmi(30.0).build().total, 2);
        assert_eq!(ScoreCardBuilder::new().with_bmi(29.9).build().total, 1);
        assert_eq!(ScoreCardBuilder::new().with_bmi(25.0).build().total, 1);
        assert_eq!(ScoreCardBuilder::new().with_bmi(24.9).build().total, 0);
    }

    #[test]
    fn test_pedigree_band_edges() {
        assert_eq!(ScoreCardBuilder::new().with_pedigree(0.5).build().total, 2);
        assert_eq!(ScoreCardBuilder::new().with_pedigree(0.49).build().total, 1);
        assert_eq!(ScoreCardBuilder::new().with_pedigree(0.3).build().total, 1);
        assert_eq!(ScoreCardBuilder::new().with_pedigree(0.29).build().total, 0);
    }

    #[test]
    fn test_idempotence() {
        let p = profile(6, 148, 72, 33.6, 0.627, 50);
        let first = assess(&p);
        let second = assess(&p);
        assert_eq!(first.total, second.total);
        assert_eq!(first.classification, second.classification);
        assert_eq!(first.breakdown.len(), second.breakdown.len());
    }

    #[test]
    fn test_breakdown_covers_all_banded_factors() {
        let score = assess(&profile(0, 80, 70, 20.0, 0.1, 30));
        assert_eq!(score.breakdown.len(), 6);
        for factor in &score.breakdown {
            assert!(!factor.reason.is_empty(), "Reason should not be empty");
        }
    }
}
