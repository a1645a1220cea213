//! DiaScreen Library
//!
//! Interactive diabetes risk screener built around a band-based
//! threshold scorer:
//! - Eight validated numeric measurements per assessment
//! - Independently evaluated threshold bands, fixed classification cutoff
//! - Reducer-style session state with a cancellable processing pause

pub mod core;
pub mod form;
pub mod models;
pub mod utils;

pub use crate::core::gate::InputGate;
pub use crate::core::scorer::{
    assess, RiskScore, ScoreCardBuilder, CLASSIFICATION_THRESHOLD, MAX_SCORE,
};
pub use crate::core::session::{ScreenerSession, SessionEvent, SessionState};
pub use crate::form::console::Console;
pub use crate::models::config::{BoundsPolicy, FieldSpec, ScreenerConfig, FIELD_SPECS};
pub use crate::models::errors::{AppError, AppResult, ErrorCode};
pub use crate::models::types::{
    Assessment, Classification, FormDraft, FormField, HealthProfile, Prediction, ScoreFactor,
};
pub use crate::utils::telemetry::{ScreenerStats, ScreeningEvent, TelemetryCollector};
