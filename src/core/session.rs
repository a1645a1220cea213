//! Session Module
//! Orchestrates the form -> gate -> scorer pipeline
//!
//! Session state is an explicit immutable value advanced by a single
//! pure transition function, so the scoring step stays unit-testable
//! without the interactive surface. The simulated processing pause is a
//! spawned task whose handle is aborted whenever the submission becomes
//! stale; a generation counter discards results that slip past the abort.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::core::gate::InputGate;
use crate::core::scorer;
use crate::models::config::ScreenerConfig;
use crate::models::errors::AppResult;
use crate::models::types::{Assessment, FormDraft, FormField, Prediction};
use crate::utils::telemetry::TelemetryCollector;

/// State transition events
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// User changed one field; any displayed result is cleared
    FieldEdited { field: FormField, value: String },
    /// A validated submission entered the processing pause
    AssessmentScheduled,
    /// A scoring pass finished; installed only if still current
    ScoreReady {
        generation: u64,
        assessment: Assessment,
    },
    /// All fields and the prediction cleared
    FormReset,
}

/// Immutable session snapshot
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub draft: FormDraft,
    pub prediction: Prediction,
    /// Bumped on every edit, submission and reset; in-flight scoring
    /// passes carry the generation they were scheduled under
    pub generation: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The single state-transition function. Pure: consumes the old
    /// state, returns the new one.
    pub fn apply(self, event: SessionEvent) -> SessionState {
        match event {
            SessionEvent::FieldEdited { field, value } => {
                let mut draft = self.draft;
                draft.set(field, value);
                SessionState {
                    draft,
                    prediction: Prediction::Absent,
                    generation: self.generation + 1,
                }
            }
            SessionEvent::AssessmentScheduled => SessionState {
                draft: self.draft,
                prediction: Prediction::Absent,
                generation: self.generation + 1,
            },
            SessionEvent::ScoreReady {
                generation,
                assessment,
            } => {
                if generation == self.generation {
                    SessionState {
                        draft: self.draft,
                        prediction: Prediction::Classified(assessment),
                        generation: self.generation,
                    }
                } else {
                    debug!(
                        stale = generation,
                        current = self.generation,
                        "Discarding stale scoring pass"
                    );
                    self
                }
            }
            SessionEvent::FormReset => SessionState {
                draft: FormDraft::new(),
                prediction: Prediction::Absent,
                generation: self.generation + 1,
            },
        }
    }
}

/// Async driver owning the state, the input gate and the pending
/// delayed scoring task
pub struct ScreenerSession {
    state: SessionState,
    gate: InputGate,
    delay: Duration,
    telemetry: Arc<TelemetryCollector>,
    pending: Option<JoinHandle<()>>,
    tx: UnboundedSender<SessionEvent>,
}

impl ScreenerSession {
    /// Create a session and the receiver on which finished scoring
    /// passes arrive
    pub fn new(
        config: &ScreenerConfig,
        telemetry: Arc<TelemetryCollector>,
    ) -> (Self, UnboundedReceiver<SessionEvent>) {
        let (tx, rx) = unbounded_channel();
        let session = Self {
            state: SessionState::new(),
            gate: InputGate::new(config.bounds_policy),
            delay: config.processing_delay,
            telemetry,
            pending: None,
            tx,
        };
        (session, rx)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Store a raw field value. Clears any displayed result and aborts
    /// a pending scoring pass.
    pub fn edit(&mut self, field: FormField, value: &str) {
        self.cancel_pending();
        self.advance(SessionEvent::FieldEdited {
            field,
            value: value.to_string(),
        });
    }

    /// Clear the whole form
    pub fn reset(&mut self) {
        self.cancel_pending();
        self.advance(SessionEvent::FormReset);
    }

    /// Validate the draft and schedule a scoring pass behind the
    /// simulated processing pause. On a rejected draft the prior
    /// prediction is left untouched.
    pub fn submit(&mut self) -> AppResult<()> {
        let profile = match self.gate.validate(&self.state.draft) {
            Ok(profile) => profile,
            Err(e) => {
                self.telemetry.record_rejection();
                return Err(e);
            }
        };

        self.cancel_pending();
        self.advance(SessionEvent::AssessmentScheduled);

        let generation = self.state.generation;
        let delay = self.delay;
        let tx = self.tx.clone();
        let started = Instant::now();

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut assessment: Assessment = scorer::assess(&profile).into();
            assessment.set_latency(started);
            let _ = tx.send(SessionEvent::ScoreReady {
                generation,
                assessment,
            });
        }));

        Ok(())
    }

    /// Feed a finished scoring pass back into the state. Returns the
    /// installed assessment, or None if the pass was stale.
    pub fn deliver(&mut self, event: SessionEvent) -> Option<&Assessment> {
        let was_current = matches!(
            &event,
            SessionEvent::ScoreReady { generation, .. } if *generation == self.state.generation
        );
        self.advance(event);

        if !was_current {
            return None;
        }
        self.pending = None;

        match &self.state.prediction {
            Prediction::Classified(assessment) => {
                self.telemetry.record_assessment(assessment);
                Some(assessment)
            }
            Prediction::Absent => None,
        }
    }

    /// Abort a pending scoring pass, if any
    pub fn shutdown(&mut self) {
        self.cancel_pending();
    }

    fn advance(&mut self, event: SessionEvent) {
        self.state = std::mem::take(&mut self.state).apply(event);
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::BoundsPolicy;
    use crate::models::errors::ErrorCode;
    use crate::models::types::Classification;
    use std::path::PathBuf;

    fn test_config() -> ScreenerConfig {
        ScreenerConfig {
            processing_delay: Duration::from_millis(0),
            bounds_policy: BoundsPolicy::Reject,
            telemetry_dir: PathBuf::from("./telemetry"),
        }
    }

    fn fill(session: &mut ScreenerSession) {
        session.edit(FormField::Pregnancies, "6");
        session.edit(FormField::Glucose, "148");
        session.edit(FormField::BloodPressure, "72");
        session.edit(FormField::SkinThickness, "35");
        session.edit(FormField::Insulin, "0");
        session.edit(FormField::Bmi, "33.6");
        session.edit(FormField::DiabetesPedigree, "0.627");
        session.edit(FormField::Age, "50");
    }

    #[test]
    fn test_edit_clears_prediction() {
        let state = SessionState::new().apply(SessionEvent::ScoreReady {
            generation: 0,
            assessment: Assessment::new(Classification::Diabetic, 9, vec![]),
        });
        assert!(!state.prediction.is_absent());

        let state = state.apply(SessionEvent::FieldEdited {
            field: FormField::Glucose,
            value: "150".to_string(),
        });
        assert!(state.prediction.is_absent());
        assert_eq!(state.draft.get(FormField::Glucose), "150");
    }

    #[test]
    fn test_stale_score_discarded() {
        let state = SessionState::new()
            .apply(SessionEvent::FieldEdited {
                field: FormField::Glucose,
                value: "148".to_string(),
            })
            .apply(SessionEvent::ScoreReady {
                generation: 0, // pre-edit generation
                assessment: Assessment::new(Classification::Diabetic, 9, vec![]),
            });
        assert!(state.prediction.is_absent(), "Stale pass must not install");
    }

    #[test]
    fn test_reset_clears_everything() {
        let state = SessionState::new()
            .apply(SessionEvent::FieldEdited {
                field: FormField::Age,
                value: "50".to_string(),
            })
            .apply(SessionEvent::FormReset);
        assert!(state.draft.missing_fields().len() == 8);
        assert!(state.prediction.is_absent());
    }

    #[tokio::test]
    async fn test_submit_and_deliver() {
        let telemetry = Arc::new(TelemetryCollector::default());
        let (mut session, mut rx) = ScreenerSession::new(&test_config(), telemetry.clone());
        fill(&mut session);

        session.submit().expect("complete draft should submit");
        let event = rx.recv().await.expect("scoring pass should arrive");

        let assessment = session.deliver(event).expect("pass should install");
        assert_eq!(assessment.classification, Classification::Diabetic);
        assert_eq!(assessment.total, 9);
        assert_eq!(telemetry.get_stats().total_assessed, 1);
    }

    #[tokio::test]
    async fn test_incomplete_submit_leaves_prediction_absent() {
        let telemetry = Arc::new(TelemetryCollector::default());
        let (mut session, _rx) = ScreenerSession::new(&test_config(), telemetry.clone());
        session.edit(FormField::Glucose, "148");

        let err = session.submit().unwrap_err();
        assert_eq!(err.code, ErrorCode::FormIncomplete);
        assert!(session.state().prediction.is_absent());
        assert_eq!(telemetry.get_stats().total_rejected, 1);
    }

    #[tokio::test]
    async fn test_edit_during_delay_discards_result() {
        let telemetry = Arc::new(TelemetryCollector::default());
        let (mut session, mut rx) = ScreenerSession::new(&test_config(), telemetry);
        fill(&mut session);

        session.submit().expect("complete draft should submit");
        // Edit before the pass is delivered: generation moves on
        session.edit(FormField::Glucose, "99");

        // The aborted task may never send; drain what made it through
        tokio::time::sleep(Duration::from_millis(20)).await;
        while let Ok(event) = rx.try_recv() {
            assert!(session.deliver(event).is_none(), "Stale pass must be dropped");
        }
        assert!(session.state().prediction.is_absent());
    }

    #[tokio::test]
    async fn test_resubmit_only_newest_wins() {
        let telemetry = Arc::new(TelemetryCollector::default());
        let (mut session, mut rx) = ScreenerSession::new(&test_config(), telemetry);
        fill(&mut session);

        session.submit().expect("first submit");
        session.submit().expect("second submit");

        // Drain whatever arrives; only the newest generation may install
        tokio::time::sleep(Duration::from_millis(20)).await;
        let mut installed = 0;
        while let Ok(event) = rx.try_recv() {
            if session.deliver(event).is_some() {
                installed += 1;
            }
        }
        // Allow for the first task being aborted before sending
        assert!(installed <= 1);
    }
}
