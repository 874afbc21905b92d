//! Submission lifecycle: validate, probe, predict, then show exactly one of
//! form / error / result.
//!
//! ```text
//! Idle -> Validating -> Probing -> Requesting -> Idle (+result)
//!              |            |           |
//!              +------------+-----------+------> Idle (+error)
//! ```

use tracing::{debug, info, warn};

use crate::client::PredictionApi;
use crate::error::ClientError;
use crate::types::{FormState, PredictionResult};

pub type Outcome = Result<PredictionResult, ClientError>;

/// Where a submission currently is. Anything but `Idle` means loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Validating,
    Probing,
    Requesting,
}

impl Phase {
    pub fn is_loading(&self) -> bool {
        !matches!(self, Phase::Idle)
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Phase::Idle => "ready",
            Phase::Validating => "validating input",
            Phase::Probing => "checking backend",
            Phase::Requesting => "requesting prediction",
        }
    }
}

/// Which panel to show next to the form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View<'a> {
    Form,
    Error(&'a ClientError),
    Result(&'a PredictionResult),
}

/// Run the network-facing part of one submission.
///
/// The health probe and the prediction request are strictly sequential; the
/// request is only sent once the probe succeeded. The caller is already in
/// `Validating` (see [`Submission::begin`]), so `on_phase` only sees the
/// network stages.
pub async fn execute<A, F>(api: &A, form: &FormState, mut on_phase: F) -> Outcome
where
    A: PredictionApi,
    F: FnMut(Phase),
{
    form.validate()?;

    on_phase(Phase::Probing);
    api.health().await?;

    on_phase(Phase::Requesting);
    api.predict(form).await
}

/// Submission state owned by the UI: the current phase plus at most one of
/// error and result from the last attempt.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    phase: Phase,
    error: Option<ClientError>,
    result: Option<PredictionResult>,
}

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase.is_loading()
    }

    pub fn error(&self) -> Option<&ClientError> {
        self.error.as_ref()
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        self.result.as_ref()
    }

    /// Start a submission: clear the previous outcome and enter loading.
    /// Returns false (and changes nothing) if one is already in flight.
    pub fn begin(&mut self) -> bool {
        if self.is_loading() {
            warn!("submission already in flight; ignoring trigger");
            return false;
        }
        self.error = None;
        self.result = None;
        self.phase = Phase::Validating;
        info!("submission started");
        true
    }

    pub fn enter(&mut self, phase: Phase) {
        debug!("submission phase: {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    /// Record the outcome and leave loading, whatever stage failed.
    pub fn finish(&mut self, outcome: Outcome) {
        self.phase = Phase::Idle;
        match outcome {
            Ok(result) => {
                info!(
                    "prediction received: fraud={} label={:?} p_fraud={:.4}",
                    result.fraud, result.prediction_label, result.probability_fraud
                );
                self.result = Some(result);
            }
            Err(e) => {
                warn!("submission failed ({}): {}", e.kind(), e);
                if let ClientError::BackendUnavailable { reason } = &e {
                    debug!("backend unavailable: {}", reason);
                }
                self.error = Some(e);
            }
        }
    }

    /// Error wins if both are somehow present.
    pub fn view(&self) -> View<'_> {
        match (&self.error, &self.result) {
            (Some(e), _) => View::Error(e),
            (None, Some(r)) => View::Result(r),
            (None, None) => View::Form,
        }
    }

    pub async fn submit<A>(&mut self, api: &A, form: &FormState)
    where
        A: PredictionApi,
    {
        self.submit_with(api, form, |_| {}).await
    }

    /// Like [`Submission::submit`], calling `observe` after every state change.
    pub async fn submit_with<A, F>(&mut self, api: &A, form: &FormState, mut observe: F)
    where
        A: PredictionApi,
        F: FnMut(&Submission),
    {
        if !self.begin() {
            return;
        }
        observe(self);

        let outcome = execute(api, form, |phase| {
            self.enter(phase);
            observe(self);
        })
        .await;

        self.finish(outcome);
        observe(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ClientResult, BACKEND_UNAVAILABLE_MESSAGE};
    use crate::form::FormField;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// In-memory backend that records the calls it receives into a shared log.
    struct FakeApi {
        log: Arc<Mutex<Vec<String>>>,
        health: ClientResult<()>,
        predict: ClientResult<PredictionResult>,
    }

    impl FakeApi {
        fn new(log: Arc<Mutex<Vec<String>>>) -> Self {
            Self {
                log,
                health: Ok(()),
                predict: Ok(fraud_result()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.log
                .lock()
                .iter()
                .filter(|l| !l.starts_with("loading"))
                .cloned()
                .collect()
        }
    }

    impl PredictionApi for FakeApi {
        async fn health(&self) -> ClientResult<()> {
            self.log.lock().push("health".into());
            self.health.clone()
        }

        async fn predict(&self, _form: &FormState) -> ClientResult<PredictionResult> {
            self.log.lock().push("predict".into());
            self.predict.clone()
        }
    }

    fn fraud_result() -> PredictionResult {
        PredictionResult {
            fraud: true,
            prediction_label: "Fraud Detected".into(),
            probability_fraud: 0.87,
            probability_not_fraud: 0.13,
            error: None,
        }
    }

    fn negative(field: FormField) -> FormState {
        let mut form = FormState::default();
        form.update_field(field, "-5").unwrap();
        form
    }

    #[tokio::test]
    async fn negative_amounts_short_circuit_without_calls() {
        for field in FormField::NON_NEGATIVE {
            let api = FakeApi::new(Arc::default());
            let mut sub = Submission::new();
            sub.submit(&api, &negative(field)).await;

            assert!(api.calls().is_empty(), "{} triggered a network call", field);
            assert_eq!(
                sub.error().map(|e| e.to_string()).as_deref(),
                Some("Numeric values cannot be negative")
            );
            assert!(!sub.is_loading());
        }
    }

    #[tokio::test]
    async fn valid_form_probes_then_predicts() {
        let api = FakeApi::new(Arc::default());
        let mut sub = Submission::new();
        sub.submit(&api, &FormState::default()).await;

        assert_eq!(api.calls(), vec!["health", "predict"]);
        assert_eq!(sub.view(), View::Result(&fraud_result()));
    }

    #[tokio::test]
    async fn failed_probe_skips_predict() {
        let mut api = FakeApi::new(Arc::default());
        api.health = Err(ClientError::BackendUnavailable {
            reason: "refused".into(),
        });
        let mut sub = Submission::new();
        sub.submit(&api, &FormState::default()).await;

        assert_eq!(api.calls(), vec!["health"]);
        assert_eq!(
            sub.error().map(|e| e.to_string()).as_deref(),
            Some(BACKEND_UNAVAILABLE_MESSAGE)
        );
        assert!(sub.result().is_none());
    }

    #[tokio::test]
    async fn loading_spans_exactly_the_submission() {
        let log: Arc<Mutex<Vec<String>>> = Arc::default();
        let api = FakeApi::new(log.clone());
        let mut sub = Submission::new();
        assert!(!sub.is_loading());

        sub.submit_with(&api, &FormState::default(), |s| {
            log.lock().push(format!("loading={} {:?}", s.is_loading(), s.phase()));
        })
        .await;

        let entries = log.lock().clone();
        assert_eq!(
            entries,
            vec![
                "loading=true Validating",
                "loading=true Probing",
                "health",
                "loading=true Requesting",
                "predict",
                "loading=false Idle",
            ]
        );
    }

    #[tokio::test]
    async fn execute_reports_network_stages_once_each() {
        let api = FakeApi::new(Arc::default());
        let mut phases = Vec::new();
        let outcome = execute(&api, &FormState::default(), |p| phases.push(p)).await;

        assert!(outcome.is_ok());
        assert_eq!(phases, vec![Phase::Probing, Phase::Requesting]);
    }

    #[tokio::test]
    async fn invalid_form_reports_no_stage() {
        let api = FakeApi::new(Arc::default());
        let mut phases = Vec::new();
        let outcome = execute(&api, &negative(FormField::VehicleSpeed), |p| phases.push(p)).await;

        assert!(matches!(outcome, Err(ClientError::Validation { .. })));
        assert!(phases.is_empty());
    }

    #[tokio::test]
    async fn every_failure_path_clears_loading() {
        let cases: Vec<(FormState, ClientResult<()>, ClientResult<PredictionResult>)> = vec![
            (negative(FormField::AmountPaid), Ok(()), Ok(fraud_result())),
            (
                FormState::default(),
                Err(ClientError::BackendUnavailable { reason: "503".into() }),
                Ok(fraud_result()),
            ),
            (
                FormState::default(),
                Ok(()),
                Err(ClientError::prediction_request(500, None)),
            ),
            (
                FormState::default(),
                Ok(()),
                Err(ClientError::unknown("expected value at line 1")),
            ),
        ];

        for (form, health, predict) in cases {
            let mut api = FakeApi::new(Arc::default());
            api.health = health;
            api.predict = predict;
            let mut sub = Submission::new();
            sub.submit(&api, &form).await;
            assert!(!sub.is_loading());
            assert!(matches!(sub.view(), View::Error(_)));
        }
    }

    #[tokio::test]
    async fn new_submission_clears_previous_outcome() {
        let mut api = FakeApi::new(Arc::default());
        let mut sub = Submission::new();
        sub.submit(&api, &FormState::default()).await;
        assert!(sub.result().is_some());

        api.predict = Err(ClientError::prediction_request(400, Some("bad lane".into())));
        sub.submit(&api, &FormState::default()).await;
        assert!(sub.result().is_none());
        assert_eq!(sub.error().map(|e| e.to_string()).as_deref(), Some("bad lane"));
    }

    #[test]
    fn begin_refuses_while_loading() {
        let mut sub = Submission::new();
        assert!(sub.begin());
        sub.enter(Phase::Probing);
        assert!(!sub.begin());
        assert_eq!(sub.phase(), Phase::Probing);
        sub.finish(Ok(fraud_result()));
        assert!(sub.begin());
    }

    #[test]
    fn view_is_form_until_first_outcome() {
        let sub = Submission::new();
        assert_eq!(sub.view(), View::Form);
    }

    #[test]
    fn error_takes_precedence_over_result() {
        let sub = Submission {
            phase: Phase::Idle,
            error: Some(ClientError::unknown("boom")),
            result: Some(fraud_result()),
        };
        assert!(matches!(sub.view(), View::Error(_)));
    }
}
