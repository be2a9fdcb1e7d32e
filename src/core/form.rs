use crate::core::flow::WaitlistFlow;
use crate::domain::model::{SourceTag, WaitlistEntry};
use crate::domain::ports::{ConfigProvider, EntryStore};
use std::time::Duration;
use tokio::time::Instant;

pub const DEFAULT_SUCCESS_RESET: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq)]
pub enum FormState {
    Idle,
    Submitting,
    Success { entry: WaitlistEntry },
    Failed { message: String },
}

/// Drives one signup surface (e.g. the hero form) through
/// `Idle -> Submitting -> {Success, Failed}`.
pub struct WaitlistForm<'a, E: EntryStore> {
    flow: &'a WaitlistFlow<E>,
    source: SourceTag,
    success_reset: Duration,
    email: String,
    state: FormState,
    success_until: Option<Instant>,
}

impl<'a, E: EntryStore> WaitlistForm<'a, E> {
    pub fn new(flow: &'a WaitlistFlow<E>, source: Option<&str>) -> Self {
        let source = source
            .map(SourceTag::new)
            .unwrap_or_else(|| flow.default_source().clone());

        Self {
            flow,
            source,
            success_reset: DEFAULT_SUCCESS_RESET,
            email: String::new(),
            state: FormState::Idle,
            success_until: None,
        }
    }

    /// Takes the success reset delay from configuration.
    pub fn with_config<C: ConfigProvider>(
        flow: &'a WaitlistFlow<E>,
        source: Option<&str>,
        config: &C,
    ) -> Self {
        Self::new(flow, source).with_success_reset(config.success_reset())
    }

    pub fn with_success_reset(mut self, delay: Duration) -> Self {
        self.success_reset = delay;
        self
    }

    pub fn source(&self) -> &SourceTag {
        &self.source
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.email = value.into();
    }

    /// Current state; a success older than the reset delay reads as `Idle`.
    pub fn state(&mut self) -> &FormState {
        if let Some(until) = self.success_until {
            if Instant::now() >= until {
                self.state = FormState::Idle;
                self.success_until = None;
            }
        }
        &self.state
    }

    /// The submit control is disabled while this is true.
    pub fn is_submitting(&self) -> bool {
        matches!(self.state, FormState::Submitting)
    }

    pub async fn submit(&mut self) -> &FormState {
        // 重新送出時清掉上一次的錯誤或成功訊息
        self.success_until = None;

        let flow = self.flow;
        let pending = PendingSubmit::start(&mut self.state);
        let outcome = flow.submit(&self.email, Some(self.source.as_str())).await;

        let next = match outcome {
            Ok(submission) => {
                self.email.clear();
                self.success_until = Some(Instant::now() + self.success_reset);
                FormState::Success {
                    entry: submission.entry,
                }
            }
            Err(e) => {
                tracing::debug!("Waitlist form on {} failed: {}", self.source, e);
                FormState::Failed {
                    message: e.user_friendly_message(),
                }
            }
        };
        pending.settle(next);

        &self.state
    }
}

/// Holds the form in `Submitting`; if the submit future is dropped before it
/// settles, the form goes back to `Idle`.
struct PendingSubmit<'s> {
    state: &'s mut FormState,
    settled: bool,
}

impl<'s> PendingSubmit<'s> {
    fn start(state: &'s mut FormState) -> Self {
        *state = FormState::Submitting;
        Self {
            state,
            settled: false,
        }
    }

    fn settle(mut self, next: FormState) {
        *self.state = next;
        self.settled = true;
    }
}

impl Drop for PendingSubmit<'_> {
    fn drop(&mut self) {
        if !self.settled {
            *self.state = FormState::Idle;
        }
    }
}
