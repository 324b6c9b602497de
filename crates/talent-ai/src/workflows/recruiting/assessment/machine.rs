use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle of a timed behavioural assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentState {
    NotStarted,
    Running,
    Submitting,
    Expired,
    Submitted,
    Abandoned,
}

impl AssessmentState {
    pub const fn label(self) -> &'static str {
        match self {
            AssessmentState::NotStarted => "not_started",
            AssessmentState::Running => "running",
            AssessmentState::Submitting => "submitting",
            AssessmentState::Expired => "expired",
            AssessmentState::Submitted => "submitted",
            AssessmentState::Abandoned => "abandoned",
        }
    }

    /// The flow is over; nothing else can happen to it.
    pub const fn is_finished(self) -> bool {
        matches!(self, AssessmentState::Submitted | AssessmentState::Abandoned)
    }
}

impl fmt::Display for AssessmentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AssessmentError {
    #[error("cannot {action} while the assessment is {state}")]
    InvalidTransition {
        action: &'static str,
        state: AssessmentState,
    },
}

/// What a single clock tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Counting { remaining_secs: u32 },
    Expired,
    Idle,
}

/// Outcome of an answer edit. Rejections never change state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "effect")]
pub enum AnswerEffect {
    Recorded,
    Frozen,
    Unavailable { state: AssessmentState },
    OutOfRange { index: usize, slots: usize },
}

impl AnswerEffect {
    pub const fn recorded(&self) -> bool {
        matches!(self, AnswerEffect::Recorded)
    }
}

/// Countdown-gated answer sheet.
///
/// Time only moves through [`TimedAssessment::tick`]; callers decide whether
/// ticks come from a real timer or are injected directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedAssessment {
    state: AssessmentState,
    budget_secs: u32,
    remaining_secs: u32,
    answers: Vec<String>,
    resume_to: AssessmentState,
}

impl TimedAssessment {
    pub fn new(question_count: usize, budget_secs: u32) -> Self {
        Self {
            state: AssessmentState::NotStarted,
            budget_secs,
            remaining_secs: budget_secs,
            answers: vec![String::new(); question_count],
            resume_to: AssessmentState::Running,
        }
    }

    pub fn state(&self) -> AssessmentState {
        self.state
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn budget_secs(&self) -> u32 {
        self.budget_secs
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    /// Whether a timer driving this assessment should keep running.
    pub fn countdown_armed(&self) -> bool {
        match self.state {
            AssessmentState::Running => true,
            AssessmentState::Submitting => self.resume_to == AssessmentState::Running,
            _ => false,
        }
    }

    /// Arm the countdown from whatever time remains.
    pub fn start(&mut self) -> Result<(), AssessmentError> {
        match self.state {
            AssessmentState::NotStarted => {
                if self.remaining_secs == 0 {
                    self.state = AssessmentState::Expired;
                } else {
                    self.state = AssessmentState::Running;
                }
                Ok(())
            }
            AssessmentState::Running => Ok(()),
            state => Err(AssessmentError::InvalidTransition {
                action: "start",
                state,
            }),
        }
    }

    /// Leave the question step. The countdown halts and does not resume on its own.
    pub fn step_back(&mut self) -> Result<(), AssessmentError> {
        match self.state {
            AssessmentState::Running => {
                self.state = AssessmentState::NotStarted;
                Ok(())
            }
            AssessmentState::NotStarted => Ok(()),
            state => Err(AssessmentError::InvalidTransition {
                action: "step back",
                state,
            }),
        }
    }

    /// Advance the clock by one second.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != AssessmentState::Running {
            return TickOutcome::Idle;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.state = AssessmentState::Expired;
            return TickOutcome::Expired;
        }

        TickOutcome::Counting {
            remaining_secs: self.remaining_secs,
        }
    }

    /// Inject `secs` ticks at once. Reports `Expired` if expiry happened during the run.
    pub fn advance(&mut self, secs: u32) -> TickOutcome {
        let mut last = TickOutcome::Idle;
        for _ in 0..secs {
            match self.tick() {
                TickOutcome::Idle => break,
                TickOutcome::Expired => return TickOutcome::Expired,
                counting => last = counting,
            }
        }
        last
    }

    /// Overwrite the full answer text at `index`.
    pub fn set_answer(&mut self, index: usize, text: impl Into<String>) -> AnswerEffect {
        match self.state {
            AssessmentState::Running => {}
            AssessmentState::Expired => return AnswerEffect::Frozen,
            state => return AnswerEffect::Unavailable { state },
        }

        match self.answers.get_mut(index) {
            Some(slot) => {
                *slot = text.into();
                AnswerEffect::Recorded
            }
            None => AnswerEffect::OutOfRange {
                index,
                slots: self.answers.len(),
            },
        }
    }

    /// Freeze the sheet for submission and hand back the answers to persist.
    pub fn begin_submission(&mut self) -> Result<Vec<String>, AssessmentError> {
        match self.state {
            AssessmentState::Running | AssessmentState::Expired => {
                self.resume_to = self.state;
                self.state = AssessmentState::Submitting;
                Ok(self.answers.clone())
            }
            state => Err(AssessmentError::InvalidTransition {
                action: "submit",
                state,
            }),
        }
    }

    pub fn complete_submission(&mut self) -> Result<(), AssessmentError> {
        match self.state {
            AssessmentState::Submitting => {
                self.state = AssessmentState::Submitted;
                Ok(())
            }
            state => Err(AssessmentError::InvalidTransition {
                action: "complete submission",
                state,
            }),
        }
    }

    /// Return to the pre-submit state with the remaining time untouched.
    pub fn fail_submission(&mut self) -> Result<(), AssessmentError> {
        match self.state {
            AssessmentState::Submitting => {
                self.state = self.resume_to;
                Ok(())
            }
            state => Err(AssessmentError::InvalidTransition {
                action: "recover submission",
                state,
            }),
        }
    }

    /// Close the flow, discarding uncommitted answers. Returns false once finished.
    ///
    /// Refused while a submission is in flight: the submit call owns the
    /// outcome until it completes or fails.
    pub fn abandon(&mut self) -> Result<bool, AssessmentError> {
        match self.state {
            state if state.is_finished() => Ok(false),
            AssessmentState::Submitting => Err(AssessmentError::InvalidTransition {
                action: "abandon",
                state: AssessmentState::Submitting,
            }),
            _ => {
                self.state = AssessmentState::Abandoned;
                self.answers.iter_mut().for_each(String::clear);
                Ok(true)
            }
        }
    }

    pub fn snapshot(&self) -> AssessmentSnapshot {
        AssessmentSnapshot {
            state: self.state,
            remaining_secs: self.remaining_secs,
            budget_secs: self.budget_secs,
            countdown: format_countdown(self.remaining_secs),
            answers: self.answers.clone(),
        }
    }
}

/// Serializable point-in-time view of an assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentSnapshot {
    pub state: AssessmentState,
    pub remaining_secs: u32,
    pub budget_secs: u32,
    pub countdown: String,
    pub answers: Vec<String>,
}

/// `MM:SS` rendering of a second count.
pub fn format_countdown(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
