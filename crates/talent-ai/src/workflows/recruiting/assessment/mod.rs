//! Timed behavioural assessment.
//!
//! [`TimedAssessment`] is the pure state machine advanced by explicit ticks;
//! [`AssessmentSession`] wraps it with a tokio interval for live use.

mod machine;
mod session;

pub use machine::{
    format_countdown, AnswerEffect, AssessmentError, AssessmentSnapshot, AssessmentState,
    TickOutcome, TimedAssessment,
};
pub use session::AssessmentSession;
