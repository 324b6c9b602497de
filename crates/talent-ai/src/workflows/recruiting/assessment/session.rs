use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use super::machine::{
    AnswerEffect, AssessmentError, AssessmentSnapshot, AssessmentState, TickOutcome,
    TimedAssessment,
};

/// A [`TimedAssessment`] driven by a tokio interval, one clock per session.
///
/// The driver task exists only while the countdown is armed: it is spawned on
/// start and exits as soon as the machine stops accepting ticks. Abandoning or
/// dropping the session aborts it.
pub struct AssessmentSession {
    machine: Arc<Mutex<TimedAssessment>>,
    driver: Mutex<Option<JoinHandle<()>>>,
    tick_period: Duration,
}

impl AssessmentSession {
    pub fn new(question_count: usize, budget_secs: u32, tick_period: Duration) -> Self {
        Self {
            machine: Arc::new(Mutex::new(TimedAssessment::new(question_count, budget_secs))),
            driver: Mutex::new(None),
            tick_period,
        }
    }

    fn machine(&self) -> MutexGuard<'_, TimedAssessment> {
        self.machine.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn driver(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.driver.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> AssessmentState {
        self.machine().state()
    }

    pub fn snapshot(&self) -> AssessmentSnapshot {
        self.machine().snapshot()
    }

    /// Enter the question step and arm the countdown. Must run inside a tokio runtime.
    pub fn start(&self) -> Result<AssessmentSnapshot, AssessmentError> {
        let snapshot = {
            let mut machine = self.machine();
            machine.start()?;
            machine.snapshot()
        };

        if snapshot.state == AssessmentState::Running {
            self.arm();
        }
        Ok(snapshot)
    }

    pub fn step_back(&self) -> Result<AssessmentSnapshot, AssessmentError> {
        let snapshot = {
            let mut machine = self.machine();
            machine.step_back()?;
            machine.snapshot()
        };
        self.disarm();
        Ok(snapshot)
    }

    pub fn set_answer(&self, index: usize, text: impl Into<String>) -> AnswerEffect {
        self.machine().set_answer(index, text)
    }

    pub fn begin_submission(&self) -> Result<Vec<String>, AssessmentError> {
        self.machine().begin_submission()
    }

    pub fn complete_submission(&self) -> Result<(), AssessmentError> {
        self.machine().complete_submission()?;
        self.disarm();
        Ok(())
    }

    /// Restore the pre-submit state. The countdown picks up where it was held.
    pub fn fail_submission(&self) -> Result<AssessmentSnapshot, AssessmentError> {
        let mut machine = self.machine();
        machine.fail_submission()?;
        Ok(machine.snapshot())
    }

    /// Close the flow: stop the clock and discard uncommitted answers.
    pub fn abandon(&self) -> Result<bool, AssessmentError> {
        let abandoned = self.machine().abandon()?;
        self.disarm();
        Ok(abandoned)
    }

    /// Whether a driver task is currently alive.
    pub fn countdown_active(&self) -> bool {
        self.driver()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn arm(&self) {
        let mut driver = self.driver();
        if driver.as_ref().is_some_and(|handle| !handle.is_finished()) {
            return;
        }

        let machine = Arc::clone(&self.machine);
        let period = self.tick_period;
        *driver = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);
            loop {
                ticker.tick().await;
                let mut guard = machine.lock().unwrap_or_else(PoisonError::into_inner);
                match guard.tick() {
                    TickOutcome::Expired => {
                        metrics::counter!("recruiting_assessments_expired_total").increment(1);
                        info!("assessment countdown expired");
                        break;
                    }
                    TickOutcome::Counting { remaining_secs } => {
                        debug!(remaining_secs, "assessment tick");
                    }
                    TickOutcome::Idle => {}
                }
                if !guard.countdown_armed() {
                    break;
                }
            }
        }));
    }

    fn disarm(&self) {
        if let Some(handle) = self.driver().take() {
            handle.abort();
        }
    }
}

impl Drop for AssessmentSession {
    fn drop(&mut self) {
        self.disarm();
    }
}
