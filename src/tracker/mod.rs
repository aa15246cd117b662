//! The weekly workout model and the controller that owns it.
//!
//! [Tracker] is the single owner of a [WeeklyState]. Front ends open it once, call actions on it
//! and render its [summary]. Every mutation is written back to the document it was opened from.

pub mod day;
pub mod reminder;
pub mod rollover;
pub mod state;
pub mod storage;
pub mod streak;
pub mod summary;

use anyhow::Result;
use day::Day;
use rollover::{should_roll_over, RolloverOutcome, RolloverPrompt};
use state::WeeklyState;
use storage::{
    entities::StoredState,
    state_storage::{load_state, save_state},
    DocumentStorage,
};
use summary::WeekSummary;
use tracing::{debug, info, instrument};

use crate::utils::clock::Clock;

#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("Write an exercise for {0} before saving")]
    EmptyNote(Day),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub struct Tracker<D: DocumentStorage> {
    document: D,
    state: WeeklyState,
    clock: Box<dyn Clock>,
    rollover: Option<RolloverOutcome>,
}

impl<D: DocumentStorage> Tracker<D> {
    /// Loads the week from `document`, falling back to a fresh one when there is nothing usable,
    /// and applies the rollover policy. A confirmed rollover is written back right away.
    pub async fn open(
        document: D,
        clock: Box<dyn Clock>,
        prompt: &mut dyn RolloverPrompt,
    ) -> Result<Self> {
        let now = clock.time();
        let (state, rollover) = match load_state(&document).await.into_stored() {
            Some(StoredState { state, marker }) => {
                let (state, outcome) = rollover::resolve(state, &marker, now, prompt);
                (state, Some(outcome))
            }
            None => (WeeklyState::fresh(now), None),
        };

        let mut tracker = Self {
            document,
            state,
            clock,
            rollover,
        };
        let today = tracker.today();
        streak::recompute(&mut tracker.state, today);

        if rollover == Some(RolloverOutcome::RolledOver) {
            tracker.save().await?;
        }
        Ok(tracker)
    }

    pub fn state(&self) -> &WeeklyState {
        &self.state
    }

    /// How the stored week was reconciled with the calendar. `None` when nothing was stored.
    pub fn rollover(&self) -> Option<RolloverOutcome> {
        self.rollover
    }

    pub fn today(&self) -> Day {
        Day::of(self.clock.time().date_naive())
    }

    /// Writes the state back, stamping it as current.
    pub async fn save(&mut self) -> Result<()> {
        self.state.last_week_marker = Some(self.clock.time());
        save_state(&self.document, &self.state).await
    }

    /// Marks `day` as done. Marking a day twice only saves again.
    #[instrument(skip(self))]
    pub async fn mark_completed(&mut self, day: Day) -> Result<()> {
        self.state.progress_by_day[day] = true;
        let today = self.today();
        streak::recompute(&mut self.state, today);
        self.save().await?;
        info!(
            "Completed {day}, streak {} best {}",
            self.state.current_streak, self.state.best_streak
        );
        Ok(())
    }

    /// Stores a trimmed note for `day`. Blank notes are rejected and leave the state untouched.
    #[instrument(skip(self))]
    pub async fn set_exercise_note(&mut self, day: Day, text: &str) -> Result<(), TrackerError> {
        let text = text.trim();
        if text.is_empty() {
            debug!("Rejected blank note for {day}");
            return Err(TrackerError::EmptyNote(day));
        }
        self.state.exercise_by_day[day] = text.to_string();
        self.save().await?;
        Ok(())
    }

    pub fn summarize(&self) -> WeekSummary {
        summary::summarize(&self.state)
    }
}

/// Checks whether today still has to be done without prompting or touching the document. A
/// stored week that belongs to an earlier week says nothing about today.
pub async fn is_today_pending(document: &impl DocumentStorage, clock: &dyn Clock) -> bool {
    let now = clock.time();
    let Some(StoredState { state, marker }) = load_state(document).await.into_stored() else {
        return true;
    };
    if marker
        .as_time()
        .is_some_and(|last_seen| should_roll_over(last_seen, now))
    {
        return true;
    }
    !state.is_completed(Day::of(now.date_naive()))
}

#[cfg(test)]
mod tracker_tests {
    use std::sync::Arc;

    use anyhow::Result;
    use chrono::Duration;
    use tempfile::tempdir;

    use crate::{
        tracker::{
            day::Day,
            is_today_pending,
            rollover::{FixedAnswer, MockRolloverPrompt, RolloverOutcome},
            state::WeeklyState,
            storage::{
                state_storage::{load_state, save_state},
                FileDocument, SessionDocument, PROGRESS_FILE,
            },
            Tracker, TrackerError,
        },
        utils::{
            clock::{Clock, FixedClock},
            logging::TEST_LOGGING,
        },
    };

    // 2024-05-03 is a Friday
    fn friday() -> FixedClock {
        FixedClock::at_noon(2024, 5, 3)
    }

    fn sunday() -> FixedClock {
        FixedClock::at_noon(2024, 5, 5)
    }

    #[tokio::test]
    async fn opens_fresh_without_document() -> Result<()> {
        *TEST_LOGGING;
        let document = Arc::new(SessionDocument::default());
        let tracker = Tracker::open(
            document.clone(),
            Box::new(friday()),
            &mut FixedAnswer(true),
        )
        .await?;

        assert_eq!(tracker.state(), &WeeklyState::fresh(friday().time()));
        assert_eq!(tracker.rollover(), None);
        assert_eq!(tracker.today(), Day::Friday);
        // Opening alone doesn't write anything.
        assert!(load_state(&document).await.into_stored().is_none());
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_document_opens_like_missing() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(PROGRESS_FILE);
        std::fs::write(&path, "{ definitely not json")?;

        let corrupt = Tracker::open(
            FileDocument::new(path),
            Box::new(friday()),
            &mut FixedAnswer(true),
        )
        .await?;
        let missing = Tracker::open(
            SessionDocument::default(),
            Box::new(friday()),
            &mut FixedAnswer(true),
        )
        .await?;

        assert_eq!(corrupt.state(), missing.state());
        Ok(())
    }

    #[tokio::test]
    async fn full_week_streak() -> Result<()> {
        let mut tracker = Tracker::open(
            SessionDocument::default(),
            Box::new(sunday()),
            &mut FixedAnswer(true),
        )
        .await?;
        for day in Day::ALL {
            tracker.mark_completed(day).await?;
        }
        assert_eq!(tracker.state().current_streak, 7);
        assert!(tracker.state().best_streak >= 7);

        // Idempotent
        tracker.mark_completed(Day::Sunday).await?;
        assert_eq!(tracker.state().current_streak, 7);
        assert_eq!(tracker.summarize().completed, 7);
        Ok(())
    }

    #[tokio::test]
    async fn marks_persist_and_reload_in_same_week() -> Result<()> {
        let dir = tempdir()?;
        let document = FileDocument::in_dir(dir.path(), PROGRESS_FILE);

        let mut tracker = Tracker::open(document, Box::new(friday()), &mut FixedAnswer(true)).await?;
        tracker.mark_completed(Day::Thursday).await?;
        tracker.mark_completed(Day::Friday).await?;
        tracker.set_exercise_note(Day::Friday, "  rows and pull-ups \n").await?;
        assert_eq!(tracker.state().current_streak, 2);

        let mut prompt = MockRolloverPrompt::new();
        prompt.expect_confirm_new_week().never();
        let reopened = Tracker::open(
            FileDocument::in_dir(dir.path(), PROGRESS_FILE),
            Box::new(friday()),
            &mut prompt,
        )
        .await?;

        assert_eq!(reopened.rollover(), Some(RolloverOutcome::Current));
        assert_eq!(
            reopened.state().progress_by_day,
            tracker.state().progress_by_day
        );
        assert_eq!(
            reopened.state().exercise_by_day,
            tracker.state().exercise_by_day
        );
        assert_eq!(reopened.state().exercise_by_day[Day::Friday], "rows and pull-ups");
        assert_eq!(reopened.state().current_streak, 2);
        Ok(())
    }

    #[tokio::test]
    async fn blank_note_is_rejected() -> Result<()> {
        let document = Arc::new(SessionDocument::default());
        let mut tracker =
            Tracker::open(document.clone(), Box::new(friday()), &mut FixedAnswer(true)).await?;
        tracker.set_exercise_note(Day::Monday, "bench").await?;

        let result = tracker.set_exercise_note(Day::Monday, "   ").await;
        assert!(matches!(result, Err(TrackerError::EmptyNote(Day::Monday))));
        assert_eq!(tracker.state().exercise_by_day[Day::Monday], "bench");

        let stored = load_state(&document).await.into_stored().unwrap();
        assert_eq!(stored.state.exercise_by_day[Day::Monday], "bench");
        Ok(())
    }

    #[tokio::test]
    async fn confirmed_rollover_archives_once() -> Result<()> {
        *TEST_LOGGING;
        let now = friday().time();
        let last_seen = now - Duration::days(8);
        let document = Arc::new(SessionDocument::default());

        let mut old = WeeklyState::fresh(last_seen);
        old.progress_by_day[Day::Monday] = true;
        old.progress_by_day[Day::Tuesday] = true;
        old.exercise_by_day[Day::Tuesday] = "legs".into();
        old.best_streak = 2;
        save_state(&document, &old).await?;

        let mut prompt = MockRolloverPrompt::new();
        prompt.expect_confirm_new_week().times(1).return_const(true);
        let tracker = Tracker::open(document.clone(), Box::new(friday()), &mut prompt).await?;

        assert_eq!(tracker.rollover(), Some(RolloverOutcome::RolledOver));
        let state = tracker.state();
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.history[0].progress_snapshot, old.progress_by_day);
        assert_eq!(state.history[0].exercise_snapshot, old.exercise_by_day);
        assert_eq!(state.completed_days(), 0);
        assert_eq!(state.current_streak, 0);
        assert_eq!(state.best_streak, 0);

        // Written back, so the next open in the same week doesn't ask again.
        let mut prompt = MockRolloverPrompt::new();
        prompt.expect_confirm_new_week().never();
        let again = Tracker::open(document, Box::new(friday()), &mut prompt).await?;
        assert_eq!(again.rollover(), Some(RolloverOutcome::Current));
        assert_eq!(again.state().history.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn declined_rollover_is_asked_again_until_saved() -> Result<()> {
        let now = friday().time();
        let last_seen = now - Duration::days(8);
        let document = Arc::new(SessionDocument::default());
        let mut old = WeeklyState::fresh(last_seen);
        old.progress_by_day[Day::Wednesday] = true;
        save_state(&document, &old).await?;

        let tracker =
            Tracker::open(document.clone(), Box::new(friday()), &mut FixedAnswer(false)).await?;
        assert_eq!(tracker.rollover(), Some(RolloverOutcome::Kept));
        assert!(tracker.state().progress_by_day[Day::Wednesday]);
        assert!(tracker.state().history.is_empty());

        let mut tracker =
            Tracker::open(document.clone(), Box::new(friday()), &mut FixedAnswer(false)).await?;
        assert_eq!(tracker.rollover(), Some(RolloverOutcome::Kept));
        tracker.mark_completed(Day::Friday).await?;

        let mut prompt = MockRolloverPrompt::new();
        prompt.expect_confirm_new_week().never();
        let tracker = Tracker::open(document, Box::new(friday()), &mut prompt).await?;
        assert_eq!(tracker.rollover(), Some(RolloverOutcome::Current));
        assert!(tracker.state().progress_by_day[Day::Wednesday]);
        Ok(())
    }

    #[tokio::test]
    async fn pending_today() -> Result<()> {
        let clock = friday();
        let document = Arc::new(SessionDocument::default());
        assert!(is_today_pending(&document, &clock).await);

        let mut tracker =
            Tracker::open(document.clone(), Box::new(clock.clone()), &mut FixedAnswer(true))
                .await?;
        tracker.mark_completed(Day::Friday).await?;
        assert!(!is_today_pending(&document, &clock).await);

        let next_friday = FixedClock(clock.time() + Duration::days(7));
        assert!(is_today_pending(&document, &next_friday).await);
        Ok(())
    }
}
