use tracing::debug;

use super::{
    day::{Day, DayTable},
    state::WeeklyState,
};

/// Counts consecutive completed days ending at `today`, walking back towards Monday. The count
/// never reaches into the previous week.
pub fn current_streak(progress: &DayTable<bool>, today: Day) -> u32 {
    Day::ALL[..=today.index()]
        .iter()
        .rev()
        .take_while(|day| progress[**day])
        .count() as u32
}

/// Refreshes `current_streak` from the progress table and raises `best_streak` if it was beaten.
pub fn recompute(state: &mut WeeklyState, today: Day) {
    let streak = current_streak(&state.progress_by_day, today);
    state.current_streak = streak;
    if streak > state.best_streak {
        debug!("New best streak {streak}");
        state.best_streak = streak;
    }
}

#[cfg(test)]
mod tests {
    use crate::tracker::{day::Day, state::WeeklyState};

    use super::{current_streak, recompute};

    fn with_days(days: &[Day]) -> WeeklyState {
        let mut state = WeeklyState::default();
        for day in days {
            state.progress_by_day[*day] = true;
        }
        state
    }

    #[test]
    fn full_week_is_seven() {
        let mut state = with_days(&Day::ALL);
        recompute(&mut state, Day::Sunday);
        assert_eq!(state.current_streak, 7);
        assert!(state.best_streak >= 7);
    }

    #[test]
    fn gap_on_monday_caps_streak() {
        let mut state = with_days(&[Day::Tuesday, Day::Wednesday, Day::Thursday, Day::Friday]);
        recompute(&mut state, Day::Friday);
        assert_eq!(state.current_streak, 4);

        // The stored value only changes once it is recomputed.
        state.progress_by_day[Day::Monday] = true;
        assert_eq!(state.current_streak, 4);
        recompute(&mut state, Day::Friday);
        assert_eq!(state.current_streak, 5);
    }

    #[test]
    fn incomplete_today_is_zero() {
        let state = with_days(&[Day::Monday, Day::Tuesday]);
        assert_eq!(current_streak(&state.progress_by_day, Day::Wednesday), 0);

        let state = with_days(&[Day::Sunday]);
        assert_eq!(current_streak(&state.progress_by_day, Day::Monday), 0);
    }

    #[test]
    fn later_days_are_ignored() {
        let state = with_days(&[Day::Monday, Day::Tuesday, Day::Thursday]);
        assert_eq!(current_streak(&state.progress_by_day, Day::Tuesday), 2);
    }

    #[test]
    fn best_streak_never_drops() {
        let mut state = with_days(&[Day::Monday, Day::Tuesday, Day::Wednesday]);
        recompute(&mut state, Day::Wednesday);
        assert_eq!(state.best_streak, 3);

        state.progress_by_day[Day::Wednesday] = false;
        recompute(&mut state, Day::Wednesday);
        assert_eq!(state.current_streak, 0);
        assert_eq!(state.best_streak, 3);
    }
}
