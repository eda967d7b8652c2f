use chrono::{DateTime, Local, TimeDelta};
use tracing::warn;

use crate::workout::{Workout, WorkoutId};

/// Workouts in creation order. Nothing is ever removed or edited.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutLog {
    workouts: Vec<Workout>,
}

impl WorkoutLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a log from stored workouts, dropping repeated ids.
    pub fn from_workouts(workouts: Vec<Workout>) -> Self {
        let mut log = Self::new();
        for workout in workouts {
            if let Err(workout) = log.push(workout) {
                warn!(id = %workout.id(), "Dropping stored workout with duplicate id");
            }
        }
        log
    }

    /// Appends the workout, or hands it back if its id is taken.
    pub fn push(&mut self, workout: Workout) -> Result<&Workout, Workout> {
        if self.contains(workout.id()) {
            return Err(workout);
        }
        self.workouts.push(workout);
        Ok(&self.workouts[self.workouts.len() - 1])
    }

    pub fn contains(&self, id: &WorkoutId) -> bool {
        self.workouts.iter().any(|w| w.id() == id)
    }

    pub fn find(&self, id: &WorkoutId) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id() == id)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Workout> {
        self.workouts.iter()
    }

    /// Display order of the list.
    pub fn newest_first(&self) -> impl Iterator<Item = &Workout> {
        self.workouts.iter().rev()
    }

    pub fn as_slice(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    /// Creation time for the next workout: at least `now`, after the newest
    /// workout, and mapping to an unused id.
    pub fn next_timestamp(&self, now: DateTime<Local>) -> DateTime<Local> {
        let step = TimeDelta::milliseconds(1);

        let mut timestamp = match self.workouts.last() {
            Some(last) if last.created_at().timestamp_millis() >= now.timestamp_millis() => *last.created_at() + step,
            _ => now,
        };

        while self.contains(&WorkoutId::from_timestamp(&timestamp)) {
            timestamp = timestamp + step;
        }

        timestamp
    }
}

impl<'a> IntoIterator for &'a WorkoutLog {
    type Item = &'a Workout;
    type IntoIter = std::slice::Iter<'a, Workout>;

    fn into_iter(self) -> Self::IntoIter {
        self.workouts.iter()
    }
}
