use std::fmt;

use crate::workout::WorkoutType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Distance,
    Duration,
    Cadence,
    Elevation,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Distance => "distance",
            Field::Duration => "duration",
            Field::Cadence => "cadence",
            Field::Elevation => "elevation gain",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} must be a number")]
    NotANumber(Field),

    #[error("{0} must be a positive number")]
    NotPositive(Field),

    #[error("{0} can not be negative")]
    Negative(Field),

    #[error("{0} must be a whole number")]
    NotWhole(Field),
}

/// Raw text of the workout form, as typed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkoutForm {
    pub workout_type: WorkoutType,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

/// Validated form values, ready to become a workout.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkoutInput {
    Running { distance_km: f64, duration_min: f64, cadence_spm: u32 },
    Cycling { distance_km: f64, duration_min: f64, elevation_gain_m: f64 },
}

impl WorkoutForm {
    pub fn new(workout_type: WorkoutType) -> Self {
        Self {
            workout_type,
            ..Default::default()
        }
    }

    pub fn with_distance(mut self, distance: impl Into<String>) -> Self {
        self.distance = distance.into();
        self
    }

    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = duration.into();
        self
    }

    pub fn with_cadence(mut self, cadence: impl Into<String>) -> Self {
        self.cadence = cadence.into();
        self
    }

    pub fn with_elevation(mut self, elevation: impl Into<String>) -> Self {
        self.elevation = elevation.into();
        self
    }

    /// Only the field belonging to the selected type is read.
    pub fn parse(&self) -> Result<WorkoutInput, ValidationError> {
        let distance_km = positive(Field::Distance, &self.distance)?;
        let duration_min = positive(Field::Duration, &self.duration)?;

        match self.workout_type {
            WorkoutType::Running => {
                let cadence = positive(Field::Cadence, &self.cadence)?;
                if cadence.fract() != 0. || cadence > u32::MAX as f64 {
                    return Err(ValidationError::NotWhole(Field::Cadence));
                }
                Ok(WorkoutInput::Running {
                    distance_km,
                    duration_min,
                    cadence_spm: cadence as u32,
                })
            }
            WorkoutType::Cycling => {
                // A flat ride needs no elevation, so a blank field means 0
                let elevation_gain_m = match self.elevation.trim() {
                    "" => 0.,
                    text => number(Field::Elevation, text)?,
                };
                if elevation_gain_m < 0. {
                    return Err(ValidationError::Negative(Field::Elevation));
                }
                Ok(WorkoutInput::Cycling {
                    distance_km,
                    duration_min,
                    elevation_gain_m,
                })
            }
        }
    }
}

fn number(field: Field, text: &str) -> Result<f64, ValidationError> {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::NotANumber(field)),
    }
}

fn positive(field: Field, text: &str) -> Result<f64, ValidationError> {
    let value = number(field, text)?;
    if value > 0. {
        Ok(value)
    } else {
        Err(ValidationError::NotPositive(field))
    }
}
