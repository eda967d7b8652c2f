use crate::{form::ValidationError, workout::WorkoutId};

/// Errors a user action can end in. The frontend shows the Display text in an alert.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Inputs have to be positive numbers: {0}")]
    InvalidInput(#[from] ValidationError),

    #[error("Unable to get your location: {0}")]
    Geolocation(#[from] GeolocationError),

    #[error("The map is not ready yet")]
    MapNotReady,

    #[error("Click on the map to pick where the workout took place")]
    NoPendingLocation,

    #[error("Workout {0} already exists")]
    DuplicateWorkout(WorkoutId),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeolocationError {
    #[error("geolocation is not supported by this browser")]
    Unsupported,

    #[error("{message} (code {code})")]
    Failed { code: u16, message: String },
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage backend failed: {0}")]
    Backend(String),

    #[error("stored workouts are malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A stored workout that does not satisfy the model invariants.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("workout {id}: {reason}")]
    Invalid { id: String, reason: &'static str },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{0} must be positive")]
    NotPositive(&'static str),
}
