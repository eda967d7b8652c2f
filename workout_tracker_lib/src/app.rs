//! The app controller. It owns the workouts and reacts to the events the
//! page feeds it: position found or refused, map clicks, form submits, type
//! changes, list clicks and reset.

use chrono::{DateTime, Local};
use tracing::{error, info, warn};

use crate::{
    config::AppConfig,
    coords::Coords,
    error::{AppError, GeolocationError},
    form::{WorkoutForm, WorkoutInput},
    map::{MapView, MarkerSpec, PanAnimation},
    store::{KeyValueStore, WorkoutStore},
    workout::{Workout, WorkoutId, WorkoutType},
    workout_log::WorkoutLog,
};

/// The map only exists once the user's position is known.
#[derive(Debug)]
pub enum MapState<M> {
    Locating,
    Ready(M),
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Hidden,
    Open,
    /// Submitted. Kept out of the layout until the reveal delay has passed.
    Closing,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    phase: FormPhase,
    workout_type: WorkoutType,
    focus_requests: u32,
}

impl FormState {
    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn workout_type(&self) -> WorkoutType {
        self.workout_type
    }

    /// Bumped on every map click; the form focuses the distance input when it changes.
    pub fn focus_requests(&self) -> u32 {
        self.focus_requests
    }
}

pub struct App<M, S> {
    config: AppConfig,
    map: MapState<M>,
    pending_location: Option<Coords>,
    workouts: WorkoutLog,
    store: WorkoutStore<S>,
    form: FormState,
}

impl<M: MapView, S: KeyValueStore> App<M, S> {
    /// Loads stored workouts. Unreadable data is logged and skipped.
    pub fn new(config: AppConfig, backend: S) -> Self {
        let store = WorkoutStore::new(backend, config.storage_key.clone());

        let workouts = match store.load() {
            Ok(Some(workouts)) => workouts,
            Ok(None) => WorkoutLog::new(),
            Err(e) => {
                warn!(error = %e, "Ignoring stored workouts");
                WorkoutLog::new()
            }
        };

        Self {
            config,
            map: MapState::Locating,
            pending_location: None,
            workouts,
            store,
            form: FormState::default(),
        }
    }

    /// Position found: center the map there and draw markers for workouts
    /// loaded before the map existed.
    pub fn map_ready(&mut self, mut map: M, position: Coords) {
        map.set_view(position, self.config.map_zoom, None);
        map.add_tile_layer(&self.config.tile_url, &self.config.tile_attribution);

        for workout in &self.workouts {
            map.add_marker(&MarkerSpec::for_workout(workout, &self.config));
        }

        info!(%position, markers = self.workouts.len(), "Map ready");
        self.map = MapState::Ready(map);
    }

    /// Position refused or unavailable. Adding workouts stays disabled for
    /// the rest of the session. Returns the error to show the user.
    pub fn position_failed(&mut self, err: GeolocationError) -> AppError {
        warn!(error = %err, "No position, map disabled");
        self.map = MapState::Unavailable;
        AppError::Geolocation(err)
    }

    pub fn map_clicked(&mut self, coords: Coords) -> Result<(), AppError> {
        if !self.is_map_ready() {
            return Err(AppError::MapNotReady);
        }

        self.pending_location = Some(coords);
        self.form.phase = FormPhase::Open;
        self.form.focus_requests = self.form.focus_requests.wrapping_add(1);
        Ok(())
    }

    pub fn select_type(&mut self, workout_type: WorkoutType) {
        self.form.workout_type = workout_type;
    }

    /// Validates the form and records the workout at the pending location.
    /// On error nothing changes and the form stays open.
    pub fn submit(&mut self, form: &WorkoutForm, now: DateTime<Local>) -> Result<WorkoutId, AppError> {
        let input = form.parse()?;
        let coords = self.pending_location.ok_or(AppError::NoPendingLocation)?;
        let created_at = self.workouts.next_timestamp(now);

        let workout = match input {
            WorkoutInput::Running { distance_km, duration_min, cadence_spm } => {
                Workout::running(coords, distance_km, duration_min, cadence_spm, created_at)
            }
            WorkoutInput::Cycling { distance_km, duration_min, elevation_gain_m } => {
                Workout::cycling(coords, distance_km, duration_min, elevation_gain_m, created_at)
            }
        };

        let id = workout.id().clone();
        let marker = MarkerSpec::for_workout(&workout, &self.config);
        info!(%id, workout_type = %workout.workout_type(), %coords, "Adding workout");

        self.workouts
            .push(workout)
            .map_err(|duplicate| AppError::DuplicateWorkout(duplicate.id().clone()))?;

        if let MapState::Ready(map) = &mut self.map {
            map.add_marker(&marker);
        }

        self.pending_location = None;
        self.form.phase = FormPhase::Closing;

        if let Err(e) = self.store.save(&self.workouts) {
            error!(error = %e, "Failed to persist workouts");
        }

        Ok(id)
    }

    /// The reveal delay after a submit has passed.
    pub fn form_hidden(&mut self) {
        if self.form.phase == FormPhase::Closing {
            self.form.phase = FormPhase::Hidden;
        }
    }

    /// Pans the map to the workout. Unknown ids are ignored.
    pub fn focus_workout(&mut self, id: &WorkoutId) -> Option<&Workout> {
        let workout = self.workouts.find(id)?;

        if let MapState::Ready(map) = &mut self.map {
            let pan = PanAnimation { duration_s: self.config.pan_duration_s };
            map.set_view(workout.coords(), self.config.map_zoom, Some(pan));
        }

        Some(workout)
    }

    /// Wipes stored and in-memory workouts. The page is expected to reload afterwards.
    pub fn reset(&mut self) -> Result<(), AppError> {
        self.store.clear()?;
        self.workouts = WorkoutLog::new();
        self.pending_location = None;
        self.form = FormState::default();
        info!(key = %self.store.key(), "Workouts reset");
        Ok(())
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn workouts(&self) -> &WorkoutLog {
        &self.workouts
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn pending_location(&self) -> Option<Coords> {
        self.pending_location
    }

    pub fn is_map_ready(&self) -> bool {
        matches!(self.map, MapState::Ready(_))
    }

    pub fn map_state(&self) -> &MapState<M> {
        &self.map
    }

    pub fn store(&self) -> &WorkoutStore<S> {
        &self.store
    }
}
