use crate::{config::AppConfig, coords::Coords, workout::Workout};

/// The parts of the map widget the app drives.
pub trait MapView {
    fn set_view(&mut self, center: Coords, zoom: f64, pan: Option<PanAnimation>);

    fn add_tile_layer(&mut self, url: &str, attribution: &str);

    /// Places a marker and opens its popup.
    fn add_marker(&mut self, marker: &MarkerSpec);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanAnimation {
    pub duration_s: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub coords: Coords,
    pub content: String,
    pub class_name: String,
    pub min_width: f64,
    pub max_width: f64,
    pub auto_close: bool,
    pub close_on_click: bool,
}

impl MarkerSpec {
    /// Popups stay open until closed by hand, so every workout's label remains visible.
    pub fn for_workout(workout: &Workout, config: &AppConfig) -> Self {
        let workout_type = workout.workout_type();
        Self {
            coords: workout.coords(),
            content: format!("{} {}", workout_type.icon(), workout.description()),
            class_name: format!("{}-popup", workout_type.name()),
            min_width: config.popup_min_width,
            max_width: config.popup_max_width,
            auto_close: false,
            close_on_click: false,
        }
    }
}
