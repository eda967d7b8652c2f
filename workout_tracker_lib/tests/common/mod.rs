use chrono::{DateTime, Local, TimeZone};
use workout_tracker_lib::{
    app::{App, MapState},
    config::AppConfig,
    coords::Coords,
    form::WorkoutForm,
    map::{MapView, MarkerSpec, PanAnimation},
    store::MemoryStore,
    workout::WorkoutType,
};

/// Everything the app asked the map to do, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum MapCall {
    SetView { center: Coords, zoom: f64, pan: Option<PanAnimation> },
    TileLayer { url: String },
    Marker(MarkerSpec),
}

#[derive(Debug, Default)]
pub struct RecordingMap {
    pub calls: Vec<MapCall>,
}

impl MapView for RecordingMap {
    fn set_view(&mut self, center: Coords, zoom: f64, pan: Option<PanAnimation>) {
        self.calls.push(MapCall::SetView { center, zoom, pan });
    }

    fn add_tile_layer(&mut self, url: &str, _attribution: &str) {
        self.calls.push(MapCall::TileLayer { url: url.to_owned() });
    }

    fn add_marker(&mut self, marker: &MarkerSpec) {
        self.calls.push(MapCall::Marker(marker.clone()));
    }
}

pub type TestApp = App<RecordingMap, MemoryStore>;

pub const HOME: Coords = Coords(56.175188, 10.196123);

pub fn new_app(store: MemoryStore) -> TestApp {
    App::new(AppConfig::default(), store)
}

pub fn ready_app(store: MemoryStore) -> TestApp {
    let mut app = new_app(store);
    app.map_ready(RecordingMap::default(), HOME);
    app
}

/// Simulates a reload: a fresh app over a copy of what was stored.
#[allow(dead_code)]
pub fn reload(app: &TestApp) -> TestApp {
    new_app(app.store().backend().clone())
}

pub fn map_calls(app: &TestApp) -> &[MapCall] {
    match app.map_state() {
        MapState::Ready(map) => &map.calls,
        _ => &[],
    }
}

#[allow(dead_code)]
pub fn markers(app: &TestApp) -> Vec<&MarkerSpec> {
    map_calls(app)
        .iter()
        .filter_map(|call| match call {
            MapCall::Marker(marker) => Some(marker),
            _ => None,
        })
        .collect()
}

pub fn now() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 4, 14, 9, 30, 0).unwrap()
}

pub fn run_form(distance: &str, duration: &str, cadence: &str) -> WorkoutForm {
    WorkoutForm::new(WorkoutType::Running)
        .with_distance(distance)
        .with_duration(duration)
        .with_cadence(cadence)
}

#[allow(dead_code)]
pub fn ride_form(distance: &str, duration: &str, elevation: &str) -> WorkoutForm {
    WorkoutForm::new(WorkoutType::Cycling)
        .with_distance(distance)
        .with_duration(duration)
        .with_elevation(elevation)
}
