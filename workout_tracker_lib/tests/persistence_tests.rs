mod common;

use common::*;
use workout_tracker_lib::{
    app::FormPhase,
    coords::Coords,
    store::{KeyValueStore, MemoryStore},
    workout::WorkoutType,
};

fn app_with_workouts() -> TestApp {
    let mut app = ready_app(MemoryStore::new());

    app.map_clicked(Coords(40.7, -74.0)).unwrap();
    app.submit(&run_form("5", "25", "150"), now()).unwrap();
    app.form_hidden();

    app.select_type(WorkoutType::Cycling);
    app.map_clicked(Coords(40.8, -73.9)).unwrap();
    app.submit(&ride_form("20", "60", "300"), now()).unwrap();
    app.form_hidden();

    app.map_clicked(Coords(40.9, -73.8)).unwrap();
    app.submit(&ride_form("12.5", "40", "0"), now()).unwrap();

    app
}

#[test]
fn reload_restores_identical_workouts() {
    let app = app_with_workouts();
    let reloaded = reload(&app);

    assert_eq!(reloaded.workouts().len(), 3);
    assert_eq!(reloaded.workouts(), app.workouts());
    assert!(!reloaded.is_map_ready());
    assert_eq!(reloaded.form().phase(), FormPhase::Hidden);
}

#[test]
fn reloaded_workouts_get_markers_once_map_is_ready() {
    let app = app_with_workouts();
    let mut reloaded = reload(&app);

    reloaded.map_ready(RecordingMap::default(), HOME);

    let coords: Vec<_> = markers(&reloaded).iter().map(|m| m.coords).collect();
    assert_eq!(coords, [Coords(40.7, -74.0), Coords(40.8, -73.9), Coords(40.9, -73.8)]);
}

#[test]
fn reloaded_workouts_keep_variant_behavior() {
    let app = app_with_workouts();
    let reloaded = reload(&app);

    let types: Vec<_> = reloaded.workouts().iter().map(|w| w.workout_type()).collect();
    assert_eq!(types, [WorkoutType::Running, WorkoutType::Cycling, WorkoutType::Cycling]);

    let mut first = reloaded.workouts().as_slice()[0].clone();
    assert_eq!(first.pace(), Some(5.0));
    first.click();
    assert_eq!(first.clicks(), 1);
}

#[test]
fn adding_after_reload_keeps_old_workouts() {
    let app = app_with_workouts();
    let mut reloaded = reload(&app);
    reloaded.map_ready(RecordingMap::default(), HOME);

    reloaded.map_clicked(Coords(1., 1.)).unwrap();
    let id = reloaded.submit(&run_form("3", "18", "160"), now()).unwrap();

    assert_eq!(reloaded.workouts().len(), 4);
    assert!(app.workouts().iter().all(|w| w.id() != &id));
    assert_eq!(reload(&reloaded).workouts().len(), 4);
}

#[test]
fn corrupt_storage_starts_empty() {
    let mut store = MemoryStore::new();
    store.set("workouts", "[{\"broken\": true}]").unwrap();

    let app = new_app(store);
    assert!(app.workouts().is_empty());
}

#[test]
fn one_bad_stored_record_keeps_the_rest() {
    let stored = r#"[
        {"date":"2024-04-10T07:00:00Z","id":"1","coords":[40.7,-74.0],"distance":5,"duration":25,
         "type":"running","cadence":150,"description":"Running on April 10"},
        {"date":"2024-04-11T07:00:00Z","id":"2","coords":[40.8,-73.9],"distance":20,"duration":60,
         "type":"cycling","elevationGain":-5,"description":"Cycling on April 11"},
        {"date":"2024-04-12T07:00:00Z","id":"3","coords":[40.9,-73.8],"distance":0,"duration":60,
         "type":"cycling","elevationGain":10,"description":"Cycling on April 12"}
    ]"#;
    let mut store = MemoryStore::new();
    store.set("workouts", stored).unwrap();

    let mut app = ready_app(store);
    let ids: Vec<_> = app.workouts().iter().map(|w| w.id().as_str().to_owned()).collect();
    assert_eq!(ids, ["1", "2"]);
    assert_eq!(markers(&app).len(), 2);

    app.map_clicked(Coords(41.0, -73.7)).unwrap();
    app.submit(&run_form("3", "18", "160"), now()).unwrap();

    let saved = app.store().backend().get("workouts").unwrap().unwrap();
    let saved: Vec<serde_json::Value> = serde_json::from_str(&saved).unwrap();
    assert_eq!(saved.len(), 3);
    assert_eq!(reload(&app).workouts().len(), 3);
}

#[test]
fn reset_clears_store_and_memory() {
    let mut app = app_with_workouts();

    app.reset().unwrap();

    assert!(app.workouts().is_empty());
    assert!(!app.store().backend().contains_key("workouts"));
    assert!(reload(&app).workouts().is_empty());
}
