use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, Local};
use serde::{Deserialize, Serialize};

use crate::{coords::Coords, error::RecordError};

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September", "October", "November", "December",
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutType {
    #[default]
    Running,
    Cycling,
}

impl WorkoutType {
    /// Wire and form value, also used as CSS modifier.
    pub fn name(&self) -> &'static str {
        match self {
            WorkoutType::Running => "running",
            WorkoutType::Cycling => "cycling",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WorkoutType::Running => "Running",
            WorkoutType::Cycling => "Cycling",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            WorkoutType::Running => "🏃‍♂️",
            WorkoutType::Cycling => "🚴‍♀️",
        }
    }
}

impl FromStr for WorkoutType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(WorkoutType::Running),
            "cycling" => Ok(WorkoutType::Cycling),
            other => Err(format!("Unknown workout type: {other}")),
        }
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    /// Last ten digits of the creation time in milliseconds.
    pub fn from_timestamp(timestamp: &DateTime<Local>) -> Self {
        let millis = timestamp.timestamp_millis().to_string();
        let start = millis.len().saturating_sub(10);
        Self(millis[start..].to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for WorkoutId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for WorkoutId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Variant payload, including the derived metric.
#[derive(Debug, Clone, PartialEq)]
pub enum Activity {
    Running { cadence_spm: u32, pace_min_per_km: f64 },
    Cycling { elevation_gain_m: f64, speed_km_per_h: f64 },
}

impl Activity {
    fn running(distance_km: f64, duration_min: f64, cadence_spm: u32) -> Self {
        Activity::Running {
            cadence_spm,
            pace_min_per_km: pace(distance_km, duration_min),
        }
    }

    fn cycling(distance_km: f64, duration_min: f64, elevation_gain_m: f64) -> Self {
        Activity::Cycling {
            elevation_gain_m,
            speed_km_per_h: speed(distance_km, duration_min),
        }
    }

    pub fn workout_type(&self) -> WorkoutType {
        match self {
            Activity::Running { .. } => WorkoutType::Running,
            Activity::Cycling { .. } => WorkoutType::Cycling,
        }
    }
}

/// Minutes per kilometer.
pub fn pace(distance_km: f64, duration_min: f64) -> f64 {
    duration_min / distance_km
}

/// Kilometers per hour.
pub fn speed(distance_km: f64, duration_min: f64) -> f64 {
    distance_km / (duration_min / 60.)
}

/// One figure of a rendered list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutDetail {
    pub icon: &'static str,
    pub value: String,
    pub unit: &'static str,
}

impl WorkoutDetail {
    fn new(icon: &'static str, value: String, unit: &'static str) -> Self {
        Self { icon, value, unit }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WorkoutRecord", into = "WorkoutRecord")]
pub struct Workout {
    id: WorkoutId,
    created_at: DateTime<Local>,
    coords: Coords,
    distance_km: f64,
    duration_min: f64,
    description: String,
    clicks: u32,
    activity: Activity,
}

impl Workout {
    pub fn running(coords: Coords, distance_km: f64, duration_min: f64, cadence_spm: u32, created_at: DateTime<Local>) -> Self {
        let activity = Activity::running(distance_km, duration_min, cadence_spm);
        Self::new(coords, distance_km, duration_min, activity, created_at)
    }

    pub fn cycling(coords: Coords, distance_km: f64, duration_min: f64, elevation_gain_m: f64, created_at: DateTime<Local>) -> Self {
        let activity = Activity::cycling(distance_km, duration_min, elevation_gain_m);
        Self::new(coords, distance_km, duration_min, activity, created_at)
    }

    fn new(coords: Coords, distance_km: f64, duration_min: f64, activity: Activity, created_at: DateTime<Local>) -> Self {
        Self {
            id: WorkoutId::from_timestamp(&created_at),
            description: describe(activity.workout_type(), &created_at),
            created_at,
            coords,
            distance_km,
            duration_min,
            clicks: 0,
            activity,
        }
    }

    pub fn id(&self) -> &WorkoutId {
        &self.id
    }

    pub fn created_at(&self) -> &DateTime<Local> {
        &self.created_at
    }

    pub fn coords(&self) -> Coords {
        self.coords
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn duration_min(&self) -> f64 {
        self.duration_min
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    pub fn workout_type(&self) -> WorkoutType {
        self.activity.workout_type()
    }

    pub fn pace(&self) -> Option<f64> {
        match self.activity {
            Activity::Running { pace_min_per_km, .. } => Some(pace_min_per_km),
            Activity::Cycling { .. } => None,
        }
    }

    pub fn speed(&self) -> Option<f64> {
        match self.activity {
            Activity::Cycling { speed_km_per_h, .. } => Some(speed_km_per_h),
            Activity::Running { .. } => None,
        }
    }

    pub fn click(&mut self) {
        self.clicks += 1;
    }

    /// Figures shown in the workout list, in display order.
    pub fn details(&self) -> Vec<WorkoutDetail> {
        let mut details = vec![
            WorkoutDetail::new(self.workout_type().icon(), self.distance_km.to_string(), "km"),
            WorkoutDetail::new("⏱", self.duration_min.to_string(), "min"),
        ];

        match self.activity {
            Activity::Running { cadence_spm, pace_min_per_km } => {
                details.push(WorkoutDetail::new("⚡️", format!("{:.1}", pace_min_per_km), "min/km"));
                details.push(WorkoutDetail::new("🦶🏼", cadence_spm.to_string(), "spm"));
            }
            Activity::Cycling { elevation_gain_m, speed_km_per_h } => {
                details.push(WorkoutDetail::new("⚡️", format!("{:.1}", speed_km_per_h), "km/h"));
                details.push(WorkoutDetail::new("⛰", elevation_gain_m.to_string(), "m"));
            }
        }

        details
    }
}

fn describe(workout_type: WorkoutType, created_at: &DateTime<Local>) -> String {
    format!("{} on {} {}", workout_type.title(), MONTHS[created_at.month0() as usize], created_at.day())
}

/// Stored shape of a workout, field for field what the browser app has always
/// written to local storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WorkoutRecord {
    id: WorkoutId,
    date: DateTime<Local>,
    coords: Coords,
    distance: f64,
    duration: f64,
    #[serde(default)]
    clicks: u32,
    description: String,
    #[serde(flatten)]
    details: RecordDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum RecordDetails {
    Running {
        cadence: f64,
        #[serde(default)]
        pace: Option<f64>,
    },
    Cycling {
        #[serde(rename = "elevationGain")]
        elevation_gain: f64,
        #[serde(default)]
        speed: Option<f64>,
    },
}

impl From<Workout> for WorkoutRecord {
    fn from(workout: Workout) -> Self {
        let details = match workout.activity {
            Activity::Running { cadence_spm, pace_min_per_km } => RecordDetails::Running {
                cadence: cadence_spm as f64,
                pace: Some(pace_min_per_km),
            },
            Activity::Cycling { elevation_gain_m, speed_km_per_h } => RecordDetails::Cycling {
                elevation_gain: elevation_gain_m,
                speed: Some(speed_km_per_h),
            },
        };

        Self {
            id: workout.id,
            date: workout.created_at,
            coords: workout.coords,
            distance: workout.distance_km,
            duration: workout.duration_min,
            clicks: workout.clicks,
            description: workout.description,
            details,
        }
    }
}

impl TryFrom<WorkoutRecord> for Workout {
    type Error = RecordError;

    // Stored metrics are ignored and derived again from distance and duration.
    fn try_from(record: WorkoutRecord) -> Result<Self, Self::Error> {
        let invalid = |reason: &'static str| RecordError::Invalid { id: record.id.to_string(), reason };

        if !(record.distance.is_finite() && record.distance > 0.) {
            return Err(invalid("distance must be positive"));
        }
        if !(record.duration.is_finite() && record.duration > 0.) {
            return Err(invalid("duration must be positive"));
        }

        let activity = match record.details {
            RecordDetails::Running { cadence, .. } => {
                let cadence = cadence.round();
                if !(cadence.is_finite() && cadence >= 1. && cadence <= u32::MAX as f64) {
                    return Err(invalid("cadence must be positive"));
                }
                Activity::running(record.distance, record.duration, cadence as u32)
            }
            // Older records may carry a negative gain; those are kept as written
            RecordDetails::Cycling { elevation_gain, .. } => {
                if !elevation_gain.is_finite() {
                    return Err(invalid("elevation gain must be a number"));
                }
                Activity::cycling(record.distance, record.duration, elevation_gain)
            }
        };

        Ok(Self {
            id: record.id,
            created_at: record.date,
            coords: record.coords,
            distance_km: record.distance,
            duration_min: record.duration,
            description: record.description,
            clicks: record.clicks,
            activity,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn april_14() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 4, 14, 9, 30, 0).unwrap()
    }

    #[test]
    fn running_derives_pace_and_description() {
        let run = Workout::running(Coords(40.7, -74.0), 5., 25., 150, april_14());

        assert_eq!(run.pace(), Some(5.0));
        assert_eq!(run.speed(), None);
        assert_eq!(run.workout_type(), WorkoutType::Running);
        assert_eq!(run.description(), "Running on April 14");
        assert_eq!(run.clicks(), 0);
    }

    #[test]
    fn cycling_derives_speed() {
        let ride = Workout::cycling(Coords(40.7, -74.0), 20., 60., 300., april_14());

        assert_eq!(ride.speed(), Some(20.0));
        assert_eq!(ride.pace(), None);
        assert_eq!(ride.description(), "Cycling on April 14");
    }

    #[test]
    fn description_uses_creation_month() {
        for month in 1..=12 {
            let created_at = Local.with_ymd_and_hms(2023, month, 3, 12, 0, 0).unwrap();
            let run = Workout::running(Coords(0., 0.), 1., 1., 1, created_at);
            assert_eq!(run.description(), format!("Running on {} 3", MONTHS[month as usize - 1]));
        }
    }

    #[test]
    fn id_is_last_ten_millisecond_digits() {
        let created_at = april_14();
        let run = Workout::running(Coords(0., 0.), 1., 1., 1, created_at);
        let millis = created_at.timestamp_millis().to_string();

        assert_eq!(run.id().as_str().len(), 10);
        assert!(millis.ends_with(run.id().as_str()));
    }

    #[test]
    fn click_only_touches_the_counter() {
        let mut run = Workout::running(Coords(1., 2.), 10., 55., 170, april_14());
        let before = run.clone();

        run.click();
        run.click();

        assert_eq!(run.clicks(), 2);
        assert_eq!(run.description(), before.description());
        assert_eq!(run.pace(), before.pace());
        assert_eq!(run.coords(), before.coords());
    }

    #[test]
    fn details_match_list_layout() {
        let run = Workout::running(Coords(0., 0.), 5.2, 28., 174, april_14());
        let values: Vec<_> = run.details().into_iter().map(|d| format!("{} {}", d.value, d.unit)).collect();
        assert_eq!(values, ["5.2 km", "28 min", "5.4 min/km", "174 spm"]);

        let ride = Workout::cycling(Coords(0., 0.), 27., 95., 523., april_14());
        let values: Vec<_> = ride.details().into_iter().map(|d| format!("{} {}", d.value, d.unit)).collect();
        assert_eq!(values, ["27 km", "95 min", "17.1 km/h", "523 m"]);
    }

    #[test]
    fn stored_json_uses_browser_field_names() {
        let ride = Workout::cycling(Coords(40.7, -74.0), 20., 60., 300., april_14());
        let value = serde_json::to_value(&ride).unwrap();

        assert_eq!(value["type"], "cycling");
        assert_eq!(value["elevationGain"], 300.0);
        assert_eq!(value["speed"], 20.0);
        assert_eq!(value["coords"], serde_json::json!([40.7, -74.0]));
        assert_eq!(value["description"], "Cycling on April 14");
        assert_eq!(value["id"], ride.id().as_str());
    }

    #[test]
    fn reload_restores_full_variant() {
        let mut run = Workout::running(Coords(40.7, -74.0), 5., 25., 150, april_14());
        run.click();

        let json = serde_json::to_string(&run).unwrap();
        let mut restored: Workout = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, run);

        restored.click();
        assert_eq!(restored.clicks(), 2);
    }

    #[test]
    fn loads_records_written_by_browser() {
        let json = r#"{
            "date": "2024-04-14T09:30:00.000Z",
            "id": "3087000000",
            "clicks": 0,
            "coords": [39, -12],
            "distance": 5.2,
            "duration": 28,
            "type": "running",
            "cadence": 174,
            "pace": 5.384615384615385,
            "description": "Running on April 14"
        }"#;

        let run: Workout = serde_json::from_str(json).unwrap();
        assert_eq!(run.id().as_str(), "3087000000");
        assert_eq!(run.coords(), Coords(39., -12.));
        assert_eq!(run.activity(), &Activity::Running { cadence_spm: 174, pace_min_per_km: 28. / 5.2 });
        assert_eq!(run.description(), "Running on April 14");
    }

    #[test]
    fn metric_is_derived_again_on_load() {
        let json = r#"{"date":"2024-04-14T09:30:00Z","id":"1","coords":[0,0],"distance":20,"duration":60,
            "type":"cycling","elevationGain":0,"speed":999,"description":"Cycling on April 14"}"#;

        let ride: Workout = serde_json::from_str(json).unwrap();
        assert_eq!(ride.speed(), Some(20.0));
        assert_eq!(ride.clicks(), 0);
    }

    #[test]
    fn rejects_invalid_records() {
        let json = r#"{"date":"2024-04-14T09:30:00Z","id":"1","coords":[0,0],"distance":0,"duration":60,
            "type":"cycling","elevationGain":10,"description":"Cycling on April 14"}"#;
        assert!(serde_json::from_str::<Workout>(json).is_err());

        let json = r#"{"date":"2024-04-14T09:30:00Z","id":"1","coords":[0,0],"distance":3,"duration":20,
            "type":"running","cadence":-5,"description":"Running on April 14"}"#;
        assert!(serde_json::from_str::<Workout>(json).is_err());
    }

    #[test]
    fn keeps_stored_negative_elevation() {
        let json = r#"{"date":"2024-04-14T09:30:00Z","id":"2","coords":[0,0],"distance":20,"duration":60,
            "type":"cycling","elevationGain":-5,"description":"Cycling on April 14"}"#;

        let ride: Workout = serde_json::from_str(json).unwrap();
        assert_eq!(ride.activity(), &Activity::Cycling { elevation_gain_m: -5., speed_km_per_h: 20. });
    }

    #[test]
    fn workout_type_round_trips_form_value() {
        assert_eq!("running".parse::<WorkoutType>(), Ok(WorkoutType::Running));
        assert_eq!("cycling".parse::<WorkoutType>(), Ok(WorkoutType::Cycling));
        assert!("swimming".parse::<WorkoutType>().is_err());
    }
}
