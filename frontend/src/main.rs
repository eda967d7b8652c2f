use chrono::Local;
use components::{
    map_component::{create_map_container, LeafletMap, MapComponent},
    workout_form::WorkoutFormComponent,
    workout_list::WorkoutList,
};
use gloo_console::{error, info};
use gloo_timers::callback::Timeout;
use gloo_utils::window;
use storage::BrowserStore;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlElement;
use workout_tracker_lib::{
    app::App,
    config::AppConfig,
    coords::Coords,
    error::{AppError, GeolocationError},
    form::WorkoutForm,
    workout::{WorkoutId, WorkoutType},
};
use yew::prelude::*;
use yew_router::{
    history::{BrowserHistory, History},
    Routable,
};

mod components;
mod geolocation;
mod logging;
mod storage;

const CONFIG: &str = include_str!("../app_config.json");

#[derive(Clone, Debug, PartialEq, Routable)]
enum Route {
    #[at("/")]
    Default,
    #[at("/reset")]
    Reset,
    #[not_found]
    #[at("/404")]
    Invalid,
}

enum MainMsg {
    Located(Result<Coords, GeolocationError>),
    MapClicked(Coords),
    TypeChanged(WorkoutType),
    Submit(WorkoutForm),
    FormHidden,
    SelectWorkout(WorkoutId),
}

struct Model {
    app: App<LeafletMap, BrowserStore>,
    map_container: Option<HtmlElement>,
    hide_timeout: Option<Timeout>,
}

impl Component for Model {
    type Message = MainMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let config = load_config();
        logging::init(&config.log_level);

        let mut app = App::new(config, BrowserStore);
        info!(format!("Loaded {} workouts", app.workouts().len()));

        let history = BrowserHistory::new();
        let route = Route::recognize(history.location().path()).unwrap_or(Route::Invalid);

        match route {
            Route::Reset => {
                if let Err(e) = app.reset() {
                    error!(format!("Reset failed: {e}"));
                }
                // Start over from a clean page
                if let Err(e) = window().location().set_href("/") {
                    error!(e);
                }
            }
            Route::Default => {
                let cb = ctx.link().callback(MainMsg::Located);
                spawn_local(async move {
                    cb.emit(geolocation::current_position().await);
                });
            }
            Route::Invalid => {
                error!("Invalid route");
            }
        }

        Self {
            app,
            map_container: create_map_container(),
            hide_timeout: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            MainMsg::Located(Ok(position)) => {
                let Some(container) = &self.map_container else {
                    error!("No map container");
                    return false;
                };
                let map = LeafletMap::new(container);
                map.on_click(ctx.link().callback(MainMsg::MapClicked));
                self.app.map_ready(map, position);
            }
            MainMsg::Located(Err(e)) => {
                let err = self.app.position_failed(e);
                alert(&err);
            }
            MainMsg::MapClicked(coords) => {
                if let Err(e) = self.app.map_clicked(coords) {
                    error!(format!("Map click ignored: {e}"));
                    return false;
                }
            }
            MainMsg::TypeChanged(workout_type) => {
                self.app.select_type(workout_type);
            }
            MainMsg::Submit(form) => match self.app.submit(&form, Local::now()) {
                Ok(id) => {
                    info!(format!("Added workout {id}"));
                    let cb = ctx.link().callback(|()| MainMsg::FormHidden);
                    let delay = self.app.config().form_reveal_delay_ms;
                    self.hide_timeout = Some(Timeout::new(delay, move || cb.emit(())));
                }
                Err(e) => {
                    alert(&e);
                    return false;
                }
            },
            MainMsg::FormHidden => {
                self.hide_timeout = None;
                self.app.form_hidden();
            }
            MainMsg::SelectWorkout(id) => {
                if self.app.focus_workout(&id).is_none() {
                    error!(format!("No workout with id {id}"));
                }
                return false;
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let workouts = self.app.workouts().newest_first().cloned().collect::<Vec<_>>();

        html! {
            <>
                <div class="sidebar">
                    <WorkoutList workouts={workouts} on_select={link.callback(MainMsg::SelectWorkout)}>
                        <WorkoutFormComponent
                            state={self.app.form().clone()}
                            on_submit={link.callback(MainMsg::Submit)}
                            on_type_change={link.callback(MainMsg::TypeChanged)}
                        />
                    </WorkoutList>
                </div>
                if let Some(container) = &self.map_container {
                    <MapComponent container={container.clone()} />
                }
            </>
        }
    }
}

fn load_config() -> AppConfig {
    AppConfig::from_json(CONFIG).unwrap_or_else(|e| {
        error!(format!("Using default config: {e}"));
        AppConfig::default()
    })
}

fn alert(err: &AppError) {
    if window().alert_with_message(&err.to_string()).is_err() {
        error!(err.to_string());
    }
}

/// Clears all stored workouts and reloads. Callable from the browser console.
#[wasm_bindgen]
pub fn reset() {
    if let Err(e) = window().location().set_href("/reset") {
        error!(e);
    }
}

fn main() {
    yew::Renderer::<Model>::new().render();
}
