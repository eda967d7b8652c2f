use web_sys::{HtmlInputElement, HtmlSelectElement};
use workout_tracker_lib::{
    app::{FormPhase, FormState},
    form::WorkoutForm,
    workout::WorkoutType,
};
use yew::prelude::*;

#[derive(PartialEq, Properties, Clone)]
pub struct WorkoutFormProps {
    pub state: FormState,
    pub on_submit: Callback<WorkoutForm>,
    pub on_type_change: Callback<WorkoutType>,
}

#[function_component]
pub fn WorkoutFormComponent(props: &WorkoutFormProps) -> Html {
    let distance = use_node_ref();
    let duration = use_node_ref();
    let cadence = use_node_ref();
    let elevation = use_node_ref();

    {
        let distance = distance.clone();
        use_effect_with(props.state.focus_requests(), move |requests| {
            if *requests > 0 {
                if let Some(input) = distance.cast::<HtmlInputElement>() {
                    let _ = input.focus();
                }
            }
            || ()
        });
    }

    {
        let inputs = [distance.clone(), duration.clone(), cadence.clone(), elevation.clone()];
        use_effect_with(props.state.phase(), move |phase| {
            if *phase == FormPhase::Closing {
                for input in inputs.iter().filter_map(|node| node.cast::<HtmlInputElement>()) {
                    input.set_value("");
                }
            }
            || ()
        });
    }

    let workout_type = props.state.workout_type();

    let onsubmit = {
        let on_submit = props.on_submit.clone();
        let (distance, duration, cadence, elevation) = (distance.clone(), duration.clone(), cadence.clone(), elevation.clone());
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let value = |node: &NodeRef| node.cast::<HtmlInputElement>().map(|input| input.value()).unwrap_or_default();
            on_submit.emit(WorkoutForm {
                workout_type,
                distance: value(&distance),
                duration: value(&duration),
                cadence: value(&cadence),
                elevation: value(&elevation),
            });
        })
    };

    let onchange = {
        let on_type_change = props.on_type_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(workout_type) = select.value().parse() {
                on_type_change.emit(workout_type);
            }
        })
    };

    let (class, style) = match props.state.phase() {
        FormPhase::Open => ("form", None),
        FormPhase::Closing => ("form hidden", Some("display: none")),
        FormPhase::Hidden => ("form hidden", None),
    };

    let row_class = |shown_for: WorkoutType| {
        if shown_for == workout_type { "form__row" } else { "form__row form__row--hidden" }
    };

    html! {
        <form class={class} style={style} onsubmit={onsubmit}>
            <div class="form__row">
                <label class="form__label">{"Type"}</label>
                <select class="form__input form__input--type" onchange={onchange}>
                    <option value="running" selected={workout_type == WorkoutType::Running}>{"Running"}</option>
                    <option value="cycling" selected={workout_type == WorkoutType::Cycling}>{"Cycling"}</option>
                </select>
            </div>
            <div class="form__row">
                <label class="form__label">{"Distance"}</label>
                <input ref={distance} class="form__input form__input--distance" placeholder="km" />
            </div>
            <div class="form__row">
                <label class="form__label">{"Duration"}</label>
                <input ref={duration} class="form__input form__input--duration" placeholder="min" />
            </div>
            <div class={row_class(WorkoutType::Running)}>
                <label class="form__label">{"Cadence"}</label>
                <input ref={cadence} class="form__input form__input--cadence" placeholder="step/min" />
            </div>
            <div class={row_class(WorkoutType::Cycling)}>
                <label class="form__label">{"Elev Gain"}</label>
                <input ref={elevation} class="form__input form__input--elevation" placeholder="meters" />
            </div>
            <button class="form__btn">{"OK"}</button>
        </form>
    }
}
