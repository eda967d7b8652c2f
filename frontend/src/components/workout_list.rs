use web_sys::Element;
use workout_tracker_lib::workout::{Workout, WorkoutId};
use yew::prelude::*;

#[derive(PartialEq, Properties, Clone)]
pub struct WorkoutListProps {
    /// Newest first
    pub workouts: Vec<Workout>,
    pub on_select: Callback<WorkoutId>,
    /// The form, shown above the entries
    pub children: Html,
}

#[function_component]
pub fn WorkoutList(props: &WorkoutListProps) -> Html {
    // Clicks anywhere inside an entry select it, clicks elsewhere do nothing
    let onclick = {
        let on_select = props.on_select.clone();
        Callback::from(move |e: MouseEvent| {
            let Some(target) = e.target_dyn_into::<Element>() else {
                return;
            };
            let Ok(Some(entry)) = target.closest(".workout") else {
                return;
            };
            if let Some(id) = entry.get_attribute("data-id") {
                on_select.emit(WorkoutId::from(id));
            }
        })
    };

    html! {
        <ul class="workouts" onclick={onclick}>
            { props.children.clone() }
            { for props.workouts.iter().map(workout_entry) }
        </ul>
    }
}

fn workout_entry(workout: &Workout) -> Html {
    let id = workout.id().to_string();
    html! {
        <li key={id.clone()} class={format!("workout workout--{}", workout.workout_type())} data-id={id}>
            <h2 class="workout__title">{workout.description()}</h2>
            { for workout.details().into_iter().map(|detail| html! {
                <div class="workout__details">
                    <span class="workout__icon">{detail.icon}</span>
                    <span class="workout__value">{detail.value}</span>
                    <span class="workout__unit">{detail.unit}</span>
                </div>
            }) }
        </li>
    }
}
