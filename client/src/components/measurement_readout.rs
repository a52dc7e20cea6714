//! Distance and area read-out for the last completed polygon.

use leptos::prelude::*;

use crate::state::measurement::MeasurementState;

/// Shows one line per truthy measurement value; renders nothing for absent or zero values.
#[component]
pub fn MeasurementReadout(state: RwSignal<MeasurementState>) -> impl IntoView {
    view! {
        <div class="measurement-readout">
            {move || state.get().distance_line().map(|line| view! { <p class="measurement-distance">{line}</p> })}
            {move || state.get().area_line().map(|line| view! { <p class="measurement-area">{line}</p> })}
        </div>
    }
}
