//! Landing page hosting the measurement map.

use leptos::prelude::*;

use crate::components::measurement_map::InteractiveMeasurementMap;

/// Full-width map with the measurement read-out beneath it.
#[component]
pub fn MapPage() -> impl IntoView {
    view! {
        <main class="map-page">
            <InteractiveMeasurementMap/>
        </main>
    }
}
