//! Bridge component between Leptos state and the imperative `mapcanvas::engine::Engine`.
//!
//! ARCHITECTURE
//! ============
//! The engine owns tiles, the vector layer and the draw/modify/snap
//! interactions. This host forwards DOM events to it, turns the returned
//! actions into measurement state, cursor changes and coalesced renders, and
//! disposes the engine when the component unmounts.

use leptos::prelude::*;

use crate::components::measurement_readout::MeasurementReadout;
use crate::state::measurement::MeasurementState;
#[cfg(feature = "hydrate")]
use crate::state::measurement::MeasurementEvent;
#[cfg(feature = "hydrate")]
use crate::util::canvas_input::{
    keyboard_key, map_modifiers, mouse_modifiers, mouse_point, pointer_button, pointer_modifiers, pointer_point,
    should_prevent_default_key, wheel_delta, wheel_point,
};
#[cfg(feature = "hydrate")]
use crate::util::map_lifecycle::{mount_once, release};
#[cfg(feature = "hydrate")]
use crate::util::map_viewport::sync_viewport;

#[cfg(feature = "hydrate")]
use std::cell::RefCell;
#[cfg(feature = "hydrate")]
use std::rc::Rc;

#[cfg(feature = "hydrate")]
use mapcanvas::engine::{Action, Engine, MapOptions};
#[cfg(feature = "hydrate")]
use mapcanvas::sphere::Measurement;
#[cfg(feature = "hydrate")]
use wasm_bindgen::{JsCast, closure::Closure};

/// Container style: full width, 90% of the viewport height, scrollable overflow.
const CONTAINER_STYLE: &str = "width: 100%; height: 90vh; overflow: auto";

#[cfg(feature = "hydrate")]
type EngineSlot = StoredValue<Option<Engine>, LocalStorage>;

/// Run `f` against the mounted engine, if any.
#[cfg(feature = "hydrate")]
fn with_engine<U>(engine: EngineSlot, f: impl FnOnce(&mut Engine) -> U) -> Option<U> {
    engine.try_update_value(|slot| slot.as_mut().map(f)).flatten()
}

#[cfg(feature = "hydrate")]
fn render_now(engine: EngineSlot) {
    if let Some(Err(err)) = with_engine(engine, Engine::render) {
        log::warn!("map render failed: {err:?}");
    }
}

/// Schedule a render on the next animation frame; repeated requests before it fires coalesce.
#[cfg(feature = "hydrate")]
fn request_render(engine: EngineSlot, raf_pending: RwSignal<bool>) {
    if raf_pending.get_untracked() {
        return;
    }
    raf_pending.set(true);

    let Some(window) = web_sys::window() else {
        raf_pending.set(false);
        render_now(engine);
        return;
    };

    let holder: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let holder_for_cb = Rc::clone(&holder);
    let cb = Closure::wrap(Box::new(move |_ts: f64| {
        raf_pending.set(false);
        render_now(engine);
        holder_for_cb.borrow_mut().take();
    }) as Box<dyn FnMut(f64)>);

    if window
        .request_animation_frame(cb.as_ref().unchecked_ref())
        .is_ok()
    {
        *holder.borrow_mut() = Some(cb);
    } else {
        raf_pending.set(false);
        render_now(engine);
    }
}

/// Apply engine actions to component state. Must run outside any engine borrow.
#[cfg(feature = "hydrate")]
fn process_actions(
    actions: Vec<Action>,
    engine: EngineSlot,
    canvas_ref: NodeRef<leptos::html::Canvas>,
    measurement: RwSignal<MeasurementState>,
    raf_pending: RwSignal<bool>,
) {
    let mut needs_render = false;
    for action in actions {
        match action {
            Action::DrawEnd { feature, geometry } => {
                let measured = Measurement::of(&geometry);
                log::debug!("polygon {feature} measured: {} m, {} m2", measured.length, measured.area);
                measurement.update(|state| {
                    state.apply(MeasurementEvent::DrawCompleted { distance: measured.length, area: measured.area });
                });
            }
            Action::DrawAbort => {
                measurement.update(|state| state.apply(MeasurementEvent::DrawAborted));
            }
            Action::ModifyEnd { .. } => {
                measurement.update(|state| state.apply(MeasurementEvent::FeatureModified));
            }
            Action::SetCursor(cursor) => {
                if let Some(canvas) = canvas_ref.get_untracked() {
                    if let Err(err) = canvas.style().set_property("cursor", &cursor) {
                        log::debug!("cursor not applied: {err:?}");
                    }
                }
            }
            Action::RenderNeeded | Action::ViewChanged => needs_render = true,
            Action::DrawStart | Action::ModifyStart { .. } | Action::VertexRemoved { .. } => {}
        }
    }
    if needs_render {
        request_render(engine, raf_pending);
    }
}

/// Interactive map for drawing polygons and reading out their perimeter and area.
///
/// On hydration this mounts one `mapcanvas::engine::Engine` on the canvas,
/// centered on the projection origin at zoom 2 over OpenStreetMap tiles, with
/// draw, modify and snap active. The engine is disposed on unmount.
#[component]
pub fn InteractiveMeasurementMap() -> impl IntoView {
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
    let measurement = RwSignal::new(MeasurementState::default());
    let attribution = RwSignal::new(String::new());
    #[cfg(feature = "hydrate")]
    let raf_pending = RwSignal::new(false);
    #[cfg(feature = "hydrate")]
    let engine: EngineSlot = StoredValue::new_local(None);
    #[cfg(feature = "hydrate")]
    let dispatch = move |actions: Vec<Action>| process_actions(actions, engine, canvas_ref, measurement, raf_pending);

    #[cfg(feature = "hydrate")]
    {
        Effect::new(move || {
            let Some(canvas) = canvas_ref.get() else {
                return;
            };
            let on_tile_ready: Rc<dyn Fn()> = Rc::new(move || request_render(engine, raf_pending));
            let mounted = engine.try_update_value(|slot| {
                mount_once(slot, || {
                    let mut instance = Engine::new(canvas, MapOptions::default(), on_tile_ready);
                    sync_viewport(&mut instance, &canvas_ref);
                    instance
                })
            });
            if mounted != Some(true) {
                return;
            }
            if let Some(text) = with_engine(engine, |e| e.attribution().to_owned()) {
                attribution.set(text);
            }
            log::debug!("measurement map mounted");
            request_render(engine, raf_pending);
        });

        let resize = window_event_listener(leptos::ev::resize, move |_| {
            dispatch(with_engine(engine, |e| sync_viewport(e, &canvas_ref)).unwrap_or_default());
        });

        on_cleanup(move || {
            resize.remove();
            engine.try_update_value(|slot| {
                release(slot, |mut instance| {
                    instance.dispose();
                })
            });
        });
    }

    let on_pointer_down = {
        #[cfg(feature = "hydrate")]
        {
            move |ev: leptos::ev::PointerEvent| {
                ev.prevent_default();
                if let Some(canvas) = canvas_ref.get_untracked() {
                    if let Err(err) = canvas.focus() {
                        log::debug!("canvas focus failed: {err:?}");
                    }
                    if let Err(err) = canvas.set_pointer_capture(ev.pointer_id()) {
                        log::debug!("pointer capture failed: {err:?}");
                    }
                }
                let point = pointer_point(&ev);
                let (button, modifiers) = (pointer_button(&ev), pointer_modifiers(&ev));
                dispatch(with_engine(engine, |e| e.on_pointer_down(point, button, modifiers)).unwrap_or_default());
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_pointer_move = {
        #[cfg(feature = "hydrate")]
        {
            move |ev: leptos::ev::PointerEvent| {
                let point = pointer_point(&ev);
                let modifiers = pointer_modifiers(&ev);
                dispatch(with_engine(engine, |e| e.on_pointer_move(point, modifiers)).unwrap_or_default());
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_pointer_up = {
        #[cfg(feature = "hydrate")]
        {
            move |ev: leptos::ev::PointerEvent| {
                let point = pointer_point(&ev);
                let (button, modifiers) = (pointer_button(&ev), pointer_modifiers(&ev));
                dispatch(with_engine(engine, |e| e.on_pointer_up(point, button, modifiers)).unwrap_or_default());
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_pointer_leave = {
        #[cfg(feature = "hydrate")]
        {
            move |_ev: leptos::ev::PointerEvent| {
                dispatch(with_engine(engine, Engine::on_pointer_leave).unwrap_or_default());
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_wheel = {
        #[cfg(feature = "hydrate")]
        {
            move |ev: leptos::ev::WheelEvent| {
                ev.prevent_default();
                let point = wheel_point(&ev);
                let delta = wheel_delta(&ev);
                let modifiers = map_modifiers(ev.shift_key(), ev.ctrl_key(), ev.alt_key(), ev.meta_key());
                dispatch(with_engine(engine, |e| e.on_wheel(point, delta, modifiers)).unwrap_or_default());
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            move |_ev: leptos::ev::WheelEvent| {}
        }
    };

    let on_double_click = {
        #[cfg(feature = "hydrate")]
        {
            move |ev: leptos::ev::MouseEvent| {
                ev.prevent_default();
                let (point, modifiers) = (mouse_point(&ev), mouse_modifiers(&ev));
                dispatch(with_engine(engine, |e| e.on_double_click(point, modifiers)).unwrap_or_default());
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            move |_ev: leptos::ev::MouseEvent| {}
        }
    };

    let on_key_down = {
        #[cfg(feature = "hydrate")]
        {
            move |ev: leptos::ev::KeyboardEvent| {
                let (key, modifiers) = keyboard_key(&ev);
                if should_prevent_default_key(&key.0) && !modifiers.ctrl && !modifiers.meta {
                    ev.prevent_default();
                }
                dispatch(with_engine(engine, |e| e.on_key_down(key, modifiers)).unwrap_or_default());
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            move |_ev: leptos::ev::KeyboardEvent| {}
        }
    };

    let on_zoom_in = {
        #[cfg(feature = "hydrate")]
        {
            move |_ev: leptos::ev::MouseEvent| {
                dispatch(with_engine(engine, |e| e.zoom_by(1.0)).unwrap_or_default());
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            move |_ev: leptos::ev::MouseEvent| {}
        }
    };

    let on_zoom_out = {
        #[cfg(feature = "hydrate")]
        {
            move |_ev: leptos::ev::MouseEvent| {
                dispatch(with_engine(engine, |e| e.zoom_by(-1.0)).unwrap_or_default());
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            move |_ev: leptos::ev::MouseEvent| {}
        }
    };

    view! {
        <div class="measurement-map">
            <div class="measurement-map-container" style=CONTAINER_STYLE>
                <canvas
                    class="measurement-map-canvas"
                    node_ref=canvas_ref
                    tabindex="0"
                    on:pointerdown=on_pointer_down
                    on:pointermove=on_pointer_move
                    on:pointerup=on_pointer_up
                    on:pointerleave=on_pointer_leave
                    on:wheel=on_wheel
                    on:dblclick=on_double_click
                    on:keydown=on_key_down
                >
                    "Your browser does not support canvas."
                </canvas>
                <div class="map-zoom-controls">
                    <button type="button" title="Zoom in" on:click=on_zoom_in>"+"</button>
                    <button type="button" title="Zoom out" on:click=on_zoom_out>"−"</button>
                </div>
                <div class="map-attribution">{move || attribution.get()}</div>
            </div>
            <MeasurementReadout state=measurement/>
        </div>
    }
}
