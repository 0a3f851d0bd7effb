use super::game_view::GameView;
use crate::config::GameConfig;
use crate::world::{self, READY_EVENT};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let ready = use_state(world::module_ready);
    let config = use_state(GameConfig::load);

    // The world module may finish loading after us; wait for the host page's signal.
    {
        let ready = ready.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window();
            let mut listener = None;
            if world::module_ready() {
                ready.set(true);
            } else if let Some(win) = &window {
                let ready = ready.clone();
                let cb = Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    log::info!("world module ready");
                    ready.set(true);
                }) as Box<dyn FnMut(_)>);
                match win.add_event_listener_with_callback(READY_EVENT, cb.as_ref().unchecked_ref()) {
                    Ok(()) => listener = Some(cb),
                    Err(e) => log::error!("cannot wait for world module: {:?}", e),
                }
            }
            move || {
                if let (Some(win), Some(cb)) = (window, listener) {
                    let _ = win.remove_event_listener_with_callback(
                        READY_EVENT,
                        cb.as_ref().unchecked_ref(),
                    );
                }
            }
        });
    }

    // Persist settings changes
    {
        use_effect_with((*config).clone(), move |cfg| {
            cfg.save();
            || ()
        });
    }

    let on_config = {
        let config = config.clone();
        Callback::from(move |cfg: GameConfig| config.set(cfg.clamped()))
    };

    html! {
        <div id="root" style="min-height:100vh; background:#0e1116; color:#e6edf3; font-family:sans-serif;">
            {
                if *ready {
                    html! { <GameView config={(*config).clone()} on_config={on_config} /> }
                } else {
                    html! { <p style="padding:16px;">{"Loading world..."}</p> }
                }
            }
        </div>
    }
}
