use crate::config::Speed;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct SettingsModalProps {
    pub show: bool,
    pub on_close: Callback<()>,
    pub show_grid: bool,
    pub on_toggle_grid: Callback<()>,
    pub speed: Speed,
    pub on_speed: Callback<Speed>,
    pub on_reset_best: Callback<()>,
}

#[function_component]
pub fn SettingsModal(props: &SettingsModalProps) -> Html {
    if !props.show {
        return html! {};
    }

    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let toggle_grid_cb = {
        let cb = props.on_toggle_grid.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let reset_best_cb = {
        let cb = props.on_reset_best.clone();
        Callback::from(move |_| {
            if let Some(win) = web_sys::window() {
                if win
                    .confirm_with_message("Forget the best score?")
                    .unwrap_or(false)
                {
                    cb.emit(());
                }
            } else {
                cb.emit(());
            }
        })
    };
    let speed_buttons = Speed::ALL
        .into_iter()
        .map(|speed| {
            let cb = props.on_speed.clone();
            let onclick = Callback::from(move |_| cb.emit(speed));
            let style = if speed == props.speed {
                "flex:1; font-weight:700; border:1px solid #58a6ff;"
            } else {
                "flex:1;"
            };
            html! { <button onclick={onclick} style={style}>{ speed.label() }</button> }
        })
        .collect::<Html>();

    html! {<div style="position:fixed; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:50;">
        <div style="background:#161b22; color:#e6edf3; border:1px solid #30363d; border-radius:12px; padding:16px 20px; min-width:300px; max-width:420px; display:flex; flex-direction:column; gap:14px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0; font-size:18px;">{"Settings"}</h3>
                <button onclick={close_cb.clone()} style="padding:4px 8px;">{"Close"}</button>
            </div>
            <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                <input type="checkbox" checked={props.show_grid} onclick={toggle_grid_cb} />
                <span>{"Show Grid Lines"}</span>
            </label>
            <div style="display:flex; flex-direction:column; gap:6px;">
                <span>{"Speed"}</span>
                <div style="display:flex; gap:6px;">{ speed_buttons }</div>
            </div>
            <div style="display:flex; gap:8px; flex-wrap:wrap;">
                <button onclick={reset_best_cb} style="background:#f85149; border:1px solid #b62324; color:#fff; flex:1;">{"Reset Best Score"}</button>
                <button onclick={close_cb} style="flex:0 0 auto;">{"Done"}</button>
            </div>
        </div>
    </div>}
}
