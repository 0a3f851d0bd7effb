use crate::session::{Phase, StatusReport};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StatusPanelProps {
    pub report: StatusReport,
    pub on_start: Callback<()>,
    pub on_open_settings: Callback<()>,
}

#[function_component]
pub fn StatusPanel(props: &StatusPanelProps) -> Html {
    let phase = props.report.phase;
    let start_cb = {
        let cb = props.on_start.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let settings_cb = {
        let cb = props.on_open_settings.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let row_style = "display:flex; align-items:center; gap:8px;";
    let label_style = "flex:1; font-weight:500;";
    let value_style =
        "min-width:48px; text-align:right; font-variant-numeric:tabular-nums; font-weight:600;";
    html! {
        <div style="background:rgba(22,27,34,0.9); color:#e6edf3; border:1px solid #30363d; border-radius:8px; padding:10px 14px; min-width:260px; display:flex; flex-direction:column; gap:8px; font-size:14px;">
            <div style={row_style}>
                <span style={label_style}>{"Status"}</span>
                <span style={value_style}>{ phase.label() }</span>
            </div>
            <div style={row_style}>
                <span style={label_style}>{"Points"}</span>
                <span style={value_style}>{ props.report.points }</span>
            </div>
            <div style={row_style}>
                <span style={label_style}>{"Best"}</span>
                <span style={value_style}>{ props.report.best }</span>
            </div>
            <div style="display:flex; gap:8px;">
                <button onclick={start_cb} disabled={phase == Phase::Playing} style="flex:1;">{ phase.button_label() }</button>
                <button onclick={settings_cb}>{"Settings"}</button>
            </div>
        </div>
    }
}
