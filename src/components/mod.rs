pub mod app;
pub mod game_view;
pub mod settings_modal;
pub mod status_panel;

pub use app::App;
