mod components;
mod config;
mod error;
mod favicon;
mod game_loop;
mod input;
mod render;
mod scene;
mod session;
mod storage;
mod util;
mod world;

use components::App;

fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    if let Err(e) = favicon::install_favicon() {
        log::warn!("favicon not installed: {}", e);
    }
    yew::Renderer::<App>::new().render();
}
