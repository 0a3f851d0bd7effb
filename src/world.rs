//! Binding to the external snake simulation.
//!
//! The simulation ships as its own wasm module. The host page loads it and
//! publishes `World`, `Direction`, `GameStatus` and the module's `memory`
//! under the global `poopySnake`, then fires [`READY_EVENT`] on `window`.
//! This module only reads from it and relays input into it.

use js_sys::{Reflect, Uint32Array, WebAssembly};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::error::UiError;

pub const MODULE_NAMESPACE: &str = "poopySnake";
pub const READY_EVENT: &str = "poopy-snake-ready";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = poopySnake, js_name = World)]
    type WorldBinding;

    #[wasm_bindgen(js_namespace = ["poopySnake", "World"], js_name = new)]
    fn world_new(width: u32, snake_spawn_index: u32) -> WorldBinding;

    #[wasm_bindgen(method)]
    fn get_width(this: &WorldBinding) -> u32;

    #[wasm_bindgen(method)]
    fn get_snake_cell_pointer(this: &WorldBinding) -> u32;

    #[wasm_bindgen(method)]
    fn get_snake_length(this: &WorldBinding) -> u32;

    #[wasm_bindgen(method)]
    fn get_reward_cell(this: &WorldBinding) -> Option<u32>;

    #[wasm_bindgen(method)]
    fn get_poop_cell(this: &WorldBinding) -> Option<u32>;

    #[wasm_bindgen(method)]
    fn get_points(this: &WorldBinding) -> u32;

    #[wasm_bindgen(method)]
    fn get_game_status(this: &WorldBinding) -> Option<u32>;

    #[wasm_bindgen(method)]
    fn set_snake_direction(this: &WorldBinding, direction: u32);

    #[wasm_bindgen(method)]
    fn step(this: &WorldBinding);

    #[wasm_bindgen(method)]
    fn start_game(this: &WorldBinding);

    #[wasm_bindgen(method)]
    fn free(this: &WorldBinding);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Won = 0,
    Lost = 1,
    Played = 2,
}

impl GameStatus {
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(GameStatus::Won),
            1 => Some(GameStatus::Lost),
            2 => Some(GameStatus::Played),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost)
    }
}

/// Everything one frame needs, copied out of the simulation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorldSnapshot {
    pub width: u32,
    /// Cell indices, head first.
    pub snake: Vec<u32>,
    pub reward_cell: Option<u32>,
    pub poop_cell: Option<u32>,
    pub points: u32,
    /// `None` until the game is started.
    pub status: Option<GameStatus>,
}

impl WorldSnapshot {
    pub fn is_terminal(&self) -> bool {
        self.status.is_some_and(GameStatus::is_terminal)
    }
}

/// The narrow get/set surface the UI needs from a simulation.
pub trait World {
    fn snapshot(&self) -> Result<WorldSnapshot, UiError>;
    fn set_direction(&self, direction: Direction);
    fn step(&self);
    fn start(&self);
}

pub fn module_ready() -> bool {
    module_namespace().is_ok()
}

fn module_namespace() -> Result<JsValue, UiError> {
    let ns = Reflect::get(&js_sys::global(), &JsValue::from_str(MODULE_NAMESPACE))?;
    if ns.is_undefined() || ns.is_null() {
        return Err(UiError::MissingModule);
    }
    Ok(ns)
}

fn module_memory() -> Result<WebAssembly::Memory, UiError> {
    let ns = module_namespace()?;
    Reflect::get(&ns, &JsValue::from_str("memory"))?
        .dyn_into::<WebAssembly::Memory>()
        .map_err(|_| UiError::MissingMemory)
}

pub struct ExternalWorld {
    inner: WorldBinding,
    memory: WebAssembly::Memory,
}

impl ExternalWorld {
    pub fn new(width: u32, snake_spawn_index: u32) -> Result<Self, UiError> {
        let memory = module_memory()?;
        let inner = world_new(width, snake_spawn_index);
        log::info!("world created: width={} spawn={}", width, snake_spawn_index);
        Ok(Self { inner, memory })
    }

    fn snake_cells(&self) -> Vec<u32> {
        let ptr = self.inner.get_snake_cell_pointer();
        let len = self.inner.get_snake_length();
        // The buffer object is replaced whenever the module memory grows, so
        // a view is only valid for the duration of this copy.
        Uint32Array::new_with_byte_offset_and_length(&self.memory.buffer(), ptr, len).to_vec()
    }
}

impl World for ExternalWorld {
    fn snapshot(&self) -> Result<WorldSnapshot, UiError> {
        Ok(WorldSnapshot {
            width: self.inner.get_width(),
            snake: self.snake_cells(),
            reward_cell: self.inner.get_reward_cell(),
            poop_cell: self.inner.get_poop_cell(),
            points: self.inner.get_points(),
            status: self.inner.get_game_status().and_then(GameStatus::from_raw),
        })
    }

    fn set_direction(&self, direction: Direction) {
        self.inner.set_snake_direction(direction as u32);
    }

    fn step(&self) {
        self.inner.step();
    }

    fn start(&self) {
        self.inner.start_game();
    }
}

impl Drop for ExternalWorld {
    fn drop(&mut self) {
        self.inner.free();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_numbers_follow_module_enum() {
        assert_eq!(GameStatus::from_raw(0), Some(GameStatus::Won));
        assert_eq!(GameStatus::from_raw(1), Some(GameStatus::Lost));
        assert_eq!(GameStatus::from_raw(2), Some(GameStatus::Played));
        assert_eq!(GameStatus::from_raw(7), None);
    }

    #[test]
    fn only_won_and_lost_are_terminal() {
        let mut snap = WorldSnapshot::default();
        assert!(!snap.is_terminal());
        snap.status = Some(GameStatus::Played);
        assert!(!snap.is_terminal());
        snap.status = Some(GameStatus::Lost);
        assert!(snap.is_terminal());
        snap.status = Some(GameStatus::Won);
        assert!(snap.is_terminal());
    }

    #[test]
    fn direction_discriminants_match_module() {
        assert_eq!(Direction::Up as u32, 0);
        assert_eq!(Direction::Down as u32, 1);
        assert_eq!(Direction::Left as u32, 2);
        assert_eq!(Direction::Right as u32, 3);
    }
}
