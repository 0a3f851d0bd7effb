use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, Window};
use yew::prelude::*;

use super::{settings_modal::SettingsModal, status_panel::StatusPanel};
use crate::config::{GameConfig, Speed};
use crate::error::UiError;
use crate::game_loop::{FrameLoop, LoopControl};
use crate::input::{self, Command};
use crate::render;
use crate::scene;
use crate::session::{GameSession, StartAction, StatusReport};
use crate::storage;
use crate::util::{now_ms, spawn_index};
use crate::world::{ExternalWorld, WorldSnapshot};

#[derive(Properties, PartialEq, Clone)]
pub struct GameViewProps {
    pub config: GameConfig,
    pub on_config: Callback<GameConfig>,
}

/// Handles shared by the listeners, the frame loop and the buttons.
#[derive(Clone)]
struct Shared {
    canvas_ref: NodeRef,
    session: Rc<RefCell<Option<GameSession<ExternalWorld>>>>,
    frame_loop: Rc<RefCell<Option<FrameLoop>>>,
    config: Rc<RefCell<GameConfig>>,
    report: UseStateHandle<StatusReport>,
    generation: UseStateHandle<u32>,
}

struct Listeners {
    window: Window,
    canvas: HtmlCanvasElement,
    keydown: Closure<dyn FnMut(KeyboardEvent)>,
    click: Closure<dyn FnMut(MouseEvent)>,
}

impl Listeners {
    fn detach(self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("keydown", self.keydown.as_ref().unchecked_ref());
        let _ = self
            .canvas
            .remove_event_listener_with_callback("click", self.click.as_ref().unchecked_ref());
    }
}

impl Shared {
    fn canvas(&self) -> Result<HtmlCanvasElement, UiError> {
        self.canvas_ref
            .cast::<HtmlCanvasElement>()
            .ok_or_else(|| UiError::Dom("canvas not mounted".into()))
    }

    fn paint(&self, snap: &WorldSnapshot, report: StatusReport) -> Result<(), UiError> {
        let ctx = render::context_2d(&self.canvas()?)?;
        let ops = scene::build(snap, &self.config.borrow());
        render::paint(&ctx, &ops)?;
        self.report.set(report);
        Ok(())
    }

    /// Repaints the current state without stepping.
    fn draw(&self) -> Result<(), UiError> {
        let current = match self.session.borrow().as_ref() {
            Some(s) => {
                let snap = s.snapshot()?;
                let report = s.report(&snap);
                Some((snap, report))
            }
            None => None,
        };
        match current {
            Some((snap, report)) => self.paint(&snap, report),
            None => Ok(()),
        }
    }

    fn frame(&self) -> LoopControl {
        match self.step_and_draw() {
            Ok(control) => control,
            Err(e) => {
                log::error!("frame skipped: {}", e);
                LoopControl::Continue
            }
        }
    }

    fn step_and_draw(&self) -> Result<LoopControl, UiError> {
        let (snap, report) = {
            let mut guard = self.session.borrow_mut();
            let Some(session) = guard.as_mut() else {
                return Ok(LoopControl::Stop);
            };
            let snap = session.advance()?;
            let report = session.report(&snap);
            (snap, report)
        };
        self.paint(&snap, report)?;
        let control = LoopControl::after(&snap);
        if control == LoopControl::Stop {
            storage::save_best(report.best);
        }
        Ok(control)
    }

    fn run_loop(&self) -> Result<(), UiError> {
        let window = web_sys::window().ok_or_else(|| UiError::Dom("no window".into()))?;
        let fps = self.config.borrow().fps;
        let shared = self.clone();
        let frame_loop = FrameLoop::start(&window, fps, move || shared.frame())?;
        *self.frame_loop.borrow_mut() = Some(frame_loop);
        Ok(())
    }

    fn command(&self, cmd: Command) {
        let result = match cmd {
            Command::Turn(direction) => match self.session.borrow().as_ref() {
                Some(s) => s.turn(direction),
                None => Ok(()),
            },
            Command::Start => self.start_or_replay(),
        };
        if let Err(e) = result {
            log::error!("{:?} failed: {}", cmd, e);
        }
    }

    fn start_or_replay(&self) -> Result<(), UiError> {
        let action = match self.session.borrow_mut().as_mut() {
            Some(s) => s.on_start()?,
            None => return Ok(()),
        };
        match action {
            StartAction::Started => {
                self.draw()?;
                self.run_loop()
            }
            StartAction::Replay => {
                self.generation.set(*self.generation + 1);
                Ok(())
            }
            StartAction::Ignored => Ok(()),
        }
    }

    fn reset_best(&self) {
        storage::remove_item(storage::BEST_KEY);
        if let Some(s) = self.session.borrow_mut().as_mut() {
            s.reset_best();
        }
        if let Err(e) = self.draw() {
            log::error!("redraw failed: {}", e);
        }
    }

    /// Builds a fresh world, paints its first frame and attaches input.
    fn mount(&self) -> Result<Listeners, UiError> {
        let window = web_sys::window().ok_or_else(|| UiError::Dom("no window".into()))?;
        let canvas = self.canvas()?;
        self.frame_loop.borrow_mut().take();
        self.session.borrow_mut().take();

        let cfg = self.config.borrow().clone();
        let world = ExternalWorld::new(cfg.world_width, spawn_index(now_ms(), cfg.world_width))?;
        let session = GameSession::new(world, storage::load_best());
        let width = session.snapshot()?.width;
        render::size_canvas(&canvas, width * cfg.cell_size);
        *self.session.borrow_mut() = Some(session);
        self.draw()?;

        let keydown = {
            let shared = self.clone();
            Closure::wrap(Box::new(move |e: KeyboardEvent| {
                let Some(cmd) = input::command_for_code(&e.code()) else {
                    return;
                };
                e.prevent_default();
                shared.command(cmd);
            }) as Box<dyn FnMut(_)>)
        };
        window.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;

        let click = {
            let shared = self.clone();
            Closure::wrap(Box::new(move |_e: MouseEvent| {
                shared.command(Command::Start);
            }) as Box<dyn FnMut(_)>)
        };
        canvas.add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;

        Ok(Listeners {
            window,
            canvas,
            keydown,
            click,
        })
    }
}

#[function_component(GameView)]
pub fn game_view(props: &GameViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let session = use_mut_ref(|| None::<GameSession<ExternalWorld>>);
    let frame_loop = use_mut_ref(|| None::<FrameLoop>);
    let config_ref = use_mut_ref(|| props.config.clone());
    let report = use_state_eq(StatusReport::default);
    let generation = use_state(|| 0u32);
    let show_settings = use_state(|| false);

    let shared = Shared {
        canvas_ref: canvas_ref.clone(),
        session,
        frame_loop: frame_loop.clone(),
        config: config_ref.clone(),
        report: report.clone(),
        generation: generation.clone(),
    };

    // Settings: apply to the running loop and repaint
    {
        let shared = shared.clone();
        use_effect_with(props.config.clone(), move |cfg| {
            *shared.config.borrow_mut() = cfg.clone();
            if let Some(frame_loop) = shared.frame_loop.borrow().as_ref() {
                frame_loop.set_fps(cfg.fps);
            }
            if let Err(e) = shared.draw() {
                log::error!("redraw failed: {}", e);
            }
            || ()
        });
    }

    // New world on mount, on replay and when the grid geometry changes
    {
        let shared = shared.clone();
        let deps = (*generation, props.config.world_width, props.config.cell_size);
        use_effect_with(deps, move |_| {
            let listeners = match shared.mount() {
                Ok(listeners) => Some(listeners),
                Err(e) => {
                    log::error!("game setup failed: {}", e);
                    None
                }
            };
            move || {
                if let Some(listeners) = listeners {
                    listeners.detach();
                }
                shared.frame_loop.borrow_mut().take();
            }
        });
    }

    let on_start = {
        let shared = shared.clone();
        Callback::from(move |_| shared.command(Command::Start))
    };
    let open_settings = {
        let show_settings = show_settings.clone();
        Callback::from(move |_| show_settings.set(true))
    };
    let close_settings = {
        let show_settings = show_settings.clone();
        Callback::from(move |_| show_settings.set(false))
    };
    let toggle_grid = {
        let cfg = props.config.clone();
        let on_config = props.on_config.clone();
        Callback::from(move |_| {
            on_config.emit(GameConfig {
                show_grid: !cfg.show_grid,
                ..cfg.clone()
            })
        })
    };
    let on_speed = {
        let cfg = props.config.clone();
        let on_config = props.on_config.clone();
        Callback::from(move |speed: Speed| {
            on_config.emit(GameConfig {
                fps: speed.fps(),
                ..cfg.clone()
            })
        })
    };
    let on_reset_best = {
        let shared = shared.clone();
        Callback::from(move |_| shared.reset_best())
    };

    html! {
        <div style="display:flex; flex-direction:column; align-items:center; gap:12px; padding:16px;">
            <StatusPanel report={*report} on_start={on_start} on_open_settings={open_settings} />
            <canvas ref={canvas_ref} style="border:1px solid #30363d; background:#ffffff; cursor:pointer;" />
            <div style="font-size:12px; opacity:0.7;">{"Arrow keys or WASD steer. Enter, Space or a click starts."}</div>
            <SettingsModal
                show={*show_settings}
                on_close={close_settings}
                show_grid={props.config.show_grid}
                on_toggle_grid={toggle_grid}
                speed={Speed::from_fps(props.config.fps)}
                on_speed={on_speed}
                on_reset_best={on_reset_best}
            />
        </div>
    }
}
