//! Fixed-rate redraw loop: a timer of `1000 / fps` ms, then an animation
//! frame that runs the frame callback and schedules the next timer.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Window;

use crate::error::UiError;
use crate::world::WorldSnapshot;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

impl LoopControl {
    /// A finished game is not rescheduled.
    pub fn after(snap: &WorldSnapshot) -> Self {
        if snap.is_terminal() {
            LoopControl::Stop
        } else {
            LoopControl::Continue
        }
    }
}

pub fn frame_delay_ms(fps: u32) -> i32 {
    (1000 / fps.max(1)) as i32
}

type Slot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

pub struct FrameLoop {
    window: Window,
    running: Rc<Cell<bool>>,
    fps: Rc<Cell<u32>>,
    timeout_id: Rc<Cell<Option<i32>>>,
    raf_id: Rc<Cell<Option<i32>>>,
    frame: Slot,
    wait: Slot,
}

fn schedule(
    window: &Window,
    slot: &Slot,
    delay_ms: i32,
    timeout_id: &Cell<Option<i32>>,
) -> Result<(), UiError> {
    if let Some(cb) = slot.borrow().as_ref() {
        let id = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), delay_ms)?;
        timeout_id.set(Some(id));
    }
    Ok(())
}

impl FrameLoop {
    pub fn start<F>(window: &Window, fps: u32, mut on_frame: F) -> Result<Self, UiError>
    where
        F: FnMut() -> LoopControl + 'static,
    {
        let running = Rc::new(Cell::new(true));
        let fps = Rc::new(Cell::new(fps));
        let timeout_id = Rc::new(Cell::new(None));
        let raf_id = Rc::new(Cell::new(None));
        let frame: Slot = Rc::new(RefCell::new(None));
        let wait: Slot = Rc::new(RefCell::new(None));

        *wait.borrow_mut() = Some(Closure::wrap(Box::new({
            let window = window.clone();
            let running = running.clone();
            let timeout_id = timeout_id.clone();
            let raf_id = raf_id.clone();
            let frame = frame.clone();
            move || {
                timeout_id.set(None);
                if !running.get() {
                    return;
                }
                if let Some(cb) = frame.borrow().as_ref() {
                    match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                        Ok(id) => raf_id.set(Some(id)),
                        Err(e) => {
                            log::error!("animation frame not scheduled: {}", UiError::from(e));
                            running.set(false);
                        }
                    }
                }
            }
        }) as Box<dyn FnMut()>));

        *frame.borrow_mut() = Some(Closure::wrap(Box::new({
            let window = window.clone();
            let running = running.clone();
            let fps = fps.clone();
            let timeout_id = timeout_id.clone();
            let raf_id = raf_id.clone();
            let wait = wait.clone();
            move || {
                raf_id.set(None);
                if !running.get() {
                    return;
                }
                if on_frame() == LoopControl::Stop {
                    log::debug!("frame loop stopped");
                    running.set(false);
                    return;
                }
                if let Err(e) = schedule(&window, &wait, frame_delay_ms(fps.get()), &timeout_id) {
                    log::error!("next frame not scheduled: {}", e);
                    running.set(false);
                }
            }
        }) as Box<dyn FnMut()>));

        schedule(window, &wait, frame_delay_ms(fps.get()), &timeout_id)?;
        Ok(Self {
            window: window.clone(),
            running,
            fps,
            timeout_id,
            raf_id,
            frame,
            wait,
        })
    }

    /// Takes effect from the next scheduled frame.
    pub fn set_fps(&self, fps: u32) {
        self.fps.set(fps);
    }

    pub fn stop(&self) {
        self.running.set(false);
        if let Some(id) = self.timeout_id.take() {
            self.window.clear_timeout_with_handle(id);
        }
        if let Some(id) = self.raf_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
        // The two closures hold each other's slot.
        self.frame.borrow_mut().take();
        self.wait.borrow_mut().take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::GameStatus;

    #[test]
    fn delay_is_one_second_over_fps() {
        assert_eq!(frame_delay_ms(10), 100);
        assert_eq!(frame_delay_ms(3), 333);
        assert_eq!(frame_delay_ms(0), 1000);
    }

    #[test]
    fn stops_once_status_is_terminal() {
        let mut snap = WorldSnapshot::default();
        assert_eq!(LoopControl::after(&snap), LoopControl::Continue);
        snap.status = Some(GameStatus::Played);
        assert_eq!(LoopControl::after(&snap), LoopControl::Continue);
        snap.status = Some(GameStatus::Won);
        assert_eq!(LoopControl::after(&snap), LoopControl::Stop);
        snap.status = Some(GameStatus::Lost);
        assert_eq!(LoopControl::after(&snap), LoopControl::Stop);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_futures::JsFuture;
    use wasm_bindgen_test::wasm_bindgen_test;

    async fn sleep_ms(ms: i32) {
        let promise = js_sys::Promise::new(&mut |resolve, _| {
            web_sys::window()
                .unwrap()
                .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
                .unwrap();
        });
        JsFuture::from(promise).await.unwrap();
    }

    fn counting_loop(fps: u32) -> (FrameLoop, Rc<Cell<u32>>) {
        let window = web_sys::window().unwrap();
        let frames = Rc::new(Cell::new(0));
        let counter = frames.clone();
        let frame_loop = FrameLoop::start(&window, fps, move || {
            counter.set(counter.get() + 1);
            LoopControl::Continue
        })
        .unwrap();
        (frame_loop, frames)
    }

    #[wasm_bindgen_test]
    async fn stop_cancels_pending_frame() {
        let (frame_loop, frames) = counting_loop(60);
        frame_loop.stop();
        sleep_ms(200).await;
        assert_eq!(frames.get(), 0);
    }

    #[wasm_bindgen_test]
    async fn drop_cancels_pending_frame() {
        let (frame_loop, frames) = counting_loop(60);
        drop(frame_loop);
        sleep_ms(200).await;
        assert_eq!(frames.get(), 0);
    }

    #[wasm_bindgen_test]
    async fn no_frames_after_stop() {
        let (frame_loop, frames) = counting_loop(60);
        sleep_ms(150).await;
        frame_loop.stop();
        let seen = frames.get();
        sleep_ms(200).await;
        assert_eq!(frames.get(), seen);
    }
}
