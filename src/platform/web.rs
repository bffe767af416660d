//! Browser glue: requestAnimationFrame scheduling, scoped event listeners
//! and a DOM presenter.
//!
//! Every registration here is owned by a value whose `Drop` undoes it, so
//! tearing the game down can never leave a callback pointing at freed state.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, Window};

use crate::config::GameConfig;
use crate::controller::FrameScheduler;
use crate::error::SchedulerError;
use crate::sim::{GamePhase, GameState};

/// An event listener that is removed when the guard is dropped
pub struct EventListenerGuard {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl EventListenerGuard {
    pub fn attach<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for EventListenerGuard {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
        log::debug!("Removed `{}` listener", self.event);
    }
}

/// `requestAnimationFrame` around one long-lived callback
pub struct AnimationFrameScheduler {
    window: Window,
    callback: Closure<dyn FnMut(f64)>,
}

impl AnimationFrameScheduler {
    pub fn new<F>(window: Window, on_frame: F) -> Self
    where
        F: FnMut(f64) + 'static,
    {
        Self {
            window,
            callback: Closure::<dyn FnMut(f64)>::new(on_frame),
        }
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    type Handle = i32;

    fn request_tick(&mut self) -> Result<i32, SchedulerError> {
        self.window
            .request_animation_frame(self.callback.as_ref().unchecked_ref())
            .map_err(|e| SchedulerError(format!("{:?}", e)))
    }

    fn cancel_tick(&mut self, handle: i32) {
        let _ = self.window.cancel_animation_frame(handle);
    }
}

/// Positions DOM elements and writes HUD text from a state snapshot.
///
/// Expected elements: `#playfield`, `#actor`, `#score`, `#high-score`,
/// `#overlay`, `#overlay-title`, `#start-btn`.
pub struct DomPresenter {
    document: Document,
    playfield: Option<Element>,
    actor: Option<HtmlElement>,
    /// One element per live obstacle, in spawn order
    obstacles: Vec<(u32, HtmlElement)>,
}

impl DomPresenter {
    pub fn new(document: Document) -> Self {
        let playfield = document.get_element_by_id("playfield");
        let actor = document
            .get_element_by_id("actor")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        if playfield.is_none() || actor.is_none() {
            log::warn!("Playfield markup missing - rendering HUD only");
        }
        Self {
            document,
            playfield,
            actor,
            obstacles: Vec::new(),
        }
    }

    pub fn present(&mut self, state: &GameState, config: &GameConfig) {
        self.set_text("score", &state.display_score(config).to_string());
        self.set_text("high-score", &state.display_high_score(config).to_string());

        // Start / game over overlay
        if let Some(overlay) = self.document.get_element_by_id("overlay") {
            let _ = if state.phase == GamePhase::Playing {
                overlay.class_list().add_1("hidden")
            } else {
                overlay.class_list().remove_1("hidden")
            };
        }
        let (title, button) = match state.phase {
            GamePhase::NotStarted => ("", "Start Game"),
            GamePhase::Playing => ("", ""),
            GamePhase::GameOver => ("Game Over", "Restart"),
        };
        if state.phase.is_paused() {
            self.set_text("overlay-title", title);
            self.set_text("start-btn", button);
        }

        if let Some(actor) = &self.actor {
            let style = actor.style();
            let _ = style.set_property("left", &format!("{}px", config.actor_x));
            let _ = style.set_property("bottom", &format!("{}px", config.ground_y() - state.actor.y));
        }

        self.sync_obstacles(state);
    }

    fn sync_obstacles(&mut self, state: &GameState) {
        let Some(playfield) = &self.playfield else {
            return;
        };

        // Retire elements whose obstacle is gone
        self.obstacles.retain(|(id, el)| {
            let live = state.obstacles.iter().any(|o| o.id == *id);
            if !live {
                el.remove();
            }
            live
        });

        for obstacle in &state.obstacles {
            let existing = self
                .obstacles
                .iter()
                .find(|(id, _)| *id == obstacle.id)
                .map(|(_, el)| el.clone());
            let el = match existing {
                Some(el) => el,
                None => {
                    let Some(el) = self
                        .document
                        .create_element("div")
                        .ok()
                        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                    else {
                        continue;
                    };
                    el.set_class_name("obstacle");
                    let _ = playfield.append_child(&el);
                    self.obstacles.push((obstacle.id, el.clone()));
                    el
                }
            };
            let style = el.style();
            let _ = style.set_property("left", &format!("{}px", obstacle.x));
            let _ = style.set_property("bottom", "0px");
        }
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }
}

impl Drop for DomPresenter {
    fn drop(&mut self) {
        for (_, el) in self.obstacles.drain(..) {
            el.remove();
        }
    }
}
