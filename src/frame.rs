use crate::canvas::CanvasPainter;
use crate::core::{ThemeEngine, ThemeStorage, TickFn, TickSource};
use crate::sink::DomPaletteSink;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Everything one display frame touches.
pub struct FrameContext<S: ThemeStorage> {
    pub engine: Rc<RefCell<ThemeEngine<S>>>,
    pub painter: CanvasPainter,
    pub sink: DomPaletteSink,
}

impl<S: ThemeStorage> FrameContext<S> {
    pub fn frame(&mut self) -> bool {
        self.engine
            .borrow_mut()
            .frame(&mut self.painter, &mut self.sink)
    }
}

/// `requestAnimationFrame`-driven tick source.
///
/// Each tick reschedules itself while the callback returns `true`; `stop`
/// cancels the pending frame and releases the callback.
#[derive(Default)]
pub struct AnimationFrameTicks {
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    pending: Rc<Cell<Option<i32>>>,
}

impl AnimationFrameTicks {
    pub fn new() -> Self {
        Self::default()
    }
}

fn request_frame(
    tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    pending: &Rc<Cell<Option<i32>>>,
) {
    let Some(w) = web::window() else {
        return;
    };
    let handle = match tick.borrow().as_ref() {
        Some(cb) => w.request_animation_frame(cb.as_ref().unchecked_ref()).ok(),
        None => None,
    };
    pending.set(handle);
}

impl TickSource for AnimationFrameTicks {
    fn start(&mut self, mut on_tick: TickFn) {
        self.stop();
        let tick_clone = self.tick.clone();
        let pending = self.pending.clone();
        *self.tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            pending.set(None);
            if on_tick() {
                request_frame(&tick_clone, &pending);
            } else {
                log::info!("[frame] loop finished");
            }
        }) as Box<dyn FnMut()>));
        request_frame(&self.tick, &self.pending);
    }

    fn stop(&mut self) {
        if let (Some(handle), Some(w)) = (self.pending.take(), web::window()) {
            _ = w.cancel_animation_frame(handle);
        }
        // stop() may be reached from inside the running tick; never free a closure mid-call.
        if let Some(cb) = self.tick.borrow_mut().take() {
            cb.forget();
        }
    }

    fn is_active(&self) -> bool {
        self.pending.get().is_some()
    }
}

/// Drive `frame_ctx` from `ticks` until the engine stops running.
pub fn start_loop<S: ThemeStorage + 'static>(
    frame_ctx: Rc<RefCell<FrameContext<S>>>,
    ticks: &mut impl TickSource,
) {
    ticks.start(Box::new(move || frame_ctx.borrow_mut().frame()));
}
