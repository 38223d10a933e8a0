use crate::core::{ThemeEngine, ThemeStorage};
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Track the pointer in viewport coordinates; the canvas fills the viewport.
pub fn wire_pointer<S: ThemeStorage + 'static>(
    window: &web::Window,
    engine: Rc<RefCell<ThemeEngine<S>>>,
) {
    dom::add_listener(window, "mousemove", move |ev| {
        if let Some(ev) = ev.dyn_ref::<web::MouseEvent>() {
            engine
                .borrow_mut()
                .pointer_moved(ev.client_x() as f32, ev.client_y() as f32);
        }
    });
}

/// Keep the canvas backing store and the engine bounds at viewport size.
pub fn wire_resize<S: ThemeStorage + 'static>(
    window: &web::Window,
    canvas: web::HtmlCanvasElement,
    engine: Rc<RefCell<ThemeEngine<S>>>,
) {
    dom::add_listener(window, "resize", move |_| {
        let (w, h) = dom::sync_canvas_to_viewport(&canvas);
        engine.borrow_mut().resize(w as f32, h as f32);
    });
}
