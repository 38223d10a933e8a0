use crate::canvas::CanvasPainter;
use crate::constants::CANVAS_ID;
use crate::core::{Channel, EngineConfig, LoadOutcome, PaletteStore, ThemeEngine, TickSource};
use crate::frame::{self, AnimationFrameTicks, FrameContext};
use crate::sink::DomPaletteSink;
use crate::storage::LocalStorage;
use crate::{dom, events, ui};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

struct ThemeRuntime {
    document: web::Document,
    engine: Rc<RefCell<ThemeEngine<LocalStorage>>>,
    ticks: AnimationFrameTicks,
}

thread_local! {
    static RUNTIME: RefCell<Option<ThemeRuntime>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();

    // The same module is loaded by the service worker, which has no window.
    let Some(window) = web::window() else {
        log::info!("site-web loaded in worker context");
        return Ok(());
    };
    log::info!("site-web starting");
    match boot_theme(&window) {
        Ok(Some(runtime)) => RUNTIME.with(|r| *r.borrow_mut() = Some(runtime)),
        Ok(None) => {}
        Err(e) => log::error!("theme init error: {:?}", e),
    }
    Ok(())
}

fn boot_theme(window: &web::Window) -> anyhow::Result<Option<ThemeRuntime>> {
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let Some(canvas) = dom::element_by_id::<web::HtmlCanvasElement>(&document, CANVAS_ID) else {
        log::warn!("canvas not found; the theme needs <canvas id=\"{}\">", CANVAS_ID);
        return Ok(None);
    };
    let Some(painter) = CanvasPainter::for_canvas(&canvas) else {
        log::warn!("2D context unavailable on #{}; theme disabled", CANVAS_ID);
        return Ok(None);
    };
    let (w, h) = dom::sync_canvas_to_viewport(&canvas);

    let mut store = PaletteStore::new(LocalStorage::open(window));
    let outcome = store.load();

    let config = EngineConfig {
        seed: (js_sys::Math::random() * u32::MAX as f64) as u64,
        ..EngineConfig::default()
    };
    let mut engine = ThemeEngine::new(config, store, Vec2::new(w as f32, h as f32));
    engine.start();
    let engine = Rc::new(RefCell::new(engine));

    if outcome == LoadOutcome::Restored {
        ui::show_custom(&document, engine.borrow().store().target());
    }

    events::wire_resize(window, canvas.clone(), engine.clone());
    events::wire_pointer(window, engine.clone());
    ui::wire_theme_controls(&document, engine.clone());

    let frame_ctx = Rc::new(RefCell::new(FrameContext {
        engine: engine.clone(),
        painter,
        sink: DomPaletteSink::new(&document),
    }));
    let mut ticks = AnimationFrameTicks::new();
    frame::start_loop(frame_ctx, &mut ticks);

    Ok(Some(ThemeRuntime {
        document,
        engine,
        ticks,
    }))
}

fn with_runtime<T>(f: impl FnOnce(&mut ThemeRuntime) -> T) -> Option<T> {
    RUNTIME.with(|r| r.borrow_mut().as_mut().map(f))
}

/// Switch to a built-in preset by name. Unknown names change nothing.
#[wasm_bindgen]
pub fn set_theme(name: &str) -> bool {
    with_runtime(|rt| {
        let applied = rt.engine.borrow_mut().store_mut().set_palette(name);
        match applied {
            Ok(preset) => {
                ui::set_select_value(&rt.document, preset.name());
                true
            }
            Err(e) => {
                log::warn!("set_theme: {}", e);
                false
            }
        }
    })
    .unwrap_or(false)
}

/// Live view of the palette currently on screen. Every read reflects the
/// latest frame; reads return `undefined` once the page has no theme.
#[wasm_bindgen]
pub struct CurrentColors {}

fn current_channel(channel: Channel) -> JsValue {
    RUNTIME
        .with(|r| {
            let runtime = r.borrow();
            let rt = runtime.as_ref()?;
            let rgb = *rt.engine.borrow().store().current().get(channel);
            Some(rgb)
        })
        .map(|rgb| {
            rgb.0
                .iter()
                .map(|c| JsValue::from_f64(*c as f64))
                .collect::<js_sys::Array>()
                .into()
        })
        .unwrap_or(JsValue::UNDEFINED)
}

#[wasm_bindgen]
impl CurrentColors {
    /// `[r, g, b]` for a channel key such as `main` or `heroBg`.
    pub fn get(&self, channel: &str) -> JsValue {
        Channel::from_key(channel)
            .map(current_channel)
            .unwrap_or(JsValue::UNDEFINED)
    }

    #[wasm_bindgen(getter)]
    pub fn main(&self) -> JsValue {
        current_channel(Channel::Main)
    }

    #[wasm_bindgen(getter)]
    pub fn glow(&self) -> JsValue {
        current_channel(Channel::Glow)
    }

    #[wasm_bindgen(getter)]
    pub fn trail(&self) -> JsValue {
        current_channel(Channel::Trail)
    }

    #[wasm_bindgen(getter)]
    pub fn ambient(&self) -> JsValue {
        current_channel(Channel::Ambient)
    }

    #[wasm_bindgen(getter)]
    pub fn bg(&self) -> JsValue {
        current_channel(Channel::Bg)
    }

    #[wasm_bindgen(getter = heroBg)]
    pub fn hero_bg(&self) -> JsValue {
        current_channel(Channel::HeroBg)
    }

    #[wasm_bindgen(getter = footerBg)]
    pub fn footer_bg(&self) -> JsValue {
        current_channel(Channel::FooterBg)
    }
}

#[wasm_bindgen]
pub fn get_current_colors() -> CurrentColors {
    CurrentColors {}
}

#[wasm_bindgen]
pub fn reset_theme() {
    with_runtime(|rt| ui::reset(&rt.document, &rt.engine));
}

/// Stop the animation loop for good. Input listeners stay attached but no
/// further frames are drawn.
#[wasm_bindgen]
pub fn dispose_theme() {
    with_runtime(|rt| {
        rt.engine.borrow_mut().dispose();
        rt.ticks.stop();
    });
}
