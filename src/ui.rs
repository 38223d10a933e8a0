//! Binds the theme picker, the seven color inputs and the save/reset buttons
//! to the engine's palette store. Every control is optional.

use crate::constants::*;
use crate::core::{Channel, Palette, Preset, ThemeChoice, ThemeEngine, ThemeStorage};
use crate::dom;
use crate::panel;
use crate::sink::DomPaletteSink;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

type SharedEngine<S> = Rc<RefCell<ThemeEngine<S>>>;

fn theme_select(document: &web::Document) -> Option<web::HtmlSelectElement> {
    dom::element_by_id(document, THEME_SELECT_ID)
}

fn channel_input(document: &web::Document, channel: Channel) -> Option<web::HtmlInputElement> {
    dom::element_by_id(document, channel.input_id())
}

pub fn set_select_value(document: &web::Document, value: &str) {
    if let Some(select) = theme_select(document) {
        select.set_value(value);
    }
}

/// Show a restored custom palette in the controls.
pub fn show_custom(document: &web::Document, palette: &Palette) {
    set_select_value(document, ThemeChoice::CUSTOM);
    panel::show(document);
    for ch in Channel::ALL {
        if let Some(input) = channel_input(document, ch) {
            input.set_value(&palette.get(ch).to_hex());
        }
    }
}

/// Reset to the default preset and repaint page chrome right away.
pub fn reset<S: ThemeStorage>(document: &web::Document, engine: &SharedEngine<S>) {
    let mut eng = engine.borrow_mut();
    if let Err(e) = eng.store_mut().reset() {
        log::warn!("[ui] reset: {}", e);
    }
    set_select_value(document, Preset::default().name());
    panel::hide(document);
    eng.reflect(&mut DomPaletteSink::new(document));
}

pub fn wire_theme_controls<S: ThemeStorage + 'static>(
    document: &web::Document,
    engine: SharedEngine<S>,
) {
    wire_select(document, engine.clone());
    wire_channel_inputs(document, engine.clone());
    wire_buttons(document, engine);
}

fn wire_select<S: ThemeStorage + 'static>(document: &web::Document, engine: SharedEngine<S>) {
    let Some(select) = theme_select(document) else {
        return;
    };
    let doc = document.clone();
    let select_for_change = select.clone();
    dom::add_listener(&select, "change", move |_| {
        let value = select_for_change.value();
        match ThemeChoice::parse(&value) {
            Some(ThemeChoice::Custom) => panel::show(&doc),
            Some(ThemeChoice::Preset(preset)) => {
                panel::hide(&doc);
                if let Err(e) = engine.borrow_mut().store_mut().set_preset(preset) {
                    log::warn!("[ui] preset {}: {}", preset.name(), e);
                }
            }
            None => {
                panel::hide(&doc);
                log::warn!("[ui] unknown theme {:?}", value);
            }
        }
    });
}

fn wire_channel_inputs<S: ThemeStorage + 'static>(
    document: &web::Document,
    engine: SharedEngine<S>,
) {
    for ch in Channel::ALL {
        let Some(input) = channel_input(document, ch) else {
            continue;
        };
        let doc = document.clone();
        let engine = engine.clone();
        dom::add_listener(&input, "input", move |_| {
            // Re-read every input, not just the one that changed.
            let values: Vec<(Channel, String)> = Channel::ALL
                .iter()
                .filter_map(|c| channel_input(&doc, *c).map(|i| (*c, i.value())))
                .collect();
            let inputs = values.iter().map(|(c, v)| (*c, v.as_str()));
            if let Err(e) = engine.borrow_mut().store_mut().apply_channel_inputs(inputs) {
                log::warn!("[ui] ignoring custom colors: {}", e);
            }
        });
    }
}

fn wire_buttons<S: ThemeStorage + 'static>(document: &web::Document, engine: SharedEngine<S>) {
    let engine_save = engine.clone();
    dom::add_click_listener(document, SAVE_BUTTON_ID, move || {
        let saved = engine_save.borrow_mut().store_mut().save();
        match saved {
            Ok(()) => {
                if let Some(w) = web::window() {
                    _ = w.alert_with_message(SAVED_MESSAGE);
                }
            }
            Err(e) => log::error!("[ui] save failed: {}", e),
        }
    });

    let doc = document.clone();
    dom::add_click_listener(document, RESET_BUTTON_ID, move || reset(&doc, &engine));
}
