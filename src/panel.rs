use crate::constants::CUSTOM_PANEL_ID;
use crate::dom;
use web_sys as web;

#[inline]
pub fn show(document: &web::Document) {
    if let Some(el) = dom::element_by_id::<web::HtmlElement>(document, CUSTOM_PANEL_ID) {
        dom::set_style(&el, "display", "block");
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = dom::element_by_id::<web::HtmlElement>(document, CUSTOM_PANEL_ID) {
        dom::set_style(&el, "display", "none");
    }
}
