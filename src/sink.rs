use crate::constants::*;
use crate::core::{Palette, PaletteSink};
use crate::dom;
use web_sys as web;

/// Writes palette colors onto page chrome. Elements are looked up once;
/// any that are missing are simply skipped.
pub struct DomPaletteSink {
    header: Option<web::HtmlElement>,
    header_title: Option<web::HtmlElement>,
    hero: Option<web::HtmlElement>,
    hero_title: Option<web::HtmlElement>,
    footer: Option<web::HtmlElement>,
    notice: Option<web::HtmlElement>,
    nav_links: Vec<web::HtmlElement>,
}

impl DomPaletteSink {
    pub fn new(document: &web::Document) -> Self {
        let header: Option<web::HtmlElement> = dom::query_document(document, HEADER_SELECTOR);
        let hero: Option<web::HtmlElement> = dom::query_document(document, HERO_SELECTOR);
        Self {
            header_title: header
                .as_ref()
                .and_then(|h| dom::query(h, HEADER_TITLE_SELECTOR)),
            hero_title: hero.as_ref().and_then(|h| dom::query(h, HERO_TITLE_SELECTOR)),
            header,
            hero,
            footer: dom::query_document(document, FOOTER_SELECTOR),
            notice: dom::query_document(document, NOTICE_SELECTOR),
            nav_links: dom::query_all(document, NAV_LINK_SELECTOR),
        }
    }
}

impl PaletteSink for DomPaletteSink {
    fn reflect(&mut self, palette: &Palette) {
        let main = palette.main.css();
        if let Some(el) = &self.header {
            dom::set_style(el, "background", &palette.bg.css_alpha(HEADER_BG_ALPHA));
        }
        if let Some(el) = &self.header_title {
            dom::set_style(el, "color", &main);
        }
        if let Some(el) = &self.hero {
            dom::set_style(el, "background", &palette.hero_bg.css_alpha(HERO_BG_ALPHA));
        }
        if let Some(el) = &self.hero_title {
            dom::set_style(el, "color", &palette.glow.css());
        }
        if let Some(el) = &self.notice {
            dom::set_style(el, "border-color", &main);
        }
        if let Some(el) = &self.footer {
            dom::set_style(el, "background", &palette.footer_bg.css_alpha(FOOTER_BG_ALPHA));
        }
        for a in &self.nav_links {
            dom::set_style(a, "border-color", &main);
            dom::set_style(a, "color", &main);
        }
    }
}
