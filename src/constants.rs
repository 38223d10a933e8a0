//! Page contract for the theme engine: element ids, selectors and the alpha
//! used when reflecting palette colors onto page chrome.
//!
//! Every element except the canvas is optional.

// Canvas
pub const CANVAS_ID: &str = "bg";

// Theme controls
pub const THEME_SELECT_ID: &str = "themeSelect";
pub const CUSTOM_PANEL_ID: &str = "customPanel";
pub const SAVE_BUTTON_ID: &str = "saveCustom";
pub const RESET_BUTTON_ID: &str = "resetTheme";
pub const SAVED_MESSAGE: &str = "Custom theme saved!";

// Reflected page chrome
pub const HEADER_SELECTOR: &str = "header";
pub const HEADER_TITLE_SELECTOR: &str = "h1";
pub const HERO_SELECTOR: &str = ".hero";
pub const HERO_TITLE_SELECTOR: &str = "h2";
pub const FOOTER_SELECTOR: &str = "footer";
pub const NOTICE_SELECTOR: &str = ".notice";
pub const NAV_LINK_SELECTOR: &str = "nav a";

// Background opacity of reflected chrome
pub const HEADER_BG_ALPHA: f32 = 0.9;
pub const HERO_BG_ALPHA: f32 = 0.7;
pub const FOOTER_BG_ALPHA: f32 = 0.9;
