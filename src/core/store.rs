//! Current/target palette pair with durable persistence of the custom choice.
//!
//! The store never touches the browser directly: persistence goes through
//! [`ThemeStorage`], which the web layer implements on top of `localStorage`
//! and tests implement with [`MemoryStorage`].

use super::color::ColorError;
use super::palette::{Channel, Palette, Preset};
use fnv::FnvHashMap;
use thiserror::Error;

/// Key under which the custom palette is persisted.
pub const STORAGE_KEY: &str = "AXYTheme";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unknown preset {0:?}")]
    UnknownPreset(String),

    #[error("storage unavailable: {0}")]
    Storage(String),

    #[error("failed to serialize palette: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Color(#[from] ColorError),
}

/// String key/value persistence, shaped like the Web Storage API.
pub trait ThemeStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-process storage used off the browser.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: FnvHashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ThemeStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Result of [`PaletteStore::load`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing usable was persisted; the default preset stays active.
    Default,
    /// A saved custom palette was restored into both current and target.
    Restored,
}

/// Holds the rendered (`current`) and goal (`target`) palettes.
pub struct PaletteStore<S: ThemeStorage> {
    storage: S,
    current: Palette,
    target: Palette,
}

impl<S: ThemeStorage> PaletteStore<S> {
    /// Both palettes start at the default preset; call [`load`](Self::load) to restore.
    pub fn new(storage: S) -> Self {
        let default = Preset::default().palette();
        Self {
            storage,
            current: default,
            target: default,
        }
    }

    pub fn current(&self) -> &Palette {
        &self.current
    }

    pub fn target(&self) -> &Palette {
        &self.target
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Restore a persisted custom palette, snapping current to it.
    ///
    /// Malformed or out-of-range data is logged and ignored.
    pub fn load(&mut self) -> LoadOutcome {
        let raw = match self.storage.read(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return LoadOutcome::Default,
            Err(e) => {
                log::warn!("[theme] could not read saved theme: {}", e);
                return LoadOutcome::Default;
            }
        };
        match decode(&raw) {
            Ok(palette) => {
                self.current = palette;
                self.target = palette;
                log::info!("[theme] restored saved custom palette");
                LoadOutcome::Restored
            }
            Err(e) => {
                log::warn!("[theme] failed to parse saved theme: {}", e);
                LoadOutcome::Default
            }
        }
    }

    /// Snap the target to a named preset and forget any saved custom palette.
    ///
    /// Unknown names change nothing.
    pub fn set_palette(&mut self, name: &str) -> Result<Preset, StoreError> {
        let preset =
            Preset::from_name(name).ok_or_else(|| StoreError::UnknownPreset(name.to_string()))?;
        self.set_preset(preset)?;
        Ok(preset)
    }

    pub fn set_preset(&mut self, preset: Preset) -> Result<(), StoreError> {
        self.target = preset.palette();
        log::debug!("[theme] target -> preset {}", preset.name());
        self.storage.remove(STORAGE_KEY)
    }

    /// Replace the target without persisting it.
    pub fn set_custom_palette(&mut self, palette: Palette) {
        self.target = palette;
    }

    /// Rebuild the custom target from channel inputs.
    ///
    /// Channels absent from `inputs` keep their current target value. A single
    /// invalid value rejects the whole update.
    pub fn apply_channel_inputs<'a>(
        &mut self,
        inputs: impl IntoIterator<Item = (Channel, &'a str)>,
    ) -> Result<(), StoreError> {
        let next = self.target.with_hex_channels(inputs)?;
        self.set_custom_palette(next);
        Ok(())
    }

    /// Persist the target palette as the user's custom choice.
    pub fn save(&mut self) -> Result<(), StoreError> {
        let json = serde_json::to_string(&self.target)?;
        self.storage.write(STORAGE_KEY, &json)
    }

    /// Forget the saved palette and snap both palettes to the default preset.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        let default = Preset::default().palette();
        self.target = default;
        self.current = default;
        self.storage.remove(STORAGE_KEY)
    }

    /// Move current a fraction `rate` of the way toward target.
    #[inline]
    pub fn step(&mut self, rate: f32) {
        self.current.lerp_toward(&self.target, rate);
    }
}

fn decode(raw: &str) -> Result<Palette, StoreError> {
    let palette: Palette = serde_json::from_str(raw)?;
    palette.validate()?;
    Ok(palette)
}
