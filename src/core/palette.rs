use super::color::{ColorError, Rgb};
use serde::{Deserialize, Serialize};

/// The seven named colors a palette carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Main,
    Glow,
    Trail,
    Ambient,
    Bg,
    HeroBg,
    FooterBg,
}

impl Channel {
    pub const ALL: [Channel; 7] = [
        Channel::Main,
        Channel::Glow,
        Channel::Trail,
        Channel::Ambient,
        Channel::Bg,
        Channel::HeroBg,
        Channel::FooterBg,
    ];

    /// Key used in the persisted JSON object.
    pub fn key(self) -> &'static str {
        match self {
            Channel::Main => "main",
            Channel::Glow => "glow",
            Channel::Trail => "trail",
            Channel::Ambient => "ambient",
            Channel::Bg => "bg",
            Channel::HeroBg => "heroBg",
            Channel::FooterBg => "footerBg",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Id of the `<input type="color">` editing this channel.
    pub fn input_id(self) -> &'static str {
        match self {
            Channel::Main => "mainColor",
            Channel::Glow => "glowColor",
            Channel::Trail => "trailColor",
            Channel::Ambient => "ambientColor",
            Channel::Bg => "bgColor",
            Channel::HeroBg => "heroBgColor",
            Channel::FooterBg => "footerBgColor",
        }
    }
}

/// A full color scheme for the page and the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub main: Rgb,
    pub glow: Rgb,
    pub trail: Rgb,
    pub ambient: Rgb,
    pub bg: Rgb,
    pub hero_bg: Rgb,
    pub footer_bg: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Preset::default().palette()
    }
}

impl Palette {
    pub fn get(&self, channel: Channel) -> &Rgb {
        match channel {
            Channel::Main => &self.main,
            Channel::Glow => &self.glow,
            Channel::Trail => &self.trail,
            Channel::Ambient => &self.ambient,
            Channel::Bg => &self.bg,
            Channel::HeroBg => &self.hero_bg,
            Channel::FooterBg => &self.footer_bg,
        }
    }

    pub fn get_mut(&mut self, channel: Channel) -> &mut Rgb {
        match channel {
            Channel::Main => &mut self.main,
            Channel::Glow => &mut self.glow,
            Channel::Trail => &mut self.trail,
            Channel::Ambient => &mut self.ambient,
            Channel::Bg => &mut self.bg,
            Channel::HeroBg => &mut self.hero_bg,
            Channel::FooterBg => &mut self.footer_bg,
        }
    }

    /// Interpolate every channel toward `target` by `t`.
    pub fn lerp_toward(&mut self, target: &Palette, t: f32) {
        for ch in Channel::ALL {
            self.get_mut(ch).lerp_toward(target.get(ch), t);
        }
    }

    /// Largest per-channel distance across all seven colors.
    pub fn max_channel_delta(&self, other: &Palette) -> f32 {
        Channel::ALL
            .iter()
            .map(|ch| self.get(*ch).max_channel_delta(other.get(*ch)))
            .fold(0.0, f32::max)
    }

    pub fn validate(&self) -> Result<(), ColorError> {
        Channel::ALL.iter().try_for_each(|ch| self.get(*ch).validate())
    }

    /// Copy of `self` with the given channels replaced by parsed hex values.
    ///
    /// Fails without partial application if any value is not `#rrggbb`.
    pub fn with_hex_channels<'a>(
        &self,
        inputs: impl IntoIterator<Item = (Channel, &'a str)>,
    ) -> Result<Palette, ColorError> {
        let mut next = *self;
        for (ch, hex) in inputs {
            *next.get_mut(ch) = Rgb::from_hex(hex)?;
        }
        Ok(next)
    }
}

/// Built-in palettes selectable from the theme picker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Preset {
    #[default]
    Red,
    Navy,
    Green,
    Purple,
}

impl Preset {
    pub const ALL: [Preset; 4] = [Preset::Red, Preset::Navy, Preset::Green, Preset::Purple];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Red => "red",
            Preset::Navy => "navy",
            Preset::Green => "green",
            Preset::Purple => "purple",
        }
    }

    /// Exact, case-sensitive match on the picker value.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    pub fn palette(self) -> Palette {
        match self {
            Preset::Red => Palette {
                main: Rgb::new(255.0, 30.0, 30.0),
                glow: Rgb::new(255.0, 60.0, 60.0),
                trail: Rgb::new(255.0, 50.0, 50.0),
                ambient: Rgb::new(255.0, 50.0, 50.0),
                bg: Rgb::new(25.0, 0.0, 0.0),
                hero_bg: Rgb::new(25.0, 0.0, 0.0),
                footer_bg: Rgb::new(10.0, 0.0, 0.0),
            },
            Preset::Navy => Palette {
                main: Rgb::new(0.0, 51.0, 204.0),
                glow: Rgb::new(51.0, 102.0, 255.0),
                trail: Rgb::new(0.0, 50.0, 200.0),
                ambient: Rgb::new(0.0, 50.0, 200.0),
                bg: Rgb::new(0.0, 0.0, 25.0),
                hero_bg: Rgb::new(0.0, 0.0, 25.0),
                footer_bg: Rgb::new(0.0, 0.0, 25.0),
            },
            Preset::Green => Palette {
                main: Rgb::new(0.0, 255.0, 102.0),
                glow: Rgb::new(51.0, 255.0, 153.0),
                trail: Rgb::new(0.0, 255.0, 100.0),
                ambient: Rgb::new(0.0, 255.0, 100.0),
                bg: Rgb::new(0.0, 25.0, 0.0),
                hero_bg: Rgb::new(0.0, 25.0, 0.0),
                footer_bg: Rgb::new(0.0, 10.0, 0.0),
            },
            Preset::Purple => Palette {
                main: Rgb::new(204.0, 0.0, 255.0),
                glow: Rgb::new(255.0, 51.0, 255.0),
                trail: Rgb::new(204.0, 0.0, 255.0),
                ambient: Rgb::new(204.0, 0.0, 255.0),
                bg: Rgb::new(25.0, 0.0, 25.0),
                hero_bg: Rgb::new(25.0, 0.0, 25.0),
                footer_bg: Rgb::new(10.0, 0.0, 10.0),
            },
        }
    }
}

/// What the theme picker's current value refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeChoice {
    Preset(Preset),
    Custom,
}

impl ThemeChoice {
    pub const CUSTOM: &'static str = "custom";

    pub fn parse(value: &str) -> Option<Self> {
        if value == Self::CUSTOM {
            return Some(ThemeChoice::Custom);
        }
        Preset::from_name(value).map(ThemeChoice::Preset)
    }
}
