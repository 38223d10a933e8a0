// Host-side tests for the palette store and its persistence.

use site_web::core::*;

fn store() -> PaletteStore<MemoryStorage> {
    PaletteStore::new(MemoryStorage::new())
}

#[test]
fn interpolation_converges_for_every_preset_pair() {
    for from in Preset::ALL {
        for to in Preset::ALL {
            let mut s = store();
            s.set_custom_palette(from.palette());
            for _ in 0..200 {
                s.step(constants::PALETTE_LERP_RATE);
            }
            s.set_custom_palette(to.palette());
            for _ in 0..200 {
                s.step(constants::PALETTE_LERP_RATE);
            }
            let delta = s.current().max_channel_delta(s.target());
            assert!(delta < 0.01, "{:?} -> {:?} still {} away", from, to, delta);
        }
    }
}

#[test]
fn interpolation_stays_within_channel_range() {
    let mut s = store();
    s.set_custom_palette(Preset::Green.palette());
    for _ in 0..50 {
        s.step(constants::PALETTE_LERP_RATE);
        assert!(s.current().validate().is_ok());
    }
}

#[test]
fn interpolation_is_exponential_not_instant() {
    let mut s = store();
    s.set_preset(Preset::Navy).unwrap();
    s.step(0.08);
    let main = s.current().main.0;
    // red main (255,30,30) toward navy main (0,51,204)
    assert!((main[0] - (255.0 - 255.0 * 0.08)).abs() < 1e-3);
    assert!((main[2] - (30.0 + 174.0 * 0.08)).abs() < 1e-3);
    assert_ne!(s.current(), s.target());
}

#[test]
fn reset_restores_first_preset_and_clears_storage() {
    let mut s = store();
    s.set_custom_palette(Preset::Purple.palette());
    s.save().unwrap();
    for _ in 0..10 {
        s.step(0.08);
    }
    s.reset().unwrap();
    assert_eq!(*s.current(), Preset::Red.palette());
    assert_eq!(*s.target(), Preset::Red.palette());
    assert_eq!(s.storage().read(STORAGE_KEY).unwrap(), None);
}

#[test]
fn unknown_preset_name_is_a_no_op() {
    let mut s = store();
    s.set_custom_palette(Preset::Green.palette());
    s.save().unwrap();
    let before = *s.target();
    let result = s.set_palette("teal");
    assert!(matches!(result, Err(StoreError::UnknownPreset(ref n)) if n == "teal"));
    assert_eq!(*s.target(), before);
    assert!(s.storage().read(STORAGE_KEY).unwrap().is_some());
}

#[test]
fn known_preset_sets_target_and_clears_custom_choice() {
    let mut s = store();
    s.set_custom_palette(Preset::Green.palette());
    s.save().unwrap();
    assert_eq!(s.set_palette("navy").unwrap(), Preset::Navy);
    assert_eq!(*s.target(), Preset::Navy.palette());
    // current only moves on step()
    assert_eq!(*s.current(), Preset::Red.palette());
    assert_eq!(s.storage().read(STORAGE_KEY).unwrap(), None);
}

#[test]
fn preset_names_are_case_sensitive() {
    assert_eq!(Preset::from_name("Red"), None);
    assert_eq!(Preset::from_name("red"), Some(Preset::Red));
    assert_eq!(ThemeChoice::parse("custom"), Some(ThemeChoice::Custom));
    assert_eq!(ThemeChoice::parse("purple"), Some(ThemeChoice::Preset(Preset::Purple)));
    assert_eq!(ThemeChoice::parse(""), None);
}

#[test]
fn save_then_reload_round_trips_through_hex_inputs() {
    let inputs = [
        (Channel::Main, "#12ab34"),
        (Channel::Glow, "#ffffff"),
        (Channel::Trail, "#000000"),
        (Channel::Ambient, "#7f7f80"),
        (Channel::Bg, "#010203"),
        (Channel::HeroBg, "#0a0b0c"),
        (Channel::FooterBg, "#fe00ef"),
    ];
    let mut s = store();
    s.apply_channel_inputs(inputs).unwrap();
    s.save().unwrap();
    let saved = *s.target();

    let mut reloaded = PaletteStore::new(s.storage().clone());
    assert_eq!(reloaded.load(), LoadOutcome::Restored);
    assert_eq!(*reloaded.target(), saved);
    // restored palettes are applied without interpolation
    assert_eq!(*reloaded.current(), saved);
    for (ch, hex) in inputs {
        assert_eq!(reloaded.target().get(ch).to_hex(), hex);
    }
}

#[test]
fn persisted_format_uses_camel_case_channel_arrays() {
    let mut s = store();
    s.save().unwrap();
    let raw = s.storage().read(STORAGE_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    for ch in Channel::ALL {
        let arr = value[ch.key()].as_array().expect("channel array");
        assert_eq!(arr.len(), 3);
    }
    assert_eq!(value["footerBg"][0].as_f64(), Some(10.0));
}

#[test]
fn persisted_channels_are_integers() {
    let mut s = store();
    s.save().unwrap();
    let raw = s.storage().read(STORAGE_KEY).unwrap().unwrap();
    assert!(raw.starts_with(r#"{"main":[255,30,30],"#), "{raw}");
    assert!(!raw.contains('.'), "{raw}");
}

#[test]
fn channels_resolve_from_their_json_keys() {
    for ch in Channel::ALL {
        assert_eq!(Channel::from_key(ch.key()), Some(ch));
    }
    assert_eq!(Channel::from_key("hero_bg"), None);
}

#[test]
fn load_accepts_integer_json_written_by_older_pages() {
    let mut storage = MemoryStorage::new();
    storage
        .write(
            STORAGE_KEY,
            r#"{"main":[1,2,3],"glow":[4,5,6],"trail":[7,8,9],"ambient":[10,11,12],
               "bg":[13,14,15],"heroBg":[16,17,18],"footerBg":[19,20,21]}"#,
        )
        .unwrap();
    let mut s = PaletteStore::new(storage);
    assert_eq!(s.load(), LoadOutcome::Restored);
    assert_eq!(s.current().hero_bg, Rgb::new(16.0, 17.0, 18.0));
}

#[test]
fn malformed_saved_theme_falls_back_to_default() {
    for raw in [
        "not json",
        r#"{"main":[1,2,3]}"#,
        r#"{"main":[999,0,0],"glow":[0,0,0],"trail":[0,0,0],"ambient":[0,0,0],
            "bg":[0,0,0],"heroBg":[0,0,0],"footerBg":[0,0,0]}"#,
    ] {
        let mut storage = MemoryStorage::new();
        storage.write(STORAGE_KEY, raw).unwrap();
        let mut s = PaletteStore::new(storage);
        assert_eq!(s.load(), LoadOutcome::Default, "accepted {raw:?}");
        assert_eq!(*s.current(), Preset::Red.palette());
        assert_eq!(*s.target(), Preset::Red.palette());
    }
}

#[test]
fn empty_storage_loads_default() {
    let mut s = store();
    assert_eq!(s.load(), LoadOutcome::Default);
    assert_eq!(*s.target(), Palette::default());
}

#[test]
fn one_invalid_channel_input_rejects_the_whole_update() {
    let mut s = store();
    let before = *s.target();
    let result = s.apply_channel_inputs([(Channel::Main, "#00ff00"), (Channel::Glow, "oops")]);
    assert!(result.is_err());
    assert_eq!(*s.target(), before);
}

#[test]
fn missing_channel_inputs_keep_existing_target_values() {
    let mut s = store();
    s.apply_channel_inputs([(Channel::Bg, "#102030")]).unwrap();
    assert_eq!(s.target().bg, Rgb::new(16.0, 32.0, 48.0));
    assert_eq!(s.target().main, Preset::Red.palette().main);
    // custom edits are not persisted until save()
    assert_eq!(s.storage().read(STORAGE_KEY).unwrap(), None);
}
