//! Page-level settings: query string and stored sound preference

use web_sys::UrlSearchParams;

/// localStorage key holding the sound on/off preference
pub const SOUND_KEY: &str = "soundIsOn";

/// `?debug=true` turns on the debug line; only the first `debug` key counts
pub fn debug_enabled(search: &str) -> bool {
    UrlSearchParams::new_with_str(search)
        .map(|params| is_debug_value(params.get("debug").as_deref()))
        .unwrap_or(false)
}

fn is_debug_value(value: Option<&str>) -> bool {
    value == Some("true")
}

/// Sound is on unless explicitly stored as `"false"`
pub fn sound_enabled(stored: Option<&str>) -> bool {
    stored != Some("false")
}

pub fn stored_sound_value(on: bool) -> &'static str {
    if on {
        "true"
    } else {
        "false"
    }
}

/// Speaker icon source and alt text
pub fn speaker_icon(on: bool) -> (&'static str, &'static str) {
    if on {
        ("./assets/speaker-on.png", "Speaker On")
    } else {
        ("./assets/speaker-off.png", "Speaker Off")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_value() {
        assert!(is_debug_value(Some("true")));
        assert!(!is_debug_value(Some("1")));
        assert!(!is_debug_value(Some("")));
        assert!(!is_debug_value(None));
    }

    #[test]
    fn test_sound_defaults_on() {
        assert!(sound_enabled(None));
        assert!(sound_enabled(Some("true")));
        assert!(sound_enabled(Some("yes")));
        assert!(!sound_enabled(Some("false")));
    }

    #[test]
    fn test_stored_value_reads_back() {
        for on in [true, false] {
            assert_eq!(sound_enabled(Some(stored_sound_value(on))), on);
        }
    }

    #[test]
    fn test_speaker_icon() {
        assert_eq!(speaker_icon(false).1, "Speaker Off");
        assert!(speaker_icon(true).0.ends_with("speaker-on.png"));
    }
}
