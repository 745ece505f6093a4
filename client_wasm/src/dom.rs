//! Page elements the match writes to

use game_core::{Cue, Presenter};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlImageElement, Storage, SvgElement};

use crate::audio::AudioBank;
use crate::settings::{speaker_icon, stored_sound_value, SOUND_KEY};

/// Presenter backed by the page DOM.
///
/// Every element is optional; a page without one simply doesn't show it.
pub struct DomPresenter {
    score: Option<Element>,
    message: Option<Element>,
    central_message: Option<Element>,
    debug: Option<Element>,
    progress_indicator: Option<HtmlElement>,
    progress_path: Option<SvgElement>,
    speaker_icon: Option<HtmlImageElement>,
    audio: AudioBank,
}

impl DomPresenter {
    pub fn new(document: &Document, audio: AudioBank) -> Self {
        let presenter = Self {
            score: document.get_element_by_id("score"),
            message: document.get_element_by_id("message"),
            central_message: document.get_element_by_id("centralMessage"),
            debug: document.get_element_by_id("debug"),
            progress_indicator: document
                .get_element_by_id("progressIndicator")
                .and_then(|e| e.dyn_into().ok()),
            progress_path: document
                .get_element_by_id("progressPath")
                .and_then(|e| e.dyn_into().ok()),
            speaker_icon: document
                .get_element_by_id("speaker-icon")
                .and_then(|e| e.dyn_into().ok()),
            audio,
        };
        presenter.update_speaker_icon();
        presenter
    }

    pub fn sound_on(&self) -> bool {
        self.audio.enabled()
    }

    /// Flip sound on/off and remember the choice
    pub fn toggle_sound(&mut self, storage: Option<&Storage>) -> bool {
        let on = !self.audio.enabled();
        self.audio.set_enabled(on);
        if let Some(storage) = storage {
            if let Err(e) = storage.set_item(SOUND_KEY, stored_sound_value(on)) {
                web_sys::console::error_1(&e);
            }
        }
        self.update_speaker_icon();
        on
    }

    fn update_speaker_icon(&self) {
        if let Some(icon) = &self.speaker_icon {
            let (src, alt) = speaker_icon(self.audio.enabled());
            icon.set_src(src);
            icon.set_alt(alt);
        }
    }

    fn set_display(&self, display: &str) {
        if let Some(indicator) = &self.progress_indicator {
            let _ = indicator.style().set_property("display", display);
        }
    }
}

impl Presenter for DomPresenter {
    fn show_score(&mut self, left: u8, right: u8) {
        if let Some(el) = &self.score {
            el.set_text_content(Some(&format!("{left} - {right}")));
        }
    }

    fn show_status(&mut self, text: &str) {
        if let Some(el) = &self.message {
            el.set_inner_html(text);
        }
    }

    fn show_overlay(&mut self, text: &str) {
        if let Some(el) = &self.central_message {
            el.set_inner_html(text);
        }
    }

    fn show_progress(&mut self, progress: Option<f32>) {
        match progress {
            Some(progress) => {
                if let Some(path) = &self.progress_path {
                    let _ = path
                        .style()
                        .set_property("stroke-dasharray", &progress_dash(progress));
                }
                self.set_display("block");
            }
            None => self.set_display("none"),
        }
    }

    fn play_cue(&mut self, cue: Cue) {
        self.audio.play(cue);
    }

    fn set_ambience(&mut self, on: bool) {
        self.audio.set_ambience(on);
    }

    fn show_debug(&mut self, text: &str) {
        if let Some(el) = &self.debug {
            el.set_text_content(Some(text));
        }
    }
}

/// Inline `stroke-dasharray` for the progress ring's 100-unit path
fn progress_dash(progress: f32) -> String {
    format!("{}, 100", progress.clamp(0.0, 1.0) * 100.0)
}
