//! Sound cues on the Web Audio API

use std::collections::HashMap;

use game_core::Cue;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AudioBuffer, AudioBufferSourceNode, AudioContext, Response};

/// The hold ambience loops the wall bounce sample
pub const AMBIENCE_CUE: Cue = Cue::WallBounce;

const ALL_CUES: [Cue; 4] = [Cue::PaddleHit, Cue::WallBounce, Cue::Score, Cue::Serve];

pub fn asset_path(cue: Cue) -> &'static str {
    match cue {
        Cue::PaddleHit => "./assets/pop.mp3",
        Cue::WallBounce => "./assets/bounce.mp3",
        Cue::Score => "./assets/bubble.mp3",
        Cue::Serve => "./assets/snap.mp3",
    }
}

/// Decoded samples plus the one looping source, if playing.
///
/// A missing context or sample makes the matching cue silent.
pub struct AudioBank {
    ctx: Option<AudioContext>,
    buffers: HashMap<Cue, AudioBuffer>,
    ambience: Option<AudioBufferSourceNode>,
    enabled: bool,
}

impl AudioBank {
    pub async fn load(enabled: bool) -> Self {
        let mut bank = Self {
            ctx: None,
            buffers: HashMap::new(),
            ambience: None,
            enabled,
        };

        let ctx = match AudioContext::new() {
            Ok(ctx) => ctx,
            Err(e) => {
                web_sys::console::error_2(&"Audio unavailable:".into(), &e);
                return bank;
            }
        };
        // Ignore the promise: a suspended context resumes on first gesture
        let _ = ctx.resume();

        for cue in ALL_CUES {
            match fetch_buffer(&ctx, asset_path(cue)).await {
                Ok(buffer) => {
                    bank.buffers.insert(cue, buffer);
                }
                Err(e) => {
                    web_sys::console::error_2(&"Error loading sounds:".into(), &e);
                }
            }
        }

        bank.ctx = Some(ctx);
        bank
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, on: bool) {
        self.enabled = on;
        if on {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        } else {
            self.stop_ambience();
        }
    }

    /// Any one-shot cuts the ambience
    pub fn play(&mut self, cue: Cue) {
        self.stop_ambience();
        if !self.enabled {
            return;
        }
        if let Err(e) = self.start(cue, false) {
            web_sys::console::error_1(&e);
        }
    }

    pub fn set_ambience(&mut self, on: bool) {
        if !on {
            self.stop_ambience();
            return;
        }
        if !self.enabled || self.ambience.is_some() {
            return;
        }
        match self.start(AMBIENCE_CUE, true) {
            Ok(source) => self.ambience = source,
            Err(e) => web_sys::console::error_1(&e),
        }
    }

    fn stop_ambience(&mut self) {
        if let Some(source) = self.ambience.take() {
            #[allow(deprecated)]
            let _ = source.stop();
            let _ = source.disconnect();
        }
    }

    fn start(&self, cue: Cue, looped: bool) -> Result<Option<AudioBufferSourceNode>, JsValue> {
        let (Some(ctx), Some(buffer)) = (&self.ctx, self.buffers.get(&cue)) else {
            return Ok(None);
        };

        let source = ctx.create_buffer_source()?;
        source.set_buffer(Some(buffer));
        source.set_loop(looped);
        source.connect_with_audio_node(&ctx.destination())?;
        #[allow(deprecated)]
        source.start()?;
        Ok(Some(source))
    }
}

async fn fetch_buffer(ctx: &AudioContext, path: &str) -> Result<AudioBuffer, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    let response: Response = JsFuture::from(window.fetch_with_str(path))
        .await?
        .dyn_into()?;
    if !response.ok() {
        return Err(JsValue::from_str(&format!(
            "Failed to fetch {path}: {}",
            response.status()
        )));
    }
    let bytes: js_sys::ArrayBuffer = JsFuture::from(response.array_buffer()?).await?.dyn_into()?;
    let decoded = JsFuture::from(ctx.decode_audio_data(&bytes)?).await?;
    decoded.dyn_into()
}
