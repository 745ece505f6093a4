//! Browser client for gesture Pong
//!
//! The JS host owns the webcam and the MediaPipe detector. It forwards each
//! detector result as JSON and drives [`render_frame`] from
//! `requestAnimationFrame`; everything else happens here.

mod audio;
mod canvas;
mod dom;
mod env;
mod settings;

use std::cell::RefCell;

use audio::AudioBank;
use canvas::Painter;
use dom::DomPresenter;
use env::WasmEnv;
use game_core::{Config, Environment, Game, SimWorld};
use proto::{decode_hands, HostSetup};
use settings::{debug_enabled, sound_enabled, SOUND_KEY};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, Storage, Window};

struct Client {
    game: Game<SimWorld, DomPresenter>,
    painter: Painter,
    storage: Option<Storage>,
    window: Window,
}

impl Client {
    async fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        console_error_panic_hook::set_once();

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("No document"))?;

        let search = window.location().search().unwrap_or_default();
        let storage = window.local_storage().ok().flatten();
        let stored = storage
            .as_ref()
            .and_then(|s| s.get_item(SOUND_KEY).ok().flatten());

        let config = Config {
            debug: debug_enabled(&search),
            ..Config::new()
        };
        let engine = SimWorld::new(config.substeps);

        let audio = AudioBank::load(sound_enabled(stored.as_deref())).await;
        let presenter = DomPresenter::new(&document, audio);

        let game = Game::new(
            Box::new(WasmEnv),
            config,
            engine,
            presenter,
            viewport(&window)?,
            js_sys::Date::now() as u64,
        );

        let painter = Painter::new(canvas)?;
        painter.resize(game.layout());

        Ok(Self {
            game,
            painter,
            storage,
            window,
        })
    }

    fn on_hand_results(&mut self, json: &str) {
        match decode_hands(json) {
            Ok(hands) => self.game.on_hands(hands),
            Err(e) => WasmEnv.log(format!("GAME: dropped detector frame: {e}")),
        }
    }

    fn render(&mut self) -> Result<(), JsValue> {
        self.game.tick();
        self.painter.draw(&self.game.scene())
    }

    fn resize(&mut self) -> Result<(), JsValue> {
        let (width, height) = viewport(&self.window)?;
        self.game.resize(width, height);
        self.painter.resize(self.game.layout());
        Ok(())
    }

    fn toggle_sound(&mut self) -> bool {
        let storage = self.storage.as_ref();
        self.game.presenter_mut().toggle_sound(storage)
    }
}

fn viewport(window: &Window) -> Result<(f32, f32), JsValue> {
    let width = window
        .inner_width()?
        .as_f64()
        .ok_or_else(|| JsValue::from_str("Invalid window width"))?;
    let height = window
        .inner_height()?
        .as_f64()
        .ok_or_else(|| JsValue::from_str("Invalid window height"))?;
    Ok((width as f32, height as f32))
}

// Global client storage for WASM bindings
thread_local! {
    static CLIENT: RefCell<Option<Client>> = const { RefCell::new(None) };
}

fn with_client<T>(f: impl FnOnce(&mut Client) -> Result<T, JsValue>) -> Result<T, JsValue> {
    CLIENT.with(|cell| match cell.borrow_mut().as_mut() {
        Some(client) => f(client),
        None => Err(JsValue::from_str("Game not initialized")),
    })
}

#[wasm_bindgen]
pub fn init_game(canvas: HtmlCanvasElement) -> js_sys::Promise {
    wasm_bindgen_futures::future_to_promise(async move {
        let client = Client::new(canvas).await?;
        CLIENT.with(|cell| *cell.borrow_mut() = Some(client));
        Ok(JsValue::UNDEFINED)
    })
}

/// Detector and camera options as JSON, for the host to start tracking with
#[wasm_bindgen]
pub fn host_setup() -> Result<String, JsValue> {
    HostSetup::default()
        .to_json()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
pub fn on_hand_results(json: &str) -> Result<(), JsValue> {
    with_client(|client| {
        client.on_hand_results(json);
        Ok(())
    })
}

#[wasm_bindgen]
pub fn render_frame() -> Result<(), JsValue> {
    with_client(|client| client.render())
}

/// Re-read the viewport and reflow the table
#[wasm_bindgen]
pub fn resize() -> Result<(), JsValue> {
    with_client(|client| client.resize())
}

/// Returns whether sound is now on
#[wasm_bindgen]
pub fn toggle_sound() -> Result<bool, JsValue> {
    with_client(|client| Ok(client.toggle_sound()))
}

#[wasm_bindgen]
pub fn sound_on() -> Result<bool, JsValue> {
    with_client(|client| Ok(client.game.presenter().sound_on()))
}
