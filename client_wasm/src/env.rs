use game_core::Environment;

/// Browser clock and console
pub struct WasmEnv;

impl Environment for WasmEnv {
    fn now(&self) -> u64 {
        js_sys::Date::now() as u64
    }

    fn log(&self, msg: String) {
        web_sys::console::log_1(&msg.into());
    }
}
