/// Host environment: clock and logging.
///
/// The browser host backs this with `Date.now()` and the console; tests
/// drive the clock by hand.
pub trait Environment {
    fn now(&self) -> u64; // ms
    fn log(&self, msg: String);
}
