/// Game tuning parameters for gesture Pong
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Table
    pub const ASPECT_RATIO: f32 = 16.0 / 9.0;
    pub const PADDLE_WIDTH_RATIO: f32 = 0.03; // of table width
    pub const PADDLE_HEIGHT_RATIO: f32 = 0.25; // of table height
    pub const BALL_SIZE_DIVISOR: f32 = 15.0; // table height / ball diameter
    pub const BALL_SPEED_RATIO: f32 = 0.01; // of table width, per step

    // Walls sit just outside the table
    pub const WALL_THICKNESS: f32 = 50.0;
    pub const SIDE_WALL_OFFSET: f32 = 15.0;
    pub const SERVE_GAP: f32 = 5.0;

    // Ball
    pub const ACCELERATION: f32 = 1.3; // Multiply speed on top/bottom wall bounce
    pub const SPEED_CAP: f32 = 15.0; // No further increase once speed / ACCELERATION reaches this
    pub const BOUNCE_PERTURBATION: f32 = std::f32::consts::PI / 16.0;

    // Match flow
    pub const WIN_SCORE: u8 = 5; // First to 5 wins
    pub const VICTORY_HOLD_MS: u64 = 1000;
    pub const COUNTDOWN_MS: u64 = 4000;
    pub const COUNTDOWN_READY_MS: u64 = 3000; // Show "Ready" while more than this remains

    // Physics
    pub const FIXED_STEP_MS: f32 = 1000.0 / 60.0; // ~60 Hz
    pub const MAX_FRAME_MS: f32 = 100.0; // Clamp to prevent large jumps
    pub const SUBSTEPS: u32 = 4;
}
