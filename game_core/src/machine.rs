//! Match state machine
//!
//! Applies gesture frames, timer ticks and physics events to the single
//! [`MatchState`]. Every input is applied against the state as it is at
//! that moment and yields the physics [`Command`]s and presentation
//! [`Notice`]s the transition calls for. Inputs that mean nothing in the
//! current phase are dropped.

use crate::fsm::{Phase, PhaseFsm, Trigger, TransitionResult};
use crate::presentation::{countdown_overlay, Cue, Notice, Overlay, Status};
use crate::{Config, GameRng, Score, Side, Wall};

/// Victory signs seen in one detector frame, per paddle side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GestureFrame {
    pub left_victory: bool,
    pub right_victory: bool,
}

impl GestureFrame {
    pub fn victory(&self, side: Side) -> bool {
        match side {
            Side::Left => self.left_victory,
            Side::Right => self.right_victory,
        }
    }

    pub fn both_victory(&self) -> bool {
        self.left_victory && self.right_victory
    }
}

/// Inputs to the state machine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchInput {
    Gestures(GestureFrame),
    /// Render-loop poll of the countdown and hold timers
    Tick,
    BallHitPaddle(Side),
    BallHitWall(Wall),
    /// Ball left the table through the given side
    BoundaryCrossed(Side),
}

/// Ball mutations requested from the physics adapter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Stop the ball and park it in front of `side`'s paddle
    ResetBall { side: Side },
    /// Copy `side`'s paddle pose onto the ball
    AttachBall { side: Side },
    LaunchBall { side: Side, speed: f32 },
    NormalizeBallSpeed { speed: f32 },
    /// Send the ball away from `wall`, rotated by `perturbation`, at `speed`
    ReflectBall {
        wall: Wall,
        perturbation: f32,
        speed: f32,
    },
}

/// Result of one applied input
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub result: TransitionResult,
    pub commands: Vec<Command>,
    pub notices: Vec<Notice>,
}

/// Everything the match remembers between inputs
#[derive(Debug, Clone)]
pub struct MatchState {
    fsm: PhaseFsm,
    pub score: Score,
    pub current_turn: Side,
    pub last_winner: Side,
    pub initial_ball_speed: f32,
    pub current_ball_speed: f32,
    pub countdown_started_at: Option<u64>,
    pub victory_sign_started_at: Option<u64>,
}

impl MatchState {
    pub fn new(initial_ball_speed: f32) -> Self {
        Self {
            fsm: PhaseFsm::new(),
            score: Score::new(),
            current_turn: Side::Left,
            last_winner: Side::Left,
            initial_ball_speed,
            current_ball_speed: initial_ball_speed,
            countdown_started_at: None,
            victory_sign_started_at: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.fsm.phase()
    }
}

pub struct MatchMachine {
    state: MatchState,
    config: Config,
}

impl MatchMachine {
    pub fn new(config: Config, initial_ball_speed: f32) -> Self {
        Self {
            state: MatchState::new(initial_ball_speed),
            config,
        }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// New table size: the rally restarts at the new base speed
    pub fn set_initial_ball_speed(&mut self, speed: f32) {
        self.state.initial_ball_speed = speed;
        self.state.current_ball_speed = speed;
    }

    pub fn handle(&mut self, input: MatchInput, now: u64, rng: &mut GameRng) -> Option<Outcome> {
        match input {
            MatchInput::Gestures(frame) => self.on_gestures(frame, now),
            MatchInput::Tick => self.on_tick(now),
            MatchInput::BallHitPaddle(_) => self.on_paddle_hit(),
            MatchInput::BallHitWall(wall) => self.on_wall_hit(wall, rng),
            MatchInput::BoundaryCrossed(side) => self.on_boundary(side),
        }
    }

    fn on_gestures(&mut self, frame: GestureFrame, now: u64) -> Option<Outcome> {
        match self.phase() {
            Phase::Waiting => {
                if frame.both_victory() {
                    let started = *self.state.victory_sign_started_at.get_or_insert(now);
                    self.evaluate_hold(started, now)
                } else if self.state.victory_sign_started_at.take().is_some() {
                    self.apply(
                        Trigger::HoldBroken,
                        Vec::new(),
                        vec![Notice::Progress(None), Notice::Ambience(false)],
                    )
                } else {
                    None
                }
            }
            Phase::GameOver if frame.both_victory() => {
                self.state.victory_sign_started_at = Some(now);
                self.apply(
                    Trigger::Rematch,
                    Vec::new(),
                    vec![Notice::Progress(Some(0.0)), Notice::Ambience(true)],
                )
            }
            Phase::Ready => {
                let side = self.state.current_turn;
                if frame.victory(side) {
                    self.serve(side)
                } else {
                    self.apply(
                        Trigger::AwaitServe,
                        Vec::new(),
                        vec![Notice::Status(Status::TurnPrompt(side))],
                    )
                }
            }
            _ => None,
        }
    }

    fn on_tick(&mut self, now: u64) -> Option<Outcome> {
        match self.phase() {
            Phase::Waiting => {
                let started = self.state.victory_sign_started_at?;
                self.evaluate_hold(started, now)
            }
            Phase::Countdown => {
                let started = *self.state.countdown_started_at.get_or_insert(now);
                let elapsed = now.saturating_sub(started);
                if elapsed >= self.config.countdown_ms {
                    self.state.countdown_started_at = None;
                    let side = self.state.current_turn;
                    self.apply(
                        Trigger::CountdownDone,
                        vec![Command::AttachBall { side }],
                        vec![
                            Notice::Overlay(Overlay::Clear),
                            Notice::Status(Status::TurnPrompt(side)),
                        ],
                    )
                } else {
                    let remaining = self.config.countdown_ms - elapsed;
                    let overlay = countdown_overlay(remaining, self.config.countdown_ready_ms);
                    self.apply(
                        Trigger::CountdownTick,
                        Vec::new(),
                        vec![
                            Notice::Overlay(overlay),
                            Notice::Status(Status::Instructions),
                        ],
                    )
                }
            }
            Phase::Ready => {
                let side = self.state.current_turn;
                self.apply(
                    Trigger::AwaitServe,
                    vec![Command::AttachBall { side }],
                    Vec::new(),
                )
            }
            _ => None,
        }
    }

    /// Dual victory sign still held: report progress or start the countdown
    fn evaluate_hold(&mut self, started: u64, now: u64) -> Option<Outcome> {
        let hold = self.config.victory_hold_ms;
        let elapsed = now.saturating_sub(started);

        if elapsed < hold {
            let progress = elapsed as f32 / hold as f32;
            return self.apply(
                Trigger::HoldProgress,
                Vec::new(),
                vec![Notice::Progress(Some(progress)), Notice::Ambience(true)],
            );
        }

        let state = &mut self.state;
        state.victory_sign_started_at = None;
        state.score = Score::new();
        state.current_turn = state.last_winner;
        state.current_ball_speed = state.initial_ball_speed;
        state.countdown_started_at = Some(now);

        let side = state.current_turn;
        let score = state.score;
        let overlay = countdown_overlay(self.config.countdown_ms, self.config.countdown_ready_ms);
        self.apply(
            Trigger::HoldComplete,
            vec![Command::ResetBall { side }],
            vec![
                Notice::Progress(None),
                Notice::Ambience(false),
                Notice::Cue(Cue::Serve),
                Notice::Score(score),
                Notice::Overlay(overlay),
                Notice::Status(Status::Instructions),
            ],
        )
    }

    fn serve(&mut self, side: Side) -> Option<Outcome> {
        self.state.current_ball_speed = self.state.initial_ball_speed;
        let speed = self.state.current_ball_speed;
        self.apply(
            Trigger::Serve,
            vec![Command::LaunchBall { side, speed }],
            vec![
                Notice::Cue(Cue::Serve),
                Notice::Status(Status::InProgress),
                Notice::Overlay(Overlay::Clear),
            ],
        )
    }

    fn on_paddle_hit(&mut self) -> Option<Outcome> {
        if !self.state.fsm.can_transition(Trigger::PaddleHit) {
            return None;
        }
        let speed = self.state.current_ball_speed;
        self.apply(
            Trigger::PaddleHit,
            vec![Command::NormalizeBallSpeed { speed }],
            vec![Notice::Cue(Cue::PaddleHit)],
        )
    }

    fn on_wall_hit(&mut self, wall: Wall, rng: &mut GameRng) -> Option<Outcome> {
        if !self.state.fsm.can_transition(Trigger::WallBounce) {
            return None;
        }
        let speed = self.config.accelerate(self.state.current_ball_speed);
        self.state.current_ball_speed = speed;
        let perturbation = rng.perturbation(self.config.bounce_perturbation);
        self.apply(
            Trigger::WallBounce,
            vec![Command::ReflectBall {
                wall,
                perturbation,
                speed,
            }],
            vec![Notice::Cue(Cue::WallBounce)],
        )
    }

    fn on_boundary(&mut self, exit: Side) -> Option<Outcome> {
        if !self.state.fsm.is_playing() {
            return None;
        }

        let scorer = exit.opposite();
        let state = &mut self.state;
        state.score.increment(scorer);
        state.last_winner = scorer;
        state.current_turn = exit;
        state.current_ball_speed = state.initial_ball_speed;

        let score = state.score;
        let commands = vec![Command::ResetBall { side: exit }];
        let mut notices = vec![Notice::Cue(Cue::Score), Notice::Score(score)];

        match score.has_winner(self.config.win_score) {
            Some(winner) => {
                notices.push(Notice::Overlay(Overlay::Winner(winner)));
                notices.push(Notice::Status(Status::RematchPrompt));
                self.apply(Trigger::MatchWon, commands, notices)
            }
            None => {
                notices.push(Notice::Status(Status::TurnPrompt(exit)));
                self.apply(Trigger::PointScored, commands, notices)
            }
        }
    }

    fn apply(
        &mut self,
        trigger: Trigger,
        commands: Vec<Command>,
        notices: Vec<Notice>,
    ) -> Option<Outcome> {
        let result = self.state.fsm.transition(trigger);
        if !result.success {
            return None;
        }
        Some(Outcome {
            result,
            commands,
            notices,
        })
    }
}
