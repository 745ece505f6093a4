//! Game orchestrator
//!
//! Single consumer of the input mailbox. Detector frames and physics events
//! are queued by their producers and applied one at a time, each against
//! the match state as it stands when it is taken off the queue.

use crate::adapter::{BodyView, PhysicsAdapter};
use crate::env::Environment;
use crate::fsm::Phase;
use crate::gesture::{is_victory_sign, paddle_pose, HandObservation};
use crate::machine::{GestureFrame, MatchInput, MatchMachine, MatchState, Outcome};
use crate::physics::PhysicsEngine;
use crate::presentation::{present, Notice, Presenter, Status};
use crate::{Config, GameRng, InputQueue, Layout, QueuedInput, Score, Side};

pub struct Game<E: PhysicsEngine, P: Presenter> {
    env: Box<dyn Environment>,
    config: Config,
    machine: MatchMachine,
    adapter: PhysicsAdapter<E>,
    presenter: P,
    queue: InputQueue,
    rng: GameRng,
    last_tick: Option<u64>,
    accumulator: f32,
}

impl<E: PhysicsEngine, P: Presenter> Game<E, P> {
    pub fn new(
        env: Box<dyn Environment>,
        config: Config,
        engine: E,
        presenter: P,
        viewport: (f32, f32),
        seed: u64,
    ) -> Self {
        let layout = Layout::from_viewport(viewport.0, viewport.1, &config);
        let machine = MatchMachine::new(config.clone(), layout.initial_ball_speed);
        let adapter = PhysicsAdapter::new(engine, layout);

        let mut game = Self {
            env,
            config,
            machine,
            adapter,
            presenter,
            queue: InputQueue::new(),
            rng: GameRng::new(seed),
            last_tick: None,
            accumulator: 0.0,
        };

        for notice in [
            Notice::Status(Status::StartPrompt),
            Notice::Score(Score::new()),
        ] {
            present(&notice, &mut game.presenter);
        }
        game.env.log(format!(
            "GAME: table {:.0}x{:.0}, ball speed {:.2}",
            layout.width, layout.height, layout.initial_ball_speed
        ));
        game
    }

    pub fn state(&self) -> &MatchState {
        self.machine.state()
    }

    pub fn phase(&self) -> Phase {
        self.machine.phase()
    }

    pub fn layout(&self) -> &Layout {
        self.adapter.layout()
    }

    pub fn adapter(&self) -> &PhysicsAdapter<E> {
        &self.adapter
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Detector callback: queue the frame for the next tick
    pub fn on_hands(&mut self, hands: Vec<HandObservation>) {
        self.queue.push_hands(hands);
    }

    /// Frame callback.
    ///
    /// Runs the fixed physics steps that are due, then polls the timers.
    /// The mailbox is drained after every step.
    pub fn tick(&mut self) {
        let now = self.env.now();
        let elapsed = match self.last_tick.replace(now) {
            Some(prev) => (now.saturating_sub(prev) as f32).min(self.config.max_frame_ms),
            None => 0.0,
        };
        self.accumulator += elapsed;

        while self.accumulator >= self.config.fixed_step_ms {
            self.accumulator -= self.config.fixed_step_ms;
            let playing = self.machine.phase() == Phase::Playing;
            for input in self.adapter.step(playing) {
                self.queue.push(input);
            }
            self.drain(now);
        }

        self.queue.push(MatchInput::Tick);
        self.drain(now);

        if self.config.debug {
            let line = self.debug_line();
            self.presenter.show_debug(&line);
        }
    }

    /// New viewport: rebuild the table, keep the match
    ///
    /// A zero or non-finite viewport (minimised window) is ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            self.env.log(format!("GAME: ignored resize to {width}x{height}"));
            return;
        }
        let layout = Layout::from_viewport(width, height, &self.config);
        self.adapter.reflow(layout);
        self.machine.set_initial_ball_speed(layout.initial_ball_speed);
        self.env.log(format!(
            "GAME: resized to {:.0}x{:.0}, ball speed {:.2}",
            layout.width, layout.height, layout.initial_ball_speed
        ));
    }

    pub fn scene(&self) -> Vec<BodyView> {
        self.adapter.scene()
    }

    fn drain(&mut self, now: u64) {
        while let Some(queued) = self.queue.pop() {
            let input = match queued {
                QueuedInput::Hands(hands) => MatchInput::Gestures(self.read_hands(&hands)),
                QueuedInput::Match(input) => input,
            };
            if let Some(outcome) = self.machine.handle(input, now, &mut self.rng) {
                self.apply(outcome);
            }
        }
    }

    /// Move paddles from the hands in view and collect victory signs
    fn read_hands(&mut self, hands: &[HandObservation]) -> GestureFrame {
        if hands.is_empty() {
            self.adapter.freeze_paddles();
            return GestureFrame::default();
        }

        let height = self.adapter.layout().height;
        let mut frame = GestureFrame::default();
        for hand in hands {
            let side = hand.label.side();
            self.adapter
                .set_paddle_pose(side, paddle_pose(&hand.landmarks, side, height));
            if is_victory_sign(&hand.landmarks) {
                match side {
                    Side::Left => frame.left_victory = true,
                    Side::Right => frame.right_victory = true,
                }
            }
        }
        frame
    }

    fn apply(&mut self, outcome: Outcome) {
        let Outcome {
            result,
            commands,
            notices,
        } = outcome;

        if result.changed_phase() {
            let state = self.machine.state();
            self.env.log(format!(
                "GAME: {} -> {} on {:?} (score {}-{}, turn {})",
                result.from.as_str(),
                result.to.as_str(),
                result.trigger,
                state.score.left,
                state.score.right,
                state.current_turn.name(),
            ));
        }

        for command in commands {
            self.adapter.apply(command);
        }
        for notice in &notices {
            present(notice, &mut self.presenter);
        }
    }

    fn debug_line(&self) -> String {
        let state = self.machine.state();
        let ball = self.adapter.ball_transform();
        let vel = self.adapter.ball_velocity();
        format!(
            "phase: {} | turn: {} | ball: ({:.0}, {:.0}) | vel: ({:.2}, {:.2}) | speed: {:.2}",
            state.phase().as_str(),
            state.current_turn.name(),
            ball.pos.x,
            ball.pos.y,
            vel.x,
            vel.y,
            state.current_ball_speed,
        )
    }
}
