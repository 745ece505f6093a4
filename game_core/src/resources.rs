use std::collections::VecDeque;

use crate::{HandObservation, MatchInput, Side};

/// Game score tracking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub left: u8,  // Left (red) player score
    pub right: u8, // Right (blue) player score
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }

    pub fn has_winner(&self, win_score: u8) -> Option<Side> {
        if self.left >= win_score {
            Some(Side::Left)
        } else if self.right >= win_score {
            Some(Side::Right)
        } else {
            None
        }
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }

    /// Uniform angle in `[-max, max]`
    pub fn perturbation(&mut self, max: f32) -> f32 {
        use rand::Rng;
        if max <= 0.0 {
            return 0.0;
        }
        self.0.gen_range(-max..=max)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Anything the game loop has to apply, in arrival order
#[derive(Debug, Clone, PartialEq)]
pub enum QueuedInput {
    /// One detector callback worth of hands (possibly none)
    Hands(Vec<HandObservation>),
    /// Timer tick or physics event
    Match(MatchInput),
}

/// Single-consumer mailbox shared by the detector callback and the physics tick
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    inputs: VecDeque<QueuedInput>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_hands(&mut self, hands: Vec<HandObservation>) {
        self.inputs.push_back(QueuedInput::Hands(hands));
    }

    pub fn push(&mut self, input: MatchInput) {
        self.inputs.push_back(QueuedInput::Match(input));
    }

    pub fn pop(&mut self) -> Option<QueuedInput> {
        self.inputs.pop_front()
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}
