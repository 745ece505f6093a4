//! Hand gesture classification
//!
//! Pure functions over one hand's 21 MediaPipe landmarks. Coordinates are
//! normalized to the camera frame with y growing downward, so "above" means
//! a smaller y.

use std::f32::consts::{FRAC_PI_2, PI};

use crate::Side;

/// Number of landmarks the detector reports per hand
pub const LANDMARK_COUNT: usize = 21;

/// MediaPipe hand landmark indices
pub mod landmarks {
    pub const WRIST: usize = 0;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_DIP: usize = 7;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_DIP: usize = 11;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_DIP: usize = 15;
    pub const RING_TIP: usize = 16;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;
}

use landmarks::*;

/// Normalized 2D landmark
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// The full landmark set of one detected hand
pub type HandLandmarks = [Landmark; LANDMARK_COUNT];

/// Label the detector assigns to a hand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    /// Paddle controlled by this hand.
    ///
    /// The camera image is mirrored, so the detector's right hand is the
    /// player standing on the left.
    pub fn side(self) -> Side {
        match self {
            Handedness::Right => Side::Left,
            Handedness::Left => Side::Right,
        }
    }
}

/// One hand reported by the detector for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct HandObservation {
    pub label: Handedness,
    pub landmarks: HandLandmarks,
}

impl HandObservation {
    pub fn new(label: Handedness, landmarks: HandLandmarks) -> Self {
        Self { label, landmarks }
    }
}

/// Paddle pose derived from a hand
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddlePose {
    pub position_y: f32,
    pub angle: f32,
}

impl PaddlePose {
    pub fn new(position_y: f32, angle: f32) -> Self {
        Self { position_y, angle }
    }
}

fn above(hand: &HandLandmarks, tip: usize, joint: usize) -> bool {
    hand[tip].y < hand[joint].y
}

fn below(hand: &HandLandmarks, tip: usize, joint: usize) -> bool {
    hand[tip].y > hand[joint].y
}

/// Index and middle extended, ring and pinky curled
pub fn is_victory_sign(hand: &HandLandmarks) -> bool {
    above(hand, INDEX_TIP, INDEX_DIP)
        && above(hand, MIDDLE_TIP, MIDDLE_DIP)
        && below(hand, RING_TIP, RING_DIP)
        && below(hand, PINKY_TIP, PINKY_DIP)
}

pub fn is_fist(hand: &HandLandmarks) -> bool {
    below(hand, INDEX_TIP, INDEX_DIP)
        && below(hand, MIDDLE_TIP, MIDDLE_DIP)
        && below(hand, RING_TIP, RING_DIP)
        && below(hand, PINKY_TIP, PINKY_DIP)
}

pub fn is_open_palm(hand: &HandLandmarks) -> bool {
    above(hand, INDEX_TIP, INDEX_DIP)
        && above(hand, MIDDLE_TIP, MIDDLE_DIP)
        && above(hand, RING_TIP, RING_DIP)
        && above(hand, PINKY_TIP, PINKY_DIP)
}

pub fn is_thumbs_up(hand: &HandLandmarks) -> bool {
    above(hand, THUMB_TIP, THUMB_IP) && above(hand, THUMB_IP, THUMB_MCP)
}

/// Paddle pose from the wrist to middle fingertip line.
///
/// `position_y` is the midpoint of the two landmarks scaled to the table.
/// An upright hand gives a vertical paddle (a half or full turn); the sign
/// is flipped per side so both players tilt their paddle the way they tilt
/// their hand.
pub fn paddle_pose(hand: &HandLandmarks, side: Side, table_height: f32) -> PaddlePose {
    let wrist = hand[WRIST];
    let tip = hand[MIDDLE_TIP];

    let position_y = (wrist.y + tip.y) / 2.0 * table_height;
    let raw = (tip.y - wrist.y).atan2(tip.x - wrist.x) - FRAC_PI_2;
    let angle = match side {
        Side::Left => -raw,
        Side::Right => PI - raw,
    };

    PaddlePose::new(position_y, angle)
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_victory_sign() {
        let hand = victory_hand();
        assert!(is_victory_sign(&hand));
        assert!(!is_fist(&hand));
        assert!(!is_open_palm(&hand));
    }

    #[test]
    fn test_open_palm_is_not_victory() {
        let hand = open_hand();
        assert!(is_open_palm(&hand));
        assert!(!is_victory_sign(&hand));
    }

    #[test]
    fn test_fist() {
        let hand = fist_hand();
        assert!(is_fist(&hand));
        assert!(!is_victory_sign(&hand));
        assert!(!is_open_palm(&hand));
    }

    #[test]
    fn test_victory_requires_pinky_curled() {
        let mut hand = victory_hand();
        hand[PINKY_TIP].y = 0.3;
        assert!(!is_victory_sign(&hand));
    }

    #[test]
    fn test_thumbs_up() {
        let hand = open_hand();
        assert!(is_thumbs_up(&hand));

        let mut down = open_hand();
        down[THUMB_TIP].y = 0.75;
        assert!(!is_thumbs_up(&down));
    }

    #[test]
    fn test_mirrored_label_mapping() {
        assert_eq!(Handedness::Right.side(), Side::Left);
        assert_eq!(Handedness::Left.side(), Side::Right);
    }

    #[test]
    fn test_upright_hand_pose() {
        let hand = open_hand();
        let left = paddle_pose(&hand, Side::Left, 720.0);
        // midpoint of wrist (0.8) and middle tip (0.3)
        assert!((left.position_y - 0.55 * 720.0).abs() < 1e-3);

        // Pointing straight up: atan2(-0.5, 0) - pi/2 = -pi
        assert!((left.angle - PI).abs() < 1e-5);
        let right = paddle_pose(&hand, Side::Right, 720.0);
        assert!((right.angle - 2.0 * PI).abs() < 1e-5);
    }

    #[test]
    fn test_tilted_hand_pose_mirrors_per_side() {
        let mut hand = open_hand();
        hand[MIDDLE_TIP] = Landmark::new(0.7, 0.6);
        let raw = (0.6f32 - 0.8).atan2(0.7 - 0.5) - FRAC_PI_2;

        let left = paddle_pose(&hand, Side::Left, 100.0);
        let right = paddle_pose(&hand, Side::Right, 100.0);
        assert!((left.angle + raw).abs() < 1e-5);
        assert!((right.angle - (PI - raw)).abs() < 1e-5);
        assert!((left.position_y - 70.0).abs() < 1e-3);
    }
}
