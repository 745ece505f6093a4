//! Hand detector wire format
//!
//! The browser host hands over MediaPipe Hands results as JSON text. This
//! crate decodes them into [`HandObservation`]s and carries the detector
//! and camera options the host should start with.

use game_core::gesture::{HandObservation, Handedness, Landmark, LANDMARK_COUNT};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Detector -> Game
// ============================================================================

/// One normalized landmark; `z` is depth and unused
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

/// Handedness classification for one detected hand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub score: f32,
    pub label: String,
}

/// Results of one detector frame.
///
/// Both lists are absent when no hand is in view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandResults {
    #[serde(default)]
    pub multi_hand_landmarks: Vec<Vec<Point>>,
    #[serde(default)]
    pub multi_handedness: Vec<Classification>,
}

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("malformed detector payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("hand {hand} has {found} landmarks, expected 21")]
    LandmarkCount { hand: usize, found: usize },

    #[error("hand {hand} has no handedness entry")]
    MissingHandedness { hand: usize },

    #[error("unknown hand label: {0}")]
    UnknownLabel(String),
}

impl HandResults {
    pub fn from_json(json: &str) -> Result<Self, DecodeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Pair each landmark set with its label.
    ///
    /// Fails on the first malformed hand; a frame is used whole or not at all.
    pub fn into_observations(self) -> Result<Vec<HandObservation>, DecodeError> {
        let mut labels = self.multi_handedness.into_iter();

        self.multi_hand_landmarks
            .into_iter()
            .enumerate()
            .map(|(hand, points)| {
                let class = labels
                    .next()
                    .ok_or(DecodeError::MissingHandedness { hand })?;
                let label = parse_label(&class.label)?;
                let landmarks = to_landmarks(hand, &points)?;
                Ok(HandObservation::new(label, landmarks))
            })
            .collect()
    }
}

/// Decode one detector frame straight into observations
pub fn decode_hands(json: &str) -> Result<Vec<HandObservation>, DecodeError> {
    HandResults::from_json(json)?.into_observations()
}

fn parse_label(label: &str) -> Result<Handedness, DecodeError> {
    match label {
        "Left" => Ok(Handedness::Left),
        "Right" => Ok(Handedness::Right),
        other => Err(DecodeError::UnknownLabel(other.to_string())),
    }
}

fn to_landmarks(
    hand: usize,
    points: &[Point],
) -> Result<[Landmark; LANDMARK_COUNT], DecodeError> {
    if points.len() != LANDMARK_COUNT {
        return Err(DecodeError::LandmarkCount {
            hand,
            found: points.len(),
        });
    }
    let mut landmarks = [Landmark::new(0.0, 0.0); LANDMARK_COUNT];
    for (slot, point) in landmarks.iter_mut().zip(points) {
        *slot = Landmark::new(point.x, point.y);
    }
    Ok(landmarks)
}

// ============================================================================
// Game -> Host
// ============================================================================

/// Options passed to the MediaPipe Hands constructor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectorOptions {
    pub max_num_hands: u8,
    pub model_complexity: u8,
    pub min_detection_confidence: f32,
    pub min_tracking_confidence: f32,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self {
            max_num_hands: 2,
            model_complexity: 1,
            min_detection_confidence: 0.5,
            min_tracking_confidence: 0.5,
        }
    }
}

/// Webcam capture size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraOptions {
    pub width: u32,
    pub height: u32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Everything the host needs to start hand tracking
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostSetup {
    pub detector: DetectorOptions,
    pub camera: CameraOptions,
}

impl HostSetup {
    pub fn to_json(&self) -> Result<String, DecodeError> {
        Ok(serde_json::to_string(self)?)
    }
}
