pub mod adapter;
pub mod components;
pub mod config;
pub mod env;
pub mod fsm;
pub mod game;
pub mod gesture;
pub mod layout;
pub mod machine;
pub mod params;
pub mod physics;
pub mod presentation;
pub mod resources;

pub use adapter::{BodyKind, BodyView, PhysicsAdapter};
pub use components::*;
pub use config::Config;
pub use env::Environment;
pub use fsm::{Phase, PhaseFsm, TransitionResult, Trigger};
pub use game::Game;
pub use gesture::{HandLandmarks, HandObservation, Handedness, Landmark, PaddlePose};
pub use layout::{Layout, Rect};
pub use machine::{Command, GestureFrame, MatchInput, MatchMachine, MatchState, Outcome};
pub use params::*;
pub use physics::{Contact, PhysicsEngine, SimWorld};
pub use presentation::{Cue, Notice, Overlay, Presenter, Status};
pub use resources::*;
