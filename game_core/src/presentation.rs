//! Presentation contract
//!
//! The state machine reports what the players should see and hear as
//! [`Notice`]s; [`present`] turns them into calls on a [`Presenter`] sink.

use crate::{Score, Side};

/// One-shot sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    PaddleHit,
    WallBounce,
    Score,
    Serve,
}

/// Status line below the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    StartPrompt,
    Instructions,
    TurnPrompt(Side),
    InProgress,
    RematchPrompt,
}

/// Large message over the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Clear,
    Ready,
    Seconds(u64),
    Winner(Side),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Notice {
    Score(Score),
    Status(Status),
    Overlay(Overlay),
    /// Hold progress in `[0, 1]`; `None` hides the ring
    Progress(Option<f32>),
    Cue(Cue),
    /// Looping sound while the dual victory sign is held
    Ambience(bool),
}

/// Side-effect sink for everything user facing
pub trait Presenter {
    fn show_score(&mut self, left: u8, right: u8);
    fn show_status(&mut self, text: &str);
    /// Empty text clears the overlay
    fn show_overlay(&mut self, text: &str);
    fn show_progress(&mut self, progress: Option<f32>);
    fn play_cue(&mut self, cue: Cue);
    /// Must be safe to turn off when nothing is playing
    fn set_ambience(&mut self, on: bool);
    fn show_debug(&mut self, text: &str);
}

/// Countdown overlay for the given time left
pub fn countdown_overlay(remaining_ms: u64, ready_ms: u64) -> Overlay {
    if remaining_ms == 0 {
        Overlay::Clear
    } else if remaining_ms > ready_ms {
        Overlay::Ready
    } else {
        Overlay::Seconds(remaining_ms.div_ceil(1000))
    }
}

pub fn status_text(status: Status) -> String {
    match status {
        Status::StartPrompt => "make ✌✌ with both hands to start".to_string(),
        Status::Instructions => "👐 Keep your hands open facing the camera. <br>\
             Move your hands up and down to move the paddle up and down,<br>\
             rotate your hands to rotate the paddle.<br> Make ✌ to serve the ball."
            .to_string(),
        Status::TurnPrompt(side) => format!("{}'s turn. Make ✌ to serve the ball", side.name()),
        Status::InProgress => "Game in progress".to_string(),
        Status::RematchPrompt => "✌✌  to start".to_string(),
    }
}

pub fn overlay_text(overlay: Overlay) -> String {
    match overlay {
        Overlay::Clear => String::new(),
        Overlay::Ready => "Ready".to_string(),
        Overlay::Seconds(seconds) => seconds.to_string(),
        Overlay::Winner(side) => format!("{} player wins! ", side.name()),
    }
}

/// Forward one notice to the sink
pub fn present<P: Presenter + ?Sized>(notice: &Notice, sink: &mut P) {
    match *notice {
        Notice::Score(score) => sink.show_score(score.left, score.right),
        Notice::Status(status) => sink.show_status(&status_text(status)),
        Notice::Overlay(overlay) => sink.show_overlay(&overlay_text(overlay)),
        Notice::Progress(progress) => sink.show_progress(progress),
        Notice::Cue(cue) => sink.play_cue(cue),
        Notice::Ambience(on) => sink.set_ambience(on),
    }
}
