//! Match phase table
//!
//! Which trigger moves the match from which phase to which. Guards and
//! effects live in [`crate::machine`]; this module only answers whether a
//! move is legal.

/// Match phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Waiting,
    Countdown,
    Ready,
    Playing,
    GameOver,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Waiting => "waiting",
            Phase::Countdown => "countdown",
            Phase::Ready => "ready",
            Phase::Playing => "playing",
            Phase::GameOver => "game-over",
        }
    }
}

/// Triggers that drive the phase table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    HoldProgress,
    HoldBroken,
    HoldComplete,
    CountdownTick,
    CountdownDone,
    AwaitServe,
    Serve,
    PaddleHit,
    WallBounce,
    PointScored,
    MatchWon,
    Rematch,
}

/// Result of a phase transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionResult {
    pub success: bool,
    pub from: Phase,
    pub to: Phase,
    pub trigger: Trigger,
}

impl TransitionResult {
    pub fn changed_phase(&self) -> bool {
        self.success && self.from != self.to
    }
}

/// Match phase state machine
#[derive(Debug, Clone)]
pub struct PhaseFsm {
    phase: Phase,
}

impl PhaseFsm {
    pub fn new() -> Self {
        Self {
            phase: Phase::Waiting,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn can_transition(&self, trigger: Trigger) -> bool {
        Self::next_phase(self.phase, trigger).is_some()
    }

    /// Attempt a transition; an illegal trigger leaves the phase unchanged
    pub fn transition(&mut self, trigger: Trigger) -> TransitionResult {
        let from = self.phase;

        match Self::next_phase(from, trigger) {
            Some(to) => {
                self.phase = to;
                TransitionResult {
                    success: true,
                    from,
                    to,
                    trigger,
                }
            }
            None => TransitionResult {
                success: false,
                from,
                to: from,
                trigger,
            },
        }
    }

    fn next_phase(phase: Phase, trigger: Trigger) -> Option<Phase> {
        match (phase, trigger) {
            // From Waiting
            (Phase::Waiting, Trigger::HoldProgress) => Some(Phase::Waiting),
            (Phase::Waiting, Trigger::HoldBroken) => Some(Phase::Waiting),
            (Phase::Waiting, Trigger::HoldComplete) => Some(Phase::Countdown),

            // From Countdown
            (Phase::Countdown, Trigger::CountdownTick) => Some(Phase::Countdown),
            (Phase::Countdown, Trigger::CountdownDone) => Some(Phase::Ready),

            // From Ready
            (Phase::Ready, Trigger::AwaitServe) => Some(Phase::Ready),
            (Phase::Ready, Trigger::Serve) => Some(Phase::Playing),

            // From Playing
            (Phase::Playing, Trigger::PaddleHit) => Some(Phase::Playing),
            (Phase::Playing, Trigger::WallBounce) => Some(Phase::Playing),
            (Phase::Playing, Trigger::PointScored) => Some(Phase::Ready),
            (Phase::Playing, Trigger::MatchWon) => Some(Phase::GameOver),

            // From GameOver
            (Phase::GameOver, Trigger::Rematch) => Some(Phase::Waiting),

            // Invalid transition
            _ => None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }
}

impl Default for PhaseFsm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_phase() {
        let fsm = PhaseFsm::new();
        assert_eq!(fsm.phase(), Phase::Waiting);
        assert!(!fsm.is_playing());
    }

    #[test]
    fn test_valid_transition() {
        let mut fsm = PhaseFsm::new();
        let result = fsm.transition(Trigger::HoldComplete);
        assert!(result.success);
        assert!(result.changed_phase());
        assert_eq!(fsm.phase(), Phase::Countdown);
    }

    #[test]
    fn test_invalid_transition() {
        let mut fsm = PhaseFsm::new();
        let result = fsm.transition(Trigger::Serve);
        assert!(!result.success);
        assert!(!result.changed_phase());
        assert_eq!(fsm.phase(), Phase::Waiting);
    }

    #[test]
    fn test_self_loop_is_not_a_phase_change() {
        let mut fsm = PhaseFsm::new();
        let result = fsm.transition(Trigger::HoldProgress);
        assert!(result.success);
        assert!(!result.changed_phase());
    }

    #[test]
    fn test_match_flow() {
        let mut fsm = PhaseFsm::new();
        fsm.transition(Trigger::HoldComplete);
        fsm.transition(Trigger::CountdownDone);
        assert_eq!(fsm.phase(), Phase::Ready);
        fsm.transition(Trigger::Serve);
        assert!(fsm.is_playing());
        fsm.transition(Trigger::PointScored);
        assert_eq!(fsm.phase(), Phase::Ready);
        fsm.transition(Trigger::Serve);
        fsm.transition(Trigger::MatchWon);
        assert_eq!(fsm.phase(), Phase::GameOver);
        fsm.transition(Trigger::Rematch);
        assert_eq!(fsm.phase(), Phase::Waiting);
    }

    #[test]
    fn test_physics_triggers_rejected_outside_play() {
        for trigger in [
            Trigger::PaddleHit,
            Trigger::WallBounce,
            Trigger::PointScored,
            Trigger::MatchWon,
        ] {
            let mut fsm = PhaseFsm::new();
            fsm.transition(Trigger::HoldComplete);
            fsm.transition(Trigger::CountdownDone);
            assert!(!fsm.can_transition(trigger), "{trigger:?} accepted in Ready");
        }
    }

    #[test]
    fn test_game_over_only_accepts_rematch() {
        let mut fsm = PhaseFsm::new();
        fsm.transition(Trigger::HoldComplete);
        fsm.transition(Trigger::CountdownDone);
        fsm.transition(Trigger::Serve);
        fsm.transition(Trigger::MatchWon);

        assert!(!fsm.can_transition(Trigger::Serve));
        assert!(!fsm.can_transition(Trigger::HoldComplete));
        assert!(fsm.can_transition(Trigger::Rematch));
    }
}
