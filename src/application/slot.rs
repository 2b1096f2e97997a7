/// State of one analysis slot.
///
/// `Failed` carries the generic user-facing advisory message; the
/// detailed cause is logged, not stored here.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotState<T> {
    Idle,
    Loading,
    Succeeded(T),
    Failed(String),
}

impl<T> SlotState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, SlotState::Loading)
    }
}

/// AnalysisSlot - one of the two independent analysis state tracks
///
/// Transitions: `Idle → Loading → {Succeeded, Failed}`, returning to
/// `Loading` immediately on a new dispatch. Every dispatch and reset
/// bumps a generation counter; a completion only commits when it carries
/// the generation of the latest dispatch. A superseded in-flight call
/// therefore completes harmlessly - its result can never overwrite the
/// state belonging to a newer selection.
#[derive(Debug)]
pub struct AnalysisSlot<T> {
    state: SlotState<T>,
    generation: u64,
}

impl<T> AnalysisSlot<T> {
    pub fn new() -> Self {
        Self {
            state: SlotState::Idle,
            generation: 0,
        }
    }

    pub fn state(&self) -> &SlotState<T> {
        &self.state
    }

    /// Starts a new analysis: clears any previous result or error and
    /// returns the generation token the eventual completion must carry.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.state = SlotState::Loading;
        self.generation
    }

    /// Returns the slot to `Idle`, invalidating any in-flight call.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = SlotState::Idle;
    }

    /// Commits a successful result. Returns false (and discards the
    /// result) when the slot has moved on since `generation` was issued.
    pub fn complete_succeeded(&mut self, generation: u64, result: T) -> bool {
        if generation != self.generation {
            return false;
        }
        self.state = SlotState::Succeeded(result);
        true
    }

    /// Commits a failure with the user-facing message. Returns false
    /// when the completion is stale.
    pub fn complete_failed(&mut self, generation: u64, message: impl Into<String>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.state = SlotState::Failed(message.into());
        true
    }
}

impl<T> Default for AnalysisSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}
