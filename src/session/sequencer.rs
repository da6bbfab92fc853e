use crate::foundation::core::FrameIndex;
use crate::time::units::TimeUnits;

/// Progress of an [`AnimationSequencer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequencerState {
    /// No frame emitted yet.
    Init,
    /// Frame `i` was the last one emitted and more frames follow.
    Emitting(u32),
    /// The final frame has been emitted.
    Done,
}

/// One simulated second of the countdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameStep {
    /// Position in the animation.
    pub index: FrameIndex,
    /// Seconds left at this frame, never below zero.
    pub seconds_left: u64,
    /// `seconds_left` split into display units.
    pub units: TimeUnits,
}

/// Yields one [`FrameStep`] per frame, decrementing the remaining time by exactly one simulated
/// second per frame regardless of wall-clock time.
#[derive(Clone, Debug)]
pub struct AnimationSequencer {
    initial_secs: u64,
    frame_count: u32,
    state: SequencerState,
}

impl AnimationSequencer {
    /// Sequence `frame_count` frames starting at `initial_secs` remaining.
    pub fn new(initial_secs: u64, frame_count: u32) -> Self {
        Self {
            initial_secs,
            frame_count,
            state: SequencerState::Init,
        }
    }

    /// Current state.
    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Total frames this sequencer emits.
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Seconds remaining at the first frame.
    pub fn initial_secs(&self) -> u64 {
        self.initial_secs
    }
}

impl Iterator for AnimationSequencer {
    type Item = FrameStep;

    fn next(&mut self) -> Option<FrameStep> {
        let i = match self.state {
            SequencerState::Init => 0,
            SequencerState::Emitting(last) => last + 1,
            SequencerState::Done => return None,
        };
        if i >= self.frame_count {
            self.state = SequencerState::Done;
            return None;
        }
        self.state = if i + 1 == self.frame_count {
            SequencerState::Done
        } else {
            SequencerState::Emitting(i)
        };

        let seconds_left = self.initial_secs.saturating_sub(u64::from(i));
        Some(FrameStep {
            index: FrameIndex(u64::from(i)),
            seconds_left,
            units: TimeUnits::from_secs(seconds_left),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let emitted = match self.state {
            SequencerState::Init => 0,
            SequencerState::Emitting(last) => last + 1,
            SequencerState::Done => self.frame_count,
        };
        let left = self.frame_count.saturating_sub(emitted) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for AnimationSequencer {}

#[cfg(test)]
#[path = "../../tests/unit/session/sequencer.rs"]
mod tests;
