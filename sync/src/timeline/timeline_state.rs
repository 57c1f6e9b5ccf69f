/// Snapshot of a timeline's playback state.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct TimelineState {
    position: f32,
    duration: f32,
    play_rate: f32,
    is_looping: bool,
}

impl TimelineState {
    pub fn new(position: f32, duration: f32, play_rate: f32, is_looping: bool) -> Self {
        Self {
            position,
            duration,
            play_rate,
            is_looping,
        }
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn play_rate(&self) -> f32 {
        self.play_rate
    }

    pub fn is_looping(&self) -> bool {
        self.is_looping
    }

    /// Position normalized by duration. Zero-length timelines report 0.
    pub fn position_ratio(&self) -> f32 {
        if self.duration > 0.0 {
            self.position / self.duration
        } else {
            0.0
        }
    }

    /// Same timeline, placed at another position. Used to search markers around
    /// a hypothetical seek target without touching the player.
    pub fn with_position(&self, position: f32) -> Self {
        Self { position, ..*self }
    }

    /// Play rate used to turn a desired time delta into a delta time.
    /// A paused timeline still seeks at rate 1.
    pub(crate) fn effective_play_rate(&self) -> f32 {
        if self.play_rate != 0.0 {
            self.play_rate
        } else {
            1.0
        }
    }
}
