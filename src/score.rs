/// Running score and its on-screen text.

/// Points awarded for every star picked up.
pub const STAR_POINTS: u32 = 10;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreTracker {
    score: u32,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, points: u32) {
        // Overflow would break the non-decreasing score invariant.
        self.score = self
            .score
            .checked_add(points)
            .expect("score overflowed u32");
    }

    pub fn current_score(&self) -> u32 {
        self.score
    }

    /// Text handed to the host for the HUD, e.g. `"score: 30"`.
    pub fn display_text(&self) -> String {
        format!("score: {}", self.score)
    }
}
