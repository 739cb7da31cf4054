//! Addressable step range of a gauge.

/// Inclusive sub-range of `[0, total_steps)` the needle may be commanded to.
///
/// Targets outside the range are clamped, never rejected: a gauge must always
/// receive a reachable command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepRange {
    /// Lowest addressable step.
    pub min: u32,
    /// Highest addressable step.
    pub max: u32,
}

impl StepRange {
    /// The whole mechanical range of a gauge with `total_steps` steps.
    pub fn full(total_steps: u32) -> Self {
        Self {
            min: 0,
            max: total_steps.saturating_sub(1),
        }
    }

    /// Build a range, forcing it inside the mechanical range.
    ///
    /// `high` is clamped to the last step and `low` to `high`.
    pub fn clamped(low: u32, high: u32, total_steps: u32) -> Self {
        let max = high.min(total_steps.saturating_sub(1));
        Self {
            min: low.min(max),
            max,
        }
    }

    /// Check the range is ordered and fits in `total_steps`.
    pub fn is_valid_for(&self, total_steps: u32) -> bool {
        self.min <= self.max && self.max < total_steps
    }

    /// Check if a position is within the range.
    pub fn contains(&self, position: u32) -> bool {
        position >= self.min && position <= self.max
    }

    /// Nearest position inside the range.
    pub fn clamp(&self, position: u32) -> u32 {
        position.clamp(self.min, self.max)
    }
}
