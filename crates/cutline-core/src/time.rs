//! Time spans on the timeline.
//!
//! Times are plain `f64` seconds. Comparisons that decide whether two clips
//! collide go through [`TimeSpan::overlaps`], which ignores intersections no
//! longer than a tolerance so that clips meeting at a single instant (or
//! separated by rounding noise) are not treated as overlapping.

/// Default overlap tolerance in seconds.
pub const OVERLAP_TOLERANCE: f64 = 1e-6;

/// A span of timeline time: `[start, start + duration]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimeSpan {
    /// Start time in seconds
    pub start: f64,
    /// Length in seconds
    pub duration: f64,
}

impl TimeSpan {
    /// Create a new span from start and duration.
    #[inline]
    pub fn new(start: f64, duration: f64) -> Self {
        Self { start, duration }
    }

    /// End time.
    #[inline]
    pub fn end(self) -> f64 {
        self.start + self.duration
    }

    /// Check whether `time` falls inside the span. Both ends are inclusive.
    #[inline]
    pub fn contains(self, time: f64) -> bool {
        time >= self.start && time <= self.end()
    }

    /// Length of the intersection with `other`, negative when disjoint.
    #[inline]
    pub fn intersection_len(self, other: Self) -> f64 {
        self.end().min(other.end()) - self.start.max(other.start)
    }

    /// Check whether two spans share more than `tolerance` seconds.
    pub fn overlaps(self, other: Self, tolerance: f64) -> bool {
        self.intersection_len(other) > tolerance
    }
}

/// A finite, non-negative number of seconds.
#[inline]
pub fn is_valid_seconds(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
