//! Interval arithmetic for ray parameter ranges.
//!
//! Provides intervals [min, max] used for ray t-values and color clamping.
//! An interval with `min > max` is empty and contains nothing.

/// Interval [min, max] for range checking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    /// Minimum value of the interval
    pub min: f64,
    /// Maximum value of the interval
    pub max: f64,
}

impl Interval {
    /// Empty interval (min > max), contains nothing
    pub const EMPTY: Interval = Interval {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    };

    /// Universe interval, contains all real numbers
    pub const UNIVERSE: Interval = Interval {
        min: f64::NEG_INFINITY,
        max: f64::INFINITY,
    };

    /// Create a new interval with given min and max values
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Calculate the size (width) of the interval.
    ///
    /// Negative for empty intervals.
    pub fn size(&self) -> f64 {
        self.max - self.min
    }

    /// True when no value lies in the interval
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Check if the interval contains the given value (inclusive bounds)
    pub fn contains(&self, x: f64) -> bool {
        self.min <= x && x <= self.max
    }

    /// Check if the interval surrounds the given value (exclusive bounds)
    pub fn surrounds(&self, x: f64) -> bool {
        self.min < x && x < self.max
    }

    /// Clamp the given value to be within this interval's bounds.
    ///
    /// Uses comparisons rather than `f64::clamp`, which panics when min > max.
    pub fn clamp(&self, x: f64) -> f64 {
        if x < self.min {
            self.min
        } else if x > self.max {
            self.max
        } else {
            x
        }
    }

    /// Copy of this interval with a new upper bound
    pub fn with_max(&self, max: f64) -> Self {
        Self { min: self.min, max }
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_surrounds_excludes_endpoints() {
        let interval = Interval::new(0.0, 10.0);

        assert!(!interval.surrounds(0.0));
        assert!(!interval.surrounds(10.0));
        assert!(interval.surrounds(5.0));
        assert!(interval.surrounds(0.1));
        assert!(!interval.surrounds(-0.1));
        assert!(!interval.surrounds(10.1));
    }

    #[test]
    fn test_interval_contains_includes_endpoints() {
        let interval = Interval::new(0.0, 10.0);

        assert!(interval.contains(0.0));
        assert!(interval.contains(10.0));
        assert!(!interval.contains(10.1));
    }

    #[test]
    fn test_empty_interval_contains_nothing() {
        let empty = Interval::EMPTY;

        assert!(empty.is_empty());
        assert!(!empty.contains(0.0));
        assert!(!empty.surrounds(0.0));
        assert!(!empty.contains(f64::INFINITY));
        assert!(empty.size() < 0.0);

        // Inverted bounds behave the same way
        let inverted = Interval::new(5.0, 1.0);
        assert!(inverted.is_empty());
        assert!(!inverted.surrounds(3.0));
    }

    #[test]
    fn test_universe_interval() {
        assert!(!Interval::UNIVERSE.is_empty());
        assert!(Interval::UNIVERSE.surrounds(1.0e300));
        assert!(Interval::UNIVERSE.surrounds(-1.0e300));
    }

    #[test]
    fn test_interval_clamp() {
        let intensity = Interval::new(0.0, 0.999);

        assert_eq!(intensity.clamp(-5.0), 0.0);
        assert_eq!(intensity.clamp(0.5), 0.5);
        assert_eq!(intensity.clamp(1.0), 0.999);
    }

    #[test]
    fn test_with_max_narrows_upper_bound() {
        let interval = Interval::new(0.001, f64::INFINITY).with_max(3.0);
        assert_eq!(interval, Interval::new(0.001, 3.0));
    }
}
