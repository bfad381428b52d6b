use std::time::Duration;

/// Closed numeric interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range(pub f32, pub f32);

impl Range {
    pub const fn new(min: f32, max: f32) -> Self {
        Self(min, max)
    }

    pub const fn min(&self) -> f32 {
        self.0
    }

    pub const fn max(&self) -> f32 {
        self.1
    }

    pub fn len(&self) -> f32 {
        self.1 - self.0
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 0.0
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.0 && value <= self.1
    }

    /// Clamp `value` into the range. NaN collapses onto the lower bound.
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.0;
        }
        value.max(self.0).min(self.1)
    }
}

/// Linear interpolation between `a` and `b`.
/// lerp(0, 10, 0.25) = 2.5
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Clamp `value` to `input`, then map it linearly onto `output`.
/// map_range(1024, [768, 1280], [100, 500]) = 300
pub fn map_range(value: f32, input: Range, output: Range) -> f32 {
    if input.is_empty() {
        return output.min();
    }
    let t = (input.clamp(value) - input.min()) / input.len();
    lerp(output.min(), output.max(), t)
}

/// Seconds elapsed between two instants on the animation clock, never negative.
pub fn secs_between(from: Duration, to: Duration) -> f32 {
    to.saturating_sub(from).as_secs_f32()
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 10.0, 0.25, 2.5)]
    #[case(-100.0, 0.0, 1.0, 0.0)]
    #[case(0.2, 1.0, 0.0, 0.2)]
    fn test_lerp(#[case] a: f32, #[case] b: f32, #[case] t: f32, #[case] expected: f32) {
        assert_eq!(lerp(a, b, t), expected);
    }

    #[rstest]
    #[case(500.0, 100.0)]
    #[case(768.0, 100.0)]
    #[case(1024.0, 300.0)]
    #[case(1280.0, 500.0)]
    #[case(4000.0, 500.0)]
    #[case(f32::NAN, 100.0)]
    fn test_map_range(#[case] value: f32, #[case] expected: f32) {
        let input = Range::new(768.0, 1280.0);
        let output = Range::new(100.0, 500.0);
        assert_eq!(map_range(value, input, output), expected);
    }

    #[test]
    fn test_map_range_degenerate_input() {
        let input = Range::new(10.0, 10.0);
        assert_eq!(map_range(42.0, input, Range::new(1.0, 2.0)), 1.0);
    }

    #[test]
    fn test_secs_between_saturates() {
        let a = Duration::from_millis(500);
        let b = Duration::from_millis(1500);
        assert_eq!(secs_between(a, b), 1.0);
        assert_eq!(secs_between(b, a), 0.0);
    }
}
