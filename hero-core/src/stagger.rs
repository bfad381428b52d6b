//! Start-time distribution across the targets of one tween

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Where a spread stagger starts counting from.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StaggerFrom {
    #[default]
    Start,
    End,
    Center,
    Random,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stagger {
    /// Every target starts together.
    #[default]
    None,
    /// Fixed delay between consecutive targets, in seconds.
    Each(f32),
    /// Total spread across all targets, in seconds.
    Amount { amount: f32, from: StaggerFrom },
}

impl Stagger {
    pub const fn amount(amount: f32, from: StaggerFrom) -> Self {
        Stagger::Amount { amount, from }
    }

    /// Start offset of each of `count` targets, in target order.
    pub fn offsets<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<f32> {
        match *self {
            Stagger::None => vec![0.0; count],
            Stagger::Each(each) => (0..count).map(|i| i as f32 * each).collect(),
            Stagger::Amount { amount, from } => {
                if count <= 1 {
                    return vec![0.0; count];
                }
                let each = amount / (count - 1) as f32;
                let last = (count - 1) as f32;
                match from {
                    StaggerFrom::Start => (0..count).map(|i| i as f32 * each).collect(),
                    StaggerFrom::End => (0..count).map(|i| (last - i as f32) * each).collect(),
                    StaggerFrom::Center => {
                        // Edges land on `amount`, the middle on zero.
                        let mid = last / 2.0;
                        (0..count)
                            .map(|i| (i as f32 - mid).abs() / mid * amount)
                            .collect()
                    }
                    StaggerFrom::Random => {
                        let mut slots: Vec<f32> = (0..count).map(|i| i as f32 * each).collect();
                        slots.shuffle(rng);
                        slots
                    }
                }
            }
        }
    }

    /// Latest start offset for `count` targets.
    pub fn span(&self, count: usize) -> f32 {
        match *self {
            Stagger::None => 0.0,
            Stagger::Each(each) => count.saturating_sub(1) as f32 * each,
            Stagger::Amount { amount, .. } if count > 1 => amount,
            Stagger::Amount { .. } => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_each() {
        assert_eq!(Stagger::Each(0.5).offsets(4, &mut rng()), vec![0.0, 0.5, 1.0, 1.5]);
        assert_eq!(Stagger::Each(0.5).span(4), 1.5);
    }

    #[test]
    fn test_amount_from_start() {
        let offsets = Stagger::amount(0.6, StaggerFrom::Start).offsets(5, &mut rng());
        assert_eq!(offsets.len(), 5);
        assert_eq!(offsets[0], 0.0);
        assert!((offsets[4] - 0.6).abs() < 1e-6);
        assert!(offsets.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_amount_from_end_reverses() {
        let offsets = Stagger::amount(1.0, StaggerFrom::End).offsets(3, &mut rng());
        assert_eq!(offsets, vec![1.0, 0.5, 0.0]);
    }

    #[test]
    fn test_amount_from_center() {
        let offsets = Stagger::amount(1.0, StaggerFrom::Center).offsets(5, &mut rng());
        assert_eq!(offsets, vec![1.0, 0.5, 0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_random_is_a_permutation_of_the_start_slots() {
        let mut offsets = Stagger::amount(0.4, StaggerFrom::Random).offsets(8, &mut rng());
        let mut expected = Stagger::amount(0.4, StaggerFrom::Start).offsets(8, &mut rng());
        offsets.sort_by(f32::total_cmp);
        expected.sort_by(f32::total_cmp);
        assert_eq!(offsets, expected);
    }

    #[test]
    fn test_random_is_deterministic_for_a_seed() {
        let stagger = Stagger::amount(0.4, StaggerFrom::Random);
        assert_eq!(stagger.offsets(8, &mut rng()), stagger.offsets(8, &mut rng()));
    }

    #[rstest]
    #[case(Stagger::None)]
    #[case(Stagger::Each(0.2))]
    #[case(Stagger::amount(0.6, StaggerFrom::Start))]
    #[case(Stagger::amount(0.6, StaggerFrom::Random))]
    fn test_degenerate_counts(#[case] stagger: Stagger) {
        assert!(stagger.offsets(0, &mut rng()).is_empty());
        assert_eq!(stagger.offsets(1, &mut rng()), vec![0.0]);
        assert_eq!(stagger.span(1), 0.0);
    }
}
