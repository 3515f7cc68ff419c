//! The lottery-category catalog.
//!
//! Each [`Category`] is a pure generation rule mapping its parameters to a
//! `(probability-pair, outcome-pair)` tuple: [`Category::enumerate`] yields
//! the full combinatorial set of instances in a fixed order, and
//! [`Category::sample_pair`] draws one randomized instance from the same
//! rule.  The nine catalogued rules are listed in [`Category::ENUMERATED`];
//! [`Category::Random`] is the unconstrained superset rule used only for
//! ad-hoc sampling (it has no finite enumeration).

use rand::Rng;

use crate::{LotteryPair, SampleError, P_SET, X_NEG, X_POS};

/// Full signed outcome domain for the unconstrained sampler.
const X_FULL: [i32; 7] = [-3, -2, -1, 0, 1, 2, 3];

/// A lottery-pair category: a tagged generation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    /// Equal probabilities; one negative outcome vs one positive outcome.
    ControlMixed,
    /// Equal probabilities; two distinct positive outcomes.
    ControlPositive,
    /// Equal probabilities; two distinct negative outcomes.
    ControlNegative,
    /// Two distinct probabilities; the same positive outcome on both sides.
    FixedOutcomePositive,
    /// Two distinct probabilities; the same negative outcome on both sides.
    FixedOutcomeNegative,
    /// Higher outcome at the lower probability (positive domain).
    IncongruentPositive,
    /// Worse (more negative) outcome at the lower probability.
    IncongruentNegative,
    /// Higher outcome at the higher probability (positive domain).
    CongruentPositive,
    /// Worse outcome at the higher probability (negative domain).
    CongruentNegative,
    /// Unconstrained rejection sampler over the full signed domain.
    Random,
}

impl Category {
    /// The nine catalogued categories, in persisted-table order.
    pub const ENUMERATED: [Category; 9] = [
        Category::ControlMixed,
        Category::ControlPositive,
        Category::ControlNegative,
        Category::FixedOutcomePositive,
        Category::FixedOutcomeNegative,
        Category::IncongruentPositive,
        Category::IncongruentNegative,
        Category::CongruentPositive,
        Category::CongruentNegative,
    ];

    /// Stable numeric id, the `lottery_type` column of the persisted table.
    ///
    /// Ids 1..=9 are the catalogued taxonomy; 10 is the unconstrained
    /// sampler, which never appears in the table.
    pub const fn id(self) -> u8 {
        match self {
            Category::ControlMixed => 1,
            Category::ControlPositive => 2,
            Category::ControlNegative => 3,
            Category::FixedOutcomePositive => 4,
            Category::FixedOutcomeNegative => 5,
            Category::IncongruentPositive => 6,
            Category::IncongruentNegative => 7,
            Category::CongruentPositive => 8,
            Category::CongruentNegative => 9,
            Category::Random => 10,
        }
    }

    /// Human-readable rule description, the `comment` column of the table.
    pub const fn comment(self) -> &'static str {
        match self {
            Category::ControlMixed => "p fixed; x0 negative vs positive.",
            Category::ControlPositive => "p fixed; x0 positive.",
            Category::ControlNegative => "p fixed; x0 negative.",
            Category::FixedOutcomePositive => "x fixed; x0 positive.",
            Category::FixedOutcomeNegative => "x fixed; x0 negative.",
            Category::IncongruentPositive => "incongruent positive.",
            Category::IncongruentNegative => "incongruent negative.",
            Category::CongruentPositive => "congruent positive.",
            Category::CongruentNegative => "congruent negative.",
            Category::Random => "random.",
        }
    }

    /// The full combinatorial set of this category's instances, in a fixed
    /// deterministic order (probability component outer, outcome inner).
    ///
    /// [`Category::Random`] has no finite enumeration and yields nothing.
    pub fn enumerate(self) -> Vec<LotteryPair> {
        match self {
            Category::ControlMixed => {
                let mut out = Vec::with_capacity(P_SET.len() * X_NEG.len() * X_POS.len());
                for p in P_SET {
                    for neg in X_NEG {
                        for pos in X_POS {
                            out.push(LotteryPair::main_only([p, p], [neg, pos]));
                        }
                    }
                }
                out
            }
            Category::ControlPositive => equal_p_rows(&combinations2(&X_POS)),
            Category::ControlNegative => equal_p_rows(&combinations2(&X_NEG)),
            Category::FixedOutcomePositive => fixed_x_rows(&X_POS),
            Category::FixedOutcomeNegative => fixed_x_rows(&X_NEG),
            Category::IncongruentPositive => ordered_rows(&combinations2(&reversed(X_POS))),
            Category::IncongruentNegative => ordered_rows(&combinations2(&X_NEG)),
            Category::CongruentPositive => ordered_rows(&combinations2(&X_POS)),
            Category::CongruentNegative => ordered_rows(&combinations2(&reversed(X_NEG))),
            Category::Random => Vec::new(),
        }
    }

    /// Draw one randomized instance of this category's rule.
    ///
    /// Only [`Category::Random`] can fail: it rejection-samples degenerate
    /// pairs and gives up after `max_rejections` attempts.
    pub fn sample_pair<R: Rng>(
        self,
        rng: &mut R,
        max_rejections: usize,
    ) -> Result<LotteryPair, SampleError> {
        let pair = match self {
            Category::ControlMixed => {
                let p = pick(rng, &P_SET);
                LotteryPair::main_only([p, p], [pick(rng, &X_NEG), pick(rng, &X_POS)])
            }
            Category::ControlPositive => {
                let p = pick(rng, &P_SET);
                let (a, b) = pick2_distinct(rng, &X_POS);
                LotteryPair::main_only([p, p], [a, b])
            }
            Category::ControlNegative => {
                let p = pick(rng, &P_SET);
                let (a, b) = pick2_distinct(rng, &X_NEG);
                LotteryPair::main_only([p, p], [a, b])
            }
            Category::FixedOutcomePositive => {
                let (p0, p1) = pick2_distinct(rng, &P_SET);
                let x = pick(rng, &X_POS);
                LotteryPair::main_only([p0, p1], [x, x])
            }
            Category::FixedOutcomeNegative => {
                let (p0, p1) = pick2_distinct(rng, &P_SET);
                let x = pick(rng, &X_NEG);
                LotteryPair::main_only([p0, p1], [x, x])
            }
            Category::IncongruentPositive => sample_ordered(rng, &X_POS, Order::Descending),
            Category::IncongruentNegative => sample_ordered(rng, &X_NEG, Order::Ascending),
            Category::CongruentPositive => sample_ordered(rng, &X_POS, Order::Ascending),
            Category::CongruentNegative => sample_ordered(rng, &X_NEG, Order::Descending),
            Category::Random => return sample_unconstrained(rng, max_rejections),
        };
        Ok(pair)
    }
}

#[derive(Clone, Copy)]
enum Order {
    Ascending,
    Descending,
}

/// Uniform draw from a non-empty domain.
fn pick<T: Copy, R: Rng>(rng: &mut R, domain: &[T]) -> T {
    domain[rng.random_range(0..domain.len())]
}

/// Uniform draw of two distinct values (unordered, in draw order).
fn pick2_distinct<T: Copy, R: Rng>(rng: &mut R, domain: &[T]) -> (T, T) {
    let i = rng.random_range(0..domain.len());
    let mut j = rng.random_range(0..domain.len() - 1);
    if j >= i {
        j += 1;
    }
    (domain[i], domain[j])
}

/// Congruent/incongruent draw: probabilities sorted ascending, outcomes
/// sorted per the category's ordering constraint.
fn sample_ordered<R: Rng>(rng: &mut R, outcomes: &[i32], order: Order) -> LotteryPair {
    let (p0, p1) = pick2_distinct(rng, &P_SET);
    let mut p = [p0, p1];
    p.sort_unstable_by(f64::total_cmp);

    let (a, b) = pick2_distinct(rng, outcomes);
    let mut x = [a, b];
    match order {
        Order::Ascending => x.sort_unstable(),
        Order::Descending => x.sort_unstable_by(|u, v| v.cmp(u)),
    }
    LotteryPair::main_only(p, x)
}

/// The unconstrained superset rule: two probabilities (with replacement) and
/// per side two distinct outcomes from the full signed domain, rejecting
/// symmetric pairs.
///
/// Rejected when either
/// - both probabilities are equal and both outcome pairs are identical, or
/// - the probabilities are complementary and the outcome pairs are mirror
///   images of each other.
fn sample_unconstrained<R: Rng>(
    rng: &mut R,
    max_rejections: usize,
) -> Result<LotteryPair, SampleError> {
    for _ in 0..max_rejections {
        let p = [pick(rng, &P_SET), pick(rng, &P_SET)];
        let (a0, a1) = pick2_distinct(rng, &X_FULL);
        let (b0, b1) = pick2_distinct(rng, &X_FULL);

        let identical = p[0] == p[1] && a0 == b0 && a1 == b1;
        let mirrored = p[0] == 1.0 - p[1] && a0 == b1 && a1 == b0;
        if !(identical || mirrored) {
            return Ok(LotteryPair {
                p,
                x0: [a0, b0],
                x1: [a1, b1],
            });
        }
    }
    Err(SampleError::Exhausted {
        attempts: max_rejections,
    })
}

/// Unordered 2-combinations of `domain`, each exactly once, in the domain's
/// own order.
fn combinations2(domain: &[i32]) -> Vec<(i32, i32)> {
    let mut out = Vec::with_capacity(domain.len() * (domain.len() - 1) / 2);
    for i in 0..domain.len() {
        for j in i + 1..domain.len() {
            out.push((domain[i], domain[j]));
        }
    }
    out
}

fn reversed(mut domain: [i32; 3]) -> [i32; 3] {
    domain.reverse();
    domain
}

/// Rows with equal probabilities on both sides: `P_SET` × outcome pairs.
fn equal_p_rows(outcome_pairs: &[(i32, i32)]) -> Vec<LotteryPair> {
    let mut out = Vec::with_capacity(P_SET.len() * outcome_pairs.len());
    for p in P_SET {
        for &(a, b) in outcome_pairs {
            out.push(LotteryPair::main_only([p, p], [a, b]));
        }
    }
    out
}

/// Rows with the same outcome on both sides: probability pairs × outcomes.
fn fixed_x_rows(outcomes: &[i32]) -> Vec<LotteryPair> {
    let p_pairs = probability_pairs();
    let mut out = Vec::with_capacity(p_pairs.len() * outcomes.len());
    for (p0, p1) in p_pairs {
        for &x in outcomes {
            out.push(LotteryPair::main_only([p0, p1], [x, x]));
        }
    }
    out
}

/// Congruent/incongruent rows: ascending probability pairs × the already
/// ordered outcome pairs.
fn ordered_rows(outcome_pairs: &[(i32, i32)]) -> Vec<LotteryPair> {
    let p_pairs = probability_pairs();
    let mut out = Vec::with_capacity(p_pairs.len() * outcome_pairs.len());
    for (p0, p1) in p_pairs {
        for &(a, b) in outcome_pairs {
            out.push(LotteryPair::main_only([p0, p1], [a, b]));
        }
    }
    out
}

/// Ascending 2-combinations of `P_SET`.
fn probability_pairs() -> Vec<(f64, f64)> {
    let mut out = Vec::with_capacity(P_SET.len() * (P_SET.len() - 1) / 2);
    for i in 0..P_SET.len() {
        for j in i + 1..P_SET.len() {
            out.push((P_SET[i], P_SET[j]));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn ids_are_one_through_nine_in_table_order() {
        let ids: Vec<u8> = Category::ENUMERATED.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn combinations2_enumerates_each_unordered_pair_once() {
        assert_eq!(combinations2(&[1, 2, 3]), vec![(1, 2), (1, 3), (2, 3)]);
        assert_eq!(
            combinations2(&[-3, -2, -1]),
            vec![(-3, -2), (-3, -1), (-2, -1)]
        );
    }

    #[test]
    fn enumeration_sizes_match_closed_forms() {
        let expected = [36, 12, 12, 18, 18, 18, 18, 18, 18];
        for (cat, want) in Category::ENUMERATED.iter().zip(expected) {
            assert_eq!(cat.enumerate().len(), want, "category {}", cat.id());
        }
    }

    #[test]
    fn enumeration_is_deterministic() {
        for cat in Category::ENUMERATED {
            assert_eq!(cat.enumerate(), cat.enumerate());
        }
    }

    #[test]
    fn control_positive_rows_are_unordered_pairs() {
        let rows = Category::ControlPositive.enumerate();
        assert!(rows.contains(&LotteryPair::main_only([0.25, 0.25], [1, 2])));
        assert!(rows.contains(&LotteryPair::main_only([1.0, 1.0], [2, 3])));
        // (2, 1) would duplicate (1, 2) as an unordered pair.
        assert!(!rows.contains(&LotteryPair::main_only([0.25, 0.25], [2, 1])));
        for row in &rows {
            assert_eq!(row.p[0], row.p[1]);
            assert!(row.x0[0] < row.x0[1]);
        }
    }

    #[test]
    fn incongruent_positive_pairs_high_outcome_with_low_probability() {
        for row in Category::IncongruentPositive.enumerate() {
            assert!(row.p[0] < row.p[1]);
            assert!(row.x0[0] > row.x0[1]);
        }
    }

    #[test]
    fn congruent_negative_pairs_worse_outcome_with_high_probability() {
        for row in Category::CongruentNegative.enumerate() {
            assert!(row.p[0] < row.p[1]);
            assert!(row.x0[0] > row.x0[1], "less-bad loss at the low probability");
        }
    }

    #[test]
    fn mixed_sign_rows_put_negative_first() {
        for row in Category::ControlMixed.enumerate() {
            assert_eq!(row.p[0], row.p[1]);
            assert!(row.x0[0] < 0 && row.x0[1] > 0);
        }
    }

    #[test]
    fn random_has_no_enumeration() {
        assert!(Category::Random.enumerate().is_empty());
    }

    #[test]
    fn sampled_pairs_respect_category_constraints() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            for cat in Category::ENUMERATED {
                let pair = cat.sample_pair(&mut rng, 10_000).unwrap();
                assert!(P_SET.contains(&pair.p[0]) && P_SET.contains(&pair.p[1]));
                match cat {
                    Category::ControlMixed => {
                        assert_eq!(pair.p[0], pair.p[1]);
                        assert!(pair.x0[0] < 0 && pair.x0[1] > 0);
                    }
                    Category::ControlPositive | Category::ControlNegative => {
                        assert_eq!(pair.p[0], pair.p[1]);
                        assert_ne!(pair.x0[0], pair.x0[1]);
                    }
                    Category::FixedOutcomePositive | Category::FixedOutcomeNegative => {
                        assert_ne!(pair.p[0], pair.p[1]);
                        assert_eq!(pair.x0[0], pair.x0[1]);
                    }
                    Category::IncongruentPositive | Category::CongruentNegative => {
                        assert!(pair.p[0] < pair.p[1]);
                        assert!(pair.x0[0] > pair.x0[1]);
                    }
                    Category::IncongruentNegative | Category::CongruentPositive => {
                        assert!(pair.p[0] < pair.p[1]);
                        assert!(pair.x0[0] < pair.x0[1]);
                    }
                    Category::Random => unreachable!(),
                }
                assert_eq!(pair.x1, [0, 0]);
            }
        }
    }

    #[test]
    fn unconstrained_sampler_rejects_degenerate_pairs() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..2_000 {
            let pair = Category::Random.sample_pair(&mut rng, 10_000).unwrap();
            let identical =
                pair.p[0] == pair.p[1] && pair.x0[0] == pair.x0[1] && pair.x1[0] == pair.x1[1];
            let mirrored = pair.p[0] == 1.0 - pair.p[1]
                && pair.x0[0] == pair.x1[1]
                && pair.x1[0] == pair.x0[1];
            assert!(!identical && !mirrored, "degenerate pair: {pair:?}");
            // Per-side outcomes are drawn without replacement.
            assert_ne!(pair.x0[0], pair.x1[0]);
            assert_ne!(pair.x0[1], pair.x1[1]);
        }
    }

    /// An RNG that always yields zero, forcing every unconstrained candidate
    /// into the identical-sides rejection branch.
    struct ZeroRng;

    impl rand::RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }
        fn next_u64(&mut self) -> u64 {
            0
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }
    }

    #[test]
    fn unconstrained_sampler_gives_up_after_budget() {
        let mut rng = ZeroRng;
        let err = Category::Random.sample_pair(&mut rng, 25).unwrap_err();
        assert!(matches!(err, SampleError::Exhausted { attempts: 25 }));
    }
}
