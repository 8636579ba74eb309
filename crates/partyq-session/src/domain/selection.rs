//! Truth/dare mix for a session's question set.

use partyq_core::question::Question;

/// The questions chosen for a session, before shuffling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Truths first, then dares.
    pub questions: Vec<Question>,
    /// How many truths were taken.
    pub truths: usize,
    /// How many dares were taken.
    pub dares: usize,
    /// How far the truth count ended up from the ratio's target.
    pub backfilled: usize,
}

/// Number of truths the ratio asks for out of `count`.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn truth_target(count: usize, ratio: f64) -> usize {
    let ratio = ratio.clamp(0.0, 1.0);
    ((count as f64 * ratio).round() as usize).min(count)
}

/// Picks up to `count` questions from the two pools, aiming for
/// `truth_target(count, ratio)` truths. A pool that runs short is made up
/// from the other one; if both run short the result is smaller than
/// `count`.
#[must_use]
pub fn mix(truths: Vec<Question>, dares: Vec<Question>, count: usize, ratio: f64) -> Selection {
    let target = truth_target(count, ratio);
    let mut take_truths = target.min(truths.len());
    let take_dares = (count - take_truths).min(dares.len());
    let shortfall = count - take_truths - take_dares;
    take_truths += shortfall.min(truths.len() - take_truths);

    let mut questions: Vec<Question> = truths.into_iter().take(take_truths).collect();
    questions.extend(dares.into_iter().take(take_dares));

    Selection {
        questions,
        truths: take_truths,
        dares: take_dares,
        backfilled: take_truths.abs_diff(target),
    }
}
