//! Adaptive word selection: distribution-targeted sampling over Leitner
//! boxes, plus the mastery-driven distractor count.

use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::constants::{
    BUTTONS_ALMOST_THERE, BUTTONS_LEARNING, BUTTONS_MASTERED, BUTTONS_PRACTISING, SELECT_MIX_FAMILIAR,
    SELECT_MIX_KNOWN, SELECT_MIX_LEARNING, SELECT_MIX_NEW, SELECT_NEW_MIN,
};
use crate::leitner::{self, LeitnerBox};
use crate::mastery::MasteryBand;
use crate::record::WordRecord;

/// Selection view of one pool word: display text plus the scheduling
/// fields the sampler needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolEntry {
    pub word: String,
    pub leitner_box: LeitnerBox,
    pub attempts: u32,
}

impl PoolEntry {
    #[must_use]
    pub fn of(word: &str, record: &WordRecord) -> Self {
        Self {
            word: word.to_string(),
            leitner_box: record.leitner_box,
            attempts: record.attempts,
        }
    }
}

/// Pick a session's word list from a difficulty pool.
///
/// Due words are bucketed by box and drawn against the 20/30/30/20 mix,
/// then any shortfall is filled from the whole pool. The result is
/// shuffled once more so callers cannot infer box membership from
/// ordering, holds no duplicates, and has length `min(count, pool size)`.
#[must_use]
pub fn select_adaptive_with_rng<R>(
    pool: &[PoolEntry],
    upcoming_session: u32,
    count: usize,
    rng: &mut R,
) -> Vec<String>
where
    R: Rng + ?Sized,
{
    let mut buckets: [Vec<&PoolEntry>; 4] = [Vec::new(), Vec::new(), Vec::new(), Vec::new()];
    for entry in pool {
        if leitner::is_due(entry.leitner_box, entry.attempts, upcoming_session) {
            buckets[usize::from(entry.leitner_box.number() - 1)].push(entry);
        }
    }

    let mut selected: Vec<String> = Vec::with_capacity(count);
    let mut used: BTreeSet<String> = BTreeSet::new();

    for (bucket, target) in buckets.iter_mut().zip(box_targets(count)) {
        bucket.shuffle(rng);
        let mut needed = target;
        for entry in bucket.iter() {
            if needed == 0 {
                break;
            }
            if !used.insert(entry.word.to_lowercase()) {
                continue;
            }
            selected.push(entry.word.clone());
            needed -= 1;
        }
    }

    // Shortfall fill ignores due-ness: any pool word not yet picked.
    if selected.len() < count {
        let mut remainder: Vec<&PoolEntry> = pool.iter().collect();
        remainder.shuffle(rng);
        for entry in remainder {
            if selected.len() >= count {
                break;
            }
            if !used.insert(entry.word.to_lowercase()) {
                continue;
            }
            selected.push(entry.word.clone());
        }
    }

    selected.shuffle(rng);
    selected.truncate(count);
    selected
}

/// Per-box draw targets, each share rounded independently. Box 1 never
/// targets below one word.
fn box_targets(count: usize) -> [usize; 4] {
    let share = |mix: f64| (count as f64 * mix).round() as usize;
    [
        share(SELECT_MIX_NEW).max(SELECT_NEW_MIN),
        share(SELECT_MIX_LEARNING),
        share(SELECT_MIX_FAMILIAR),
        share(SELECT_MIX_KNOWN),
    ]
}

/// Total buttons to show for a word of the given mastery, the target
/// included. Low mastery keeps the field small.
#[must_use]
pub const fn distractor_count(mastery: u8) -> usize {
    match MasteryBand::from_score(mastery) {
        MasteryBand::Learning => BUTTONS_LEARNING,
        MasteryBand::Practising => BUTTONS_PRACTISING,
        MasteryBand::AlmostThere => BUTTONS_ALMOST_THERE,
        MasteryBand::Mastered => BUTTONS_MASTERED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn entry(word: &str, leitner_box: LeitnerBox, attempts: u32) -> PoolEntry {
        PoolEntry {
            word: word.to_string(),
            leitner_box,
            attempts,
        }
    }

    fn fresh_pool(words: &[&str]) -> Vec<PoolEntry> {
        words
            .iter()
            .map(|w| entry(w, LeitnerBox::New, 0))
            .collect()
    }

    fn rng() -> SmallRng {
        SmallRng::from_seed([7_u8; 32])
    }

    #[test]
    fn selection_returns_requested_count_without_duplicates() {
        let pool = fresh_pool(&[
            "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l",
        ]);
        let selected = select_adaptive_with_rng(&pool, 1, 10, &mut rng());
        assert_eq!(selected.len(), 10);
        let unique: BTreeSet<_> = selected.iter().map(|w| w.to_lowercase()).collect();
        assert_eq!(unique.len(), selected.len());
    }

    #[test]
    fn selection_is_capped_by_pool_size() {
        let pool = fresh_pool(&["a", "b", "c"]);
        let selected = select_adaptive_with_rng(&pool, 1, 10, &mut rng());
        assert_eq!(selected.len(), 3);
    }

    #[test]
    fn empty_pool_selects_nothing() {
        let selected = select_adaptive_with_rng(&[], 1, 10, &mut rng());
        assert!(selected.is_empty());
    }

    #[test]
    fn fill_pass_reaches_count_when_few_words_are_due() {
        // Session 7: boxes 2-4 all off-cadence, so only box 1 is due.
        let mut pool = vec![entry("a", LeitnerBox::New, 3)];
        for word in ["b", "c", "d", "e", "f"] {
            pool.push(entry(word, LeitnerBox::Known, 9));
        }
        let selected = select_adaptive_with_rng(&pool, 7, 6, &mut rng());
        assert_eq!(selected.len(), 6);
    }

    #[test]
    fn off_cadence_boxes_lose_to_due_words_when_no_fill_is_needed() {
        // Session 3: box 2 (every 2 sessions) is off-cadence, box 1 is
        // always due. With the request satisfied from the due bucket, the
        // fill pass never runs and the off-cadence word stays out.
        let pool = vec![
            entry("fresh", LeitnerBox::New, 2),
            entry("two", LeitnerBox::Learning, 5),
        ];
        let selected = select_adaptive_with_rng(&pool, 3, 1, &mut rng());
        assert_eq!(selected, vec!["fresh".to_string()]);
    }

    #[test]
    fn case_variants_count_as_the_same_word() {
        let pool = vec![
            entry("The", LeitnerBox::New, 0),
            entry("the", LeitnerBox::New, 0),
        ];
        let selected = select_adaptive_with_rng(&pool, 1, 2, &mut rng());
        assert_eq!(selected.len(), 1);
    }

    #[test]
    fn box_targets_follow_the_mix() {
        assert_eq!(box_targets(10), [2, 3, 3, 2]);
        assert_eq!(box_targets(20), [4, 6, 6, 4]);
        // Box 1 target never drops to zero.
        assert_eq!(box_targets(1), [1, 0, 0, 0]);
    }

    #[test]
    fn distractor_count_steps_with_mastery() {
        assert_eq!(distractor_count(0), 4);
        assert_eq!(distractor_count(39), 4);
        assert_eq!(distractor_count(40), 6);
        assert_eq!(distractor_count(69), 6);
        assert_eq!(distractor_count(70), 8);
        assert_eq!(distractor_count(89), 8);
        assert_eq!(distractor_count(90), 10);
        assert_eq!(distractor_count(100), 10);
        // Non-decreasing over the whole range.
        let mut previous = 0;
        for mastery in 0..=100 {
            let buttons = distractor_count(mastery);
            assert!(buttons >= previous);
            previous = buttons;
        }
    }
}
