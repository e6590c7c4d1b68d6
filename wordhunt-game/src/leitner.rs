//! Leitner-box spaced repetition: box identity, promotion and demotion,
//! and the due-for-review predicate used by adaptive selection.

use std::collections::BTreeSet;

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::constants::{
    PROMOTE_FAMILIAR_CORRECT, PROMOTE_FAMILIAR_DAYS, PROMOTE_KNOWN_CORRECT, PROMOTE_KNOWN_DAYS,
    PROMOTE_LEARNING_CORRECT,
};
use crate::record::{AttemptSample, WordRecord};

/// Spaced-repetition bucket; higher boxes are reviewed less often.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum LeitnerBox {
    /// Box 1: new or struggling words, reviewed every session.
    #[default]
    New,
    /// Box 2.
    Learning,
    /// Box 3.
    Familiar,
    /// Box 4.
    Known,
}

impl LeitnerBox {
    pub const ALL: [Self; 4] = [Self::New, Self::Learning, Self::Familiar, Self::Known];

    /// Conventional 1-based box number.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::New => 1,
            Self::Learning => 2,
            Self::Familiar => 3,
            Self::Known => 4,
        }
    }

    /// Human label shown on the progress dashboard.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::New => "New / Struggling",
            Self::Learning => "Learning",
            Self::Familiar => "Familiar",
            Self::Known => "Known",
        }
    }

    /// Nominal review cadence, in sessions.
    #[must_use]
    pub const fn review_every(self) -> u32 {
        match self {
            Self::New => 1,
            Self::Learning => 2,
            Self::Familiar => 3,
            Self::Known => 5,
        }
    }

    /// The next box up; saturates at [`Self::Known`].
    #[must_use]
    pub const fn promoted(self) -> Self {
        match self {
            Self::New => Self::Learning,
            Self::Learning => Self::Familiar,
            Self::Familiar | Self::Known => Self::Known,
        }
    }

    /// The next box down; saturates at [`Self::New`].
    #[must_use]
    pub const fn demoted(self) -> Self {
        match self {
            Self::New | Self::Learning => Self::New,
            Self::Familiar => Self::Learning,
            Self::Known => Self::Familiar,
        }
    }
}

struct AdvanceCriteria {
    correct_needed: u32,
    days_needed: Option<usize>,
}

/// Lifetime-correct and distinct-day thresholds to advance INTO a box.
const fn advance_criteria(target: LeitnerBox) -> Option<AdvanceCriteria> {
    match target {
        LeitnerBox::New => None,
        LeitnerBox::Learning => Some(AdvanceCriteria {
            correct_needed: PROMOTE_LEARNING_CORRECT,
            days_needed: None,
        }),
        LeitnerBox::Familiar => Some(AdvanceCriteria {
            correct_needed: PROMOTE_FAMILIAR_CORRECT,
            days_needed: Some(PROMOTE_FAMILIAR_DAYS),
        }),
        LeitnerBox::Known => Some(AdvanceCriteria {
            correct_needed: PROMOTE_KNOWN_CORRECT,
            days_needed: Some(PROMOTE_KNOWN_DAYS),
        }),
    }
}

/// Advance a record by at most one box if the next box's criteria are met.
///
/// Invoked only after a correct answer. Never skips levels, even when the
/// record already satisfies thresholds further up.
pub(crate) fn maybe_advance(record: &mut WordRecord) {
    if record.leitner_box == LeitnerBox::Known {
        return;
    }
    let target = record.leitner_box.promoted();
    let Some(criteria) = advance_criteria(target) else {
        return;
    };
    if record.correct < criteria.correct_needed {
        return;
    }
    if let Some(days_needed) = criteria.days_needed
        && unique_correct_days(&record.sessions) < days_needed
    {
        return;
    }
    record.leitner_box = target;
}

/// Distinct calendar days among the logged correct answers.
///
/// Bounded by the attempt log capacity, so the consistency contribution can
/// never grow past the log size.
#[must_use]
pub(crate) fn unique_correct_days(samples: &[AttemptSample]) -> usize {
    unique_days(samples.iter().filter(|s| s.correct).map(|s| s.date))
}

fn unique_days(stamps: impl Iterator<Item = i64>) -> usize {
    let mut days = BTreeSet::new();
    for ms in stamps {
        if let Some(stamp) = DateTime::from_timestamp_millis(ms) {
            days.insert(stamp.date_naive());
        }
    }
    days.len()
}

/// Review eligibility for the upcoming session.
///
/// Box 1 is always due; higher boxes are due when the upcoming session
/// number lands on their cadence; a never-attempted word is due regardless
/// of its nominal box.
#[must_use]
pub fn is_due(leitner_box: LeitnerBox, attempts: u32, upcoming_session: u32) -> bool {
    leitner_box == LeitnerBox::New
        || upcoming_session % leitner_box.review_every() == 0
        || attempts == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY_MS: i64 = 86_400_000;

    fn record_with(correct: u32, leitner_box: LeitnerBox, days: &[i64]) -> WordRecord {
        let mut record = WordRecord::new("cat");
        record.correct = correct;
        record.attempts = correct;
        record.leitner_box = leitner_box;
        for (i, day) in days.iter().enumerate() {
            record.sessions.push(AttemptSample {
                date: day * DAY_MS + i as i64,
                correct: true,
                ms: 1_000,
            });
        }
        record
    }

    #[test]
    fn box_numbers_and_cadence() {
        assert_eq!(LeitnerBox::New.number(), 1);
        assert_eq!(LeitnerBox::Known.number(), 4);
        assert_eq!(LeitnerBox::New.review_every(), 1);
        assert_eq!(LeitnerBox::Learning.review_every(), 2);
        assert_eq!(LeitnerBox::Familiar.review_every(), 3);
        assert_eq!(LeitnerBox::Known.review_every(), 5);
    }

    #[test]
    fn demotion_saturates_at_box_one() {
        assert_eq!(LeitnerBox::New.demoted(), LeitnerBox::New);
        assert_eq!(LeitnerBox::Known.demoted(), LeitnerBox::Familiar);
    }

    #[test]
    fn advance_to_learning_needs_two_correct() {
        let mut record = record_with(1, LeitnerBox::New, &[0]);
        maybe_advance(&mut record);
        assert_eq!(record.leitner_box, LeitnerBox::New);

        let mut record = record_with(2, LeitnerBox::New, &[0]);
        maybe_advance(&mut record);
        assert_eq!(record.leitner_box, LeitnerBox::Learning);
    }

    #[test]
    fn advance_to_familiar_needs_day_spread() {
        // Four corrects on one calendar day: counts not met on the day axis.
        let mut record = record_with(4, LeitnerBox::Learning, &[0]);
        maybe_advance(&mut record);
        assert_eq!(record.leitner_box, LeitnerBox::Learning);

        let mut record = record_with(4, LeitnerBox::Learning, &[0, 1]);
        maybe_advance(&mut record);
        assert_eq!(record.leitner_box, LeitnerBox::Familiar);
    }

    #[test]
    fn advance_never_skips_levels() {
        // Qualifies for Known outright, but starts at New: one step only.
        let mut record = record_with(10, LeitnerBox::New, &[0, 1, 2, 3]);
        maybe_advance(&mut record);
        assert_eq!(record.leitner_box, LeitnerBox::Learning);
    }

    #[test]
    fn advance_is_noop_at_top_box() {
        let mut record = record_with(20, LeitnerBox::Known, &[0, 1, 2, 3]);
        maybe_advance(&mut record);
        assert_eq!(record.leitner_box, LeitnerBox::Known);
    }

    #[test]
    fn wrong_answers_do_not_count_toward_day_spread() {
        let mut record = record_with(4, LeitnerBox::Learning, &[0]);
        record.sessions.push(AttemptSample {
            date: DAY_MS + 5,
            correct: false,
            ms: 1_000,
        });
        maybe_advance(&mut record);
        assert_eq!(record.leitner_box, LeitnerBox::Learning);
    }

    #[test]
    fn due_rules_follow_cadence() {
        // Box 1 is due every session.
        assert!(is_due(LeitnerBox::New, 5, 1));
        assert!(is_due(LeitnerBox::New, 5, 7));
        // Box 2 is due every second session.
        assert!(!is_due(LeitnerBox::Learning, 5, 3));
        assert!(is_due(LeitnerBox::Learning, 5, 4));
        // Box 4 every fifth.
        assert!(!is_due(LeitnerBox::Known, 5, 4));
        assert!(is_due(LeitnerBox::Known, 5, 5));
    }

    #[test]
    fn unattempted_words_are_always_due() {
        assert!(is_due(LeitnerBox::Known, 0, 3));
    }
}
