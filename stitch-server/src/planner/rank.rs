//! Itinerary scoring and ranking.
//!
//! Scores each itinerary as a weighted sum of its totals, collapses
//! near-identical scores, and presents the best few first.

use std::collections::HashMap;

use crate::domain::{Itinerary, ItineraryLabel, Priority};

/// Scale applied to the unreliability fraction so it is comparable to the
/// other score terms.
const RELIABILITY_SCALE: f64 = 1_000.0;

/// Width of a deduplication bucket, in score units.
const DEDUP_BUCKET: f64 = 60.0;

/// Bonus added to the weight of the prioritised dimension.
pub const PRIORITY_BONUS: f64 = 0.25;

/// Weights for each scoring dimension.
///
/// The base distribution sums to 1; the priority bonus is added on top
/// without renormalising.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub time: f64,
    pub cost: f64,
    pub co2: f64,
    pub reliability: f64,
}

impl ScoringWeights {
    /// Base weights before any priority bonus.
    pub const BASE: ScoringWeights = ScoringWeights {
        time: 0.45,
        cost: 0.25,
        co2: 0.20,
        reliability: 0.10,
    };

    /// Base weights with the bonus applied to `priority`.
    pub fn for_priority(priority: Priority) -> Self {
        let mut weights = Self::BASE;
        match priority {
            Priority::Time => weights.time += PRIORITY_BONUS,
            Priority::Cost => weights.cost += PRIORITY_BONUS,
            Priority::Co2 => weights.co2 += PRIORITY_BONUS,
            Priority::Reliability => weights.reliability += PRIORITY_BONUS,
        }
        weights
    }

    /// Composite score for an itinerary. Lower is better.
    pub fn raw_score(&self, itinerary: &Itinerary) -> f64 {
        self.time * itinerary.total_duration_seconds()
            + self.cost * itinerary.total_cost_units()
            + self.co2 * itinerary.total_co2_grams()
            + self.reliability * (1.0 - itinerary.reliability_score()) * RELIABILITY_SCALE
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::for_priority(Priority::default())
    }
}

fn bucket(raw_score: f64) -> i64 {
    (raw_score / DEDUP_BUCKET).round() as i64
}

/// Collapse itineraries whose scores fall in the same bucket.
///
/// Keeps the lowest-scoring itinerary of each bucket, at the position where
/// the bucket was first seen. Ties keep the earlier itinerary.
pub fn deduplicate(itineraries: Vec<Itinerary>) -> Vec<Itinerary> {
    if itineraries.len() <= 1 {
        return itineraries;
    }

    let mut result: Vec<Itinerary> = Vec::with_capacity(itineraries.len());
    let mut positions: HashMap<i64, usize> = HashMap::new();

    for itinerary in itineraries {
        let key = bucket(itinerary.raw_score());
        match positions.get(&key) {
            Some(&idx) => {
                if itinerary.raw_score() < result[idx].raw_score() {
                    result[idx] = itinerary;
                }
            }
            None => {
                positions.insert(key, result.len());
                result.push(itinerary);
            }
        }
    }

    result
}

/// Score, deduplicate, sort, truncate and label.
///
/// Sorting is stable, so equal scores keep their input order. Labels are
/// assigned by final position.
pub fn rank_and_label(
    itineraries: Vec<Itinerary>,
    priority: Priority,
    top_k: usize,
) -> Vec<Itinerary> {
    let weights = ScoringWeights::for_priority(priority);

    let scored: Vec<Itinerary> = itineraries
        .into_iter()
        .map(|it| {
            let score = weights.raw_score(&it);
            it.with_raw_score(score)
        })
        .collect();

    let mut ranked = deduplicate(scored);
    ranked.sort_by(|a, b| a.raw_score().total_cmp(&b.raw_score()));
    ranked.truncate(top_k);

    ranked
        .into_iter()
        .enumerate()
        .map(|(position, it)| it.with_label(ItineraryLabel::for_position(position)))
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{ConnectorMode, HubId, Leg, LegMode};
    use proptest::prelude::*;

    fn make_itinerary(
        id: usize,
        duration_secs: f64,
        cost: f64,
        co2: f64,
        reliability: f64,
    ) -> Itinerary {
        let legs = [
            Leg::new(ConnectorMode::Driving.into(), 1_000.0, duration_secs / 4.0).unwrap(),
            Leg::new(LegMode::Trunk, 8_000.0, duration_secs / 2.0).unwrap(),
            Leg::new(ConnectorMode::Bicycling.into(), 1_000.0, duration_secs / 4.0).unwrap(),
        ];
        Itinerary::new(
            format!("it{id}"),
            legs,
            HubId::parse("a").unwrap(),
            HubId::parse("b").unwrap(),
            cost,
            co2,
            reliability,
        )
        .unwrap()
    }

    fn any_itineraries() -> impl Strategy<Value = Vec<Itinerary>> {
        prop::collection::vec(
            (0.0f64..20_000.0, 0.0f64..2_000.0, 0.0f64..5_000.0, 0.0f64..=1.0),
            0..30,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (d, c, e, r))| make_itinerary(i, d, c, e, r))
                .collect()
        })
    }

    fn any_priority() -> impl Strategy<Value = Priority> {
        prop_oneof![
            Just(Priority::Time),
            Just(Priority::Cost),
            Just(Priority::Co2),
            Just(Priority::Reliability),
        ]
    }

    proptest! {
        /// Output is sorted by score
        #[test]
        fn ranking_is_monotonic(
            itineraries in any_itineraries(),
            priority in any_priority(),
            top_k in 1usize..10,
        ) {
            let ranked = rank_and_label(itineraries, priority, top_k);

            for pair in ranked.windows(2) {
                prop_assert!(pair[0].raw_score() <= pair[1].raw_score());
            }
        }

        /// Output never exceeds top_k or the input size
        #[test]
        fn ranking_respects_top_k(
            itineraries in any_itineraries(),
            priority in any_priority(),
            top_k in 1usize..10,
        ) {
            let input_len = itineraries.len();
            let ranked = rank_and_label(itineraries, priority, top_k);

            prop_assert!(ranked.len() <= top_k);
            prop_assert!(ranked.len() <= input_len);
        }

        /// A second dedup pass changes nothing
        #[test]
        fn deduplicate_is_idempotent(itineraries in any_itineraries(), priority in any_priority()) {
            let weights = ScoringWeights::for_priority(priority);
            let scored: Vec<Itinerary> = itineraries
                .into_iter()
                .map(|it| {
                    let s = weights.raw_score(&it);
                    it.with_raw_score(s)
                })
                .collect();

            let once = deduplicate(scored);
            let twice = deduplicate(once.clone());

            prop_assert_eq!(&once, &twice);

            let mut buckets: Vec<i64> = once.iter().map(|it| bucket(it.raw_score())).collect();
            let before = buckets.len();
            buckets.sort_unstable();
            buckets.dedup();
            prop_assert_eq!(buckets.len(), before);
        }

        /// Every output itinerary came from the input
        #[test]
        fn ranking_preserves_identity(
            itineraries in any_itineraries(),
            priority in any_priority(),
        ) {
            let input_ids: Vec<String> = itineraries.iter().map(|it| it.id().to_string()).collect();
            let ranked = rank_and_label(itineraries, priority, 5);

            for it in &ranked {
                prop_assert!(input_ids.iter().any(|id| id == it.id()));
            }
        }
    }
}
