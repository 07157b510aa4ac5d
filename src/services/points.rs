//! Points & tier engine.
//!
//! Pure computation with no repository access: converting a logged waste
//! collection into a point award (including the waste-reduction trend bonus)
//! and mapping a cumulative point total to a tier. Callers are responsible
//! for persisting the collection event, crediting the account and emitting a
//! tier-up notification when the new total crosses a threshold.

use chrono::{DateTime, Duration, Utc};

use crate::models::{CollectionEvent, WasteType};

/// One row of the tier threshold table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tier {
    pub level: u8,
    pub name: &'static str,
    /// Minimum cumulative points required to hold this tier.
    pub min_points: u64,
}

/// Tier table, ordered by threshold descending so lookup is a single forward
/// scan. Data-driven on purpose: adding a tier means adding a row, not
/// touching the engine.
pub const TIERS: [Tier; 7] = [
    Tier { level: 7, name: "Earth-Guardian", min_points: 50_000 },
    Tier { level: 6, name: "Green-Legend", min_points: 20_000 },
    Tier { level: 5, name: "Eco-Champion", min_points: 5_000 },
    Tier { level: 4, name: "Planet-Hero", min_points: 700 },
    Tier { level: 3, name: "Waste-Warrior", min_points: 300 },
    Tier { level: 2, name: "Green-Helper", min_points: 100 },
    Tier { level: 1, name: "Eco-Starter", min_points: 0 },
];

/// Length of the trend window examined for the plastic bonus.
pub const TREND_WINDOW_DAYS: i64 = 30;

/// Multiplier applied when the account demonstrably reduced its plastic
/// output across the trend window.
pub const TREND_BONUS_MULTIPLIER: f64 = 1.2;

/// Map a cumulative point total to its tier.
///
/// Total for every input: scans the table highest-threshold first and
/// returns the first row whose `min_points <= points`; the level-1 row has a
/// zero threshold, so it always matches.
///
/// # Examples
/// ```
/// use greenquest::services::points::tier_for;
///
/// assert_eq!(tier_for(0).level, 1);
/// assert_eq!(tier_for(99).level, 1);
/// assert_eq!(tier_for(100).level, 2);
/// assert_eq!(tier_for(1250).name, "Planet-Hero");
/// ```
pub fn tier_for(points: u64) -> &'static Tier {
    TIERS
        .iter()
        .find(|t| t.min_points <= points)
        .unwrap_or(&TIERS[TIERS.len() - 1])
}

/// Base point rate per kilogram for a waste category.
///
/// These are configuration constants of the reward scheme, not business law;
/// they mirror the rates the collection team publishes.
pub fn rate_per_kg(waste_type: WasteType) -> u64 {
    match waste_type {
        WasteType::Plastic => 10,
        WasteType::Organic => 15,
        WasteType::EcoFriendly => 25,
    }
}

/// Result of a point-award computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointAward {
    pub points: u64,
    /// Human-readable bonus explanation, surfaced to the end user. Empty
    /// when no bonus applied.
    pub explanation: String,
}

/// Compute the point award for a waste collection.
///
/// The base award is `weight_kg × rate_per_kg(waste_type)`. For plastic
/// only, the account's plastic events within the trailing 30 days of `as_of`
/// are partitioned at the 15-day midpoint; if the earlier half's total
/// weight is strictly positive and the later half's total is strictly below
/// it, the account reduced its plastic output and a +20% bonus applies.
///
/// The final award is rounded **half away from zero** (`f64::round`), so
/// 2.5 points become 3.
///
/// # Arguments
/// * `waste_type` - Category being collected
/// * `weight_kg` - Collected weight; validated strictly positive upstream
/// * `history` - The account's prior events of the same category; events
///   outside the 30-day window or dated after `as_of` are ignored
/// * `as_of` - Evaluation instant for the trend window
pub fn award(
    waste_type: WasteType,
    weight_kg: f64,
    history: &[CollectionEvent],
    as_of: DateTime<Utc>,
) -> PointAward {
    let base = weight_kg * rate_per_kg(waste_type) as f64;

    let mut multiplier = 1.0;
    let mut explanation = String::new();

    if waste_type == WasteType::Plastic {
        if let Some((earlier_kg, later_kg)) = plastic_trend(history, as_of) {
            multiplier = TREND_BONUS_MULTIPLIER;
            explanation = format!(
                "Waste reduction bonus (+20%): plastic down from {:.1} kg to {:.1} kg over the last {} days",
                earlier_kg, later_kg, TREND_WINDOW_DAYS
            );
        }
    }

    PointAward {
        points: (base * multiplier).round() as u64,
        explanation,
    }
}

/// Evaluate the plastic reduction trend over the trailing window.
///
/// Returns `Some((earlier_kg, later_kg))` when the bonus condition holds:
/// the earlier half `[as_of − 30d, as_of − 15d)` has strictly positive
/// weight and the later half `[as_of − 15d, as_of]` weighs strictly less.
fn plastic_trend(history: &[CollectionEvent], as_of: DateTime<Utc>) -> Option<(f64, f64)> {
    let window_start = as_of - Duration::days(TREND_WINDOW_DAYS);
    let midpoint = as_of - Duration::days(TREND_WINDOW_DAYS / 2);

    let mut earlier_kg = 0.0;
    let mut later_kg = 0.0;
    for event in history {
        if event.waste_type != WasteType::Plastic || event.date > as_of {
            continue;
        }
        if event.date >= window_start && event.date < midpoint {
            earlier_kg += event.weight_kg;
        } else if event.date >= midpoint {
            later_kg += event.weight_kg;
        }
    }

    if earlier_kg > 0.0 && later_kg < earlier_kg {
        Some((earlier_kg, later_kg))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountId, CollectionId};
    use proptest::prelude::*;

    fn plastic_event(weight_kg: f64, days_ago: i64, as_of: DateTime<Utc>) -> CollectionEvent {
        CollectionEvent {
            id: CollectionId(0),
            account_id: AccountId(1),
            waste_type: WasteType::Plastic,
            weight_kg,
            points: 0,
            collected_by: "admin123".to_string(),
            date: as_of - Duration::days(days_ago),
        }
    }

    #[test]
    fn tier_thresholds() {
        assert_eq!(tier_for(0).level, 1);
        assert_eq!(tier_for(99).level, 1);
        assert_eq!(tier_for(100).level, 2);
        assert_eq!(tier_for(300).level, 3);
        assert_eq!(tier_for(700).level, 4);
        assert_eq!(tier_for(700).name, "Planet-Hero");
        assert_eq!(tier_for(4_999).level, 4);
        assert_eq!(tier_for(50_000).level, 7);
        assert_eq!(tier_for(u64::MAX).level, 7);
    }

    #[test]
    fn award_without_history_is_base_rate_only() {
        let result = award(WasteType::Plastic, 10.0, &[], Utc::now());
        assert_eq!(result.points, 100);
        assert!(result.explanation.is_empty());
    }

    #[test]
    fn award_uses_category_rates() {
        let now = Utc::now();
        assert_eq!(award(WasteType::Organic, 2.0, &[], now).points, 30);
        assert_eq!(award(WasteType::EcoFriendly, 50.0, &[], now).points, 1250);
    }

    #[test]
    fn reduction_trend_earns_bonus() {
        let as_of = Utc::now();
        // 20 kg in the earlier half, 5 kg in the later half
        let history = vec![
            plastic_event(12.0, 25, as_of),
            plastic_event(8.0, 20, as_of),
            plastic_event(5.0, 5, as_of),
        ];

        let result = award(WasteType::Plastic, 10.0, &history, as_of);
        assert_eq!(result.points, 120); // 100 × 1.2
        assert!(result.explanation.contains("+20%"));
    }

    #[test]
    fn increasing_trend_earns_no_bonus() {
        let as_of = Utc::now();
        let history = vec![
            plastic_event(5.0, 25, as_of),
            plastic_event(20.0, 5, as_of),
        ];

        let result = award(WasteType::Plastic, 10.0, &history, as_of);
        assert_eq!(result.points, 100);
        assert!(result.explanation.is_empty());
    }

    #[test]
    fn empty_earlier_half_earns_no_bonus() {
        let as_of = Utc::now();
        // All activity in the later half; no baseline to have reduced from
        let history = vec![plastic_event(3.0, 2, as_of)];

        let result = award(WasteType::Plastic, 10.0, &history, as_of);
        assert_eq!(result.points, 100);
    }

    #[test]
    fn events_outside_window_are_ignored() {
        let as_of = Utc::now();
        let history = vec![
            plastic_event(20.0, 45, as_of), // before the window
            plastic_event(5.0, 5, as_of),
        ];

        let result = award(WasteType::Plastic, 10.0, &history, as_of);
        assert_eq!(result.points, 100);
    }

    #[test]
    fn bonus_only_applies_to_plastic() {
        let as_of = Utc::now();
        let history = vec![
            plastic_event(20.0, 25, as_of),
            plastic_event(5.0, 5, as_of),
        ];

        // Same reduction pattern, but the award is for organic waste
        let result = award(WasteType::Organic, 10.0, &history, as_of);
        assert_eq!(result.points, 150);
        assert!(result.explanation.is_empty());
    }

    #[test]
    fn fractional_awards_round_half_away_from_zero() {
        let now = Utc::now();
        // 0.25 kg × 10/kg = 2.5 → 3
        assert_eq!(award(WasteType::Plastic, 0.25, &[], now).points, 3);
        // 0.24 kg × 10/kg = 2.4 → 2
        assert_eq!(award(WasteType::Plastic, 0.24, &[], now).points, 2);
        // 0.1 kg × 15/kg = 1.5 → 2
        assert_eq!(award(WasteType::Organic, 0.1, &[], now).points, 2);
    }

    proptest! {
        #[test]
        fn tier_lookup_is_the_highest_matching_threshold(points in 0u64..200_000) {
            let tier = tier_for(points);
            prop_assert!(tier.min_points <= points);
            for other in TIERS.iter() {
                if other.min_points <= points {
                    prop_assert!(other.min_points <= tier.min_points);
                }
            }
        }

        #[test]
        fn tier_level_is_monotonic(points in 0u64..200_000) {
            prop_assert!(tier_for(points + 1).level >= tier_for(points).level);
        }

        #[test]
        fn award_never_underpays_the_base_rate(weight in 0.01f64..1_000.0) {
            let result = award(WasteType::EcoFriendly, weight, &[], Utc::now());
            let base = weight * 25.0;
            prop_assert!(result.points as f64 >= base.floor());
        }
    }
}
