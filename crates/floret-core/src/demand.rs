//! Stochastic hourly customer demand.
//!
//! Demand is shaped by a sparse hour-of-day table and a weekend
//! multiplier, then jittered with uniform noise. The hour table is
//! deliberately stepwise (peaks at opening, lunch, and the evening
//! rush) rather than a smooth curve -- that is observed domain
//! behavior, not an approximation to be smoothed out.
//!
//! Multipliers and popularity weights are `f64` because they only feed
//! an integer truncation; money never flows through this module.

use rand::Rng;

/// Hourly demand peaks: (hour, multiplier).
const HOUR_PEAKS: [(u32, f64); 4] = [(8, 0.3), (12, 0.8), (18, 1.0), (20, 0.5)];

/// Multiplier for hours not in the peak table.
const OFF_PEAK_MULTIPLIER: f64 = 0.5;

/// Weekend demand boost.
const WEEKEND_MULTIPLIER: f64 = 1.3;

/// Noise band applied to the hourly customer count.
const HOURLY_NOISE: std::ops::Range<f64> = 0.9..1.1;

/// Noise band applied to each flower's demand share.
const SHARE_NOISE: std::ops::Range<f64> = 0.8..1.2;

/// The customer demand model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemandModel {
    /// Expected customers per day before shaping.
    daily_customers: u32,
}

impl DemandModel {
    /// Create a demand model for the given daily customer volume.
    pub const fn new(daily_customers: u32) -> Self {
        Self { daily_customers }
    }

    /// The demand multiplier for an hour of day.
    pub fn hour_multiplier(hour: u32) -> f64 {
        HOUR_PEAKS
            .iter()
            .find(|(peak_hour, _)| *peak_hour == hour)
            .map_or(OFF_PEAK_MULTIPLIER, |(_, mult)| *mult)
    }

    /// The demand multiplier for the day of week.
    pub const fn weekday_multiplier(weekend: bool) -> f64 {
        if weekend { WEEKEND_MULTIPLIER } else { 1.0 }
    }

    /// Customers arriving during the given hour.
    ///
    /// `daily_customers * hour_mult * weekday_mult * uniform(0.9, 1.1)`,
    /// truncated to an integer.
    pub fn hourly_customers(&self, hour: u32, weekend: bool, rng: &mut impl Rng) -> u32 {
        let noise = rng.random_range(HOURLY_NOISE);
        let shaped = f64::from(self.daily_customers)
            * Self::hour_multiplier(hour)
            * Self::weekday_multiplier(weekend)
            * noise;
        truncate_count(shaped)
    }

    /// The portion of an hour's customers that want one flower kind.
    ///
    /// `hourly_customers * popularity * uniform(0.8, 1.2)`, truncated.
    pub fn flower_demand(hourly_customers: u32, popularity: f64, rng: &mut impl Rng) -> u32 {
        let share = popularity * rng.random_range(SHARE_NOISE);
        truncate_count(f64::from(hourly_customers) * share)
    }
}

/// Truncate a demand figure to a whole customer count.
///
/// Negative, NaN, and infinite inputs become 0; values above `u32::MAX`
/// clamp to it.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn truncate_count(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn hour_table_matches_peaks() {
        assert_eq!(DemandModel::hour_multiplier(8), 0.3);
        assert_eq!(DemandModel::hour_multiplier(12), 0.8);
        assert_eq!(DemandModel::hour_multiplier(18), 1.0);
        assert_eq!(DemandModel::hour_multiplier(20), 0.5);
        // Everything else is the flat off-peak value.
        assert_eq!(DemandModel::hour_multiplier(9), 0.5);
        assert_eq!(DemandModel::hour_multiplier(0), 0.5);
        assert_eq!(DemandModel::hour_multiplier(23), 0.5);
    }

    #[test]
    fn weekend_boost() {
        assert_eq!(DemandModel::weekday_multiplier(true), 1.3);
        assert_eq!(DemandModel::weekday_multiplier(false), 1.0);
    }

    #[test]
    fn hourly_customers_stay_in_noise_band() {
        let model = DemandModel::new(5_000);
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..100 {
            let customers = model.hourly_customers(18, false, &mut rng);
            // 5000 * 1.0 * 1.0 * [0.9, 1.1)
            assert!((4_500..5_500).contains(&customers));
        }
    }

    #[test]
    fn weekend_raises_demand() {
        let model = DemandModel::new(5_000);
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..100 {
            let customers = model.hourly_customers(18, true, &mut rng);
            // 5000 * 1.0 * 1.3 * [0.9, 1.1)
            assert!((5_850..7_150).contains(&customers));
        }
    }

    #[test]
    fn flower_demand_follows_popularity() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..100 {
            let demand = DemandModel::flower_demand(1_000, 0.3, &mut rng);
            // 1000 * 0.3 * [0.8, 1.2)
            assert!((240..360).contains(&demand));
        }
    }

    #[test]
    fn zero_customers_zero_demand() {
        let model = DemandModel::new(0);
        let mut rng = SmallRng::seed_from_u64(42);
        assert_eq!(model.hourly_customers(12, false, &mut rng), 0);
        assert_eq!(DemandModel::flower_demand(0, 0.9, &mut rng), 0);
    }

    #[test]
    fn truncation_handles_degenerate_values() {
        assert_eq!(truncate_count(-1.0), 0);
        assert_eq!(truncate_count(f64::NAN), 0);
        assert_eq!(truncate_count(f64::INFINITY), 0);
        assert_eq!(truncate_count(12.9), 12);
    }
}
