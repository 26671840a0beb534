//! Tier, in-tier progress and multiplier arithmetic.
//!
//! Tier `t` costs `round(initial_required * tier_scaling^t)` items; a count
//! sits in the first tier whose cumulative cost exceeds it. Reaching a
//! cumulative threshold exactly moves to the next tier.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PileError, PileResult};

const BREAKPOINT_SAMPLE: u32 = 5;

/// The four tunables that drive progression.
///
/// Fields change only through the validating setters. Deserialized values
/// must pass [`ProgressionConfig::validate`] before use.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    /// Items needed for the first tier. At least 1.
    initial_required: u32,
    /// Growth factor per tier. At least 1.
    tier_scaling: f64,
    /// Highest reachable tier, 0 for unbounded.
    max_tier: u32,
    /// Multiplier granted per tier. Non-negative.
    multiplier_per_tier: f64,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            initial_required: 4,
            tier_scaling: 2.0,
            max_tier: 10,
            multiplier_per_tier: 1.0,
        }
    }
}

impl ProgressionConfig {
    /// Builds a config, rejecting values below the documented minimums.
    pub fn new(
        initial_required: u32,
        tier_scaling: f64,
        max_tier: u32,
        multiplier_per_tier: f64,
    ) -> PileResult<Self> {
        let mut config = Self::default();
        config.set_initial_required(initial_required)?;
        config.set_tier_scaling(tier_scaling)?;
        config.set_max_tier(max_tier);
        config.set_multiplier_per_tier(multiplier_per_tier)?;
        Ok(config)
    }

    pub fn set_initial_required(&mut self, value: u32) -> PileResult<()> {
        if value < 1 {
            return Err(invalid("initial_required", value, "must be at least 1"));
        }
        self.initial_required = value;
        Ok(())
    }

    pub fn set_tier_scaling(&mut self, value: f64) -> PileResult<()> {
        if !value.is_finite() || value < 1.0 {
            return Err(invalid("tier_scaling", value, "must be a finite number >= 1"));
        }
        self.tier_scaling = value;
        Ok(())
    }

    /// Any value is valid; 0 removes the cap.
    pub fn set_max_tier(&mut self, value: u32) {
        self.max_tier = value;
    }

    pub fn set_multiplier_per_tier(&mut self, value: f64) -> PileResult<()> {
        if !value.is_finite() || value < 0.0 {
            return Err(invalid(
                "multiplier_per_tier",
                value,
                "must be a finite number >= 0",
            ));
        }
        self.multiplier_per_tier = value;
        Ok(())
    }

    pub fn initial_required(&self) -> u32 {
        self.initial_required
    }

    pub fn tier_scaling(&self) -> f64 {
        self.tier_scaling
    }

    pub fn max_tier(&self) -> u32 {
        self.max_tier
    }

    pub fn multiplier_per_tier(&self) -> f64 {
        self.multiplier_per_tier
    }

    /// Re-checks every field, for configs built by deserialization.
    pub fn validate(&self) -> PileResult<()> {
        Self::new(
            self.initial_required,
            self.tier_scaling,
            self.max_tier,
            self.multiplier_per_tier,
        )
        .map(|_| ())
    }

    /// Items needed to clear `tier`, saturating at `u64::MAX`.
    pub fn count_for_tier(&self, tier: u32) -> u64 {
        let cost = f64::from(self.initial_required) * self.tier_scaling.powf(f64::from(tier));
        cost.round() as u64
    }

    /// Tier reached with `count` items, capped at `max_tier` when it is set.
    pub fn tier_from_count(&self, count: u64) -> u32 {
        if self.is_linear() {
            let tier = count / u64::from(self.initial_required);
            return self.cap(u32::try_from(tier).unwrap_or(u32::MAX));
        }
        self.locate(count).0
    }

    /// Items collected towards the next tier.
    ///
    /// At the cap this is everything past the last cleared threshold.
    pub fn current_tier_count(&self, count: u64) -> u64 {
        if self.is_linear() {
            let per_tier = u64::from(self.initial_required);
            let cleared = count / per_tier;
            if self.max_tier > 0 && cleared >= u64::from(self.max_tier) {
                return count - u64::from(self.max_tier) * per_tier;
            }
            return count % per_tier;
        }
        self.locate(count).1
    }

    /// Walks the tier ladder, returning the tier `count` sits in and what is
    /// left of it after every cleared tier.
    ///
    /// Consecutive tiers that round to the same cost are cleared in one step,
    /// so scalings barely above 1 don't walk one tier at a time.
    fn locate(&self, count: u64) -> (u32, u64) {
        let mut remaining = count;
        let mut tier = 0u32;
        loop {
            if self.max_tier > 0 && tier >= self.max_tier {
                return (self.max_tier, remaining);
            }
            let cost = self.count_for_tier(tier);
            if remaining < cost {
                return (tier, remaining);
            }

            let mut run_end = self.last_tier_costing(cost, tier);
            if self.max_tier > 0 {
                run_end = run_end.min(self.max_tier - 1);
            }
            let run_len = u64::from(run_end - tier) + 1;
            // `cost` is at least `initial_required`, which is at least 1.
            let cleared = (remaining / cost).min(run_len);
            remaining -= cleared * cost;
            match u32::try_from(u64::from(tier) + cleared) {
                Ok(next) => tier = next,
                Err(_) => return (u32::MAX, remaining),
            }
        }
    }

    /// Last tier from `from` onwards whose cost is still `cost`.
    ///
    /// `count_for_tier` stays at `cost` while `initial * scaling^t < cost + 0.5`.
    /// The float estimate is corrected against the real costs.
    fn last_tier_costing(&self, cost: u64, from: u32) -> u32 {
        let bound = ((cost as f64 + 0.5) / f64::from(self.initial_required)).ln()
            / (self.tier_scaling - 1.0).ln_1p();
        let mut end = if bound.is_finite() && bound > f64::from(from) {
            bound.ceil().min(f64::from(u32::MAX)) as u32
        } else {
            from
        };
        while end > from && self.count_for_tier(end) != cost {
            end -= 1;
        }
        for _ in 0..4 {
            if end == u32::MAX || self.count_for_tier(end + 1) != cost {
                break;
            }
            end += 1;
        }
        end
    }

    /// Bonus multiplier granted at `tier`.
    pub fn multiplier_from_tier(&self, tier: u32) -> u64 {
        (f64::from(tier) * self.multiplier_per_tier).round() as u64
    }

    /// Full readout for one collectible's count.
    pub fn progress(&self, count: u64) -> TierProgress {
        let tier = self.tier_from_count(count);
        let next_threshold = if tier > 0 && tier == self.max_tier {
            None
        } else {
            Some(self.count_for_tier(tier))
        };
        TierProgress {
            count,
            tier,
            progress: self.current_tier_count(count),
            next_threshold,
            multiplier: self.multiplier_from_tier(tier),
        }
    }

    /// Preview of the first few tiers, as shown next to the settings.
    pub fn breakpoints(&self) -> Vec<Breakpoint> {
        let sample = if self.max_tier > 0 {
            BREAKPOINT_SAMPLE.min(self.max_tier)
        } else {
            BREAKPOINT_SAMPLE
        };
        let mut total = 0u64;
        (0..sample)
            .map(|index| {
                let count = self.count_for_tier(index);
                total = total.saturating_add(count);
                Breakpoint {
                    tier: index + 1,
                    count,
                    total,
                    multiplier: self.multiplier_from_tier(index + 1).saturating_add(1),
                }
            })
            .collect()
    }

    fn is_linear(&self) -> bool {
        self.tier_scaling == 1.0
    }

    fn cap(&self, tier: u32) -> u32 {
        if self.max_tier > 0 {
            tier.min(self.max_tier)
        } else {
            tier
        }
    }
}

fn invalid(name: &'static str, value: impl fmt::Display, reason: &'static str) -> PileError {
    PileError::InvalidSetting {
        name,
        value: value.to_string(),
        reason,
    }
}

/// Where a count sits in the tier ladder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TierProgress {
    pub count: u64,
    pub tier: u32,
    /// Items collected inside the current tier.
    pub progress: u64,
    /// Cost of the current tier, `None` once the cap is reached.
    pub next_threshold: Option<u64>,
    pub multiplier: u64,
}

impl fmt::Display for TierProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tier {} Pile | {} / ", self.tier, self.progress)?;
        match self.next_threshold {
            Some(threshold) => write!(f, "{threshold}")?,
            None => write!(f, "∞")?,
        }
        write!(
            f,
            " to next | {}x Multiplier | {} Extras Found",
            self.multiplier.saturating_add(1),
            self.count
        )
    }
}

/// One line of the tier preview. `multiplier` already includes the base 1x.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Breakpoint {
    pub tier: u32,
    pub count: u64,
    pub total: u64,
    pub multiplier: u64,
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tier {}: {} ({} Total) {}x Multiplier",
            self.tier, self.count, self.total, self.multiplier
        )
    }
}

#[cfg(test)]
#[path = "tests/progression_tests.rs"]
mod tests;
