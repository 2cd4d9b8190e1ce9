//! Random swap planning for batches.
//!
//! Picks a pair of assets the router can route between and an amount
//! within the from-asset's configured range. The random source is a
//! parameter so callers can seed it.

use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::domain::error::DomainError;
use crate::domain::{Leg, SwapRequest, TokenDescriptor};
use crate::error::{Result, SwapError};

/// An asset eligible for random swaps and its amount range (whole units).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanAsset {
    pub asset: TokenDescriptor,
    pub min_amount: Decimal,
    pub max_amount: Decimal,
}

impl PlanAsset {
    /// Fractional digits kept in random amounts.
    ///
    /// 18-decimal assets keep 8, everything else 6, never more than the
    /// asset itself supports.
    #[must_use]
    pub fn precision(&self) -> u32 {
        let preferred = if self.asset.decimals() == 18 { 8 } else { 6 };
        preferred.min(u32::from(self.asset.decimals()))
    }

    /// Draw a uniformly random amount in `[min_amount, max_amount]`.
    pub fn random_amount<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Decimal> {
        let precision = self.precision();
        let scale = Decimal::from(10u64.pow(precision));

        let low = self
            .min_amount
            .checked_mul(scale)
            .map(|v| v.ceil())
            .and_then(|v| v.to_i128())
            .ok_or_else(|| self.out_of_range(self.min_amount))?;
        let high = self
            .max_amount
            .checked_mul(scale)
            .map(|v| v.floor())
            .and_then(|v| v.to_i128())
            .ok_or_else(|| self.out_of_range(self.max_amount))?;

        if low <= 0 || high < low {
            return Err(DomainError::InvalidRange {
                symbol: self.asset.symbol().to_string(),
                min: self.min_amount,
                max: self.max_amount,
            }
            .into());
        }

        let units = rng.gen_range(low..=high);
        Ok(Decimal::from_i128_with_scale(units, precision))
    }

    fn out_of_range(&self, amount: Decimal) -> DomainError {
        DomainError::AmountOutOfRange {
            amount: amount.to_string(),
            decimals: self.asset.decimals(),
        }
    }
}

/// Plans random swaps among a fixed asset set.
#[derive(Debug, Clone)]
pub struct SwapPlanner {
    assets: Vec<PlanAsset>,
    legs: Vec<Leg>,
}

impl SwapPlanner {
    /// `legs` are the leg kinds the active router supports.
    #[must_use]
    pub fn new(assets: Vec<PlanAsset>, legs: impl IntoIterator<Item = Leg>) -> Self {
        Self {
            assets,
            legs: legs.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn assets(&self) -> &[PlanAsset] {
        &self.assets
    }

    /// Ordered pairs of distinct assets the router can swap between.
    fn pairs(&self) -> Vec<(&PlanAsset, &PlanAsset)> {
        let mut pairs = Vec::new();
        for from in &self.assets {
            for to in &self.assets {
                if from.asset == to.asset {
                    continue;
                }
                let routable = Leg::classify(&from.asset, &to.asset)
                    .is_some_and(|leg| self.legs.contains(&leg));
                if routable {
                    pairs.push((from, to));
                }
            }
        }
        pairs
    }

    /// Pick a random routable pair and amount.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::NoSwappablePair`] when no two assets can be
    /// swapped, or a domain error when the from-asset's range is unusable.
    pub fn plan<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<SwapRequest> {
        let pairs = self.pairs();
        let (from, to) = pairs.choose(rng).ok_or(SwapError::NoSwappablePair {
            available: self.assets.len(),
        })?;

        let amount = from.random_amount(rng)?;
        let amount_in = from.asset.to_base_units(amount)?;
        Ok(SwapRequest::new(
            from.asset.clone(),
            to.asset.clone(),
            amount_in,
        )?)
    }
}
