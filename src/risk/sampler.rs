//! Deterministic per-patient success-rate sampling.
//!
//! Each draw seeds a fresh ChaCha20 stream from a SHA-256 digest of
//! (patient, horizon, tier). No generator state is shared between patients,
//! so results are reproducible across runs, thread counts and batch orders.

use super::{Horizon, PatientId, RiskTier};
use crate::config::SuccessRateTable;
use crate::errors::Result;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha2::{Digest, Sha256};

const SEED_DOMAIN: &[u8] = b"careroi.success-rate.v1";

/// Seed for one (patient, horizon, tier) draw
pub fn derive_seed(patient_id: &PatientId, tier: RiskTier, horizon: Horizon) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(SEED_DOMAIN);
    hasher.update(patient_id.seed_key().as_bytes());
    hasher.update(horizon.days().to_le_bytes());
    hasher.update([tier.number()]);
    let digest = hasher.finalize();

    let mut seed = [0u8; 8];
    seed.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(seed)
}

pub struct SuccessRateSampler<'a> {
    rates: &'a SuccessRateTable,
}

impl<'a> SuccessRateSampler<'a> {
    pub fn new(rates: &'a SuccessRateTable) -> Self {
        Self { rates }
    }

    /// Draw a success rate uniformly from the configured range for
    /// `(horizon, tier)`. Same inputs always give the same rate.
    pub fn sample(&self, patient_id: &PatientId, tier: RiskTier, horizon: Horizon) -> Result<f64> {
        let range = self.rates.range(horizon, tier)?;
        if range.min >= range.max {
            return Ok(range.min);
        }

        let mut rng = ChaCha20Rng::seed_from_u64(derive_seed(patient_id, tier, horizon));
        Ok(rng.gen_range(range.min..=range.max))
    }
}
