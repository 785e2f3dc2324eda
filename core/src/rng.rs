//! Deterministic random number generation.
//!
//! RULE: Generators never call a platform RNG. All randomness flows
//! through ScenarioRng streams derived from a single master seed, one
//! stream per scenario kind. Streams are independent: adding draws to one
//! scenario never shifts another scenario's series.

use rand::SeedableRng;
use rand_distr::Distribution;
use rand_pcg::Pcg64Mcg;

use crate::scenario::ScenarioKind;

/// A named, deterministic RNG stream for a single scenario kind.
pub struct ScenarioRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl ScenarioRng {
    /// Derive the stream for `kind` from the run's master seed. The slot
    /// index is stable, so each kind's stream is reproducible in isolation.
    pub fn for_scenario(master_seed: u64, kind: ScenarioKind) -> Self {
        let derived_seed = master_seed ^ kind.slot().wrapping_mul(0x9e37_79b9_7f4a_7c15);
        Self {
            name: kind.name(),
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Draw one value from `dist`.
    pub fn sample<D: Distribution<f64>>(&mut self, dist: &D) -> f64 {
        dist.sample(&mut self.inner)
    }
}
