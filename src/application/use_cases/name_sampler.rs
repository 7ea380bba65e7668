// ============================================================
// NAME SAMPLER USE CASE
// ============================================================
// Uniform random selection without replacement

use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::debug;

use crate::domain::error::Result;
use crate::domain::selection::validate_count;
use crate::domain::{SelectionRequest, SelectionResult};

pub struct NameSampler;

impl NameSampler {
    /// Draw `count` names using the thread-local generator.
    pub fn sample(names: &[String], count: i128) -> Result<SelectionResult> {
        Self::sample_with(&mut rand::rng(), names, count)
    }

    /// Draw from an already validated request.
    pub fn sample_request(request: &SelectionRequest) -> SelectionResult {
        Self::draw(&mut rand::rng(), request.names(), request.count())
    }

    /// Draw `count` names using `rng`. `names` is only borrowed.
    pub fn sample_with<R: Rng + ?Sized>(
        rng: &mut R,
        names: &[String],
        count: i128,
    ) -> Result<SelectionResult> {
        let count = validate_count(count, names.len())?;
        Ok(Self::draw(rng, names, count))
    }

    // Picks by index, so equal strings at different positions are distinct candidates.
    fn draw<R: Rng + ?Sized>(rng: &mut R, names: &[String], count: usize) -> SelectionResult {
        let selected: Vec<String> = names.choose_multiple(rng, count).cloned().collect();

        debug!(
            population = names.len(),
            selected = selected.len(),
            "Sampled names"
        );

        SelectionResult::new(selected)
    }
}
