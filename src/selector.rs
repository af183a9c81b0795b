use rand::seq::IndexedRandom;
use rand::Rng;

use crate::error::{Result, RouletteError};

/// Uniformly draw a page number from `1..=max_page`.
pub fn random_page<R: Rng + ?Sized>(rng: &mut R, max_page: u32) -> u32 {
    rng.random_range(1..=max_page.max(1))
}

/// Uniformly pick one element. An empty slice is an error.
pub fn select_repository<'a, T, R>(items: &'a [T], rng: &mut R) -> Result<&'a T>
where
    R: Rng + ?Sized,
{
    items
        .choose(rng)
        .ok_or_else(|| RouletteError::Selection("the search returned no repositories".to_string()))
}
