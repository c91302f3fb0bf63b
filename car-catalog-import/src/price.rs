//! Price strategies for bulk-loaded specifications.
//!
//! Source documents carry no prices, so each loaded specification row is
//! given one by a [`PriceGenerator`].

use rand::Rng;

/// Produces one price per specification row.
pub trait PriceGenerator {
    fn generate(&mut self) -> i64;
}

/// Uniform price in hundreds between 2,000 and 50,000 inclusive.
#[derive(Debug, Default)]
pub struct RandomPrice;

impl RandomPrice {
    pub const MIN_HUNDREDS: i64 = 20;
    pub const MAX_HUNDREDS: i64 = 500;
}

impl PriceGenerator for RandomPrice {
    fn generate(&mut self) -> i64 {
        rand::thread_rng().gen_range(Self::MIN_HUNDREDS..=Self::MAX_HUNDREDS) * 100
    }
}

/// Always the same price.
#[derive(Debug, Clone, Copy)]
pub struct FixedPrice(pub i64);

impl PriceGenerator for FixedPrice {
    fn generate(&mut self) -> i64 {
        self.0
    }
}
