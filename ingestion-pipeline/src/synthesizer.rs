use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

/// Commercial attributes generated for a product when no authoritative data
/// exists for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductAttributes {
    pub price: u32,
    pub unit: String,
    pub stock: u32,
    pub discount: u32,
    pub description: String,
}

/// Candidate sets differ between the two ingestion modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisProfile {
    /// Used by full ingestion.
    Standard,
    /// Used by product-only ingestion: wider price/stock range, higher
    /// discount ceiling, richer description.
    Extended,
}

const STANDARD_PRICES: [u32; 12] = [20, 30, 40, 50, 60, 80, 100, 120, 150, 200, 250, 300];
const STANDARD_UNITS: [&str; 10] = [
    "250g", "500g", "1kg", "100ml", "250ml", "500ml", "1L", "1pc", "6pc", "12pc",
];
const STANDARD_STOCKS: [u32; 4] = [50, 100, 150, 200];

const EXTENDED_PRICES: [u32; 14] = [
    20, 30, 40, 50, 60, 80, 100, 120, 150, 200, 250, 300, 400, 500,
];
// The repeated "500g" matches the historical candidate list and keeps its
// selection weight.
const EXTENDED_UNITS: [&str; 12] = [
    "250g", "500g", "1kg", "100ml", "250ml", "500ml", "1L", "1pc", "6pc", "12pc", "500g",
    "1 dozen",
];
const EXTENDED_STOCKS: [u32; 5] = [50, 100, 150, 200, 250];

/// Derives plausible commercial attributes for a product name.
///
/// Selection is uniform over fixed candidate sets. The generator is seedable
/// so tests can assert deterministic output; production callers seed from
/// entropy.
pub struct AttributeSynthesizer {
    profile: SynthesisProfile,
    rng: StdRng,
}

impl AttributeSynthesizer {
    pub fn new(profile: SynthesisProfile) -> Self {
        Self {
            profile,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(profile: SynthesisProfile, seed: u64) -> Self {
        Self {
            profile,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn profile(&self) -> SynthesisProfile {
        self.profile
    }

    /// Always returns a fully populated structure; there is no failure mode.
    pub fn synthesize(&mut self, product_name: &str) -> ProductAttributes {
        let (prices, units, stocks, discount_bound): (&[u32], &[&str], &[u32], u32) =
            match self.profile {
                SynthesisProfile::Standard => {
                    (&STANDARD_PRICES, &STANDARD_UNITS, &STANDARD_STOCKS, 20)
                }
                SynthesisProfile::Extended => {
                    (&EXTENDED_PRICES, &EXTENDED_UNITS, &EXTENDED_STOCKS, 25)
                }
            };

        let price = *prices.choose(&mut self.rng).unwrap_or(&prices[0]);
        let unit = (*units.choose(&mut self.rng).unwrap_or(&units[0])).to_string();
        let stock = *stocks.choose(&mut self.rng).unwrap_or(&stocks[0]);
        let discount = self.rng.gen_range(0..discount_bound);

        let lowercased = product_name.to_lowercase();
        let description = match self.profile {
            SynthesisProfile::Standard => {
                format!("High quality {lowercased} available at best price")
            }
            SynthesisProfile::Extended => {
                format!("Premium quality {lowercased} at best price. Fresh and authentic product.")
            }
        };

        ProductAttributes {
            price,
            unit,
            stock,
            discount,
            description,
        }
    }
}
