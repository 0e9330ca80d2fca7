use serde::{Deserialize, Serialize};

use mtt_core::{cogs::RngCore, tree::Colour};
use mtt_core_bond::NonNegativeF64;

#[allow(clippy::module_name_repetitions)]
#[derive(thiserror::Error, displaydoc::Display, Debug, Clone, PartialEq, Eq)]
pub enum MigrationModelError {
    /// the migration rate matrix must describe at least one colour
    NoColours,
    /// row {row} of the migration rate matrix has {length} rates instead of {colours}
    NotSquare {
        row: usize,
        length: usize,
        colours: usize,
    },
    /// the migration rate from colour {from} to colour {to} is not finite
    NonFiniteRate { from: usize, to: usize },
}

/// Backwards-in-time migration rates between a fixed set of colours.
///
/// Diagonal entries are ignored: a lineage never migrates into its own
/// colour.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MigrationModelRaw", into = "MigrationModelRaw")]
pub struct MigrationModel {
    colours: usize,
    rates: Vec<NonNegativeF64>,
    total_out_rates: Vec<NonNegativeF64>,
}

impl MigrationModel {
    /// # Errors
    ///
    /// Returns `MigrationModelError` if `rates` is empty, not square, or
    /// contains an infinite rate.
    pub fn new(rates: Vec<Vec<NonNegativeF64>>) -> Result<Self, MigrationModelError> {
        let colours = rates.len();

        if colours == 0 {
            return Err(MigrationModelError::NoColours);
        }

        if let Some((row, length)) = rates
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, length)| *length != colours)
        {
            return Err(MigrationModelError::NotSquare {
                row,
                length,
                colours,
            });
        }

        if let Some((from, to)) = rates.iter().enumerate().find_map(|(from, row)| {
            row.iter()
                .position(|rate| !rate.get().is_finite())
                .map(|to| (from, to))
        }) {
            return Err(MigrationModelError::NonFiniteRate { from, to });
        }

        let mut flat = Vec::with_capacity(colours * colours);
        let mut total_out_rates = Vec::with_capacity(colours);

        for (from, row) in rates.into_iter().enumerate() {
            let mut total = NonNegativeF64::zero();

            for (to, rate) in row.into_iter().enumerate() {
                if from == to {
                    flat.push(NonNegativeF64::zero());
                } else {
                    total = total + rate;
                    flat.push(rate);
                }
            }

            total_out_rates.push(total);
        }

        Ok(Self {
            colours,
            rates: flat,
            total_out_rates,
        })
    }

    #[must_use]
    pub fn colour_count(&self) -> usize {
        self.colours
    }

    #[must_use]
    pub fn contains(&self, colour: Colour) -> bool {
        colour.index() < self.colours
    }

    #[must_use]
    #[debug_requires(self.contains(from) && self.contains(to), "colours are known")]
    pub fn rate(&self, from: Colour, to: Colour) -> NonNegativeF64 {
        self.rates[from.index() * self.colours + to.index()]
    }

    #[must_use]
    #[debug_requires(self.contains(from), "colour is known")]
    pub fn total_out_rate(&self, from: Colour) -> NonNegativeF64 {
        self.total_out_rates[from.index()]
    }

    /// Samples the colour a lineage of colour `from` migrates into, with
    /// probability proportional to the migration rate.
    #[must_use]
    #[debug_requires(self.contains(from), "colour is known")]
    #[debug_requires(self.total_out_rate(from) > 0.0_f64, "from can migrate")]
    #[debug_ensures(ret != from && self.rate(from, ret) > 0.0_f64, "samples a reachable colour")]
    pub fn sample_destination<G: RngCore>(&self, from: Colour, rng: &mut G) -> Colour {
        use mtt_core::cogs::RngSampler;

        let row = &self.rates[from.index() * self.colours..(from.index() + 1) * self.colours];

        let mut remaining = rng.sample_uniform().get() * self.total_out_rate(from).get();
        let mut last_reachable = from;

        for (to, rate) in row.iter().enumerate() {
            if *rate > 0.0_f64 {
                #[allow(clippy::cast_possible_truncation)]
                let colour = Colour::new(to as u32);

                if remaining < rate.get() {
                    return colour;
                }

                remaining -= rate.get();
                last_reachable = colour;
            }
        }

        // Accumulated rounding can overshoot the final bucket
        last_reachable
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename = "MigrationModel")]
#[serde(deny_unknown_fields)]
struct MigrationModelRaw {
    rates: Vec<Vec<NonNegativeF64>>,
}

impl TryFrom<MigrationModelRaw> for MigrationModel {
    type Error = MigrationModelError;

    fn try_from(raw: MigrationModelRaw) -> Result<Self, Self::Error> {
        Self::new(raw.rates)
    }
}

impl From<MigrationModel> for MigrationModelRaw {
    fn from(model: MigrationModel) -> Self {
        Self {
            rates: model
                .rates
                .chunks(model.colours)
                .map(<[NonNegativeF64]>::to_vec)
                .collect(),
        }
    }
}
