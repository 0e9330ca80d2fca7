use core::num::NonZeroUsize;

use mtt_core_bond::{ClosedOpenUnitF64, NonNegativeF64, PositiveF64};

use crate::cogs::Backup;

#[allow(clippy::module_name_repetitions)]
pub trait RngCore: Backup + Sized + Clone + core::fmt::Debug {
    type Seed: AsMut<[u8]> + Default + Sized;

    #[must_use]
    fn from_seed(seed: Self::Seed) -> Self;

    #[must_use]
    fn sample_u64(&mut self) -> u64;
}

#[allow(clippy::module_name_repetitions)]
pub trait SeedableRng: RngCore {
    #[must_use]
    fn seed_from_u64(mut state: u64) -> Self {
        // Implementation from:
        // https://docs.rs/rand/0.7.3/rand/trait.SeedableRng.html#method.seed_from_u64

        // We use PCG32 to generate a u32 sequence, and copy to the seed
        const MUL: u64 = 6_364_136_223_846_793_005_u64;
        const INC: u64 = 11_634_580_027_462_260_723_u64;

        let mut seed = Self::Seed::default();

        for chunk in seed.as_mut().chunks_mut(4) {
            // We advance the state first (to get away from the input value,
            // in case it has low Hamming Weight).
            state = state.wrapping_mul(MUL).wrapping_add(INC);

            // Use PCG output function with to_le to generate x:
            #[allow(clippy::cast_possible_truncation)]
            let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
            #[allow(clippy::cast_possible_truncation)]
            let rot = (state >> 59) as u32;
            let x = xorshifted.rotate_right(rot).to_le_bytes();

            chunk.copy_from_slice(&x[..chunk.len()]);
        }

        Self::from_seed(seed)
    }
}

impl<R: RngCore> SeedableRng for R {}

/// Sampling helpers shared by every generator.
///
/// Operators draw through these methods only, so the order of `sample_u64`
/// calls (and thereby replay under a fixed seed) is fully determined by the
/// order of the calls below.
#[allow(clippy::module_name_repetitions)]
pub trait RngSampler: RngCore {
    #[must_use]
    #[inline]
    #[debug_ensures(ret >= 0.0_f64 && ret < 1.0_f64, "samples U[0.0, 1.0)")]
    fn sample_uniform(&mut self) -> ClosedOpenUnitF64 {
        // http://prng.di.unimi.it -> Generating uniform doubles in the unit interval
        #[allow(clippy::cast_precision_loss)]
        let u01 = ((self.sample_u64() >> 11) as f64) * f64::from_bits(0x3CA0_0000_0000_0000_u64);

        // Safety: a 53 bit integer scaled by 2^-53 lies in [0.0, 1.0)
        unsafe { ClosedOpenUnitF64::new_unchecked(u01) }
    }

    #[must_use]
    #[inline]
    #[debug_ensures(ret < length.get(), "samples U(0, length - 1)")]
    fn sample_index(&mut self, length: NonZeroUsize) -> usize {
        // attributes on expressions are experimental
        // see https://github.com/rust-lang/rust/issues/15701
        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        let index = (self.sample_uniform().get() * (length.get() as f64)).floor() as usize;

        // Guard against the product rounding up to `length`
        index.min(length.get() - 1)
    }

    #[must_use]
    #[inline]
    #[debug_ensures(ret >= 0.0_f64, "samples Exp(lambda)")]
    fn sample_exponential(&mut self, lambda: PositiveF64) -> NonNegativeF64 {
        // Inverse transform sample: X = -ln(U(0,1]) / lambda
        let u01 = self.sample_uniform().one_minus();

        match NonNegativeF64::new(-u01.ln() / lambda.get()) {
            Ok(sample) => sample,
            // u01 lies in (0.0, 1.0], so the sample is never negative
            Err(_) => NonNegativeF64::zero(),
        }
    }
}

impl<R: RngCore> RngSampler for R {}
