use mtt_core::cogs::{Backup, RngCore};

#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WyHash {
    seed: u64,
    state: u64,
}

impl Backup for WyHash {
    fn backup_state(&self) -> Self {
        self.clone()
    }
}

impl RngCore for WyHash {
    type Seed = [u8; 8];

    #[must_use]
    #[inline]
    fn from_seed(seed: Self::Seed) -> Self {
        let seed = u64::from_le_bytes(seed);

        Self { seed, state: seed }
    }

    #[must_use]
    #[inline]
    fn sample_u64(&mut self) -> u64 {
        // Added SeaHash diffuse for better avalanching
        diffuse(wyhash::wyrng(&mut self.state))
    }
}

impl WyHash {
    /// The seed this generator was created from, for reproducibility logs.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

const fn diffuse(mut x: u64) -> u64 {
    // These are derived from the PCG RNG's round. Thanks to @Veedrac for proposing
    // this. The basic idea is that we use dynamic shifts, which are determined
    // by the input itself. The shift is chosen by the higher bits, which means
    // that changing those flips the lower bits, which scatters upwards because
    // of the multiplication.

    x = x.wrapping_mul(0x6eed_0e9d_a4d9_4a4f);

    let a = x >> 32;
    let b = x >> 60;

    x ^= a >> b;

    x = x.wrapping_mul(0x6eed_0e9d_a4d9_4a4f);

    x
}
