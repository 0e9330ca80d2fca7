use core::{
    cmp::Ordering,
    convert::TryFrom,
    fmt,
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(clippy::module_name_repetitions)]
pub struct PositiveF64Error(f64);

impl fmt::Display for PositiveF64Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{} is not positive.", self.0)
    }
}

#[derive(Copy, Clone, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(try_from = "f64", into = "f64")]
pub struct PositiveF64(f64);

impl TryFrom<f64> for PositiveF64 {
    type Error = PositiveF64Error;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PositiveF64> for f64 {
    fn from(value: PositiveF64) -> Self {
        value.0
    }
}

impl fmt::Debug for PositiveF64 {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        struct PositiveF64Range(f64);

        impl fmt::Debug for PositiveF64Range {
            fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
                write!(fmt, "0.0 < {}", self.0)
            }
        }

        fmt.debug_tuple("PositiveF64")
            .field(&PositiveF64Range(self.0))
            .finish()
    }
}

impl PositiveF64 {
    /// # Errors
    ///
    /// Returns `PositiveF64Error` if not `0.0 < value`
    pub fn new(value: f64) -> Result<Self, PositiveF64Error> {
        if value > 0.0 {
            Ok(Self(value))
        } else {
            Err(PositiveF64Error(value))
        }
    }

    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl PartialEq for PositiveF64 {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for PositiveF64 {}

impl PartialOrd for PositiveF64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PositiveF64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for PositiveF64 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl PartialEq<f64> for PositiveF64 {
    fn eq(&self, other: &f64) -> bool {
        self.0.eq(other)
    }
}

impl PartialOrd<f64> for PositiveF64 {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        self.0.partial_cmp(other)
    }
}
