use core::ops::Deref;

/// State that the MCMC engine can snapshot before a proposal and restore
/// after a rejection.
pub trait Backup: Sized {
    /// Copies the complete state, including any versioned internals.
    #[must_use]
    fn backup_state(&self) -> Self;

    #[must_use]
    fn backup(&self) -> BackedUp<Self> {
        BackedUp(self.backup_state())
    }
}

pub struct BackedUp<T: Backup>(T);

impl<T: Backup> Deref for BackedUp<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: Backup> BackedUp<T> {
    /// Resumes from the snapshot, which stays intact for further restores.
    #[must_use]
    pub fn resume(&self) -> T {
        self.0.backup_state()
    }
}
