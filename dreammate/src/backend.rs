use crate::Journal;

/// Trait for frontends that drive a journal.
///
/// A backend presents the intro, the prompts and the summary in its own way
/// and mutates the journal only through `Journal`'s methods. It returns when
/// the user quits.
pub trait JournalBackend {
    /// The error type for this backend.
    type Error: Into<anyhow::Error>;

    /// Drive the journal until the user is done.
    ///
    /// # Returns
    /// * `Ok(())` when the user quits normally
    /// * `Err` on cancellation or backend failure
    fn run(&self, journal: &mut Journal) -> Result<(), Self::Error>;
}

impl<B: JournalBackend + ?Sized> JournalBackend for &B {
    type Error = B::Error;

    fn run(&self, journal: &mut Journal) -> Result<(), Self::Error> {
        (**self).run(journal)
    }
}
