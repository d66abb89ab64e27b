//! Bridge between the crates' `exn::Exn<ErrorKind>` errors and miette.
//!
//! `exn::Exn<E>` deliberately does not implement `std::error::Error` (only its
//! inner `Frame` tree does), so miette's [`miette::IntoDiagnostic`] bound is not
//! satisfied for `Result<T, Exn<E>>`. This extension provides the same
//! `into_diagnostic()` ergonomics for those results by converting the exception
//! into the boxed error tree miette can render as a top-level report.

use std::error::Error as StdError;

use miette::Report;

/// Convert a `Result<T, exn::Exn<E>>` into a miette `Result`, preserving the
/// full exception frame tree.
pub trait IntoDiagnosticExn<T> {
    fn into_diagnostic(self) -> Result<T, Report>;
}

impl<T, E> IntoDiagnosticExn<T> for Result<T, exn::Exn<E>>
where
    E: StdError + Send + Sync + 'static,
{
    fn into_diagnostic(self) -> Result<T, Report> {
        self.map_err(|exn| {
            let boxed: Box<dyn StdError + Send + Sync + 'static> = exn.into();
            Report::new_boxed(boxed.into())
        })
    }
}
