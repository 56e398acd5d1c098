use thiserror::Error;

/// Errors that can occur when rendering the message of a completed measurement.
///
/// Message templates are not validated when a [`Tracker`][crate::Tracker] is created. These
/// errors surface when a measurement ends and its message is rendered, or earlier if the caller
/// opts in via [`MessageTemplate::validate()`][crate::MessageTemplate::validate].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The template has no substitution slot for the duration.
    #[error("message template '{template}' has no substitution slot for the duration")]
    MissingSlot {
        /// The template that was being rendered.
        template: String,
    },

    /// The template has more than one substitution slot.
    #[error("message template '{template}' has {count} substitution slots but exactly one is required")]
    ExtraSlots {
        /// The template that was being rendered.
        template: String,

        /// How many substitution slots the template contains.
        count: usize,
    },

    /// The template is not well-formed, e.g. it contains an unmatched brace or a
    /// replacement field that cannot accept a duration.
    #[error("message template '{template}' is invalid: {problem}")]
    InvalidSyntax {
        /// The template that was being rendered.
        template: String,

        /// A human-readable description of the problem.
        problem: String,
    },
}

/// A specialized `Result` type for message rendering, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;
