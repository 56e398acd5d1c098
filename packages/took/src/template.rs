//! Message templates with a single substitution slot for the measured duration.

use std::fmt::{self, Write as _};
use std::str::Chars;

use crate::{Error, Result};

/// The template used when none is supplied.
pub const DEFAULT_TEMPLATE: &str = "Execution took {}s";

/// Digits after the decimal point for a bare `f` type, as in `{:f}`.
const DEFAULT_FIXED_PRECISION: usize = 6;

/// The largest precision the standard formatting machinery accepts (`u16::MAX`).
const MAX_PRECISION: usize = 65_535;

/// A message with exactly one substitution slot for a duration in seconds.
///
/// The template is literal text with a single replacement field:
///
/// * `{}` or `{0}` renders the duration in seconds in its shortest form (`2`, `0.0005`).
/// * `{:.N}` or `{0:.N}` renders the duration with `N` digits after the decimal point.
///   A trailing `f` type is accepted (`{:.2f}`), and `{:f}` alone means six digits.
/// * `{{` and `}}` render a literal brace.
///
/// Construction never fails. A template that does not match this grammar produces an
/// [`Error`] when rendered, which happens when a measurement ends. Use [`validate()`][Self::validate]
/// to check a template upfront.
///
/// # Examples
///
/// ```
/// use took::MessageTemplate;
///
/// let template = MessageTemplate::new("Loading took {:.2}s");
/// assert_eq!(template.render(1.23456).unwrap(), "Loading took 1.23s");
///
/// let template = MessageTemplate::new("{{elapsed}} = {}");
/// assert_eq!(template.render(0.5).unwrap(), "{elapsed} = 0.5");
///
/// assert!(MessageTemplate::new("no slot").validate().is_err());
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MessageTemplate {
    raw: String,
}

/// How the duration is written into the replacement field.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Slot {
    Shortest,
    Precision(usize),
}

impl MessageTemplate {
    /// Creates a template from its textual form.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The textual form of the template.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Checks that the template contains exactly one well-formed substitution slot.
    ///
    /// # Errors
    ///
    /// Returns the same error that rendering this template would return.
    pub fn validate(&self) -> Result<()> {
        self.render(0.0).map(drop)
    }

    /// Renders the template with `seconds` substituted into its slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the template does not contain exactly one substitution slot
    /// or if it is otherwise malformed.
    pub fn render(&self, seconds: f64) -> Result<String> {
        let mut output = String::with_capacity(self.raw.len().saturating_add(8));
        let mut slots: usize = 0;
        let mut chars = self.raw.chars();

        while let Some(c) = chars.next() {
            match c {
                '{' => {
                    if chars.as_str().starts_with('{') {
                        chars.next();
                        output.push('{');
                        continue;
                    }

                    let slot = self.parse_field(&mut chars)?;
                    slots = slots.saturating_add(1);

                    match slot {
                        Slot::Shortest => write!(output, "{seconds}"),
                        Slot::Precision(precision) => write!(output, "{seconds:.precision$}"),
                    }
                    .expect("writing to a String never fails");
                }
                '}' => {
                    if chars.as_str().starts_with('}') {
                        chars.next();
                        output.push('}');
                    } else {
                        return Err(self.invalid("unmatched '}'"));
                    }
                }
                other => output.push(other),
            }
        }

        match slots {
            1 => Ok(output),
            0 => Err(Error::MissingSlot {
                template: self.raw.clone(),
            }),
            count => Err(Error::ExtraSlots {
                template: self.raw.clone(),
                count,
            }),
        }
    }

    /// Parses one replacement field, with the opening brace already consumed.
    fn parse_field(&self, chars: &mut Chars<'_>) -> Result<Slot> {
        let rest = chars.as_str();
        let Some(end) = rest.find('}') else {
            return Err(self.invalid("unmatched '{'"));
        };

        let field = rest.get(..end).expect("find() returns a char boundary");
        let consumed = field.chars().count().saturating_add(1);
        for _ in 0..consumed {
            chars.next();
        }

        let (argument, spec) = field.split_once(':').unwrap_or((field, ""));

        if !argument.is_empty() && argument != "0" {
            return Err(self.invalid(&format!(
                "replacement field '{{{field}}}' refers to '{argument}' but only the duration is available"
            )));
        }

        if spec.is_empty() {
            return Ok(Slot::Shortest);
        }

        // A trailing 'f' is the fixed-point type; on its own it means six digits.
        let (precision, fixed) = match spec.strip_suffix('f') {
            Some(precision) => (precision, true),
            None => (spec, false),
        };

        if precision.is_empty() && fixed {
            return Ok(Slot::Precision(DEFAULT_FIXED_PRECISION));
        }

        precision
            .strip_prefix('.')
            .filter(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
            .and_then(|digits| digits.parse::<usize>().ok())
            .filter(|&digits| digits <= MAX_PRECISION)
            .map(Slot::Precision)
            .ok_or_else(|| {
                self.invalid(&format!(
                    "replacement field '{{{field}}}' has unsupported format '{spec}', \
                     expected '.N', 'f' or '.Nf' with N at most {MAX_PRECISION}"
                ))
            })
    }

    fn invalid(&self, problem: &str) -> Error {
        Error::InvalidSyntax {
            template: self.raw.clone(),
            problem: problem.to_string(),
        }
    }
}

impl Default for MessageTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

impl From<&str> for MessageTemplate {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for MessageTemplate {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for MessageTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn default_template_renders_seconds() {
        let template = MessageTemplate::default();
        assert_eq!(template.render(1.5).unwrap(), "Execution took 1.5s");
    }

    #[test]
    fn whole_seconds_render_without_fraction() {
        let template = MessageTemplate::new("Test {}");
        assert_eq!(template.render(2.0).unwrap(), "Test 2");
    }

    #[test]
    fn bare_slot_renders_only_the_duration() {
        let template = MessageTemplate::new("{}");
        assert_eq!(template.render(0.0005).unwrap(), "0.0005");
    }

    #[test]
    fn positional_slot_is_accepted() {
        let template = MessageTemplate::new("took {0}s");
        assert_eq!(template.render(3.0).unwrap(), "took 3s");
    }

    #[test]
    fn precision_is_applied() {
        assert_eq!(
            MessageTemplate::new("{:.3}").render(1.0 / 3.0).unwrap(),
            "0.333"
        );
        assert_eq!(MessageTemplate::new("{0:.1}s").render(2.0).unwrap(), "2.0s");
    }

    #[test]
    fn escaped_braces_are_literal() {
        let template = MessageTemplate::new("{{{}}}");
        assert_eq!(template.render(4.0).unwrap(), "{4}");
    }

    #[test]
    fn non_ascii_text_is_preserved() {
        let template = MessageTemplate::new("Zeit für Aufgabe: {} (fertig)");
        assert_eq!(
            template.render(1.25).unwrap(),
            "Zeit für Aufgabe: 1.25 (fertig)"
        );
    }

    #[test]
    fn missing_slot_is_error() {
        let result = MessageTemplate::new("nothing to see").render(1.0);
        assert!(matches!(result, Err(Error::MissingSlot { .. })));

        // Escaped braces are not slots.
        let result = MessageTemplate::new("{{}}").render(1.0);
        assert!(matches!(result, Err(Error::MissingSlot { .. })));
    }

    #[test]
    fn extra_slots_are_error() {
        let result = MessageTemplate::new("{} then {} then {}").render(1.0);
        assert!(matches!(result, Err(Error::ExtraSlots { count: 3, .. })));
    }

    #[test]
    fn unmatched_braces_are_error() {
        for raw in ["took {s", "took }s", "{} }"] {
            let result = MessageTemplate::new(raw).render(1.0);
            assert!(
                matches!(result, Err(Error::InvalidSyntax { .. })),
                "expected syntax error for {raw:?}, got {result:?}"
            );
        }
    }

    #[test]
    fn named_field_is_error() {
        let result = MessageTemplate::new("{elapsed}").render(1.0);
        assert!(matches!(result, Err(Error::InvalidSyntax { .. })));

        let result = MessageTemplate::new("{1}").render(1.0);
        assert!(matches!(result, Err(Error::InvalidSyntax { .. })));
    }

    #[test]
    fn fixed_point_type_is_accepted() {
        assert_eq!(
            MessageTemplate::new("took {:.2f}s").render(1.23456).unwrap(),
            "took 1.23s"
        );
        assert_eq!(
            MessageTemplate::new("took {0:.0f}s").render(2.0).unwrap(),
            "took 2s"
        );
        assert_eq!(
            MessageTemplate::new("took {:f}s").render(0.5).unwrap(),
            "took 0.500000s"
        );
    }

    #[test]
    fn oversized_precision_is_error() {
        for raw in ["{:.70000}", "{:.70000f}", "{:.5000000000}", "{:.99999999999999999999999}"] {
            let template = MessageTemplate::new(raw);
            assert!(
                matches!(template.render(1.0), Err(Error::InvalidSyntax { .. })),
                "expected syntax error for {raw:?}"
            );
            assert!(template.validate().is_err());
        }
    }

    #[test]
    fn largest_precision_renders() {
        let rendered = MessageTemplate::new("{:.65535}").render(1.0).unwrap();
        assert_eq!(rendered.len(), 2 + 65535);
    }

    #[test]
    fn unsupported_format_is_error() {
        for raw in ["{:x}", "{:.}", "{:>8}", "{:ff}", "{:.f}", "{:.2e}", "{:f2}"] {
            let result = MessageTemplate::new(raw).render(1.0);
            assert!(
                matches!(result, Err(Error::InvalidSyntax { .. })),
                "expected syntax error for {raw:?}, got {result:?}"
            );
        }
    }

    #[test]
    fn validate_matches_render() {
        assert!(MessageTemplate::new("ok {}").validate().is_ok());
        assert!(MessageTemplate::new("bad").validate().is_err());
    }

    #[test]
    fn display_shows_raw_template() {
        let template = MessageTemplate::from("Loading took {:.2}s");
        assert_eq!(template.to_string(), "Loading took {:.2}s");
        assert_eq!(template.as_str(), "Loading took {:.2}s");
    }
}
