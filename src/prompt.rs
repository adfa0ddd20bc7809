use std::io::{BufRead, Write};

use crate::config::{SiteBuilder, SiteConfig};
use crate::error::{ProvisionError, ProvisionResult};
use crate::options::{self, OptionKind, OptionSpec, OptionValue};

/// The question-by-question state of a new-site interview.
///
/// Each call to [`Wizard::answer`] consumes exactly one pending
/// question. There is no way back to an answered question.
#[derive(Debug, Clone)]
pub struct Wizard {
    pending: &'static [OptionSpec],
    builder: SiteBuilder,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending: options::schema(),
            builder: SiteBuilder::new(),
        }
    }

    /// The question waiting for an answer, if any.
    #[must_use]
    pub fn current(&self) -> Option<&'static OptionSpec> {
        self.pending.first()
    }

    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.pending.is_empty()
    }

    /// Answer the current question and move on to the next one.
    ///
    /// A blank answer to a text question is an error and leaves
    /// the wizard where it was.
    pub fn answer(&mut self, raw: &str) -> ProvisionResult<()> {
        let Some((spec, rest)) = self.pending.split_first() else {
            return Err(ProvisionError::Other("no question left to answer".into()));
        };

        let value = interpret(spec, raw)?;
        self.builder.set(spec.key, value);
        self.pending = rest;
        Ok(())
    }

    /// Validate the collected answers. Fails if a question is
    /// still pending.
    pub fn finish(self) -> ProvisionResult<SiteConfig> {
        if let Some(spec) = self.current() {
            return Err(ProvisionError::InputClosed(spec.key.name().into()));
        }
        self.builder.build()
    }
}

/// Turn a raw answer into a value for `spec`.
///
/// Flags take `y` or `n` in any case and fall back to the
/// default for anything else. Text is lowercased and must not be
/// blank.
pub fn interpret(spec: &OptionSpec, raw: &str) -> ProvisionResult<OptionValue> {
    let answer = raw.trim().to_lowercase();

    match spec.kind {
        OptionKind::Flag { default } => Ok(OptionValue::Flag(match answer.as_str() {
            "y" => true,
            "n" => false,
            _ => default,
        })),
        OptionKind::Text if answer.is_empty() => {
            Err(ProvisionError::BlankAnswer(spec.key.name()))
        }
        OptionKind::Text => Ok(OptionValue::Text(answer)),
    }
}

/// Ask every question in order, reading one line per question,
/// then validate the answers.
pub fn run_wizard<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> ProvisionResult<SiteConfig> {
    let mut wizard = Wizard::new();

    while let Some(spec) = wizard.current() {
        let line = ask(input, output, spec.prompt)?
            .ok_or_else(|| ProvisionError::InputClosed(spec.key.name().into()))?;
        wizard.answer(&line)?;
    }

    wizard.finish()
}

/// Ask a yes/no question. Only `y` (any case) counts as yes;
/// end of input counts as no.
pub fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> ProvisionResult<bool> {
    let answer = ask(input, output, question)?;
    Ok(answer.is_some_and(|a| a.trim().eq_ignore_ascii_case("y")))
}

fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> ProvisionResult<Option<String>> {
    write!(output, "{prompt}: ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
