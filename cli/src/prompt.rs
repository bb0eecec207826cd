//! Yes/no questions for interactive mode.
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

/// Answer to a yes/no question, also used as a question's default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    /// Affirmative.
    Yes,
    /// Negative.
    No,
}

impl Answer {
    /// The `[Y/n]` / `[y/N]` hint shown after a question.
    #[must_use]
    pub const fn hint(self) -> &'static str {
        match self {
            Self::Yes => "[Y/n]",
            Self::No => "[y/N]",
        }
    }
}

/// Interpret a reply to a question whose default is `default`.
///
/// An empty reply accepts the default, `y` and `n` (any case) are explicit,
/// and anything else counts as no. There is no re-asking.
#[must_use]
pub fn parse_answer(reply: &str, default: Answer) -> Answer {
    let reply = reply.trim();
    if reply.is_empty() {
        default
    } else if reply.eq_ignore_ascii_case("y") {
        Answer::Yes
    } else {
        Answer::No
    }
}

/// Asks the operator a yes/no question.
#[cfg_attr(test, mockall::automock)]
pub trait Prompt {
    /// Ask `question` once and return the answer.
    ///
    /// # Errors
    ///
    /// Returns an error if the question cannot be shown or the reply cannot
    /// be read.
    fn ask(&mut self, question: &str, default: Answer) -> Result<Answer>;
}

/// [`Prompt`] over a line-oriented reader and a writer.
///
/// End of input is treated as an empty reply.
#[derive(Debug)]
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    /// Create a prompt reading replies from `input` and writing questions to `output`.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl LinePrompt<io::StdinLock<'static>, io::Stdout> {
    /// Prompt on the process's standard input and output.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn ask(&mut self, question: &str, default: Answer) -> Result<Answer> {
        write!(self.output, "{question} {} ", default.hint()).context("failed to show prompt")?;
        self.output.flush().context("failed to show prompt")?;

        let mut reply = String::new();
        self.input
            .read_line(&mut reply)
            .context("failed to read reply")?;
        Ok(parse_answer(&reply, default))
    }
}
