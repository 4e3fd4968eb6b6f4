//! Interactive prompting for confirm mode

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result, bail};
use dialoguer::Input;

/// Asks the user about each entry before it is applied
///
/// On a terminal the question goes through `dialoguer`. Otherwise answers are
/// read line by line from standard input, so confirm mode can be scripted.
pub struct ConsolePrompter {
    terminal: bool,
}

impl ConsolePrompter {
    /// Create a prompter for the current standard streams
    #[must_use]
    pub fn new() -> Self {
        Self {
            terminal: io::stdin().is_terminal() && io::stderr().is_terminal(),
        }
    }

    /// Ask `question`; only an explicit yes approves
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal interaction fails or standard input
    /// is closed before an answer is read.
    pub fn prompt(&self, question: &str) -> Result<bool> {
        let answer = if self.terminal {
            Input::<String>::new()
                .with_prompt(format!("{question} [y/N]"))
                .allow_empty(true)
                .interact_text()
                .context("Failed to show prompt")?
        } else {
            Self::read_answer(question)?
        };

        Ok(is_yes(&answer))
    }

    fn read_answer(question: &str) -> Result<String> {
        let mut stderr = io::stderr();
        write!(stderr, "{question} [y/N] ").context("Failed to show prompt")?;
        stderr.flush().context("Failed to show prompt")?;

        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .context("Failed to read answer")?;
        if read == 0 {
            bail!("Standard input closed before an answer was given");
        }
        Ok(line)
    }
}

impl Default for ConsolePrompter {
    fn default() -> Self {
        Self::new()
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
