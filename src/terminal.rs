//! Line editing for interactive terminals.
//!
//! `main` uses [`TerminalInput`] when stdin is a terminal and falls back to
//! the locked stdin reader for piped input.

use std::borrow::Cow;
use std::io::Write;

use reedline::{Prompt, PromptEditMode, PromptHistorySearch, Reedline, Signal};

use crate::error::Result;
use crate::prompt::LineSource;

/// Reedline editor reading one answer per question.
pub struct TerminalInput {
    editor: Reedline,
}

impl TerminalInput {
    pub fn new() -> Self {
        Self {
            editor: Reedline::create(),
        }
    }
}

impl Default for TerminalInput {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSource for TerminalInput {
    fn next_line<W: Write>(&mut self, question: &str, output: &mut W) -> Result<Option<String>> {
        let (lead, prompt) = split_question(question);
        if let Some(lead) = lead {
            writeln!(output, "{lead}")?;
        }
        output.flush()?;

        match self.editor.read_line(&QuestionPrompt(prompt))? {
            Signal::Success(line) => Ok(Some(line)),
            // Ctrl-C and Ctrl-D both end input, like a closed pipe.
            _ => Ok(None),
        }
    }
}

/// The editor owns a single prompt line, so everything up to the last
/// newline of a question is printed before it.
fn split_question(question: &str) -> (Option<&str>, &str) {
    match question.rsplit_once('\n') {
        Some((lead, prompt)) => (Some(lead), prompt),
        None => (None, question),
    }
}

struct QuestionPrompt<'q>(&'q str);

impl Prompt for QuestionPrompt<'_> {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.0)
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _prompt_mode: PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed("... ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        _history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        Cow::Borrowed("(search) ")
    }
}
