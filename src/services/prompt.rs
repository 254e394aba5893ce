//! Console prompts with defaults and yes/no confirmation.

use crate::error::{PromptError, PromptResult};
use std::io::{self, BufRead, Stdin, StdinLock, Stdout, Write};
use std::path::{Path, PathBuf};

/// Asks the user questions one line at a time
pub trait Prompter {
    /// Show `question` and return the trimmed answer; end of input answers with ""
    fn ask(&mut self, question: &str) -> PromptResult<String>;

    /// Ask for a path; an empty answer selects `default` unchanged
    fn ask_path(&mut self, label: &str, default: &Path) -> PromptResult<PathBuf> {
        let answer = self.ask(&format!("{} [{}]: ", label, default.display()))?;
        if answer.is_empty() {
            Ok(default.to_path_buf())
        } else {
            Ok(PathBuf::from(answer))
        }
    }

    /// Ask a yes/no question; only `y` proceeds
    fn confirm(&mut self, question: &str) -> PromptResult<bool> {
        let answer = self.ask(&format!("{} (y/n): ", question))?;
        Ok(is_affirmative(&answer))
    }
}

/// `y` in either case, surrounding whitespace ignored; everything else is a no
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// [`Prompter`] over any line reader and writer
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Get what has been written so far
    pub fn output(&self) -> &W {
        &self.output
    }
}

impl LinePrompter<StdinLock<'static>, Stdout> {
    /// Prompt on the process's stdin and stdout
    pub fn stdio() -> Self {
        let stdin: Stdin = io::stdin();
        Self::new(stdin.lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, question: &str) -> PromptResult<String> {
        self.output
            .write_all(question.as_bytes())
            .and_then(|_| self.output.flush())
            .map_err(PromptError::Write)?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(PromptError::Read)?;
        if read == 0 {
            tracing::debug!("end of input at prompt {:?}", question.trim());
            // keep the transcript on its own line when input is piped
            let _ = writeln!(self.output);
        }
        Ok(line.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> LinePrompter<Cursor<Vec<u8>>, Vec<u8>> {
        LinePrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_empty_answer_uses_default_verbatim() {
        let mut p = prompter("\n   \n");
        let default = Path::new("C:\\o3de");
        assert_eq!(p.ask_path("O3DE source path", default).unwrap(), default);
        assert_eq!(p.ask_path("O3DE source path", default).unwrap(), default);

        let written = String::from_utf8(p.output().clone()).unwrap();
        assert!(written.starts_with("O3DE source path [C:\\o3de]: "));
    }

    #[test]
    fn test_answer_overrides_default() {
        let mut p = prompter("  /opt/engine  \n");
        assert_eq!(
            p.ask_path("O3DE source path", Path::new("/home/me/o3de")).unwrap(),
            PathBuf::from("/opt/engine")
        );
    }

    #[test]
    fn test_end_of_input_is_empty_answer() {
        let mut p = prompter("");
        assert_eq!(p.ask("anything? ").unwrap(), "");
        assert!(!p.confirm("Proceed?").unwrap());
    }

    #[test]
    fn test_confirm_requires_exact_token() {
        for (answer, expected) in [
            ("y\n", true),
            ("Y\n", true),
            (" y \n", true),
            ("yes\n", false),
            ("n\n", false),
            ("\n", false),
            ("yy\n", false),
        ] {
            let mut p = prompter(answer);
            assert_eq!(p.confirm("Proceed?").unwrap(), expected, "answer {:?}", answer);
        }
    }
}
