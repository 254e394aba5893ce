//! Status output: banners, section headings and ✓/✗ lines.

use crossterm::style::Stylize;
use crossterm::tty::IsTty;
use std::io::{self, Stdout, Write};

const RULE_WIDTH: usize = 60;
const BANNER_WIDTH: usize = 58;

/// Line-oriented status writer, styled when attached to a terminal
pub struct Console<W> {
    out: W,
    color: bool,
}

impl Console<Stdout> {
    /// Write to stdout, with colour only when stdout is a terminal
    pub fn stdout() -> Self {
        let out = io::stdout();
        let color = out.is_tty();
        Self::new(out, color)
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)
    }

    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    pub fn rule(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", "=".repeat(RULE_WIDTH))
    }

    /// Blank line, then the title between two rules
    pub fn heading(&mut self, title: &str) -> io::Result<()> {
        self.blank()?;
        self.rule()?;
        if self.color {
            writeln!(self.out, "{}", title.bold())?;
        } else {
            writeln!(self.out, "{}", title)?;
        }
        self.rule()
    }

    /// Title centred in a double-line box
    pub fn banner(&mut self, title: &str) -> io::Result<()> {
        let len = title.chars().count().min(BANNER_WIDTH);
        let left = (BANNER_WIDTH - len) / 2;
        let right = BANNER_WIDTH - len - left;
        let bar = "═".repeat(BANNER_WIDTH);

        self.blank()?;
        writeln!(self.out, "╔{}╗", bar)?;
        writeln!(
            self.out,
            "║{}{}{}║",
            " ".repeat(left),
            title,
            " ".repeat(right)
        )?;
        writeln!(self.out, "╚{}╝", bar)
    }

    /// Green check mark line
    pub fn success(&mut self, text: &str) -> io::Result<()> {
        if self.color {
            writeln!(self.out, "{} {}", "✓".green(), text)
        } else {
            writeln!(self.out, "✓ {}", text)
        }
    }

    /// Red cross line
    pub fn failure(&mut self, text: &str) -> io::Result<()> {
        if self.color {
            writeln!(self.out, "{} {}", "✗".red(), text)
        } else {
            writeln!(self.out, "✗ {}", text)
        }
    }

    pub fn warning(&mut self, text: &str) -> io::Result<()> {
        if self.color {
            writeln!(self.out, "{} {}", "!".yellow(), text)
        } else {
            writeln!(self.out, "! {}", text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> Console<Vec<u8>> {
        Console::new(Vec::new(), false)
    }

    fn text(console: &Console<Vec<u8>>) -> String {
        String::from_utf8(console.get_ref().clone()).unwrap()
    }

    #[test]
    fn test_banner_is_centred() {
        let mut console = plain();
        console.banner("Setup Complete!").unwrap();
        let out = text(&console);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "");
        assert_eq!(lines[2].chars().count(), BANNER_WIDTH + 2);
        assert_eq!(lines[1].chars().count(), lines[2].chars().count());
        assert!(lines[2].contains("Setup Complete!"));
    }

    #[test]
    fn test_plain_status_lines() {
        let mut console = plain();
        console.heading("Configuring Engine with CMake...").unwrap();
        console.success("done").unwrap();
        console.failure("broken").unwrap();
        let rule = "=".repeat(RULE_WIDTH);
        assert_eq!(
            text(&console),
            format!(
                "\n{rule}\nConfiguring Engine with CMake...\n{rule}\n✓ done\n✗ broken\n",
                rule = rule
            )
        );
    }

    #[test]
    fn test_colour_adds_escape_codes() {
        // crossterm honours NO_COLOR
        if std::env::var_os("NO_COLOR").is_some() {
            return;
        }
        let mut console = Console::new(Vec::new(), true);
        console.success("done").unwrap();
        assert!(text(&console).contains("\u{1b}["));
    }
}
