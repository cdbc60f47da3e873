use super::render::print_page;
use console::{Key, Term};
use dotnote::error::Result;
use dotnote::prompt::{Page, PageKey, Prompter};
use std::io::{self, BufRead, IsTerminal, Write};

/// Prompter backed by the terminal.
///
/// On a TTY every answer is a single keystroke. Without one (pipes, tests)
/// each answer is read as a line from stdin, and end of input means "stop" or
/// "no".
pub struct ConsolePrompter {
    term: Term,
    interactive: bool,
}

impl ConsolePrompter {
    pub fn new() -> Self {
        let term = Term::stdout();
        let interactive = term.is_term() && io::stdin().is_terminal();
        Self { term, interactive }
    }

    fn ask(&mut self, prompt: &str) -> Result<()> {
        self.term.write_str(prompt)?;
        self.term.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        Ok((read > 0).then(|| line.trim().to_string()))
    }

    /// Reads one keystroke, echoing a newline afterwards so output stays aligned.
    fn read_key(&mut self) -> Result<Key> {
        let key = self.term.read_key()?;
        self.term.write_line("")?;
        Ok(key)
    }
}

impl Default for ConsolePrompter {
    fn default() -> Self {
        Self::new()
    }
}

fn page_key(key: &Key) -> Option<PageKey> {
    match key {
        Key::ArrowRight | Key::ArrowDown | Key::Char('n' | 'j' | ' ') => Some(PageKey::Next),
        Key::ArrowLeft | Key::ArrowUp | Key::Char('p' | 'k') => Some(PageKey::Previous),
        Key::Escape | Key::Enter | Key::Backspace | Key::Char('q') => Some(PageKey::Stop),
        _ => None,
    }
}

fn page_key_from_line(line: &str) -> PageKey {
    match line {
        "n" | "j" | ">" => PageKey::Next,
        "p" | "k" | "<" => PageKey::Previous,
        _ => PageKey::Stop,
    }
}

fn parse_choice(input: &str, max: usize) -> Option<usize> {
    input
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=max).contains(n))
}

impl Prompter for ConsolePrompter {
    fn show_page(&mut self, page: &Page) -> Result<()> {
        if page.is_paginated() {
            println!();
        }
        print_page(page);
        io::stdout().flush()?;
        Ok(())
    }

    fn read_page_key(&mut self) -> Result<PageKey> {
        if !self.interactive {
            return Ok(self
                .read_line()?
                .map(|l| page_key_from_line(&l))
                .unwrap_or(PageKey::Stop));
        }
        loop {
            if let Some(key) = page_key(&self.term.read_key()?) {
                return Ok(key);
            }
        }
    }

    fn read_ordinal_choice(&mut self, max: usize) -> Result<Option<usize>> {
        self.ask(&format!("Select [1-{}]: ", max))?;
        if !self.interactive {
            return Ok(self.read_line()?.and_then(|l| parse_choice(&l, max)));
        }
        Ok(match self.read_key()? {
            Key::Char(c) => parse_choice(&c.to_string(), max),
            _ => None,
        })
    }

    fn read_confirmation(&mut self, question: &str) -> Result<bool> {
        self.ask(&format!("{} ", question))?;
        if !self.interactive {
            return Ok(self
                .read_line()?
                .is_some_and(|l| l.eq_ignore_ascii_case("y")));
        }
        Ok(matches!(self.read_key()?, Key::Char('y' | 'Y')))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_keys() {
        assert_eq!(page_key(&Key::ArrowRight), Some(PageKey::Next));
        assert_eq!(page_key(&Key::Char(' ')), Some(PageKey::Next));
        assert_eq!(page_key(&Key::Char('p')), Some(PageKey::Previous));
        assert_eq!(page_key(&Key::Escape), Some(PageKey::Stop));
        assert_eq!(page_key(&Key::Enter), Some(PageKey::Stop));
        assert_eq!(page_key(&Key::Backspace), Some(PageKey::Stop));
        assert_eq!(page_key(&Key::Char('x')), None);
    }

    #[test]
    fn line_answers() {
        assert_eq!(page_key_from_line("n"), PageKey::Next);
        assert_eq!(page_key_from_line("p"), PageKey::Previous);
        assert_eq!(page_key_from_line(""), PageKey::Stop);
    }

    #[test]
    fn choices_outside_the_page_back_out() {
        assert_eq!(parse_choice("3", 5), Some(3));
        assert_eq!(parse_choice("0", 5), None);
        assert_eq!(parse_choice("6", 5), None);
        assert_eq!(parse_choice("x", 5), None);
    }
}
