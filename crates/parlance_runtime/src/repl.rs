//! The main REPL implementation.
//!
//! Lines starting with `@` are REPL commands. Everything else is handed to
//! the session as player input.

use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::serialize;
use crate::session::Session;
use parlance_foundation::{Error, ErrorKind, Result};
use std::fs;
use std::path::Path;

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// The world and the player typing into it.
    session: Session,

    /// Whether to show the welcome banner.
    show_banner: bool,

    /// Primary prompt.
    prompt: String,
}

/// What one line asked the REPL to do.
enum Step {
    Continue(Vec<String>),
    Quit,
}

impl Repl<RustylineEditor> {
    /// Creates a new REPL over the demo world with the rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new() -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor, Session::demo()?))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a new REPL with the given editor and session.
    pub fn with_editor(editor: E, session: Session) -> Self {
        Self {
            editor,
            session,
            show_banner: true,
            prompt: "> ".to_string(),
        }
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Sets the primary prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns a mutable reference to the session.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Runs the REPL loop.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }
        for line in self.session.handle("look") {
            println!("{line}");
        }

        loop {
            self.editor.set_completions(self.session.command_words());
            let line = match self.editor.read_line(&self.prompt)? {
                ReadResult::Line(line) => line,
                ReadResult::Interrupted => continue,
                ReadResult::Eof => break,
            };
            if line.trim().is_empty() {
                continue;
            }
            self.editor.add_history(&line);

            match self.step(&line) {
                Ok(Step::Continue(output)) => {
                    for text in output {
                        println!("{text}");
                    }
                }
                Ok(Step::Quit) => break,
                Err(e) => print_error(&e),
            }
        }

        println!("\nGoodbye!");
        Ok(())
    }

    /// Evaluates one line and returns what the player sees.
    ///
    /// # Errors
    ///
    /// Returns an error if a REPL command fails, for example a snapshot
    /// that cannot be written.
    pub fn eval(&mut self, line: &str) -> Result<Vec<String>> {
        match self.step(line)? {
            Step::Continue(output) => Ok(output),
            Step::Quit => Ok(Vec::new()),
        }
    }

    /// Evaluates every line of a script, skipping blanks and `#` comments.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a REPL command in it
    /// fails.
    pub fn eval_file(&mut self, path: &Path) -> Result<Vec<String>> {
        let script = fs::read_to_string(path).map_err(|e| {
            Error::new(ErrorKind::Io(format!("{}: {e}", path.display())))
        })?;
        let mut output = Vec::new();
        for line in script.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            output.push(format!("{}{line}", self.prompt));
            output.extend(self.eval(line)?);
        }
        Ok(output)
    }

    fn step(&mut self, line: &str) -> Result<Step> {
        let Some(meta) = line.trim().strip_prefix('@') else {
            return Ok(Step::Continue(self.session.handle(line)));
        };
        let (command, rest) = meta.split_once(char::is_whitespace).unwrap_or((meta, ""));
        let rest = rest.trim();
        let output = match command {
            "quit" | "exit" => return Ok(Step::Quit),
            "help" => {
                let mut output = vec!["Commands in reach:".to_string()];
                output.extend(self.session.available_commands());
                output
            }
            "save" if !rest.is_empty() => {
                serialize::save_to_file(self.session.world(), rest)?;
                vec![format!("Saved world to {rest}.")]
            }
            "load" if !rest.is_empty() => {
                let world = serialize::load_from_file(rest)?;
                self.session.set_world(world);
                vec![format!("Loaded world from {rest}.")]
            }
            "save" | "load" => vec![format!("Usage: @{command} <path>")],
            _ => vec![format!("Unknown REPL command: @{command}")],
        };
        Ok(Step::Continue(output))
    }

    #[allow(clippy::unused_self)]
    fn print_banner(&self) {
        println!(
            "\x1b[1mParlance\x1b[0m v{} - type commands, @help for what you can do, @quit to leave.",
            env!("CARGO_PKG_VERSION")
        );
        println!();
    }
}

fn print_error(error: &Error) {
    eprintln!("\x1b[31mError: {error}\x1b[0m");
}
