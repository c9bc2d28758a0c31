use crate::command::{CommandFactory, ExecutableCommand, ExitCode, UNKNOWN_COMMAND};
use crate::config::Config;
use crate::env::Environment;
use anyhow::Context;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::Write;
use std::path::Path;

/// Prompt shown by the interactive loop.
pub const PROMPT: &str = "myshell> ";

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports the builtins defined in this crate.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// The virtual shell: an [`Environment`] plus the commands that can act on it.
///
/// Example
/// ```
/// use vshell::{Environment, Interpreter, Namespace, storage::MemoryStore};
/// let env = Environment::with_store(
///     Namespace::seeded().unwrap(),
///     "me",
///     Box::new(MemoryStore::new()),
/// );
/// let mut sh = Interpreter::with_builtins(env);
/// let mut out = Vec::new();
/// sh.execute_line("cd folder", &mut out).unwrap();
/// sh.execute_line("pwd", &mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "Home/folder\n");
/// ```
pub struct Interpreter {
    env: Environment,
    commands: Vec<Box<dyn CommandFactory>>,
}

impl Interpreter {
    /// Create a new interpreter with a custom set of command factories.
    pub fn new(env: Environment, commands: Vec<Box<dyn CommandFactory>>) -> Self {
        Self { env, commands }
    }

    /// Create an interpreter with every builtin:
    /// `cd`, `cd.`, `pwd`, `ls`, `mkdir`, `touch`, `rmdir`, `rm`, `mv`, `cp`,
    /// `help`, `whoami`, `exit`.
    pub fn with_builtins(env: Environment) -> Self {
        use crate::builtin::*;
        Self::new(
            env,
            vec![
                Box::new(Factory::<Cd>::default()),
                Box::new(Factory::<CdBack>::default()),
                Box::new(Factory::<Pwd>::default()),
                Box::new(Factory::<Ls>::default()),
                Box::new(Factory::<Mkdir>::default()),
                Box::new(Factory::<Touch>::default()),
                Box::new(Factory::<Rmdir>::default()),
                Box::new(Factory::<Rm>::default()),
                Box::new(Factory::<Mv>::default()),
                Box::new(Factory::<Cp>::default()),
                Box::new(Factory::<Help>::default()),
                Box::new(Factory::<Whoami>::default()),
                Box::new(Factory::<Exit>::default()),
            ],
        )
    }

    /// Build the environment from `config` and load every builtin.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::with_builtins(Environment::new(config)?))
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    /// Run a single command invocation by name with arguments.
    ///
    /// Unknown names print a notice and return [`UNKNOWN_COMMAND`]. Errors are
    /// only returned when writing to `stdout` fails.
    pub fn run(
        &mut self,
        name: &str,
        args: &[&str],
        stdout: &mut dyn Write,
    ) -> anyhow::Result<ExitCode> {
        match self.create(name, args) {
            Some(cmd) => {
                let code = cmd.execute(stdout, &mut self.env)?;
                tracing::debug!(command = name, code, "command finished");
                Ok(code)
            }
            None => {
                writeln!(stdout, "Unknown command: {}", name)?;
                Ok(UNKNOWN_COMMAND)
            }
        }
    }

    /// Split `line` on whitespace and run it. Blank lines do nothing.
    pub fn execute_line(&mut self, line: &str, stdout: &mut dyn Write) -> anyhow::Result<ExitCode> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(0);
        };
        let args: Vec<&str> = words.collect();
        self.run(name, &args, stdout)
    }

    /// Read-eval-print loop over the terminal until `exit`, Ctrl-C, or Ctrl-D.
    pub fn repl(&mut self, history: Option<&Path>) -> anyhow::Result<()> {
        let mut rl = DefaultEditor::new().context("failed to create line editor")?;
        if let Some(path) = history {
            if let Err(e) = rl.load_history(path) {
                let is_not_found = matches!(
                    &e,
                    ReadlineError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
                );
                if !is_not_found {
                    tracing::warn!("Failed to load history: {}", e);
                }
            }
        }

        let mut stdout = std::io::stdout();
        while !self.env.should_exit {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    if let Err(e) = rl.add_history_entry(line.as_str()) {
                        tracing::warn!("Failed to add history entry: {}", e);
                    }
                    self.execute_line(&line, &mut stdout)?;
                    stdout.flush()?;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    break;
                }
                Err(err) => {
                    return Err(err).context("failed to read line");
                }
            }
        }

        if let Some(path) = history {
            if let Err(e) = rl.save_history(path) {
                tracing::warn!("Failed to save history: {}", e);
            }
        }
        Ok(())
    }

    fn create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>> {
        self.commands
            .iter()
            .find_map(|factory| factory.try_create(name, args))
    }
}
