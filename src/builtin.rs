use crate::command::{CommandFactory, ExecutableCommand, ExitCode};
use crate::env::Environment;
use crate::interpreter::Factory;
use crate::namespace::{EntryKind, OnMissingDestination};
use anyhow::Result;
use argh::{EarlyExit, FromArgs};
use std::fs::File;
use std::io::{self, Write};

/// Built-in commands known to the shell at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and run against
/// the in-memory namespace held by the [`Environment`].
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "ls" or "cd.".
    fn name() -> &'static str;

    /// Flags the command accepts ahead of its operands.
    ///
    /// Every other token is passed to `argh` after a `--`, so entry names such
    /// as `help` or `-x` reach the command literally.
    fn switches() -> &'static [&'static str] {
        &[]
    }

    /// Executes the command, writing its output to `stdout`.
    ///
    /// Return value should follow shell conventions: 0 for success, non-zero for error.
    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(self: Box<Self>, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        match T::execute(*self, stdout, env) {
            Ok(x) => Ok(x),
            Err(e) => {
                tracing::debug!(command = T::name(), error = %e, "command failed");
                writeln!(stdout, "{}: {}", T::name(), e)?;
                Ok(1)
            }
        }
    }
}

struct InvalidArgs {
    output: String,
    is_error: bool,
}

impl ExecutableCommand for InvalidArgs {
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<ExitCode> {
        writeln!(stdout, "{}", self.output.trim_end())?;
        Ok(if self.is_error { 1 } else { 0 })
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>> {
        if name == T::name() {
            let argv = operands_after_switches(T::switches(), args);
            Some(match T::from_args(&[name], &argv) {
                Ok(cmd) => Box::new(cmd),
                Err(EarlyExit { output, status }) => Box::new(InvalidArgs {
                    output,
                    is_error: status.is_err(),
                }),
            })
        } else {
            None
        }
    }
}

/// Leading `switches` stay as flags; the rest follows a `--` separator.
///
/// A `--` the user typed in that position is consumed rather than doubled.
fn operands_after_switches<'a>(switches: &[&str], args: &[&'a str]) -> Vec<&'a str> {
    let split = args
        .iter()
        .position(|arg| !switches.contains(arg))
        .unwrap_or(args.len());
    let (flags, rest) = args.split_at(split);
    let rest = rest.strip_prefix(&["--"]).unwrap_or(rest);

    let mut argv = flags.to_vec();
    argv.push("--");
    argv.extend_from_slice(rest);
    argv
}

#[derive(FromArgs)]
/// Print the path from the root to the current directory.
pub struct Pwd {}

impl BuiltinCommand for Pwd {
    fn name() -> &'static str {
        "pwd"
    }

    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        writeln!(stdout, "{}", env.session.pwd(&env.namespace))?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Change into a child directory of the current directory.
pub struct Cd {
    #[argh(positional)]
    /// name of the child directory.
    pub target: String,
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        env.session.cd(&env.namespace, &self.target)?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Go back to the parent of the current directory.
pub struct CdBack {}

impl BuiltinCommand for CdBack {
    fn name() -> &'static str {
        "cd."
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        env.session.cd_back(&env.namespace)?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// List the entries of the current directory.
pub struct Ls {}

impl BuiltinCommand for Ls {
    fn name() -> &'static str {
        "ls"
    }

    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        let names = env.namespace.ls(env.session.current());
        if names.is_empty() {
            writeln!(stdout, "No elements present in directory.")?;
        } else {
            writeln!(stdout, "{}", names.join("    "))?;
        }
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Create a directory in the current directory.
pub struct Mkdir {
    #[argh(positional)]
    /// name of the new directory.
    pub name: String,
}

impl BuiltinCommand for Mkdir {
    fn name() -> &'static str {
        "mkdir"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        env.namespace
            .mkdir(env.session.current(), &self.name, EntryKind::Directory)?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Create an empty file in the current directory.
pub struct Touch {
    #[argh(positional)]
    /// name of the new file.
    pub name: String,
}

impl BuiltinCommand for Touch {
    fn name() -> &'static str {
        "touch"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        env.namespace
            .mkdir(env.session.current(), &self.name, EntryKind::File)?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Remove a directory and everything inside it.
pub struct Rmdir {
    #[argh(positional)]
    /// name of the directory to remove.
    pub name: String,
}

impl BuiltinCommand for Rmdir {
    fn name() -> &'static str {
        "rmdir"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        env.namespace.rmdir(env.session.current(), &self.name)?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Remove a file.
pub struct Rm {
    #[argh(positional)]
    /// name of the file to remove.
    pub name: String,
}

impl BuiltinCommand for Rm {
    fn name() -> &'static str {
        "rm"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        env.namespace
            .rm(env.session.current(), &self.name, EntryKind::File)?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Move an entry into a sibling directory.
pub struct Mv {
    #[argh(switch, short = 'p')]
    /// create the destination directory when it does not exist.
    pub create: bool,

    #[argh(positional)]
    /// entry to move.
    pub source: String,

    #[argh(positional)]
    /// directory to move it into.
    pub destination: String,
}

impl BuiltinCommand for Mv {
    fn name() -> &'static str {
        "mv"
    }

    fn switches() -> &'static [&'static str] {
        &["-p", "--create"]
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        let on_missing = if self.create {
            OnMissingDestination::CreateDirectory
        } else {
            OnMissingDestination::Fail
        };
        env.namespace.mv(
            env.session.current(),
            &self.source,
            &self.destination,
            on_missing,
        )?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Copy the content of a file into another file, creating it if needed.
pub struct Cp {
    #[argh(positional)]
    /// file to copy from.
    pub source: String,

    #[argh(positional)]
    /// file to copy into.
    pub destination: String,
}

impl BuiltinCommand for Cp {
    fn name() -> &'static str {
        "cp"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        env.namespace.cp(
            env.session.current(),
            &self.source,
            &self.destination,
            env.store.as_mut(),
        )?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Show the help text.
pub struct Help {}

impl BuiltinCommand for Help {
    fn name() -> &'static str {
        "help"
    }

    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        match File::open(&env.help_file) {
            Ok(mut file) => {
                io::copy(&mut file, stdout)?;
            }
            Err(e) => {
                tracing::debug!(
                    path = %env.help_file.display(),
                    error = %e,
                    "help file unavailable"
                );
            }
        }
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Print the name of the session user.
pub struct Whoami {}

impl BuiltinCommand for Whoami {
    fn name() -> &'static str {
        "whoami"
    }

    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        writeln!(stdout, "{}", env.session.user())?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// End the session.
pub struct Exit {
    #[argh(positional, greedy)]
    /// ignored.
    pub _args: Vec<String>,
}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        env.should_exit = true;
        Ok(0)
    }
}
