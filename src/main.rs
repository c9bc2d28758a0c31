use argh::FromArgs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use vshell::{Config, Interpreter};

#[derive(FromArgs)]
/// A virtual shell over an in-memory file tree.
struct Args {
    #[argh(option, short = 'c')]
    /// run this command line instead of starting the interactive loop; repeatable.
    command: Vec<String>,

    #[argh(option)]
    /// host directory holding file content used by `cp` (default: current directory).
    storage_dir: Option<PathBuf>,

    #[argh(option)]
    /// text file shown by `help` (default: help.txt).
    help_file: Option<PathBuf>,

    #[argh(option)]
    /// session user name (default: $USER).
    user: Option<String>,

    #[argh(switch)]
    /// start from an empty root instead of the sample tree.
    no_seed: bool,

    #[argh(option)]
    /// file to load and save the line history from.
    history: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> (Config, Vec<String>) {
        let defaults = Config::default();
        let config = Config {
            user: self.user.unwrap_or(defaults.user),
            storage_dir: self.storage_dir.unwrap_or(defaults.storage_dir),
            help_file: self.help_file.unwrap_or(defaults.help_file),
            seed: !self.no_seed,
            history: self.history,
        };
        (config, self.command)
    }
}

fn main() -> ExitCode {
    // Logs go to stderr so they never mix with command output.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let (config, commands) = argh::from_env::<Args>().into_config();
    match run(&config, &commands) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:?}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config, commands: &[String]) -> anyhow::Result<ExitCode> {
    let mut shell = Interpreter::from_config(config)?;
    tracing::debug!(
        user = %config.user,
        storage = %config.storage_dir.display(),
        "session started"
    );

    if commands.is_empty() {
        shell.repl(config.history.as_deref())?;
        return Ok(ExitCode::SUCCESS);
    }

    let mut stdout = std::io::stdout();
    let mut last = 0;
    for line in commands {
        last = shell.execute_line(line, &mut stdout)?;
        if shell.env().should_exit {
            break;
        }
    }
    Ok(if last == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
