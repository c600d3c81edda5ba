mod common;
mod join;
mod validate;

use std::path::PathBuf;

pub enum Command {
    Join {
        config: PathBuf,
        out: Option<PathBuf>,
    },
    Validate {
        config: PathBuf,
        strict: bool,
        out: Option<PathBuf>,
    },
}

pub fn run(command: Command) -> Result<(), String> {
    match command {
        Command::Join { config, out } => join::run_join(config, out),
        Command::Validate {
            config,
            strict,
            out,
        } => validate::run_validate(config, strict, out),
    }
}
