use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use glotaran_compat::{convert, data::loader};

const USAGE: &str = "usage: glotaran-compat <input.json> <output.json> [--cleanup]";

struct Args {
    input: PathBuf,
    output: PathBuf,
    cleanup: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Option<Args> {
    let mut paths = Vec::new();
    let mut cleanup = false;
    for arg in args {
        match arg.as_str() {
            "--cleanup" => cleanup = true,
            flag if flag.starts_with("--") => return None,
            _ => paths.push(PathBuf::from(arg)),
        }
    }
    let [input, output]: [PathBuf; 2] = paths.try_into().ok()?;
    Some(Args {
        input,
        output,
        cleanup,
    })
}

fn run(args: &Args) -> Result<()> {
    let input = loader::load_file(&args.input)?;
    let converted = convert(&input, args.cleanup)
        .with_context(|| format!("converting {}", args.input.display()))?;
    loader::save_file(&args.output, &converted)?;
    log::info!(
        "wrote {} (cleanup: {})",
        args.output.display(),
        args.cleanup
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let Some(args) = parse_args(std::env::args().skip(1)) else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn cleanup_flag_may_come_anywhere() {
        let args = parse_args(strings(&["--cleanup", "in.json", "out.json"])).unwrap();
        assert!(args.cleanup);
        assert_eq!(args.input, PathBuf::from("in.json"));
        assert_eq!(args.output, PathBuf::from("out.json"));
    }

    #[test]
    fn wrong_arity_or_flags_are_rejected() {
        assert!(parse_args(strings(&["in.json"])).is_none());
        assert!(parse_args(strings(&["a", "b", "c"])).is_none());
        assert!(parse_args(strings(&["a", "b", "--force"])).is_none());
    }
}
