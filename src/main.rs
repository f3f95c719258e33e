mod app;
mod cli;
mod color;
mod data;
mod error;
mod pipeline;
mod render;
mod state;
mod ui;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use cli::Cli;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let result = run(Cli::parse());
    if let Err(e) = &result {
        eprintln!("Error: {e:#}");
    }
    ExitCode::from(exit_status(&result))
}

/// Every failure, whatever its kind, exits with status 1.
fn exit_status(result: &anyhow::Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let request = cli.into_request()?;

    let table = pipeline::prepare(&request)
        .with_context(|| format!("preparing plot input from {}", request.matrix_path.display()))?;

    if let Some(path) = &request.long_out {
        pipeline::export_long(&table, path)
            .with_context(|| format!("writing long table to {}", path.display()))?;
    }

    render::render(&table, &request.render).context("rendering strip plot")
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::error::StripError;

    fn has_cause(err: &anyhow::Error, pred: impl Fn(&StripError) -> bool) -> bool {
        err.chain()
            .any(|cause| cause.downcast_ref::<StripError>().is_some_and(&pred))
    }

    #[test]
    fn test_success_exits_zero() {
        assert_eq!(exit_status(&Ok(())), 0);
    }

    #[test]
    fn test_missing_row_source_exits_one_before_loading() {
        // The matrix path does not exist; the selection check fires first.
        let cli = Cli::try_parse_from([
            "replicate-strip",
            "--csv",
            "/nonexistent/matrix.tsv",
            "--s1_pattern",
            "A",
            "--s2_pattern",
            "B",
        ])
        .unwrap();

        let result = run(cli);
        let err = result.as_ref().unwrap_err();
        assert!(has_cause(err, |e| matches!(e, StripError::MissingSelection(_))));
        assert_eq!(exit_status(&result), 1);
    }

    #[test]
    fn test_unmatched_patterns_exit_one() {
        let mut file: NamedTempFile = tempfile::Builder::new().suffix(".tsv").tempfile().unwrap();
        file.write_all(b"id\tA1\tB1\ngene1\t1.0\t2.0\n").unwrap();
        file.flush().unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let cli = Cli::try_parse_from([
            "replicate-strip",
            "--csv",
            path.as_str(),
            "--s1_pattern",
            "X",
            "--s2_pattern",
            "Y",
            "--target_row_label",
            "gene1",
        ])
        .unwrap();

        let result = run(cli);
        let err = result.as_ref().unwrap_err();
        assert!(has_cause(err, |e| matches!(e, StripError::NoColumnsMatched { .. })));
        assert_eq!(exit_status(&result), 1);
    }
}
