//! Pre-commit hook: Check Go formatting with gofmt.
//!
//! gofmt is expected to be installed and on PATH already.

use anyhow::Result;
use clap::Parser;
use hook_common::prelude::*;
use hook_common::report::parse_listed_paths;
use std::process::ExitCode;

const HOOK_NAME: &str = "pretty-format-golang";

#[derive(Debug, Parser)]
#[command(name = HOOK_NAME, version, about = "Check and fix Go formatting with gofmt")]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = HookConfig::from_env();
    let status = run(&cli.common, &config, &SystemRunner)?;
    Ok(status.into())
}

/// `gofmt -l` lists files needing changes; `-w` rewrites them as well.
fn gofmt_command(autofix: bool, files: &[String]) -> String {
    format!(
        "gofmt{} -l {}",
        if autofix { " -w" } else { "" },
        shell_join(files)
    )
}

fn run(args: &CommonArgs, config: &HookConfig, runner: &dyn CommandRunner) -> Result<HookStatus> {
    // Without files gofmt would sit waiting on stdin.
    if args.filenames.is_empty() {
        log_decision(config, HOOK_NAME, "result", "clean", "no files to check");
        return Ok(HookStatus::Clean);
    }

    let cmd = gofmt_command(args.autofix, &args.filenames);
    let result = runner.run_shell(&cmd)?;

    // Most likely gofmt is missing from PATH; that is not a formatting verdict.
    if !result.success {
        println!("{}", result.combined_output());
        HookDebugLog::new(HOOK_NAME, "check")
            .with_decision("tool-failed", &format!("gofmt exited with {:?}", result.exit_code))
            .with_context(&result.combined_output())
            .write(config)
            .ok();
        return Ok(HookStatus::Unformatted);
    }

    let report = CheckReport::new("gofmt", args.autofix)
        .with_files(parse_listed_paths(&result.combined_output()));

    HookDebugLog::new(HOOK_NAME, "check")
        .with_decision(
            if report.is_clean() { "clean" } else { "unformatted" },
            &cmd,
        )
        .with_files(report.files.iter().cloned())
        .write(config)
        .ok();

    if let Some(summary) = report.summary() {
        println!("{}", summary);
    }

    Ok(report.status())
}
