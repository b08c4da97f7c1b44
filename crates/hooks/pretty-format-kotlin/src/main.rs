//! Pre-commit hook: Check Kotlin formatting with ktlint.
//!
//! Downloads the requested ktlint release into the artifact cache, runs it in
//! check mode and, with `--autofix`, runs it again in format mode on just the
//! files it complained about.
//!
//! ktlint does not exit non-zero when formatting, which is why checking and
//! fixing are separate invocations.

use anyhow::Result;
use clap::Parser;
use hook_common::prelude::*;
use hook_common::report::parse_diagnostic_paths;
use std::process::ExitCode;

const HOOK_NAME: &str = "pretty-format-kotlin";
const JAVA: &str = "java";

/// ktlint needs extra module access flags from this Java release on.
const JAVA_OPTS_THRESHOLD: u64 = 16;

/// `--enable-java-version-check` rejects this Java release and anything newer.
const JAVA_VERSION_CEILING: u64 = 16;

const COMPAT_JAVA_OPTS: [&str; 2] = [
    "--add-opens=java.base/java.lang=ALL-UNNAMED",
    "--add-exports=java.base/sun.nio.ch=ALL-UNNAMED",
];

#[derive(Debug, Parser)]
#[command(name = HOOK_NAME, version, about = "Check and fix Kotlin formatting with ktlint")]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    /// KTLint version to use (defaults to the configured version)
    #[arg(long = "ktlint-version")]
    ktlint_version: Option<String>,

    /// Check if java version is compatible
    #[arg(long)]
    enable_java_version_check: bool,

    /// Never fail
    #[arg(long)]
    fail_never: bool,

    /// Extra JVM options; when empty they are picked from the Java version
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    java_opts: String,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = HookConfig::from_env();

    let hook = KtlintHook {
        runner: &SystemRunner,
        downloader: &HttpDownloader,
        cache: ArtifactCache::new(config.cache_dir.clone()),
    };

    let status = hook.run(&cli, &config)?;
    Ok(status.into())
}

fn ktlint_url(version: &str) -> String {
    format!("https://github.com/pinterest/ktlint/releases/download/{version}/ktlint")
}

fn ktlint_artifact_name(version: &str) -> String {
    format!("ktlint{version}.jar")
}

/// Pick the JVM options: explicit ones win, otherwise they depend on the
/// runtime version reported by `detect`.
fn resolve_java_opts(
    explicit: &str,
    detect: impl FnOnce() -> Result<RuntimeVersion>,
) -> Result<Vec<String>> {
    if !explicit.trim().is_empty() {
        return shell_words::split(explicit)
            .with_context(|| format!("Invalid --java-opts: {}", explicit));
    }

    let version = detect()?;
    if version >= RuntimeVersion::major(JAVA_OPTS_THRESHOLD) {
        Ok(COMPAT_JAVA_OPTS.iter().map(|opt| opt.to_string()).collect())
    } else {
        Ok(Vec::new())
    }
}

fn ktlint_args(java_opts: &[String], jar: &str, format: bool, files: &[String]) -> Vec<String> {
    let mut args = java_opts.to_vec();
    args.extend(["-jar", jar, "--verbose", "--relative"].map(String::from));
    if format {
        args.push("--format".to_string());
    }
    args.push("--".to_string());
    args.extend(files.iter().cloned());
    args
}

struct KtlintHook<'a> {
    runner: &'a dyn CommandRunner,
    downloader: &'a dyn Downloader,
    cache: ArtifactCache,
}

impl KtlintHook<'_> {
    fn run(&self, cli: &Cli, config: &HookConfig) -> Result<HookStatus> {
        self.ensure_java(cli.enable_java_version_check)?;

        let files = normalize_paths(&cli.common.filenames);
        if files.is_empty() {
            log_decision(config, HOOK_NAME, "result", "clean", "no files to check");
            return Ok(HookStatus::Clean.overridden(cli.fail_never));
        }

        let version = config.ktlint_version_or_default(cli.ktlint_version.as_deref());
        let artifact = self.cache.fetch(
            &ktlint_artifact_name(&version),
            &ktlint_url(&version),
            &version,
            self.downloader,
        )?;
        log_decision(
            config,
            HOOK_NAME,
            "artifact",
            if artifact.downloaded { "downloaded" } else { "cached" },
            artifact.path.as_str(),
        );

        let java_opts = resolve_java_opts(&cli.java_opts, || self.java_version())?;
        let jar = artifact.path.as_str();

        let check = self
            .runner
            .run(JAVA, &ktlint_args(&java_opts, jar, false, &files))?;

        // Any non-zero exit is read as a list of offending files.
        let unformatted = if check.success {
            Default::default()
        } else {
            parse_diagnostic_paths(&check.combined_output())
        };
        HookDebugLog::new(HOOK_NAME, "check")
            .with_decision(
                if unformatted.is_empty() { "clean" } else { "unformatted" },
                &format!("ktlint exited with {:?}", check.exit_code),
            )
            .with_files(unformatted.iter().cloned())
            .with_context(&check.combined_output())
            .write(config)
            .ok();

        let report = CheckReport::new("ktlint", cli.common.autofix).with_files(unformatted);

        if cli.common.autofix && !report.is_clean() {
            println!("Running ktlint format on {}", report.file_list());
            let targets = normalize_paths(&report.files);
            let fix = self
                .runner
                .run(JAVA, &ktlint_args(&java_opts, jar, true, &targets))?;
            log_decision(
                config,
                HOOK_NAME,
                "fix",
                if fix.success { "formatted" } else { "format-failed" },
                &format!("ktlint --format exited with {:?}", fix.exit_code),
            );
        }

        if let Some(summary) = report.summary() {
            println!("{}", summary);
        }

        let status = report.status().overridden(cli.fail_never);
        log_decision(config, HOOK_NAME, "result", &format!("exit {}", status.code()), "");
        Ok(status)
    }

    fn ensure_java(&self, check_ceiling: bool) -> Result<()> {
        if !self.runner.is_available(JAVA) {
            return Err(HookError::RuntimeMissing {
                program: JAVA.to_string(),
            }
            .into());
        }

        // ktlint fails with an opaque stack trace on newer JVMs; report it
        // up front instead.
        if check_ceiling {
            let version = self.java_version()?;
            let ceiling = RuntimeVersion::major(JAVA_VERSION_CEILING);
            if version >= ceiling {
                return Err(HookError::RuntimeTooNew {
                    found: version.to_string(),
                    ceiling: ceiling.to_string(),
                }
                .into());
            }
        }

        Ok(())
    }

    fn java_version(&self) -> Result<RuntimeVersion> {
        let args = ["-XshowSettings:properties", "-version"].map(String::from);
        let result = self.runner.run(JAVA, &args)?;
        Ok(RuntimeVersion::from_java_properties(&result.combined_output())?)
    }
}
