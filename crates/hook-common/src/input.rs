//! Command-line input shared by all formatter hooks.

use clap::Args;

/// Arguments every hook accepts. Flattened into each hook's own parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct CommonArgs {
    /// Automatically fixes encountered not-pretty-formatted files
    #[arg(long)]
    pub autofix: bool,

    /// Filenames to fix
    pub filenames: Vec<String>,
}

/// Replace backslash separators with forward slashes.
///
/// ktlint rejects `\` in path arguments even though its own diagnostics may
/// contain them.
pub fn normalize_paths<I, S>(paths: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    paths
        .into_iter()
        .map(|path| path.as_ref().replace('\\', "/"))
        .collect()
}

/// Join paths into a single shell command line fragment.
///
/// Plain paths pass through untouched; anything a shell would split or
/// expand is quoted.
pub fn shell_join<I, S>(paths: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    shell_words::join(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        common: CommonArgs,
    }

    #[test]
    fn test_parse_common_args() {
        let cli = TestCli::try_parse_from(["hook", "--autofix", "a.kt", "b.kt"]).unwrap();
        assert!(cli.common.autofix);
        assert_eq!(cli.common.filenames, vec!["a.kt", "b.kt"]);
    }

    #[test]
    fn test_no_filenames() {
        let cli = TestCli::try_parse_from(["hook"]).unwrap();
        assert!(!cli.common.autofix);
        assert!(cli.common.filenames.is_empty());
    }

    #[test]
    fn test_normalize_backslashes() {
        assert_eq!(
            normalize_paths([r"src\main\Foo.kt", "src/Bar.kt"]),
            vec!["src/main/Foo.kt", "src/Bar.kt"]
        );
    }

    #[test]
    fn test_shell_join_plain_paths() {
        assert_eq!(shell_join(["a.go", "pkg/b.go"]), "a.go pkg/b.go");
    }

    #[test]
    fn test_shell_join_keeps_awkward_paths_whole() {
        let paths = ["cmd/my tool.go", "it's.go", "$HOME.go"];
        let joined = shell_join(paths);
        assert!(joined.contains("'cmd/my tool.go'"));
        assert_eq!(shell_words::split(&joined).unwrap(), paths);
    }
}
