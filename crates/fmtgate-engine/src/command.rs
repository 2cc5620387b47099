//! `dotnet format` command line assembly.

use fmtgate_core::{CommandLine, FormatOptions, ResolvedScope};

pub const SUBCOMMAND: &str = "format";
pub const FOLDER: &str = "-f";
pub const CHECK: &str = "--check";
pub const INCLUDE: &str = "--include";
pub const EXCLUDE: &str = "--exclude";
pub const FIX_WHITESPACE: &str = "--fix-whitespace";
pub const FIX_ANALYZERS: &str = "--fix-analyzers";
pub const FIX_STYLE: &str = "--fix-style";
pub const VERBOSITY: &str = "--verbosity";
pub const VERIFY_NO_CHANGES: &str = "--verify-no-changes";

/// Build the argument list for `dotnet`.
///
/// Token order is fixed; a field that is absent contributes nothing.
///
/// # Examples
///
/// ```
/// use fmtgate_core::{FormatOptions, ResolvedScope};
/// use fmtgate_engine::command::assemble;
///
/// let options = FormatOptions {
///     workspace: Some("src".into()),
///     workspace_is_folder: true,
///     dry_run: Some(true),
///     ..FormatOptions::default()
/// };
/// let cmd = assemble(&options, &ResolvedScope::NotScoped);
/// assert_eq!(cmd.tokens(), ["format", "-f", "src", "--check"]);
/// ```
pub fn assemble(options: &FormatOptions, scope: &ResolvedScope) -> CommandLine {
    let mut tokens = vec![SUBCOMMAND.to_string()];

    if let Some(workspace) = &options.workspace {
        if options.workspace_is_folder {
            tokens.push(FOLDER.into());
        }
        tokens.push(workspace.clone());
    }

    if options.is_dry_run() {
        tokens.push(CHECK.into());
    }

    if let Some(files) = scope.files() {
        tokens.push(INCLUDE.into());
        tokens.push(join_include_paths(files));
    }

    push_valued(&mut tokens, EXCLUDE, options.exclude.as_deref());

    if options.fix_whitespace {
        tokens.push(FIX_WHITESPACE.into());
    }

    push_valued(&mut tokens, FIX_ANALYZERS, options.fix_analyzers_level.as_deref());
    push_valued(&mut tokens, FIX_STYLE, options.fix_style_level.as_deref());
    push_valued(&mut tokens, VERBOSITY, options.log_level.as_deref());

    if options.verify_no_changes {
        tokens.push(VERIFY_NO_CHANGES.into());
    }

    CommandLine::from_tokens(tokens)
}

/// Collapse the scoped files into the single `--include` value.
///
/// Paths are joined with one space each, so a path containing a space is
/// split by the formatter. Keep every caller going through here so the
/// encoding can change in one place.
pub fn join_include_paths(files: &[String]) -> String {
    files.join(" ")
}

fn push_valued(tokens: &mut Vec<String>, flag: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        tokens.push(flag.to_string());
        tokens.push(value.to_string());
    }
}
