use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use miette::{IntoDiagnostic, Result, WrapErr};

use fmtgate_core::{input_names, EnvInputs, FormatMode, InputSource, LayeredInputs, TomlInputs};
use fmtgate_engine::{DotnetRunner, FormatEngine, GitStatus};
use fmtgate_github::{ActionOutput, EventContext, PullRequestFiles};

const DEFAULT_CONFIG: &str = ".fmtgate.toml";

#[derive(Parser)]
#[command(
    name = "fmtgate",
    version,
    about = "Run dotnet format in CI and report whether it changed anything",
    long_about = "Run dotnet format inside a GitHub Actions job.\n\n\
                   Options are read from the action's INPUT_* environment variables,\n\
                   optionally layered over an [inputs] table in a TOML file. The\n\
                   has-changes output is written to $GITHUB_OUTPUT.\n\n\
                   Examples:\n  \
                     fmtgate check                  Fail-fast capable dry run\n  \
                     fmtgate fix                    Format files in place\n  \
                     fmtgate --config ci.toml check Use inputs from a file"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// TOML file with an [inputs] table (default: .fmtgate.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Repository to format and inspect (default: current directory)
    #[arg(long, global = true, default_value = ".")]
    repo: PathBuf,
}

#[derive(Subcommand)]
enum Command {
    /// Report whether formatting would change files, without writing them
    #[command(long_about = "Report whether formatting would change files.\n\n\
        Runs dotnet format --check and trusts its exit code. Publishes has-changes,\n\
        then fails the job if the fail-fast input is \"true\" and changes were found.")]
    Check,
    /// Format files in place and report whether the working tree changed
    #[command(long_about = "Format files in place.\n\n\
        Runs dotnet format, then inspects the git working tree. Publishes\n\
        has-changes; never fails because changes were found.")]
    Fix,
    /// Generate shell completion scripts
    #[command(hide = true)]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(false)
                .build(),
        )
    }))
    .expect("miette handler");
    human_panic::setup_panic!();

    let cli = Cli::parse();

    let mode = match cli.command {
        Command::Check => FormatMode::Check,
        Command::Fix => FormatMode::Apply,
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "fmtgate", &mut std::io::stdout());
            return Ok(());
        }
    };

    fmtgate_github::logging::init().into_diagnostic()?;

    run(mode, cli.config.as_deref(), &cli.repo)
        .await
        .inspect_err(|e| log::error!("{e}"))
}

async fn run(mode: FormatMode, config: Option<&Path>, repo: &Path) -> Result<()> {
    let inputs = LayeredInputs::new(EnvInputs::from_env(), load_file_inputs(config)?);
    let context = EventContext::from_env();

    let lister = PullRequestFiles::new(github_token(&inputs), &context);
    let runner = DotnetRunner::default().in_dir(repo);
    let engine = FormatEngine::new(lister, runner, GitStatus::new(repo));
    let mut output = ActionOutput::from_env();

    match mode {
        FormatMode::Check => {
            fmtgate_engine::check(&inputs, &context.event, &engine, &mut output)
                .await
                .into_diagnostic()?;
        }
        FormatMode::Apply => {
            fmtgate_engine::fix(&inputs, &context.event, &engine, &mut output)
                .await
                .into_diagnostic()?;
        }
    }

    Ok(())
}

fn load_file_inputs(path: Option<&Path>) -> Result<TomlInputs> {
    match path {
        Some(path) => TomlInputs::from_file(path)
            .into_diagnostic()
            .wrap_err(format!("reading {}", path.display())),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG);
            if default_path.exists() {
                TomlInputs::from_file(default_path).into_diagnostic()
            } else {
                Ok(TomlInputs::default())
            }
        }
    }
}

/// The `repo-token` input, then `GITHUB_TOKEN`, then `GH_TOKEN`.
fn github_token(inputs: &impl InputSource) -> Option<String> {
    inputs
        .get(input_names::REPO_TOKEN)
        .filter(|t| !t.is_empty())
        .or_else(|| std::env::var("GITHUB_TOKEN").ok())
        .or_else(|| std::env::var("GH_TOKEN").ok())
        .filter(|t| !t.is_empty())
}
