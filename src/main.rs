use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use gitlet::areas::repository::{GITLET_DIR, Repository};
use gitlet::artifacts::core::error::{GitletError, user_error};
use gitlet::artifacts::core::output::Output;
use std::io::Write;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "gitlet",
    version = "0.1.0",
    about = "A miniature version-control system",
    long_about = "Gitlet tracks the regular files of one directory, records snapshots \
    of them as commits, and supports branches and three-way merges.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Create a new repository in the current directory"
    )]
    Init,
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1)]
        file: String,
    },
    #[command(
        name = "commit",
        about = "Record the staged changes with the given message"
    )]
    Commit {
        #[arg(index = 1, allow_hyphen_values = true)]
        message: String,
    },
    #[command(
        name = "rm",
        about = "Unstage a file, or stage its removal and delete it"
    )]
    Rm {
        #[arg(index = 1)]
        file: String,
    },
    #[command(
        name = "log",
        about = "Show the history of the current branch, most recent first"
    )]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(
        name = "find",
        about = "Print the ids of the commits with the given message"
    )]
    Find {
        #[arg(index = 1, allow_hyphen_values = true)]
        message: String,
    },
    #[command(name = "status", about = "Show the state of the repository")]
    Status,
    #[command(
        name = "checkout",
        about = "Restore a file or switch branches",
        long_about = "checkout -- <file> restores a file from HEAD, \
        checkout <commit> -- <file> restores it from a commit, \
        checkout <branch> switches to a branch."
    )]
    Checkout {
        #[arg(index = 1, help = "A branch name, or a commit id when followed by -- <file>")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "The file to restore")]
        file: Vec<String>,
    },
    #[command(
        name = "branch",
        about = "Create a branch pointing at the current head"
    )]
    Branch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch")]
    RmBranch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(
        name = "reset",
        about = "Check out a commit and move the current branch to it"
    )]
    Reset {
        #[arg(index = 1)]
        commit: String,
    },
    #[command(name = "merge", about = "Merge a branch into the current branch")]
    Merge {
        #[arg(index = 1)]
        branch: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let outcome = match Cli::try_parse() {
        Ok(cli) => run(cli.command).await,
        Err(error) => reject_arguments(error),
    };

    match outcome {
        Err(error) => match user_error(&error) {
            Some(user_error) => {
                tracing::debug!(?error, "command refused");
                println!("{user_error}");
                Ok(())
            }
            None => Err(error),
        },
        Ok(()) => Ok(()),
    }
}

async fn run(command: Option<Commands>) -> Result<()> {
    let Some(command) = command else {
        anyhow::bail!(GitletError::MissingCommand);
    };

    let pwd = std::env::current_dir()?;
    let path = pwd.to_string_lossy();

    match command {
        Commands::Init => {
            let mut repository = Repository::new(&path, Box::new(std::io::stdout()))?;

            repository.init().await?
        }
        Commands::Add { file } => open_repository(&path)?.add(&file).await?,
        Commands::Commit { message } => open_repository(&path)?.commit(&message).await?,
        Commands::Rm { file } => open_repository(&path)?.rm(&file).await?,
        Commands::Log => with_pager(&path, async |repository| repository.log().await).await?,
        Commands::GlobalLog => {
            with_pager(&path, async |repository| repository.global_log().await).await?
        }
        Commands::Find { message } => open_repository(&path)?.find(&message).await?,
        Commands::Status => open_repository(&path)?.status().await?,
        Commands::Checkout { target, file } => {
            let mut repository = open_repository(&path)?;

            match (target, file.as_slice()) {
                (None, [file]) => repository.checkout_file(None, file).await?,
                (Some(commit), [file]) => repository.checkout_file(Some(&commit), file).await?,
                (Some(branch), []) => repository.checkout_branch(&branch).await?,
                _ => anyhow::bail!(GitletError::BadOperands),
            }
        }
        Commands::Branch { name } => open_repository(&path)?.branch(&name).await?,
        Commands::RmBranch { name } => open_repository(&path)?.rm_branch(&name).await?,
        Commands::Reset { commit } => open_repository(&path)?.reset(&commit).await?,
        Commands::Merge { branch } => open_repository(&path)?.merge(&branch).await?,
    }

    Ok(())
}

/// Open the repository in `path`, writing to stdout
fn open_repository(path: &str) -> Result<Repository> {
    let repository = Repository::new(path, Box::new(std::io::stdout()))?;
    repository.ensure_initialized()?;

    Ok(repository)
}

/// Run a history command through the pager when stdout is a terminal
async fn with_pager<F>(path: &str, command: F) -> Result<()>
where
    F: AsyncFnOnce(&mut Repository) -> Result<()>,
{
    let output = Output::detect();
    let mut repository = Repository::new(path, output.writer())?;
    repository.ensure_initialized()?;

    command(&mut repository).await?;
    repository.writer().flush()?;
    drop(repository);

    output.finish()
}

/// Translate an argument parsing failure into the matching user error
fn reject_arguments(error: clap::Error) -> Result<()> {
    if matches!(error.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        error.exit();
    }

    let Some(command_name) = std::env::args_os().nth(1) else {
        anyhow::bail!(GitletError::MissingCommand);
    };
    let command_name = command_name.to_string_lossy();
    let is_known = Cli::command()
        .get_subcommands()
        .any(|subcommand| subcommand.get_name() == command_name);
    if !is_known {
        anyhow::bail!(GitletError::UnknownCommand);
    }

    if command_name != "init" && !Path::new(GITLET_DIR).is_dir() {
        anyhow::bail!(GitletError::NotInitialized);
    }

    tracing::debug!(%error, "rejected operands");
    anyhow::bail!(GitletError::BadOperands)
}
