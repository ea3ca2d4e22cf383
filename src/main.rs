use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, Subcommand};
use minibit::areas::repository::Repository;
use minibit::commands::plumbing::cat_file::CatFileMode;
use minibit::commands::porcelain::clone;
use minibit::observability;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "minibit",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A content-addressable object store speaking git's on-disk format",
    long_about = "This tool writes and reads git-compatible loose objects: blobs, trees and commits. \
    It covers the object model only; staging, merging and network transports are left to git itself.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path. \
        It fails if a repository already exists there."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(
        name = "cat-file",
        about = "Print the type, size or content of an object",
        group(ArgGroup::new("mode").required(true).args(["pretty", "kind", "size"]))
    )]
    CatFile {
        #[arg(short = 'p', help = "Pretty-print the object's content")]
        pretty: bool,
        #[arg(short = 't', help = "Print the object's type")]
        kind: bool,
        #[arg(short = 's', help = "Print the object's size")]
        size: bool,
        #[arg(index = 1, help = "The object ID")]
        object: String,
    },
    #[command(
        name = "hash-object",
        about = "Compute a file's blob ID and optionally write it to the object database"
    )]
    HashObject {
        #[arg(short, long, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(name = "ls-tree", about = "List the contents of a tree object")]
    LsTree {
        #[arg(long, help = "List only entry names")]
        name_only: bool,
        #[arg(index = 1, help = "A tree or commit object ID")]
        object: String,
    },
    #[command(
        name = "write-tree",
        about = "Write the working directory as tree objects and print the root tree ID"
    )]
    WriteTree,
    #[command(name = "commit-tree", about = "Create a commit object from a tree")]
    CommitTree {
        #[arg(index = 1, help = "The tree object ID")]
        tree: String,
        #[arg(short, long, help = "The parent commit ID")]
        parent: Option<String>,
        #[arg(
            short,
            long,
            required = true,
            help = "The commit message; several are joined as paragraphs"
        )]
        message: Vec<String>,
    },
    #[command(
        name = "clone",
        about = "Clone a repository by delegating to the system git binary"
    )]
    Clone {
        #[arg(index = 1)]
        url: String,
        #[arg(index = 2)]
        directory: PathBuf,
    },
}

fn current_repository() -> Result<Repository> {
    let pwd = std::env::current_dir().context("Unable to read the current directory")?;
    Ok(Repository::new(pwd, Box::new(std::io::stdout()))?)
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Init { path } => {
            let path = match path {
                Some(path) => path,
                None => std::env::current_dir().context("Unable to read the current directory")?,
            };
            Repository::new(path, Box::new(std::io::stdout()))?.init()?;
        }
        Commands::CatFile {
            pretty: _,
            kind,
            size,
            object,
        } => {
            let mode = match (kind, size) {
                (true, _) => CatFileMode::Type,
                (_, true) => CatFileMode::Size,
                _ => CatFileMode::Pretty,
            };
            current_repository()?.cat_file(&object, mode)?;
        }
        Commands::HashObject { write, file } => {
            current_repository()?.hash_object(&file, write)?;
        }
        Commands::LsTree { name_only, object } => {
            current_repository()?.ls_tree(&object, name_only)?;
        }
        Commands::WriteTree => {
            current_repository()?.write_tree()?;
        }
        Commands::CommitTree {
            tree,
            parent,
            message,
        } => {
            current_repository()?.commit_tree(&tree, parent.as_deref(), &message.join("\n\n"))?;
        }
        Commands::Clone { url, directory } => {
            let status = clone::clone(&url, &directory)?;
            if !status.success() {
                let code = status.code().unwrap_or(1);
                eprintln!("fatal: git clone failed (exit {code})");
                return Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)));
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    if let Err(err) = observability::init_tracing() {
        eprintln!("warning: logging disabled: {err}");
    }

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("fatal: {err:#}");
            ExitCode::FAILURE
        }
    }
}
