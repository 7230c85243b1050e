use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

use treescope::tree::{self, TreeNode};
use treescope::workspace::{self, WorkspaceRoot};
use treescope::{FileRef, ProfileStore};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Profile-scoped views of a file tree: pin files, add pattern rules, render the matching subset",
    long_about = None
)]
struct Args {
    /// Profile config file
    #[arg(long, global = true, default_value = ".treescope.toml")]
    config: PathBuf,

    /// Workspace root as NAME=PATH or PATH (repeatable; defaults to the
    /// current directory)
    #[arg(long = "root", value_name = "NAME=PATH", global = true)]
    roots: Vec<String>,

    /// Resolve this profile instead of the stored current one
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Show debug output
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the current profile as a tree
    Tree,
    /// List the files the current profile resolves to
    Files {
        /// Print absolute paths
        #[arg(long)]
        absolute: bool,
    },
    /// Pin files to the current profile
    Pin {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// List profiles
    Profiles,
    /// Create a profile and switch to it
    Create { name: String },
    /// Switch the current profile
    Switch { name: String },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let roots = parse_roots(&args.roots)?;
    let mut store = ProfileStore::initialize(&args.config).with_context(|| {
        format!("failed to open profile store {}", args.config.display())
    })?;
    let profile_name = args
        .profile
        .unwrap_or_else(|| store.current_profile_name().to_string());

    match args.command {
        Command::Tree => {
            let profile = store.profile(&profile_name)?;
            let files = profile.resolve(&roots)?;
            let nodes = tree::build(&files, &roots);
            if nodes.is_empty() {
                println!("No files in profile `{}`.", profile_name);
            } else {
                render_tree(&nodes, 0);
            }
        }
        Command::Files { absolute } => {
            let profile = store.profile(&profile_name)?;
            let mut files = profile.resolve(&roots)?;
            files.sort_by(|a, b| {
                (&a.root_name, &a.relative_path).cmp(&(&b.root_name, &b.relative_path))
            });
            for file in &files {
                print_file(file, &roots, absolute)?;
            }
        }
        Command::Pin { paths } => {
            let mut profile = store.profile(&profile_name)?;
            let mut pinned = 0;
            for path in &paths {
                let abs = fs::canonicalize(path)
                    .with_context(|| format!("cannot pin {}", path.display()))?;
                let Some(root) = workspace::containing_root(&roots, &abs) else {
                    eprintln!(
                        "{}",
                        format!(
                            "warning: {} is outside every workspace root, not pinned",
                            path.display()
                        )
                        .yellow()
                    );
                    continue;
                };
                // containing_root guarantees the prefix holds.
                if let Some(rel) = workspace::relative_str(&root.path, &abs) {
                    profile.add_pinned_file(root.name.clone(), rel);
                    pinned += 1;
                }
            }
            if pinned > 0 {
                store.save_profile(&profile)?;
            }
            println!("Pinned {} file(s) to profile `{}`.", pinned, profile_name);
        }
        Command::Profiles => {
            let current = store.current_profile_name().to_string();
            for name in store.profile_names() {
                if name == current {
                    println!("{} {}", "*".green(), name.bold());
                } else {
                    println!("  {}", name);
                }
            }
        }
        Command::Create { name } => {
            store.create_profile(&name)?;
            store.set_current(&name)?;
            println!("Created profile `{}` and switched to it.", name);
        }
        Command::Switch { name } => {
            store.set_current(&name)?;
            println!("Switched to profile `{}`.", name);
        }
    }

    Ok(())
}

/// Build the workspace root list from `--root` arguments, defaulting to the
/// current directory named after its final component. Paths are
/// canonicalized so pinned files resolve against them by prefix.
fn parse_roots(specs: &[String]) -> Result<Vec<WorkspaceRoot>> {
    if specs.is_empty() {
        let cwd = std::env::current_dir().context("cannot determine current directory")?;
        return Ok(vec![WorkspaceRoot::from_path(cwd)]);
    }

    let mut roots = Vec::with_capacity(specs.len());
    for spec in specs {
        let (name, raw_path) = match spec.split_once('=') {
            Some((name, path)) => (Some(name), path),
            None => (None, spec.as_str()),
        };
        let path = fs::canonicalize(raw_path)
            .with_context(|| format!("workspace root {} is not accessible", raw_path))?;
        roots.push(match name {
            Some(name) => WorkspaceRoot::new(name, path),
            None => WorkspaceRoot::from_path(path),
        });
    }
    Ok(roots)
}

fn print_file(file: &FileRef, roots: &[WorkspaceRoot], absolute: bool) -> Result<()> {
    if absolute {
        // Resolved files always come from an open root, so this cannot miss.
        let abs = file.abs_path(roots)?;
        println!("{}", abs.display());
    } else if roots.len() > 1 {
        println!("{}: {}", file.root_name.bold(), file.relative_path);
    } else {
        println!("{}", file.relative_path);
    }
    Ok(())
}

fn render_tree(nodes: &[TreeNode], depth: usize) {
    let pad = "  ".repeat(depth);
    for node in nodes {
        match node {
            TreeNode::Root { name, children } => {
                println!("{}{}", pad, name.bold());
                render_tree(children, depth + 1);
            }
            TreeNode::Dir { label, children } => {
                println!("{}{}/", pad, label.blue().bold());
                render_tree(children, depth + 1);
            }
            TreeNode::File { label, .. } => {
                println!("{}{}", pad, label);
            }
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "treescope=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}
