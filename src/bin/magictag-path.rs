use clap::{Parser, Subcommand};
use itertools::Itertools;
use magictag::{Path, Pattern, Registry, Tag, DEFAULT_ROOT};
use regex::Regex;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(author, version, about = "A utility to inspect tag paths", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print components of the given path
    Parts { path: Path },
    /// Print the final component of the given path
    Name { path: Path },
    /// Print the final component of the given path without its member index
    Stem { path: Path },
    /// Print the member index of the given path, if any
    MemberIndex { path: Path },
    /// Print `true` if the given path is anchored, otherwise exit unsuccessfully
    IsAbsolute { path: Path },
    /// Print the parent of the given path
    Parent { path: Path },
    /// Print every ancestor of the given path, nearest first
    Parents { path: Path },
    /// Print the given path relative to another
    RelativeTo {
        path: Path,
        other: Path,

        /// Use `..` for components of OTHER not shared with PATH
        #[arg(long)]
        walk_up: bool,
    },
    /// Exit unsuccessfully if the given path does not match the pattern
    Match {
        path: Path,
        pattern: String,

        /// Treat the pattern as a regular expression matched from the start
        #[arg(long)]
        regex: bool,
    },
    /// Register tags for the given paths and print those matching the pattern
    ///
    /// Tags are printed in sorted order.
    Query {
        /// Root label of the registry
        #[arg(long, default_value = DEFAULT_ROOT)]
        root: String,

        /// Only print tags under this path
        #[arg(long, value_name = "PATH")]
        under: Option<Path>,

        pattern: String,

        #[arg(value_name = "PATH")]
        paths: Vec<Path>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .finish(),
    )?;

    let args = Args::parse();

    match args.command {
        Some(Commands::Parts { path }) => print!("{}", path.parts().iter().format("\n")),
        Some(Commands::Name { path }) => println!("{}", path.name()),
        Some(Commands::Stem { path }) => println!("{}", path.stem()),
        Some(Commands::MemberIndex { path }) => {
            if let Some(index) = path.member_index() {
                println!("{index}")
            }
        }
        Some(Commands::IsAbsolute { path }) => {
            if path.is_absolute() {
                println!("true")
            } else {
                std::process::exit(1)
            }
        }
        Some(Commands::Parent { path }) => println!("{}", path.parent()),
        Some(Commands::Parents { path }) => print!("{}", path.parents().format("\n")),
        Some(Commands::RelativeTo {
            path,
            other,
            walk_up,
        }) => println!("{}", path.relative_to(other, walk_up)?),
        Some(Commands::Match {
            path,
            pattern,
            regex,
        }) => {
            let pattern = if regex {
                Pattern::from(Regex::new(&pattern)?)
            } else {
                Pattern::try_from(pattern.as_str())?
            };
            if !path.matches(&pattern) {
                std::process::exit(1)
            }
        }
        Some(Commands::Query {
            root,
            under,
            pattern,
            paths,
        }) => {
            let registry = Registry::new(root);
            for path in paths {
                Tag::from_path(&registry, path);
            }
            let matches = match under {
                Some(under) => Tag::from_path(&registry, under)
                    .query(&pattern, true)?
                    .into_iter()
                    .map(|tag| tag.to_string())
                    .collect_vec(),
                None => registry
                    .query(&pattern)?
                    .into_iter()
                    .map(|path| Tag::from_path(&registry, path).to_string())
                    .collect_vec(),
            };
            print!("{}", matches.into_iter().sorted().format("\n"))
        }
        None => {}
    }

    Ok(())
}
