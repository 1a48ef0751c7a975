//! CLI module for refgraph.
//!
//! Commands:
//! - extract: build and write the reference graph of one declaration
//! - stats: summarize a previously written graph

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use crate::config::{RefGraphConfig, DEFAULT_CONFIG_PATH};
use crate::graph::{GraphBuilder, ReferenceGraph};
use crate::name::Name;
use crate::repository::InMemoryRepository;
use crate::serialize::deserialize;
use crate::sink::FileSink;
use crate::write_graph;

#[derive(Parser)]
#[command(name = "refgraph")]
#[command(about = "Extract the reference graph of a declaration", long_about = None)]
pub struct Cli {
    /// Config file (default: .refgraph/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the graph rooted at a declaration and write <ROOT>.json
    Extract {
        /// Fully-qualified root name, e.g. Nat.add_comm
        root: String,

        /// Environment dump (.json, .yaml or .yml)
        #[arg(short, long)]
        env: PathBuf,

        /// Output directory (overrides config)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,

        /// Resolve lookups on a single thread
        #[arg(long)]
        sequential: bool,
    },

    /// Summarize a written graph
    Stats {
        /// Path to a graph JSON file
        file: PathBuf,
    },
}

impl Cli {
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }
}

/// Execute a parsed command line.
pub fn run(cli: Cli, config: RefGraphConfig) -> Result<()> {
    match cli.command {
        Commands::Extract {
            root,
            env,
            out,
            pretty,
            sequential,
        } => {
            let root = Name::parse(&root)?;
            let repo = InMemoryRepository::load(&env)?;
            let (graph, stats) = GraphBuilder::new(&repo)
                .with_parallel(config.parallel && !sequential)
                .build_with_stats(&root)?;

            let out_dir = out.unwrap_or(config.output_dir);
            let mut sink = FileSink::new(out_dir);
            let path = write_graph(&graph, &root, &mut sink, pretty || config.pretty)?;

            println!("{}", path.display());
            println!(
                "{} nodes, {} references, {} dangling, {} rounds{}",
                graph.len(),
                graph.edge_count(),
                graph.dangling().len(),
                stats.rounds,
                if stats.truncated { " (capped)" } else { "" }
            );
        }

        Commands::Stats { file } => {
            let bytes =
                fs::read(&file).with_context(|| format!("reading {}", file.display()))?;
            let nodes = deserialize(&bytes)
                .with_context(|| format!("parsing {}", file.display()))?;
            let root = nodes.first().map(|n| n.name.to_string());
            let view = ReferenceGraph::from_nodes(nodes);

            if let Some(root) = root {
                println!("Root: {root}");
            }
            println!("{}", view.stats());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extract_args() {
        let cli = Cli::try_parse_from([
            "refgraph",
            "extract",
            "Nat.add_comm",
            "--env",
            "env.json",
            "--pretty",
        ])
        .unwrap();
        assert_eq!(cli.config_path(), PathBuf::from(DEFAULT_CONFIG_PATH));
        match cli.command {
            Commands::Extract {
                root,
                env,
                out,
                pretty,
                sequential,
            } => {
                assert_eq!(root, "Nat.add_comm");
                assert_eq!(env, PathBuf::from("env.json"));
                assert!(out.is_none());
                assert!(pretty);
                assert!(!sequential);
            }
            Commands::Stats { .. } => panic!("expected extract"),
        }
    }

    #[test]
    fn test_extract_requires_env() {
        assert!(Cli::try_parse_from(["refgraph", "extract", "Nat.add_comm"]).is_err());
    }

    #[test]
    fn test_run_extract_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let env = dir.path().join("env.json");
        fs::write(
            &env,
            r#"[{"name":"a","form":"theorem","references":["b"]},{"name":"b","form":"axiom"}]"#,
        )
        .unwrap();

        let cli = Cli::try_parse_from([
            "refgraph",
            "extract",
            "a",
            "--env",
            env.to_str().unwrap(),
            "--out",
            dir.path().to_str().unwrap(),
        ])
        .unwrap();
        run(cli, RefGraphConfig::default()).unwrap();

        let nodes = deserialize(&fs::read(dir.path().join("a.json")).unwrap()).unwrap();
        assert_eq!(nodes.len(), 2);
    }

    #[test]
    fn test_run_extract_unknown_root_fails() {
        let dir = tempfile::tempdir().unwrap();
        let env = dir.path().join("env.json");
        fs::write(&env, r#"[{"name":"a","form":"axiom"}]"#).unwrap();

        let cli = Cli::try_parse_from([
            "refgraph",
            "extract",
            "zzz",
            "--env",
            env.to_str().unwrap(),
            "--out",
            dir.path().to_str().unwrap(),
        ])
        .unwrap();
        assert!(run(cli, RefGraphConfig::default()).is_err());
        assert!(!dir.path().join("zzz.json").exists());
    }
}
