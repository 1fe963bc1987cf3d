//! Binary entry point: reads one or more Newick trees, clusters each, and
//! writes a tab-delimited partition table per tree.

use std::fs::File;
use std::io::{self, Read, Write};

use clap::Parser;
use treecluster::cli::Cli;
use treecluster::core::argmax::argmax_clusters;
use treecluster::core::prepare;
use treecluster::error::{Result, TreeClusterError};
use treecluster::{newick, output};

fn read_input(path: &str) -> Result<String> {
    let mut text = String::new();
    if path == "stdin" {
        io::stdin().read_to_string(&mut text)?;
    } else {
        File::open(path)?.read_to_string(&mut text)?;
    }
    Ok(text)
}

fn open_output(path: &str) -> Result<Box<dyn Write>> {
    if path == "stdout" {
        Ok(Box::new(io::stdout()))
    } else {
        Ok(Box::new(File::create(path)?))
    }
}

fn run() -> Result<()> {
    let config = Cli::parse().validate()?;

    let text = read_input(&config.input)?;
    let raw_trees = newick::parse_all(&text)?;
    if raw_trees.is_empty() {
        return Err(TreeClusterError::EmptyInput);
    }

    let mut out = open_output(&config.output)?;

    for raw in raw_trees {
        let (tree, _leaves) = prepare::normalize(raw, config.support)?;
        let partition = if config.threshold_free {
            argmax_clusters(&tree, config.method, config.threshold)
        } else {
            config.method.run(&tree, config.threshold)
        };
        output::write_partition(&mut out, &tree, &partition)?;
    }

    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        eprintln!("treecluster: {err}");
        std::process::exit(1);
    }
}
