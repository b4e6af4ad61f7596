//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum, ValueHint};

use crate::config::RenderStyle;
use crate::order::Order;

/// Build binary trees from scripts and walk them in pre-, in- or post-order
#[derive(Parser, Debug)]
#[command(name = "bintree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug level: -d info, -dd debug, -ddd trace
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Print shell completions and exit
    #[arg(long = "generate", value_enum)]
    pub generator: Option<clap_complete::Shell>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the values of a tree in traversal order
    Traverse {
        /// Build script, `-` for stdin
        #[arg(value_hint = ValueHint::FilePath)]
        script: PathBuf,

        /// Traversal order (default from config)
        #[arg(short, long, value_enum)]
        order: Option<OrderArg>,
    },

    /// Render the tree structure
    Show {
        /// Build script, `-` for stdin
        #[arg(value_hint = ValueHint::FilePath)]
        script: PathBuf,

        /// Rendering (default from config)
        #[arg(short, long, value_enum)]
        style: Option<RenderStyle>,
    },

    /// Print node count, depth and leaves
    Stats {
        /// Build script, `-` for stdin
        #[arg(value_hint = ValueHint::FilePath)]
        script: PathBuf,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Traversal selection on the command line, `all` prints every order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    Pre,
    In,
    Post,
    All,
}

impl OrderArg {
    pub fn orders(self) -> Vec<Order> {
        match self {
            OrderArg::Pre => vec![Order::PreOrder],
            OrderArg::In => vec![Order::InOrder],
            OrderArg::Post => vec![Order::PostOrder],
            OrderArg::All => Order::ALL.to_vec(),
        }
    }
}

impl From<Order> for OrderArg {
    fn from(order: Order) -> Self {
        match order {
            Order::PreOrder => OrderArg::Pre,
            Order::InOrder => OrderArg::In,
            Order::PostOrder => OrderArg::Post,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings as TOML
    Show,
    /// Print a commented config template
    Template,
}
