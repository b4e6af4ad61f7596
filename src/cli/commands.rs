//! Command dispatch

use std::path::Path;

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands, OrderArg};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{RenderStyle, Settings};
use crate::order::Order;
use crate::script::ScriptBuilder;
use crate::tree::BinaryTree;
use crate::tree_traits::TreeNodeConvert;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!("settings: {:?}", settings);

    match &cli.command {
        Some(Commands::Traverse { script, order }) => {
            let order = order.unwrap_or_else(|| OrderArg::from(settings.order));
            _traverse(script, order)
        }
        Some(Commands::Show { script, style }) => _show(script, style.unwrap_or(settings.style)),
        Some(Commands::Stats { script }) => _stats(script),
        Some(Commands::Config { command }) => _config(command, &settings),
        None => Err(CliError::Usage(
            "no command given, see `bintree --help`".to_string(),
        )),
    }
}

fn load_tree(script: &Path) -> CliResult<BinaryTree<String>> {
    Ok(ScriptBuilder::new().build_from_file(script)?)
}

/// Space separated values of `tree` in `order`.
pub fn format_traversal(tree: &BinaryTree<String>, order: Order) -> String {
    tree.begin_order(order).join(" ")
}

pub fn format_tree(tree: &BinaryTree<String>, style: RenderStyle) -> String {
    match style {
        RenderStyle::Debug => tree.to_string(),
        RenderStyle::Tree => tree.to_tree_string().to_string(),
    }
}

#[instrument]
fn _traverse(script: &Path, order: OrderArg) -> CliResult<()> {
    let tree = load_tree(script)?;
    let orders = order.orders();
    if orders.len() == 1 {
        output::info(&format_traversal(&tree, orders[0]));
    } else {
        for order in orders {
            output::action(order.name(), &format_traversal(&tree, order));
        }
    }
    Ok(())
}

#[instrument]
fn _show(script: &Path, style: RenderStyle) -> CliResult<()> {
    let tree = load_tree(script)?;
    print!("{}", format_tree(&tree, style));
    Ok(())
}

#[instrument]
fn _stats(script: &Path) -> CliResult<()> {
    let tree = load_tree(script)?;
    output::action("nodes", &tree.len());
    output::action("depth", &tree.depth());
    output::action("leaves", &tree.leaves().iter().join(" "));
    Ok(())
}

#[instrument(skip(settings))]
fn _config(command: &ConfigCommands, settings: &Settings) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::header("# effective settings");
            print!("{}", settings.to_toml()?);
        }
        ConfigCommands::Template => print!("{}", Settings::template()),
    }
    Ok(())
}
