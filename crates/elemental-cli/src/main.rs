//! `elemental` binary

use clap::{value_parser, Arg, ArgAction, Command};
use elemental_cli::{commands, logging, CliConfig, SearchArgs};
use std::path::PathBuf;

fn recipes_arg() -> Arg {
    Arg::new("recipes")
        .long("recipes")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Recipe JSON file")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Command::new("elemental")
        .version(elemental_core::VERSION)
        .about("Crafting-path search over two-ingredient recipes")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .subcommand(
            Command::new("search")
                .about("Find crafting paths for an item")
                .arg(recipes_arg())
                .arg(
                    Arg::new("target")
                        .long("target")
                        .required(true)
                        .help("Item to craft"),
                )
                .arg(
                    Arg::new("all")
                        .long("all")
                        .action(ArgAction::SetTrue)
                        .help("Return every path up to --max instead of the shortest"),
                )
                .arg(
                    Arg::new("dfs")
                        .long("dfs")
                        .action(ArgAction::SetTrue)
                        .help("Depth-first, tier-checked expansion"),
                )
                .arg(
                    Arg::new("max")
                        .long("max")
                        .default_value("1")
                        .value_parser(value_parser!(usize))
                        .help("Maximum number of paths"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Summarise a recipe file")
                .arg(recipes_arg()),
        );

    let matches = cli.get_matches();
    let config = CliConfig::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    logging::init(&config.log)?;

    let mut stdout = std::io::stdout().lock();
    match matches.subcommand() {
        Some(("search", args)) => {
            let args = SearchArgs {
                recipes: args.get_one::<PathBuf>("recipes").cloned().unwrap_or_default(),
                target: args.get_one::<String>("target").cloned().unwrap_or_default(),
                all: args.get_flag("all"),
                dfs: args.get_flag("dfs"),
                max: args.get_one::<usize>("max").copied().unwrap_or(1),
                json: args.get_flag("json"),
            };
            let found = commands::search(&args, &config, &mut stdout).await?;
            if !found {
                std::process::exit(1);
            }
        }
        Some(("inspect", args)) => {
            let recipes = args.get_one::<PathBuf>("recipes").cloned().unwrap_or_default();
            commands::inspect(&recipes, &mut stdout)?;
        }
        _ => unreachable!("subcommand_required"),
    }

    Ok(())
}
