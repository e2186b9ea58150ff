use serde::Serialize;

use rdmo_api::SetPosition;
use rdmo_views::{Coords, Element, ValueResolver, ViewConfig};

use crate::config::{Cli, Commands, PositionArgs};
use crate::dataset::Dataset;
use crate::error::CliError;

pub fn run(cli: Cli) -> Result<(), CliError> {
    let config = match &cli.global.config {
        Some(path) => {
            let config = ViewConfig::load(path)?;
            tracing::info!(config = %path, "loaded view config");
            config
        }
        None => ViewConfig::default(),
    };

    let dataset = Dataset::load(&cli.global.data)?;
    let context = dataset.context(cli.global.snapshot)?;
    let storage = dataset.into_storage()?;
    tracing::info!(
        data = %cli.global.data,
        project = context.project.id,
        snapshot = ?context.snapshot_id(),
        "loaded dataset"
    );

    let resolver = ValueResolver::new(&storage, &context, &config);
    execute(&resolver, cli.command)
}

fn execute(resolver: &ValueResolver<'_>, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Values(args) => print(&resolver.get_values(&args.attribute, &coords(&args, Coords::any()))?),
        Commands::Value(args) => print(&resolver.get_value(&args.attribute, &coords(&args, Coords::first()))?),
        Commands::Numbers(args) => print(&resolver.get_numbers(&args.attribute, &coords(&args, Coords::any()))?),
        Commands::Number(args) => print(&resolver.get_number(&args.attribute, &coords(&args, Coords::first()))?),
        Commands::Sets(args) => {
            let set_prefix = args.set_prefix.unwrap_or_default();
            print(&resolver.get_sets(&args.attribute, &set_prefix)?)
        }
        Commands::Prefixes { attribute } => print(&resolver.get_set_prefixes(&attribute)),
        Commands::Indexes(args) => {
            let set_prefix = args.set_prefix.unwrap_or_default();
            print(&resolver.get_set_indexes(&args.attribute, set_prefix.into()))
        }
        Commands::Labels(args) => {
            let content = std::fs::read_to_string(&args.element).map_err(|e| CliError::Dataset {
                context: "element",
                detail: format!("'{}': {e}", args.element),
            })?;
            let element: Element = serde_json::from_str(&content)?;
            let position = SetPosition::new(args.set_prefix.unwrap_or_default(), args.set_index);
            print(&resolver.get_labels(&element, &position)?)
        }
    }
}

/// Command line coordinates over the command's defaults.
fn coords(args: &PositionArgs, defaults: Coords) -> Coords {
    Coords {
        set_prefix: args.set_prefix.clone().unwrap_or(defaults.set_prefix),
        set_index: args.set_index.clone().unwrap_or(defaults.set_index),
        index: args.index.clone().unwrap_or(defaults.index),
    }
}

fn print<T: Serialize + ?Sized>(output: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use rdmo_api::{Coord, SetPrefix};

    use super::*;

    fn args(set_index: Option<Coord<i64>>) -> PositionArgs {
        PositionArgs {
            attribute: "http://example.com/a".to_string(),
            set_prefix: None,
            set_index,
            index: None,
        }
    }

    #[test]
    fn omitted_coordinates_use_command_defaults() {
        assert_eq!(coords(&args(None), Coords::any()), Coords::any());
        assert_eq!(coords(&args(None), Coords::first()), Coords::first());
    }

    #[test]
    fn given_coordinates_override_defaults() {
        let merged = coords(&args(Some(Coord::Any)), Coords::first());
        assert_eq!(merged.set_index, Coord::Any);
        assert_eq!(merged.set_prefix, Coord::Exact(SetPrefix::root()));
        assert_eq!(merged.index, Coord::Exact(0));
    }
}
