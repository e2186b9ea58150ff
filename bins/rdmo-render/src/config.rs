use clap::{Args, Parser, Subcommand};

use rdmo_api::{Coord, SetPrefix};

#[derive(Parser)]
#[command(name = "rdmo-render", about = "Resolve project values the way view templates do")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone, Debug)]
pub struct GlobalArgs {
    /// Path to the JSON dataset (project, snapshots, values)
    #[arg(long, env = "RDMO_DATA")]
    pub data: String,

    /// Path to the TOML view config; built-in defaults when omitted
    #[arg(long, env = "RDMO_CONFIG")]
    pub config: Option<String>,

    /// Render a snapshot instead of the current values
    #[arg(long)]
    pub snapshot: Option<i64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// All values of an attribute (`*` matches every position)
    Values(PositionArgs),
    /// First value of an attribute
    Value(PositionArgs),
    /// Numbers of all values of an attribute
    Numbers(PositionArgs),
    /// Number of the first value of an attribute
    Number(PositionArgs),
    /// One value per set below a set prefix
    Sets(SetArgs),
    /// Distinct set prefixes used by an attribute
    Prefixes {
        attribute: String,
    },
    /// Distinct set indexes used by an attribute
    Indexes(SetArgs),
    /// Breadcrumb labels of a catalog element at a set position
    Labels(LabelArgs),
}

/// Attribute path plus coordinates. Defaults are `*` for the list commands
/// and the first position for the single-value commands.
#[derive(Args, Clone, Debug)]
pub struct PositionArgs {
    pub attribute: String,
    #[arg(long)]
    pub set_prefix: Option<Coord<SetPrefix>>,
    #[arg(long)]
    pub set_index: Option<Coord<i64>>,
    #[arg(long)]
    pub index: Option<Coord<i64>>,
}

#[derive(Args, Clone, Debug)]
pub struct SetArgs {
    pub attribute: String,
    /// Top level when omitted
    #[arg(long)]
    pub set_prefix: Option<SetPrefix>,
}

#[derive(Args, Clone, Debug)]
pub struct LabelArgs {
    /// Path to the element JSON (`{"ancestors": [...]}`)
    #[arg(long)]
    pub element: String,
    #[arg(long)]
    pub set_prefix: Option<SetPrefix>,
    #[arg(long, default_value_t = 0)]
    pub set_index: i64,
}
