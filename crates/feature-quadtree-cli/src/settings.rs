use clap::{Parser, Subcommand, ValueEnum};
use feature_quadtree::{Config, PruneMode};

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// Feature Quadtree - Build a quadtree refined around a feature and report its leaves
pub struct Settings {
    /// Nodes at or below this width become leaves
    #[clap(short, long, default_value = "0.05", global = true)]
    pub min_size: f64,

    /// Half side of the square root region, centered at the origin
    #[clap(short, long, default_value = "2.0", global = true)]
    pub extent: f64,

    /// How dead branches are pruned after subdivision
    #[clap(long, value_enum, default_value = "cumulative", global = true)]
    pub prune_mode: PruneModeArg,

    /// Starting value for the reported maximum leaf depth
    #[clap(long, default_value = "0", global = true)]
    pub initial_max_depth: u32,

    /// Print one line per leaf: depth followed by min/max corners
    #[clap(long, default_value = "false", global = true)]
    pub list_leaves: bool,

    #[clap(subcommand)]
    pub feature: FeatureCommand,
}

/// Feature driving the subdivision
#[derive(Subcommand, Debug, Clone)]
pub enum FeatureCommand {
    /// Refine along the outline of a circle centered at the origin
    Circle {
        /// Circle radius
        #[clap(short, long, default_value = "1.5")]
        radius: f64,
    },
    /// Refine around randomly scattered points
    Points {
        /// Number of random points inside the root region
        #[clap(short, long, default_value = "200")]
        count: usize,

        /// Minimum points a quadrant must hold to be refined
        #[clap(long, default_value = "1")]
        min_points: usize,

        /// Seed for the point generator
        #[clap(short, long, default_value = "7")]
        seed: u64,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PruneModeArg {
    Cumulative,
    PerChild,
}

impl From<PruneModeArg> for PruneMode {
    fn from(arg: PruneModeArg) -> Self {
        match arg {
            PruneModeArg::Cumulative => PruneMode::Cumulative,
            PruneModeArg::PerChild => PruneMode::PerChild,
        }
    }
}

impl Settings {
    /// Build configuration derived from the command line
    pub fn config(&self) -> Config {
        Config::with_min_size(self.min_size)
            .prune_mode(self.prune_mode.into())
            .initial_max_depth(self.initial_max_depth)
    }
}
