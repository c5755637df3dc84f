//! Command implementations and argument parsing for the gamegen CLI.

use std::collections::BTreeMap;
use std::io::{self, Write};

use clap::{Args, Parser, Subcommand};
use gamegen_core::{
    CompleteGraph, EdgePolicy, GenerationOutcome, Generated, GeneratorError, GraphGenerator,
    NAryTree, NDimensionalGrid, PowerLawOutDegree, PreferentialAttachment, RingOfRings, RoadGraph,
    SmallWorld, StarGraph, Topology, UniformRandom, corpus::generate_corpus, rng::seeded,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "gamegen", about = "Generate synthetic game topologies.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run one model with explicit parameters.
    Generate(GenerateCommand),
    /// Run a random valid configuration of a registered model.
    Sample(SampleCommand),
    /// List the registered model names.
    Models,
}

/// Options accepted by the `generate` command.
#[derive(Debug, Args, Clone)]
pub struct GenerateCommand {
    /// Base seed; instance `i` uses a seed derived from it.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Number of graphs to generate.
    #[arg(long, default_value_t = 1)]
    pub instances: usize,

    /// Model and its parameters.
    #[command(subcommand)]
    pub model: ModelArgs,
}

/// Options accepted by the `sample` command.
#[derive(Debug, Args, Clone)]
pub struct SampleCommand {
    /// Registered model name, as listed by `models`.
    #[arg(long)]
    pub model: String,

    /// Seed for both the configuration draw and generation.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Number of graphs to generate from the drawn configuration.
    #[arg(long, default_value_t = 1)]
    pub instances: usize,
}

/// Per-model parameters for the `generate` command.
#[derive(Debug, Subcommand, Clone)]
pub enum ModelArgs {
    /// Uniform random graph with a fixed edge count.
    Uniform {
        /// Number of nodes.
        #[arg(long)]
        nodes: usize,
        /// Edges to place; pairs when undirected.
        #[arg(long)]
        edges: usize,
        /// Place one-way edges.
        #[arg(long)]
        directed: bool,
        /// Allow self-loops.
        #[arg(long)]
        self_loops: bool,
    },
    /// Barabási–Albert preferential attachment.
    Preferential {
        /// Initial isolated nodes (m0).
        #[arg(long)]
        seed_nodes: usize,
        /// Edges each arriving node adds (m).
        #[arg(long)]
        links: usize,
        /// Arriving nodes (t).
        #[arg(long)]
        steps: usize,
    },
    /// Power-law out-degree graph.
    Plod {
        /// Number of nodes.
        #[arg(long)]
        nodes: usize,
        /// Edges to place; pairs when undirected.
        #[arg(long)]
        edges: usize,
        /// Power-law exponent.
        #[arg(long, default_value_t = PowerLawOutDegree::DEFAULT_ALPHA)]
        alpha: f64,
        /// Power-law scale.
        #[arg(long, default_value_t = PowerLawOutDegree::DEFAULT_BETA)]
        beta: f64,
        /// Place one-way edges.
        #[arg(long)]
        directed: bool,
    },
    /// Watts–Strogatz small world.
    SmallWorld {
        /// Number of nodes.
        #[arg(long)]
        nodes: usize,
        /// Lattice neighbours on each side (K).
        #[arg(long, default_value_t = SmallWorld::DEFAULT_HALF_DEGREE)]
        half_degree: usize,
        /// Rewiring probability (p).
        #[arg(long, default_value_t = SmallWorld::DEFAULT_REWIRE_PROBABILITY)]
        rewire: f64,
    },
    /// Complete graph.
    Complete {
        /// Number of nodes.
        #[arg(long)]
        nodes: usize,
        /// Include a self-loop on every node.
        #[arg(long)]
        self_loops: bool,
    },
    /// Star centred on node 0.
    Star {
        /// Number of nodes, hub included.
        #[arg(long)]
        nodes: usize,
    },
    /// Inner ring of hubs, each anchoring an outer ring.
    RingOfRings {
        /// Hubs on the inner ring.
        #[arg(long)]
        inner: usize,
        /// Nodes on each outer ring.
        #[arg(long)]
        outer: usize,
    },
    /// Two-lane road.
    Road {
        /// Number of nodes.
        #[arg(long)]
        nodes: usize,
    },
    /// Complete N-ary tree.
    Tree {
        /// Children per internal node.
        #[arg(long)]
        branching: usize,
        /// Number of levels.
        #[arg(long)]
        depth: usize,
    },
    /// N-dimensional grid.
    Grid {
        /// Number of axes.
        #[arg(long)]
        dimensions: usize,
        /// Nodes along each axis.
        #[arg(long)]
        side: usize,
        /// Wrap each axis into a ring.
        #[arg(long)]
        wrapped: bool,
    },
}

impl ModelArgs {
    /// Validates the parameters into a runnable topology.
    ///
    /// # Errors
    /// Returns [`GeneratorError`] when a parameter is out of range.
    pub fn build(&self) -> Result<Topology, GeneratorError> {
        let topology = match *self {
            Self::Uniform {
                nodes,
                edges,
                directed,
                self_loops,
            } => UniformRandom::new(nodes, edges, EdgePolicy::new(!directed, self_loops))?.into(),
            Self::Preferential {
                seed_nodes,
                links,
                steps,
            } => PreferentialAttachment::new(seed_nodes, links, steps)?.into(),
            Self::Plod {
                nodes,
                edges,
                alpha,
                beta,
                directed,
            } => PowerLawOutDegree::new(nodes, edges, !directed)?
                .with_alpha(alpha)?
                .with_beta(beta)?
                .into(),
            Self::SmallWorld {
                nodes,
                half_degree,
                rewire,
            } => SmallWorld::new(nodes, half_degree, rewire)?.into(),
            Self::Complete { nodes, self_loops } => {
                CompleteGraph::new(nodes)?.with_self_loops(self_loops).into()
            }
            Self::Star { nodes } => StarGraph::new(nodes)?.into(),
            Self::RingOfRings { inner, outer } => RingOfRings::new(inner, outer)?.into(),
            Self::Road { nodes } => RoadGraph::new(nodes)?.into(),
            Self::Tree { branching, depth } => NAryTree::new(branching, depth)?.into(),
            Self::Grid {
                dimensions,
                side,
                wrapped,
            } => NDimensionalGrid::new(dimensions, side)?
                .with_wrap(wrapped)
                .into(),
        };
        Ok(topology)
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// A generator rejected its configuration or failed while running.
    #[error(transparent)]
    Generator(#[from] GeneratorError),
}

impl CliError {
    /// Returns the stable code of the underlying failure.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Generator(err) => err.code().as_str(),
        }
    }
}

/// Structural summary of one generated graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphSummary {
    /// Node count.
    pub nodes: usize,
    /// Directed edge count.
    pub edges: usize,
    /// How generation ended.
    pub outcome: GenerationOutcome,
    /// Number of nodes per out-degree.
    pub degree_histogram: BTreeMap<usize, usize>,
}

impl GraphSummary {
    fn from_generated(generated: &Generated) -> Self {
        let graph = &generated.graph;
        let mut degree_histogram = BTreeMap::new();
        for node in 0..graph.node_count() {
            *degree_histogram.entry(graph.degree(node)).or_insert(0) += 1;
        }
        Self {
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            outcome: generated.outcome,
            degree_histogram,
        }
    }
}

/// Outcome of executing a CLI command.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionSummary {
    /// Graphs produced by `generate` or `sample`.
    Graphs {
        /// The configured model.
        topology: Topology,
        /// One summary per instance, in instance order.
        instances: Vec<GraphSummary>,
    },
    /// Registered model names.
    Models(Vec<&'static str>),
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when a model is unknown, misconfigured or fails.
///
/// # Examples
/// ```
/// use gamegen_cli::cli::{Cli, Command, ExecutionSummary, GenerateCommand, ModelArgs, run_cli};
///
/// let cli = Cli {
///     command: Command::Generate(GenerateCommand {
///         seed: 1,
///         instances: 1,
///         model: ModelArgs::Star { nodes: 4 },
///     }),
/// };
/// let ExecutionSummary::Graphs { instances, .. } = run_cli(cli)? else {
///     unreachable!("generate yields graphs");
/// };
/// assert_eq!(instances[0].edges, 6);
/// # Ok::<(), gamegen_cli::cli::CliError>(())
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Generate(command) => {
            span.record("command", field::display("generate"));
            run_generate(&command)
        }
        Command::Sample(command) => {
            span.record("command", field::display("sample"));
            run_sample(&command)
        }
        Command::Models => {
            span.record("command", field::display("models"));
            Ok(ExecutionSummary::Models(Topology::names().collect()))
        }
    }
}

#[instrument(name = "cli.generate", err, skip(command), fields(seed = command.seed))]
fn run_generate(command: &GenerateCommand) -> Result<ExecutionSummary, CliError> {
    let topology = command.model.build()?;
    summarise(topology, command.instances, command.seed)
}

#[instrument(
    name = "cli.sample",
    err,
    skip(command),
    fields(model = %command.model, seed = command.seed),
)]
fn run_sample(command: &SampleCommand) -> Result<ExecutionSummary, CliError> {
    let mut rng = seeded(command.seed);
    let topology = Topology::from_name(&command.model, &mut rng)?;
    info!(?topology, "configuration sampled");
    summarise(topology, command.instances, command.seed)
}

fn summarise(
    topology: Topology,
    instances: usize,
    seed: u64,
) -> Result<ExecutionSummary, CliError> {
    let corpus = generate_corpus(&topology, instances, seed)?;
    let instances: Vec<GraphSummary> = corpus.iter().map(GraphSummary::from_generated).collect();
    info!(
        model = topology.name(),
        instances = instances.len(),
        "command completed"
    );
    Ok(ExecutionSummary::Graphs {
        topology,
        instances,
    })
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// use gamegen_cli::cli::{ExecutionSummary, render_summary};
///
/// let mut buffer = Vec::new();
/// render_summary(&ExecutionSummary::Models(vec!["star", "road"]), &mut buffer)?;
/// assert_eq!(String::from_utf8_lossy(&buffer), "star\nroad\n");
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        ExecutionSummary::Models(names) => {
            for name in names {
                writeln!(writer, "{name}")?;
            }
        }
        ExecutionSummary::Graphs {
            topology,
            instances,
        } => {
            let policy = topology.policy();
            writeln!(writer, "model: {}", topology.name())?;
            writeln!(
                writer,
                "policy: symmetric={} reflexive={}",
                policy.symmetric, policy.reflexive
            )?;
            for (index, instance) in instances.iter().enumerate() {
                writeln!(
                    writer,
                    "instance {index}: nodes={} edges={} outcome={}",
                    instance.nodes,
                    instance.edges,
                    render_outcome(instance.outcome)
                )?;
                for (degree, count) in &instance.degree_histogram {
                    writeln!(writer, "  degree {degree}\t{count}")?;
                }
            }
        }
    }
    Ok(())
}

fn render_outcome(outcome: GenerationOutcome) -> String {
    match outcome {
        GenerationOutcome::Partial {
            requested,
            produced,
        } => format!("partial ({produced}/{requested})"),
        GenerationOutcome::Complete => "complete".to_owned(),
    }
}
