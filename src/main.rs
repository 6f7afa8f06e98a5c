use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use layout_reactome_rs::config::{
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_INIT_SCALE_FACTOR,
};
use layout_reactome_rs::{
    legend, Badge, DiagramConfig, DiagramSession, DrugRecord, MutationRecord, PathwayModel,
    PathwaySnapshot, ResolvedHighlights,
};

const DEFAULT_LEGEND_HEIGHT: f64 = 671.0;

#[derive(Parser)]
#[command(author, version, about = "Lay out and annotate Reactome pathway diagrams", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fit the diagram to the canvas and route every reaction.
    #[command(name = "layout")]
    Layout {
        #[command(flatten)]
        diagram: DiagramArgs,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Resolve mutation, drug and overlap annotations onto entities.
    #[command(name = "highlight")]
    Highlight {
        #[command(flatten)]
        diagram: DiagramArgs,
        #[arg(long)]
        highlights: PathBuf,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Lay out the legend panel.
    #[command(name = "legend")]
    Legend {
        #[arg(long, default_value_t = DEFAULT_LEGEND_HEIGHT)]
        height: f64,
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct DiagramArgs {
    #[arg(long)]
    input: PathBuf,
    #[arg(long, default_value_t = DEFAULT_CANVAS_WIDTH)]
    width: f64,
    #[arg(long, default_value_t = DEFAULT_CANVAS_HEIGHT)]
    height: f64,
    #[arg(long, default_value_t = DEFAULT_INIT_SCALE_FACTOR)]
    init_scale_factor: f64,
    /// Reaction ids to zoom into; repeat or comma-separate.
    #[arg(long, value_delimiter = ',')]
    zoom: Vec<String>,
}

impl DiagramArgs {
    fn config(&self) -> DiagramConfig {
        DiagramConfig {
            width: self.width,
            height: self.height,
            init_scale_factor: self.init_scale_factor,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct HighlightRequest {
    #[serde(default)]
    mutations: Vec<MutationRecord>,
    #[serde(default)]
    drugs: Vec<DrugRecord>,
    #[serde(default)]
    overlaps: Vec<String>,
}

#[derive(Serialize)]
struct HighlightReport {
    #[serde(flatten)]
    resolved: ResolvedHighlights,
    badges: Vec<Badge>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Layout { diagram, output } => {
            let mut session = open_session(&diagram)?;
            let frame = session
                .render(diagram.zoom.as_slice())
                .context("Failed to lay out diagram")?;
            write_json(output.as_deref(), &frame)
        }
        Command::Highlight {
            diagram,
            highlights,
            output,
        } => {
            let request: HighlightRequest = read_json(&highlights)?;
            let mut session = open_session(&diagram)?;
            session
                .render(diagram.zoom.as_slice())
                .context("Failed to lay out diagram")?;
            let resolved = session.highlight(&request.mutations, &request.drugs, &request.overlaps);
            let badges = resolved.badges(session.graph());
            write_json(output.as_deref(), &HighlightReport { resolved, badges })
        }
        Command::Legend { height, output } => {
            let legend = legend::legend(height).context("Failed to lay out legend")?;
            write_json(output.as_deref(), &legend)
        }
    }
}

fn open_session(diagram: &DiagramArgs) -> Result<DiagramSession<PathwayModel>> {
    let snapshot: PathwaySnapshot = read_json(&diagram.input)?;
    let model = PathwayModel::try_from(snapshot)
        .with_context(|| format!("Invalid pathway in {:?}", diagram.input))?;
    DiagramSession::new(model, diagram.config()).context("Failed to frame diagram")
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {:?}", path))
}

fn write_json<T: Serialize>(output: Option<&Path>, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write {:?}", path))?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{json}").context("Failed to write to stdout")?;
        }
    }
    Ok(())
}
