use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "adcraft", version)]
struct Cli {
    /// Pipeline config JSON; `ADCRAFT_*` variables override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the two-part caption for a phrase.
    Caption(CaptionArgs),
    /// Render and upload a PNG still.
    Still(CreativeArgs),
    /// Render and upload a looping GIF.
    Animate(CreativeArgs),
    /// Render every size/image pair of a batch file.
    Batch(BatchArgs),
    /// List the supported ad sizes.
    Sizes(SizesArgs),
}

#[derive(Parser, Debug)]
struct CaptionArgs {
    /// Raw phrase text.
    phrase: String,
}

#[derive(Parser, Debug)]
struct CreativeArgs {
    /// Creative request JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[arg(long)]
    user: String,

    #[arg(long)]
    app: String,

    /// Override the request size, e.g. `300x250`.
    #[arg(long)]
    size: Option<adcraft::Dimensions>,

    /// Derive text and CTA colors from the background and this brand color.
    #[arg(long)]
    brand_color: Option<adcraft::CssColor>,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Batch request JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct SizesArgs {
    /// Only sizes served to live placements.
    #[arg(long)]
    live: bool,

    #[arg(long, value_enum)]
    variant: Option<VariantChoice>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum VariantChoice {
    Static,
    Animated,
}

impl From<VariantChoice> for adcraft::Variant {
    fn from(v: VariantChoice) -> Self {
        match v {
            VariantChoice::Static => Self::Static,
            VariantChoice::Animated => Self::Animated,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Caption(args) => cmd_caption(args),
        Command::Sizes(args) => cmd_sizes(args),
        Command::Still(args) => cmd_creative(cli.config.as_deref(), args, adcraft::Variant::Static).await,
        Command::Animate(args) => {
            cmd_creative(cli.config.as_deref(), args, adcraft::Variant::Animated).await
        }
        Command::Batch(args) => cmd_batch(cli.config.as_deref(), args).await,
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    serde_json::from_reader(BufReader::new(f)).with_context(|| format!("parse {what} JSON"))
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_caption(args: CaptionArgs) -> anyhow::Result<()> {
    print_json(&adcraft::process_phrase(Some(&args.phrase)))
}

fn cmd_sizes(args: SizesArgs) -> anyhow::Result<()> {
    let catalog = if args.live {
        adcraft::AdCatalog::live()
    } else {
        adcraft::AdCatalog::builtin()
    };
    let sizes: Vec<&adcraft::AdSize> = match args.variant {
        Some(v) => catalog.for_variant(v.into()).collect(),
        None => catalog.sizes().iter().collect(),
    };
    print_json(&sizes)
}

fn pipeline(config: Option<&Path>) -> anyhow::Result<adcraft::CreativePipeline> {
    let cfg = adcraft::PipelineConfig::load(config)?;
    Ok(adcraft::CreativePipeline::from_config(&cfg)?)
}

async fn cmd_creative(
    config: Option<&Path>,
    args: CreativeArgs,
    variant: adcraft::Variant,
) -> anyhow::Result<()> {
    let mut req: adcraft::CreativeRequest = read_json(&args.in_path, "request")?;
    if let Some(size) = args.size {
        req.dimensions = size;
    }
    if let Some(brand) = args.brand_color {
        let palette = adcraft::Palette::derive(req.bg_color, brand);
        req = req.with_palette(palette);
    }
    let owner = adcraft::ArtifactOwner::new(args.user, args.app);

    let pipeline = pipeline(config)?;
    let output = match variant {
        adcraft::Variant::Static => pipeline.generate_static_creative(&req, &owner).await?,
        adcraft::Variant::Animated => pipeline.generate_animated_creative(&req, &owner).await?,
    };
    print_json(&output)
}

#[derive(serde::Serialize)]
struct BatchLine {
    size: String,
    phrase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<adcraft::CreativeOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

async fn cmd_batch(config: Option<&Path>, args: BatchArgs) -> anyhow::Result<()> {
    let batch: adcraft::BatchRequest = read_json(&args.in_path, "batch")?;
    let items = pipeline(config)?.generate_batch(&batch).await?;
    let lines: Vec<BatchLine> = items
        .into_iter()
        .map(|it| {
            let (output, error) = match it.result {
                Ok(out) => (Some(out), None),
                Err(e) => (None, Some(e.to_string())),
            };
            BatchLine {
                size: it.size.key(),
                phrase: it.phrase,
                output,
                error,
            }
        })
        .collect();
    print_json(&lines)
}
