use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use confart::{
    FontConfig, GradientPalette, ImagePlacement, LogoLayoutFix, RasterRequest, Rgba8,
    SvgRasterizer,
    jobs::{
        BatchReport, JobContext,
        committee::{self, CommitteeConfig},
        convert::{self, ConvertPlan},
        keynote::{self, KeynoteConfig},
        load_config,
        logo::{self, EmbedTarget, FixLogoRequest, RecolorRequest},
        showcase::{self, ShowcaseConfig},
        sponsors::{self, SponsorConfig},
    },
    preflight::{self, Capability},
};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(name = "confart", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Organising-committee headshot collages, one PNG per page.
    Committee(ConfigArgs),
    /// Keynote speaker collage.
    Keynotes(ConfigArgs),
    /// Per-tier and combined sponsor logo walls.
    Sponsors(ConfigArgs),
    /// Absolutely positioned logo layout (T-shirt back).
    Showcase(ConfigArgs),
    /// Rasterize SVG files to PNG.
    Svg2png(Svg2PngArgs),
    /// Repair the logo caption layout, optionally exporting a PNG.
    FixLogo(FixLogoArgs),
    /// Recolour a raster logo with the brand gradient, optionally embedding it in an SVG.
    RecolorLogo(RecolorArgs),
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// Job configuration JSON.
    config: PathBuf,
}

#[derive(Parser, Debug)]
struct Svg2PngArgs {
    /// SVG files or directories.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output file (single input) or directory (batch).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output width in pixels.
    #[arg(short, long)]
    width: Option<u32>,

    /// Output height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Multiplier on the intrinsic size when no width or height is given.
    #[arg(long)]
    scale: Option<f32>,

    #[arg(long, default_value_t = confart::DEFAULT_DPI)]
    dpi: u32,

    /// Treat every input as a batch, even a single file.
    #[arg(long)]
    batch: bool,
}

#[derive(Parser, Debug)]
struct FixLogoArgs {
    #[arg(long = "in")]
    in_path: PathBuf,

    #[arg(long)]
    out: PathBuf,

    #[arg(long, default_value_t = 140.0)]
    image_width: f64,

    #[arg(long, default_value_t = 48.0)]
    image_height: f64,

    /// Baseline of the first caption line.
    #[arg(long, default_value_t = 43.0)]
    text_y: f64,

    /// Centre of the conference name.
    #[arg(long, default_value_t = 128.0)]
    text_x1: f64,

    /// Centre of the location and date line.
    #[arg(long, default_value_t = 118.0)]
    text_x2: f64,

    #[arg(long, default_value = "#4A4A4A")]
    font_fill: String,

    /// Also export the fixed SVG as PNG.
    #[arg(long)]
    png: Option<PathBuf>,

    #[arg(long, default_value_t = confart::DEFAULT_RENDER_SCALE)]
    scale: f32,

    #[arg(long)]
    png_width: Option<u32>,

    #[arg(long)]
    png_height: Option<u32>,

    #[arg(long, default_value_t = confart::DEFAULT_DPI)]
    dpi: u32,
}

#[derive(Parser, Debug)]
struct RecolorArgs {
    /// Light-on-dark source logo.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[arg(long)]
    out: PathBuf,

    /// SVG that receives the recoloured PNG.
    #[arg(long, requires = "target_id")]
    svg: Option<PathBuf>,

    /// `id` of the element whose children are replaced.
    #[arg(long, requires = "svg")]
    target_id: Option<String>,

    /// Write the updated SVG here instead of in place.
    #[arg(long, requires = "svg")]
    svg_out: Option<PathBuf>,

    #[arg(long)]
    start: Option<Rgba8>,

    #[arg(long)]
    end: Option<Rgba8>,

    #[arg(long)]
    outline: Option<Rgba8>,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    let result = match cli.cmd {
        Command::Committee(args) => cmd_committee(args),
        Command::Keynotes(args) => cmd_keynotes(args),
        Command::Sponsors(args) => cmd_sponsors(args),
        Command::Showcase(args) => cmd_showcase(args),
        Command::Svg2png(args) => cmd_svg2png(args),
        Command::FixLogo(args) => cmd_fix_logo(args),
        Command::RecolorLogo(args) => cmd_recolor_logo(args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("❌ {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("CONFART_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_config<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<(T, PathBuf)> {
    load_config(path).with_context(|| format!("read config '{}'", path.display()))
}

fn cmd_committee(args: ConfigArgs) -> anyhow::Result<()> {
    let (config, base_dir) = read_config::<CommitteeConfig>(&args.config)?;
    preflight::check(
        &[Capability::Raster, Capability::Text],
        &config.fonts,
        &base_dir,
    )?;
    let mut ctx = JobContext::new(config.fonts.clone(), base_dir);
    let report = committee::run(&config, &mut ctx)?;
    print_report(&report, "images loaded");
    Ok(())
}

fn cmd_keynotes(args: ConfigArgs) -> anyhow::Result<()> {
    let (config, base_dir) = read_config::<KeynoteConfig>(&args.config)?;
    preflight::check(&[Capability::Raster], &FontConfig::default(), &base_dir)?;
    let mut ctx = JobContext::new(FontConfig::default(), base_dir);
    let report = keynote::run(&config, &mut ctx)?;
    print_report(&report, "images loaded");
    Ok(())
}

fn cmd_sponsors(args: ConfigArgs) -> anyhow::Result<()> {
    let (config, base_dir) = read_config::<SponsorConfig>(&args.config)?;
    preflight::check(
        &[Capability::Raster, Capability::Text],
        &config.fonts,
        &base_dir,
    )?;
    let mut ctx = JobContext::new(config.fonts.clone(), base_dir);
    let report = sponsors::run(&config, &mut ctx)?;
    print_report(&report, "logos loaded");
    Ok(())
}

fn cmd_showcase(args: ConfigArgs) -> anyhow::Result<()> {
    let (config, base_dir) = read_config::<ShowcaseConfig>(&args.config)?;
    let needs: &[Capability] = if config.title.is_some() {
        &[Capability::Raster, Capability::Text]
    } else {
        &[Capability::Raster]
    };
    preflight::check(needs, &config.fonts, &base_dir)?;
    let mut ctx = JobContext::new(config.fonts.clone(), base_dir);
    let report = showcase::run(&config, &mut ctx)?;
    print_report(&report, "logos loaded");
    Ok(())
}

fn cmd_svg2png(args: Svg2PngArgs) -> anyhow::Result<()> {
    preflight::check(&[Capability::Raster], &FontConfig::default(), Path::new("."))?;
    let req = RasterRequest {
        width: args.width,
        height: args.height,
        scale: args.scale,
        dpi: args.dpi,
    };
    let rasterizer = SvgRasterizer::new();

    match convert::plan(&args.inputs, args.output.as_deref(), args.batch)? {
        ConvertPlan::Single { input, output } => {
            let size = convert::convert_file(&rasterizer, &input, &output, &req)?;
            println!(
                "✅ Converted: {} -> {} ({}x{})",
                input.display(),
                output.display(),
                size.width,
                size.height
            );
        }
        ConvertPlan::Batch { items } => {
            if items.is_empty() {
                println!("No SVG files found.");
                return Ok(());
            }
            println!("Found {} SVG file(s) to convert...", items.len());
            let report = convert::convert_batch(&rasterizer, &items, &req)?;
            print_failures(&report);
            for out in &report.outputs {
                println!("✅ Converted: {}", out.display());
            }
            println!(
                "\n📊 Conversion complete: {} files converted successfully",
                report.ratio()
            );
            if report.is_complete() {
                println!("🎉 All files converted successfully!");
            } else {
                println!("⚠️  Some files could not be converted. Check the errors above.");
            }
        }
    }
    Ok(())
}

fn cmd_fix_logo(args: FixLogoArgs) -> anyhow::Result<()> {
    if args.png.is_some() {
        preflight::check(&[Capability::Raster], &FontConfig::default(), Path::new("."))?;
    }
    let fix = LogoLayoutFix::conference(
        ImagePlacement::new(0.0, 10.0, args.image_width, args.image_height),
        args.text_y,
        (args.text_x1, args.text_x2),
        &args.font_fill,
    );
    let req = FixLogoRequest {
        input: args.in_path,
        output: args.out,
        fix,
        png: args.png,
        raster: RasterRequest {
            width: args.png_width,
            height: args.png_height,
            scale: Some(args.scale),
            dpi: args.dpi,
        },
    };

    println!("📝 Adjusting SVG layout...");
    let outcome = logo::fix_logo(&req, &SvgRasterizer::new())?;
    println!(
        "✅ Layout adjusted: {} -> {}",
        req.input.display(),
        outcome.svg.display()
    );
    if let Some((png, size)) = outcome.png {
        println!(
            "✅ Exported PNG: {} ({}x{})",
            png.display(),
            size.width,
            size.height
        );
    }
    Ok(())
}

fn cmd_recolor_logo(args: RecolorArgs) -> anyhow::Result<()> {
    let mut palette = GradientPalette::default();
    palette.start = args.start.unwrap_or(palette.start);
    palette.end = args.end.unwrap_or(palette.end);
    palette.outline = args.outline.unwrap_or(palette.outline);

    let embed = match (args.svg, args.target_id) {
        (Some(svg), Some(target_id)) => Some(EmbedTarget {
            svg,
            target_id,
            placement: EmbedTarget::DEFAULT_PLACEMENT,
            output: args.svg_out,
        }),
        _ => None,
    };
    let req = RecolorRequest {
        input: args.in_path,
        output: args.out,
        palette,
        embed,
    };

    for path in logo::recolor_logo(&req, &SvgRasterizer::new())? {
        println!("✅ Saved {}", path.display());
    }
    Ok(())
}

fn print_failures(report: &BatchReport) {
    for failure in &report.failures {
        if failure.missing {
            println!("⚠️  File not found: {}", failure.input.display());
        } else {
            println!("❌ {}", failure.reason);
        }
    }
}

fn print_report(report: &BatchReport, what: &str) {
    print_failures(report);
    for out in &report.outputs {
        println!("✅ Saved {}", out.display());
    }
    if report.total > 0 {
        println!("📊 {} {what}", report.ratio());
    }
}
