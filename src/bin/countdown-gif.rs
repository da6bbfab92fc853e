use std::{
    fs::File,
    io::BufWriter,
    net::SocketAddr,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

const DEFAULT_FONT_REGULAR: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";
const DEFAULT_FONT_BOLD: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf";

#[derive(Parser, Debug)]
#[command(name = "countdown-gif", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve countdown GIFs over HTTP.
    Serve(ServeArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render the full animation to a GIF file.
    Gif(GifArgs),
}

#[derive(Args, Debug)]
struct FontArgs {
    /// Regular face, used for unit labels.
    #[arg(long, env = "FONT_REGULAR", default_value = DEFAULT_FONT_REGULAR)]
    font_regular: PathBuf,

    /// Bold face, used for unit values.
    #[arg(long, env = "FONT_BOLD", default_value = DEFAULT_FONT_BOLD)]
    font_bold: PathBuf,

    /// Render profile.
    #[arg(long, env = "PROFILE", default_value_t = countdown_gif::Profile::Gradient)]
    profile: countdown_gif::Profile,
}

#[derive(Parser, Debug)]
struct ServeArgs {
    /// Address to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: std::net::IpAddr,

    /// Port to bind.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    #[command(flatten)]
    fonts: FontArgs,
}

/// The same parameters the HTTP endpoint accepts.
#[derive(Args, Debug)]
struct CountdownArgs {
    /// Target instant (ISO-8601).
    #[arg(long)]
    time: String,

    /// Number of frames (seconds) to render.
    #[arg(long)]
    duration: Option<String>,

    /// Gradient top color (RRGGBB).
    #[arg(long)]
    bg1: Option<String>,

    /// Gradient bottom color (RRGGBB).
    #[arg(long)]
    bg2: Option<String>,

    /// Flat background color for the compact profile (RRGGBB).
    #[arg(long)]
    bg: Option<String>,

    /// Digit box color (RRGGBB).
    #[arg(long)]
    boxcolor: Option<String>,

    /// Value text color (RRGGBB).
    #[arg(long)]
    textcolor: Option<String>,

    /// Unit label color (RRGGBB).
    #[arg(long)]
    labelcolor: Option<String>,
}

impl CountdownArgs {
    fn into_params(self) -> countdown_gif::RequestParams {
        countdown_gif::RequestParams {
            time: Some(self.time),
            duration: self.duration,
            bg1: self.bg1,
            bg2: self.bg2,
            bg: self.bg,
            boxcolor: self.boxcolor,
            textcolor: self.textcolor,
            labelcolor: self.labelcolor,
        }
    }
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    countdown: CountdownArgs,

    /// Frame index (0-based).
    #[arg(long, default_value_t = 0)]
    index: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    fonts: FontArgs,
}

#[derive(Parser, Debug)]
struct GifArgs {
    #[command(flatten)]
    countdown: CountdownArgs,

    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    fonts: FontArgs,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "countdown_gif=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Serve(args) => cmd_serve(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Gif(args) => cmd_gif(args),
    }
}

fn load_fonts(args: &FontArgs) -> anyhow::Result<countdown_gif::FontRegistry> {
    countdown_gif::FontRegistry::load(&args.font_regular, &args.font_bold).with_context(|| {
        format!(
            "load fonts '{}' and '{}'",
            args.font_regular.display(),
            args.font_bold.display()
        )
    })
}

fn prepare(
    countdown: CountdownArgs,
    fonts: &FontArgs,
) -> anyhow::Result<countdown_gif::CountdownSession> {
    let policy = fonts.profile.policy();
    let session = countdown_gif::CountdownSession::prepare(
        &countdown.into_params(),
        &policy,
        &countdown_gif::SystemClock,
    )?;
    Ok(session)
}

fn create_parent_dir(out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let fonts = load_fonts(&args.fonts)?;
    let policy = args.fonts.profile.policy();
    let state = countdown_gif::AppState::new(fonts, policy);
    let addr = SocketAddr::new(args.host, args.port);

    let runtime = tokio::runtime::Runtime::new().context("start tokio runtime")?;
    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("bind {addr}"))?;
        tracing::info!(%addr, profile = %args.fonts.profile, "listening");

        let base = format!("http://localhost:{}", args.port);
        let target = chrono::Utc::now() + chrono::Duration::days(5);
        for (theme, url) in countdown_gif::example_urls(&base, target) {
            tracing::info!(theme, %url, "example");
        }

        axum::serve(listener, countdown_gif::router(state))
            .await
            .context("serve http")
    })
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let fonts = load_fonts(&args.fonts)?;
    let session = prepare(args.countdown, &args.fonts)?;
    let frame = session.render_frame(&fonts, args.index)?;

    create_parent_dir(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_gif(args: GifArgs) -> anyhow::Result<()> {
    let fonts = load_fonts(&args.fonts)?;
    let session = prepare(args.countdown, &args.fonts)?;

    create_parent_dir(&args.out)?;
    let file = File::create(&args.out)
        .with_context(|| format!("create gif '{}'", args.out.display()))?;
    let (stats, _writer) = session
        .render_gif(&fonts, BufWriter::new(file))
        .with_context(|| format!("write gif '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} frames, {}s remaining)",
        args.out.display(),
        stats.frames_rendered,
        stats.initial_secs
    );
    Ok(())
}
