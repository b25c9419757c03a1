//! Color support utility CLI.
//!
//! Displays the detected color level of the attached terminal and renders
//! color-tag markup:
//! - Detection summary (level, source, NO_COLOR, platform)
//! - Tag rendering with an optional forced level
//! - The built-in tag table
//! - Ad-hoc fg/bg/option styles

use biscuit_color::{
    Color, ColorLevel,
    discovery::{
        detection::{Detection, detect},
        term_env::TermEnv,
    },
    terminal::{Terminal, support},
    utils::{
        print,
        styling::Style,
        tags::{clear_tag, parse_tag_by_env, tag_code, tag_names},
    },
};
use clap::{Parser, Subcommand};
use serde::Serialize;

/// Color support utility
#[derive(Parser, Debug)]
#[command(name = "bcolor")]
#[command(author, version, about = "Detect terminal color support and render color tags")]
struct Args {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (show more details)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
enum Command {
    /// Render color-tag markup for this terminal
    ///
    /// Examples:
    ///   bcolor render "<info>done</> in <comment>3s</>"
    ///   bcolor render --level 256 "<lightBlueB>note</>"
    ///   bcolor render --strip "<error>plain</>"
    Render {
        /// Force a color level (none, 16, 256, truecolor) before rendering
        #[arg(long, value_name = "LEVEL")]
        level: Option<ColorLevel>,

        /// Remove tags and escape codes instead of rendering them
        #[arg(long)]
        strip: bool,

        /// Markup to render (multiple values are joined with spaces)
        #[arg(value_name = "CONTENT", required = true)]
        content: Vec<String>,
    },

    /// List the built-in color tags
    Tags,

    /// Render text with a foreground, background and options
    ///
    /// Colors accept names ("red", "lightCyan") or SGR codes; a foreground
    /// name given to --bg is shifted to its background code.
    ///
    /// Examples:
    ///   bcolor paint --fg red --opt bold "warning"
    ///   bcolor paint --fg 97 --bg 41 "error"
    Paint {
        /// Foreground color
        #[arg(long, value_name = "COLOR")]
        fg: Option<Color>,

        /// Background color
        #[arg(long, value_name = "COLOR")]
        bg: Option<Color>,

        /// Text option (bold, italic, underscore, ...); repeatable
        #[arg(long = "opt", value_name = "OPTION")]
        opts: Vec<Color>,

        /// Text to paint (multiple values are joined with spaces)
        #[arg(value_name = "CONTENT", required = true)]
        content: Vec<String>,
    },
}

#[derive(Debug, Serialize)]
struct ColorMetadata {
    #[serde(flatten)]
    terminal: Terminal,
    /// Which rule decided the level
    source: String,
    /// Whether virtual terminal processing had to be enabled (Windows)
    needs_vtp: bool,
    /// Non-fatal problem found during detection
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<String>,
    /// The environment the level was derived from (verbose only)
    #[serde(skip_serializing_if = "Option::is_none")]
    env: Option<TermEnv>,
}

#[derive(Debug, Serialize)]
struct TagInfo {
    name: &'static str,
    code: &'static str,
}

#[derive(Debug, Serialize)]
struct PaintOutput {
    code: String,
    rendered: String,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // Setup logging if RUST_LOG is set
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .init();
    }

    let args = Args::parse();
    tracing::debug!(command = ?args.command, json = args.json, "parsed arguments");

    match args.command {
        Some(Command::Render {
            level,
            strip,
            ref content,
        }) => render(level, strip, &content.join(" "), args.json),
        Some(Command::Tags) => list_tags(args.json),
        Some(Command::Paint {
            fg,
            bg,
            ref opts,
            ref content,
        }) => paint(fg, bg, opts, &content.join(" "), args.json),
        None => summary(args.json, args.verbose),
    }
}

/// Default command: print what was detected.
fn summary(json: bool, verbose: bool) -> color_eyre::Result<()> {
    let metadata = collect_metadata(verbose);
    if json {
        println!("{}", serde_json::to_string_pretty(&metadata)?);
    } else {
        print_pretty(&metadata)?;
    }
    Ok(())
}

fn collect_metadata(verbose: bool) -> ColorMetadata {
    let terminal = Terminal::new();
    let Detection {
        source,
        needs_vtp,
        warning,
        ..
    } = detect();

    ColorMetadata {
        terminal,
        source: source.to_string(),
        needs_vtp,
        warning: warning.or_else(support::last_err).map(|e| e.to_string()),
        env: verbose.then(TermEnv::from_env),
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn print_pretty(meta: &ColorMetadata) -> std::io::Result<()> {
    let term = &meta.terminal;

    print::println("<bold>Color Support</>")?;
    print::println(format!("  <comment>Level:</>       {}", term.color_level))?;
    print::println(format!("  <comment>Source:</>      {}", meta.source))?;
    print::println(format!("  <comment>Platform:</>    {}", term.platform))?;
    print::println(format!("  <comment>NO_COLOR:</>    {}", yes_no(term.no_color)))?;
    print::println(format!("  <comment>TTY:</>         {}", yes_no(term.is_tty)))?;
    print::println(format!("  <comment>16 colors:</>   {}", yes_no(term.supports_color)))?;
    print::println(format!("  <comment>256 colors:</>  {}", yes_no(term.supports_256_color)))?;
    print::println(format!("  <comment>True color:</>  {}", yes_no(term.supports_true_color)))?;
    if let Some(shell) = &term.shell {
        print::println(format!("  <comment>Shell:</>       {shell}"))?;
    }
    if meta.needs_vtp {
        print::println("  <comment>VT processing:</> enabled")?;
    }
    if let Some(warning) = &meta.warning {
        print::println(format!("  <warning>Warning:</>     {warning}"))?;
    }

    if let Some(env) = &meta.env {
        print::println("\n<bold>Environment</>")?;
        let values = [
            &env.term,
            &env.terminal_emulator,
            &env.colorterm,
            &env.force_color,
            &env.term_program,
            &env.term_program_version,
            &env.no_color,
            &env.wsl_distro_name,
            &env.con_emu_ansi,
            &env.ansicon,
            &env.ansicon_ver,
        ];
        for (name, value) in TermEnv::VARS.iter().zip(values) {
            let shown = if value.is_empty() { "(unset)" } else { value.as_str() };
            print::println(format!("  <comment>{name:<22}</> {shown}"))?;
        }
    }

    Ok(())
}

fn render(level: Option<ColorLevel>, strip: bool, content: &str, json: bool) -> color_eyre::Result<()> {
    if let Some(level) = level {
        support::set_color_level(level);
    }

    let rendered = if strip {
        clear_tag(content)
    } else {
        parse_tag_by_env(content)
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&rendered)?);
    } else {
        println!("{rendered}");
    }
    Ok(())
}

fn list_tags(json: bool) -> color_eyre::Result<()> {
    let tags: Vec<TagInfo> = tag_names()
        .into_iter()
        .filter_map(|name| tag_code(name).map(|code| TagInfo { name, code }))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&tags)?);
        return Ok(());
    }

    for tag in &tags {
        print::println(format!("<{0}>{0:<16}</> {1}", tag.name, tag.code))?;
    }
    Ok(())
}

fn paint(fg: Option<Color>, bg: Option<Color>, opts: &[Color], content: &str, json: bool) -> color_eyre::Result<()> {
    let mut style = Style::new();
    if let Some(fg) = fg {
        style = style.fg(fg.to_fg());
    }
    if let Some(bg) = bg {
        style = style.bg(bg.to_bg());
    }
    for opt in opts {
        style = style.with(*opt);
    }

    let rendered = style.render(content);
    if json {
        let output = PaintOutput {
            code: style.code(),
            rendered,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{rendered}");
    }
    Ok(())
}
