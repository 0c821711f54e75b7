use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use cuetrack::{
    ClipGroup, EditTimeline, Easing, EasingRegistry, LoopSpec, MidiFile, Position, Timeline,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cuetrack", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Dump the clip groups of a timeline export.
    Groups(GroupsArgs),
    /// Show which clips are current on a track at one frame.
    Frame(FrameArgs),
    /// Print looped/eased progress for a frame.
    Progress(ProgressArgs),
    /// Extract frame-ranged notes from a MIDI file.
    Midi(MidiArgs),
}

#[derive(Parser, Debug)]
struct GroupsArgs {
    /// Input timeline export JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Only dump this track.
    #[arg(long)]
    track: Option<usize>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input timeline export JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[arg(long, default_value_t = 0)]
    track: usize,

    /// Frame index (0-based).
    #[arg(long)]
    frame: i64,

    /// Tracks whose clips act as style overlays (repeatable).
    #[arg(long = "style-track")]
    style_tracks: Vec<usize>,

    /// Keep the last started group active after it ends.
    #[arg(long, default_value_t = false)]
    hold: bool,
}

#[derive(Parser, Debug)]
struct ProgressArgs {
    /// Timeline duration in frames.
    #[arg(long)]
    duration: f64,

    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    #[arg(long)]
    frame: i64,

    #[arg(long, default_value_t = 0)]
    loops: u32,

    /// Run every half-cycle forward instead of mirroring odd ones.
    #[arg(long, default_value_t = false)]
    no_cyclic: bool,

    /// Easing mnemonic; a comma-separated list alternates per half-cycle.
    #[arg(long, default_value = "linear")]
    ease: String,
}

#[derive(Parser, Debug)]
struct MidiArgs {
    /// Input Standard MIDI File.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[arg(long, default_value_t = 0)]
    track: usize,

    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Tempo override; defaults to the file tempo, then 120.
    #[arg(long)]
    bpm: Option<f64>,

    /// Performance length in beats (enables loop replication with --loop-length).
    #[arg(long, requires = "loop_length")]
    length: Option<f64>,

    /// Total length to fill in beats.
    #[arg(long, requires = "length")]
    loop_length: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Groups(args) => cmd_groups(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Progress(args) => cmd_progress(args),
        Command::Midi(args) => cmd_midi(args),
    }
}

fn cmd_groups(args: GroupsArgs) -> anyhow::Result<()> {
    let tl = EditTimeline::from_path(&args.in_path)
        .with_context(|| format!("load '{}'", args.in_path.display()))?;
    let mut out = Vec::new();
    for track in &tl.tracks {
        if args.track.is_some_and(|t| t != track.index) {
            continue;
        }
        for g in &track.groups {
            out.push(group_summary(g));
        }
    }
    print_json(&out)
}

fn group_summary(g: &ClipGroup) -> serde_json::Value {
    serde_json::json!({
        "track": g.track,
        "index": g.index,
        "start": g.start(),
        "end": g.end(),
        "text": g.text(),
        "lines": g.lines().map(texts).collect::<Vec<_>>(),
    })
}

fn texts<'a>(clips: impl IntoIterator<Item = &'a cuetrack::Clip>) -> Vec<String> {
    clips.into_iter().map(|c| c.text.clone()).collect()
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut tl = EditTimeline::from_path(&args.in_path)
        .with_context(|| format!("load '{}'", args.in_path.display()))?;
    let group = tl.group_at(args.track, args.frame, &args.style_tracks, args.hold)?;
    let value = match group {
        None => serde_json::json!({ "frame": args.frame, "group": null }),
        Some(g) => serde_json::json!({
            "frame": args.frame,
            "group": g.index,
            "syllable": g.current_syllable().map(|c| c.text.clone()),
            "word": texts(g.current_word()),
            "line": g.current_line().map(texts),
            "clips": g.clips.iter().map(|c| serde_json::json!({
                "text": c.text,
                "position": c.position.as_i8(),
                "current": c.position == Position::Current,
                "joined": c.joined,
                "styles": c.styles,
            })).collect::<Vec<_>>(),
        }),
    };
    print_json(&value)
}

fn cmd_progress(args: ProgressArgs) -> anyhow::Result<()> {
    let timeline = Timeline::new(args.duration, args.fps)?;
    let names: Vec<Easing> = args.ease.split(',').map(|s| Easing::named(s.trim())).collect();
    let easing = match names.len() {
        1 => names.into_iter().next().unwrap_or_default(),
        _ => Easing::indexed(names)?,
    };
    let at = timeline.progress(args.frame, args.loops, !args.no_cyclic, easing)?;
    let eased = at.eased(&EasingRegistry::new())?;
    print_json(&serde_json::json!({
        "t": at.t,
        "loop_t": at.loop_t,
        "loop_index": at.loop_index,
        "eased": eased,
    }))
}

fn cmd_midi(args: MidiArgs) -> anyhow::Result<()> {
    let file = MidiFile::from_path(&args.in_path)?;
    let bpm = args.bpm.or_else(|| file.tempo_bpm()).unwrap_or(120.0);
    let looping = args
        .length
        .zip(args.loop_length)
        .map(|(length, loop_length)| LoopSpec {
            length,
            loop_length,
        });
    let track = file.track(args.track, bpm, args.fps, looping)?;
    print_json(&track)
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{text}");
    Ok(())
}
