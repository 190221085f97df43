use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use worldbox_author::Editor;
use worldbox_input::{Action, KeyBindings, dispatch, parse_script};
use worldbox_kernel::{DrawList, World, WorldConfig};
use worldbox_render::{DebugTextRenderer, JsonRenderer, Renderer};

#[derive(Parser)]
#[command(name = "worldbox", about = "Drive a worldbox scene from the command line")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and a summary of the default scene
    Info,
    /// Simulate a number of frames and print the final draw list
    Run {
        /// YAML world config; defaults to the built-in scene
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Number of fixed updates to run
        #[arg(short, long, default_value = "60")]
        frames: u64,
        /// Render pass index (0 shaded, 1 shading test, 2 picking)
        #[arg(short, long, default_value = "0")]
        pass: i32,
        /// Print the draw list as JSON
        #[arg(long)]
        json: bool,
    },
    /// Simulate with edits, replay the event log and compare state hashes
    Replay {
        /// Number of fixed updates to run
        #[arg(short, long, default_value = "120")]
        frames: u64,
        /// RNG seed for deterministic replay
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },
    /// Apply a YAML list of actions, then print the draw list
    Script {
        /// YAML file containing a list of actions
        path: PathBuf,
        /// YAML world config; defaults to the built-in scene
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Render pass index (0 shaded, 1 shading test, 2 picking)
        #[arg(short, long, default_value = "0")]
        pass: i32,
        /// Print the draw list as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print key bindings
    Bindings {
        /// YAML bindings file; defaults to the built-in layout
        path: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("worldbox v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", worldbox_render::crate_info());
            let world = World::new();
            println!(
                "default scene: bodies={}, timestep={:.4}s, gravity={}",
                world.body_count(),
                world.timestep(),
                world.gravity()
            );
            for (id, body) in world.bodies() {
                println!("  [{}] {} ({:?})", id.short(), body.name, body.kind);
            }
        }
        Commands::Run {
            config,
            frames,
            pass,
            json,
        } => {
            let mut world = load_world(config.as_deref())?;
            for _ in 0..frames {
                world.update();
            }
            tracing::info!(tick = world.tick(), "simulation finished");
            print_frame(&world.draw(pass)?, json)?;
        }
        Commands::Replay { frames, seed } => {
            let config = WorldConfig {
                seed,
                ..WorldConfig::default()
            };
            let mut world = World::from_config(&config)?;
            let added = world.add_object(1)?;
            world.select(added)?;
            world.move_object(glam::Vec3::new(1.0, 2.0, 0.0))?;
            for _ in 0..frames {
                world.update();
            }

            let replayed = World::replay(&config, world.events())?;
            println!(
                "Run:    tick={}, seed={:#x}, bodies={}, hash={:#018x}",
                world.tick(),
                world.seed(),
                world.body_count(),
                world.state_hash()
            );
            println!(
                "Replay: tick={}, seed={:#x}, bodies={}, hash={:#018x}",
                replayed.tick(),
                replayed.seed(),
                replayed.body_count(),
                replayed.state_hash()
            );
            if world.state_hash() != replayed.state_hash() {
                anyhow::bail!("replay diverged from the original run");
            }
            println!("Match: OK");
        }
        Commands::Script {
            path,
            config,
            pass,
            json,
        } => {
            let actions = read_script(&path)?;
            let mut world = load_world(config.as_deref())?;
            let mut editor = Editor::new();
            let dt = world.timestep();
            for (i, action) in actions.iter().enumerate() {
                dispatch(action, &mut world, &mut editor, dt)
                    .map_err(|e| anyhow::anyhow!("action {} ({action:?}) failed: {e}", i + 1))?;
            }
            tracing::info!(
                actions = actions.len(),
                undoable = editor.undo_count(),
                "script finished"
            );
            print_frame(&world.draw(pass)?, json)?;
        }
        Commands::Bindings { path } => {
            let bindings = match path {
                Some(path) => KeyBindings::load(path)?,
                None => KeyBindings::default(),
            };
            for (key, action) in bindings.iter() {
                println!("{key:>10} -> {action:?}");
            }
        }
    }

    Ok(())
}

fn load_world(config: Option<&Path>) -> anyhow::Result<World> {
    let config = match config {
        Some(path) => WorldConfig::load(path)?,
        None => WorldConfig::default(),
    };
    Ok(World::from_config(&config)?)
}

fn read_script(path: &Path) -> anyhow::Result<Vec<Action>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let actions = parse_script(&text)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(actions)
}

fn print_frame(frame: &DrawList, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", JsonRenderer::new(true).render(frame)?);
    } else {
        print!("{}", DebugTextRenderer::new().render(frame));
    }
    Ok(())
}
