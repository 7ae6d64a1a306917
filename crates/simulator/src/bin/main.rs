//! Cascade Simulator CLI
//!
//! Runs playout batches over synthetic grid boards and benchmarks the
//! cascade resolver through the replay harness.

use cascade_simulator::{ChannelSink, ReplayBench, Runner, SimulatorConfig};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cascade-sim")]
#[command(about = "Playout simulator and replay benchmark for the cascade engine")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct BatchArgs {
    /// Grid board width
    #[arg(long, default_value = "8")]
    width: u16,

    /// Grid board height
    #[arg(long, default_value = "8")]
    height: u16,

    /// Number of independent playouts
    #[arg(short, long, default_value = "16")]
    playouts: usize,

    /// Safety valve: maximum plies per playout
    #[arg(long, default_value = "100000")]
    max_plies: u32,

    /// Master seed for per-playout RNGs
    #[arg(short, long, default_value = "12345")]
    seed: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a batch of playouts and print simulation metrics
    Simulate {
        #[command(flatten)]
        batch: BatchArgs,

        /// Discard moves that triggered no cascade from the sample count
        #[arg(long)]
        changes_only: bool,
    },

    /// Record a batch of playouts, then benchmark resolver replay throughput
    Bench {
        #[command(flatten)]
        batch: BatchArgs,
    },
}

impl BatchArgs {
    fn to_config(&self) -> SimulatorConfig {
        SimulatorConfig::new(self.width, self.height)
            .with_playouts(self.playouts)
            .with_max_plies(self.max_plies)
            .with_seed(self.seed)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Simulate {
            batch,
            changes_only,
        } => {
            let config = batch.to_config().with_keep_quiet_moves(!changes_only);
            let keep_quiet = config.keep_quiet_moves;
            let runner = Runner::new(config)?;

            // Stand-in for the renderer collaborator: drain frames on a
            // separate thread so the drivers never wait on rendering.
            let (sink, rx) = ChannelSink::new();
            let consumer = std::thread::spawn(move || rx.iter().count());

            let output = runner.run(&sink)?;
            drop(sink);
            let frames = consumer.join().expect("frame consumer panicked");

            output.report.print();
            println!("render frames:   {}", frames);
            println!(
                "dataset samples: {}",
                output.sample_count(keep_quiet)
            );
        }

        Commands::Bench { batch } => {
            let runner = Runner::new(batch.to_config())?;
            let output = runner.run(&cascade_engine::NullSink)?;
            println!("recorded {} moves; replaying...", output.report.moves);

            let report = ReplayBench::new(runner.board().clone()).run(&output.logs)?;
            report.print();
        }
    }

    Ok(())
}
