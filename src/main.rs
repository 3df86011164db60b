use anyhow::{bail, Result};
use clap::Parser;
use imgpress::adapter::CompressionOptions;
use imgpress::archive::write_artifact;
use imgpress::batch::{collect_input_files, BatchOptions};
use imgpress::cli::{Args, Commands};
use imgpress::logger::{set_verbosity, Verbosity};
use imgpress::session::{AppState, Session};
use imgpress::utils::format_file_size;
use imgpress::{info, verbose};
use rayon::ThreadPoolBuilder;

fn main() -> Result<()> {
    let args = Args::parse();

    set_verbosity(if args.quiet {
        Verbosity::Quiet
    } else if args.verbose {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    });

    match args.command {
        Commands::Compress {
            inputs,
            output,
            quality,
            max_dimension,
            target_size,
            threads,
            recursive,
        } => {
            setup_thread_pool(threads);

            let files = collect_input_files(&inputs, recursive)?;
            verbose!("collected {} candidate files", files.len());

            let options = BatchOptions {
                compression: CompressionOptions::new(quality, max_dimension, target_size)?,
                ..BatchOptions::default()
            };

            let mut session = Session::new(options);
            if session.submit(&files) != AppState::Success {
                match session.last_error() {
                    Some(err) => bail!("{}", err),
                    None => bail!("compression failed"),
                }
            }

            if let Some(stats) = session.stats() {
                info!("\n📊 Batch Summary:");
                info!("  📁 Files compressed: {}", stats.count);
                info!(
                    "  📊 Total original size: {}",
                    format_file_size(stats.total_original)
                );
                info!(
                    "  📈 Total compressed size: {}",
                    format_file_size(stats.total_compressed)
                );
                info!("  🎯 Overall reduction: {}%", stats.reduction_percentage);
            }

            if let Some(artifact) = session.package()? {
                let path = write_artifact(&artifact, &output)?;
                info!("💾 Wrote {:?}", path);
            }
        }
    }

    Ok(())
}

fn setup_thread_pool(threads: Option<usize>) {
    if let Some(num_threads) = threads {
        ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .unwrap_or_else(|e| {
                eprintln!("Warning: Failed to set thread pool size: {}", e);
            });
    }
}
