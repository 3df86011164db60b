use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "imgpress",
    about = "Batch image compression with aggregate stats and zip packaging",
    long_about = "imgpress compresses a set of images concurrently, reports batch-level \
                  statistics (total original/compressed bytes, overall reduction), and \
                  packages the outputs for download: the file itself for one result, a \
                  single zip archive for two or more.",
    version = "0.1.0",
    after_help = "EXAMPLES:\n  \
    imgpress compress photo.jpg -o ./out\n  \
    imgpress compress ./vacation -r -q 85 -o ./compressed\n  \
    imgpress compress a.png b.jpg c.webp -o ./out -d 1280"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Suppress all non-error output")]
    pub quiet: bool,

    #[arg(short = 'v', long, global = true, help = "Enable verbose output")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(
        about = "Compress a set of images and package the results",
        long_about = "Compress every image in the given files/directories concurrently. \
                      Non-image files are skipped silently; if nothing qualifies the run \
                      fails before any work starts. One result is written directly as \
                      compressed-<name>; two or more are bundled into compressed-images.zip."
    )]
    Compress {
        #[arg(
            required = true,
            help = "Input image files or directories",
            long_help = "Any mix of image files and directories. Directories are expanded \
                         (non-recursively unless -r); files with a non-image type are \
                         filtered out without error."
        )]
        inputs: Vec<PathBuf>,

        #[arg(
            short = 'o',
            long,
            default_value = ".",
            help = "Output directory for the packaged artifact"
        )]
        output: PathBuf,

        #[arg(
            short = 'q',
            long,
            help = "Compression quality (1-100, default: 80)",
            long_help = "Compression quality from 1 (lowest) to 100 (highest). \
                         For PNG: >=90 uses Zopfli, >=70 high-level deflate, below that a faster level."
        )]
        quality: Option<u8>,

        #[arg(
            short = 'd',
            long,
            help = "Maximum output dimension in pixels (default: 1920)",
            long_help = "Longest edge of any output image. Larger inputs are downscaled \
                         to fit while preserving aspect ratio."
        )]
        max_dimension: Option<u32>,

        #[arg(
            short = 's',
            long,
            help = "Target output size in bytes for lossy formats (default: 1 MiB)",
            long_help = "Soft size target. JPEG output steps quality down until it fits \
                         or the quality floor is reached; other formats ignore it."
        )]
        target_size: Option<u64>,

        #[arg(
            short = 'j',
            long,
            help = "Number of parallel compression threads (default: auto)"
        )]
        threads: Option<usize>,

        #[arg(
            short = 'r',
            long,
            help = "Recurse into subdirectories of directory inputs"
        )]
        recursive: bool,
    },
}
