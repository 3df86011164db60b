pub mod adapter;
pub mod archive;
pub mod batch;
pub mod cli;
pub mod codec;
pub mod constants;
pub mod error;
pub mod formats;
pub mod logger;
pub mod session;
pub mod stats;
pub mod utils;

pub use adapter::{compress_file, CompressionOptions, CompressionResult};
pub use archive::{package, write_artifact, Artifact};
pub use batch::{collect_input_files, process_batch, Batch, BatchOptions};
pub use error::{CompressionError, Result};
pub use formats::{is_image_input, SourceFormat};
pub use session::{AppState, Session};
pub use stats::{aggregate, BatchStats};
