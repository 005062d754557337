pub mod block;
pub mod compose;
pub mod constants;
pub mod io;
pub mod label;
pub mod layout;
mod merge;
mod options;
pub mod resize;
pub mod source;
mod types;

pub use block::{LabelRenderer, build_block};
pub use compose::compose_grid;
pub use io::{OutputFormat, normalize_output_path, save_canvas, save_canvas_async};
pub use label::{FontOrigin, FontSource, LabelFont, TextMeasure, probe_text_metrics, resolve_font};
pub use merge::{MergeOutcome, merge_files, merge_files_async, merge_images, merge_with_renderer};
pub use options::*;
pub use resize::resize_to_max;
pub use source::{SourceLoader, is_supported_path, load_images};
pub use types::*;
