use crate::{MergeCommand, MergeUpdate};
use image::{Rgba, RgbaImage};
use image_merge::{MergeOptions, OutputFormat, merge_files_async, save_canvas_async};
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Last merge result, kept for `Save`
struct MergedCanvas {
    canvas: RgbaImage,
    background: Rgba<u8>,
}

/// Async worker task that processes merge commands and sends updates
pub async fn worker_task(
    mut command_rx: mpsc::UnboundedReceiver<MergeCommand>,
    update_tx: mpsc::UnboundedSender<MergeUpdate>,
) {
    let mut last: Option<MergedCanvas> = None;

    while let Some(cmd) = command_rx.recv().await {
        process_command(cmd, &mut last, &mut command_rx, &update_tx).await;
    }
    log::debug!("Merge worker stopped");
}

async fn process_command(
    cmd: MergeCommand,
    last: &mut Option<MergedCanvas>,
    command_rx: &mut mpsc::UnboundedReceiver<MergeCommand>,
    update_tx: &mpsc::UnboundedSender<MergeUpdate>,
) {
    match cmd {
        MergeCommand::Merge {
            mut paths,
            mut options,
        } => {
            // Collapse consecutive queued merges into the most recent one.
            // Anything else stops the drain and runs after the merge.
            let mut next = None;
            while let Ok(next_cmd) = command_rx.try_recv() {
                match next_cmd {
                    MergeCommand::Merge {
                        paths: new_paths,
                        options: new_options,
                    } => {
                        log::debug!("Discarding queued merge, using newer request");
                        paths = new_paths;
                        options = new_options;
                    }
                    other => {
                        next = Some(other);
                        break;
                    }
                }
            }

            handle_merge(paths, options, last, update_tx).await;

            if let Some(next_cmd) = next {
                Box::pin(process_command(next_cmd, last, command_rx, update_tx)).await;
            }
        }
        MergeCommand::Save {
            output_path,
            format_hint,
        } => {
            handle_save(output_path, format_hint, last.as_ref(), update_tx).await;
        }
        MergeCommand::Clear => {
            *last = None;
        }
    }
}

async fn handle_merge(
    paths: Vec<PathBuf>,
    options: MergeOptions,
    last: &mut Option<MergedCanvas>,
    update_tx: &mpsc::UnboundedSender<MergeUpdate>,
) {
    let total = paths.len();
    let _ = update_tx.send(MergeUpdate::Progress {
        stage: "Merging".to_string(),
        current: 0,
        total,
    });

    let background = options.background_color.into();
    match merge_files_async(paths, options).await {
        Ok(outcome) => {
            let _ = update_tx.send(MergeUpdate::Progress {
                stage: "Merging".to_string(),
                current: total,
                total,
            });
            let _ = update_tx.send(MergeUpdate::Merged {
                width: outcome.canvas.width(),
                height: outcome.canvas.height(),
                block_count: outcome.block_count,
                skipped: outcome.skipped.into_iter().map(|s| s.path).collect(),
            });
            *last = Some(MergedCanvas {
                canvas: outcome.canvas,
                background,
            });
        }
        Err(e) => {
            let message = match e.hint() {
                Some(hint) => format!("Merge failed: {}. {}", e, hint),
                None => format!("Merge failed: {}", e),
            };
            let _ = update_tx.send(MergeUpdate::Error { message });
        }
    }
}

async fn handle_save(
    output_path: PathBuf,
    format_hint: Option<OutputFormat>,
    last: Option<&MergedCanvas>,
    update_tx: &mpsc::UnboundedSender<MergeUpdate>,
) {
    let Some(merged) = last else {
        let _ = update_tx.send(MergeUpdate::Error {
            message: "Nothing merged yet".to_string(),
        });
        return;
    };

    let path = apply_format_hint(output_path, format_hint);
    match save_canvas_async(merged.canvas.clone(), &path, merged.background).await {
        Ok(path) => {
            let _ = update_tx.send(MergeUpdate::Saved { path });
        }
        Err(e) => {
            let _ = update_tx.send(MergeUpdate::Error {
                message: format!("Failed to save {}: {}", path.display(), e),
            });
        }
    }
}

fn apply_format_hint(mut path: PathBuf, format_hint: Option<OutputFormat>) -> PathBuf {
    match format_hint {
        Some(format) if OutputFormat::from_path(&path) != format || path.extension().is_none() => {
            path.set_extension(match format {
                OutputFormat::Png => "png",
                OutputFormat::Jpeg => "jpg",
            });
            path
        }
        _ => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hint_overrides_extension() {
        let hinted = apply_format_hint(PathBuf::from("out.png"), Some(OutputFormat::Jpeg));
        assert_eq!(hinted, PathBuf::from("out.jpg"));

        let hinted = apply_format_hint(PathBuf::from("out"), Some(OutputFormat::Png));
        assert_eq!(hinted, PathBuf::from("out.png"));

        let kept = apply_format_hint(PathBuf::from("out.JPEG"), Some(OutputFormat::Jpeg));
        assert_eq!(kept, PathBuf::from("out.JPEG"));

        let kept = apply_format_hint(PathBuf::from("out.bmp"), None);
        assert_eq!(kept, PathBuf::from("out.bmp"));
    }
}
