//! Background image decoding and texture storage.
//!
//! Decode work runs on a small thread pool fed over a bounded channel;
//! finished pixels come back over a second bounded channel and are uploaded
//! as textures on the UI thread, a few per frame. The bounded results lane
//! doubles as backpressure: workers stall rather than stack decoded RGBA
//! buffers in memory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::thread;

use anyhow::{Context as _, Result};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use egui::{ColorImage, TextureHandle, TextureOptions};
use log::{trace, warn};

/// Decode queue depth; requests beyond this retry on a later frame
const JOB_QUEUE: usize = 256;

/// Decoded images waiting for upload; workers block when full
const RESULT_QUEUE: usize = 8;

/// Texture uploads per frame, to keep frame times level
const UPLOADS_PER_FRAME: usize = 2;

/// Images larger than this on either axis are downscaled before upload
const MAX_TEXTURE_DIM: u32 = 4096;

enum ImageState {
    Pending,
    Ready(TextureHandle),
    Failed,
}

#[derive(Debug)]
struct DecodedImage {
    path: PathBuf,
    size: [usize; 2],
    rgba: Vec<u8>,
}

enum DecodeOutcome {
    Decoded(DecodedImage),
    Failed { path: PathBuf, error: anyhow::Error },
}

/// Texture cache fed by background decode workers.
pub struct ImageStore {
    ctx: egui::Context,
    states: HashMap<PathBuf, ImageState>,
    jobs: Option<Sender<PathBuf>>,
    results: Receiver<DecodeOutcome>,
    handles: Vec<thread::JoinHandle<()>>,
}

impl ImageStore {
    /// Spawn the decode pool. Sized to leave headroom for the UI thread.
    pub fn new(ctx: &egui::Context) -> Self {
        let num_threads = (num_cpus::get() * 3 / 4).max(1);
        let (jobs_tx, jobs_rx) = bounded::<PathBuf>(JOB_QUEUE);
        let (results_tx, results_rx) = bounded::<DecodeOutcome>(RESULT_QUEUE);

        let mut handles = Vec::new();
        for worker_id in 0..num_threads {
            let jobs_rx = jobs_rx.clone();
            let results_tx = results_tx.clone();
            let ctx = ctx.clone();

            let handle = thread::Builder::new()
                .name(format!("travelogue-decode-{}", worker_id))
                .spawn(move || {
                    trace!("Decode worker {} started", worker_id);
                    for path in jobs_rx.iter() {
                        let outcome = match decode(&path) {
                            Ok(decoded) => DecodeOutcome::Decoded(decoded),
                            Err(error) => DecodeOutcome::Failed { path, error },
                        };
                        if results_tx.send(outcome).is_err() {
                            break;
                        }
                        // Wake the UI so the upload happens promptly
                        ctx.request_repaint();
                    }
                    trace!("Decode worker {} stopped", worker_id);
                })
                .expect("Failed to spawn decode worker");

            handles.push(handle);
        }

        trace!("Image store initialized: {} decode workers", num_threads);

        Self {
            ctx: ctx.clone(),
            states: HashMap::new(),
            jobs: Some(jobs_tx),
            results: results_rx,
            handles,
        }
    }

    /// Queue a decode without waiting for the texture. For warming the
    /// cache right after a journal loads.
    pub fn prefetch(&mut self, path: &Path) {
        self.ensure_requested(path);
    }

    /// Texture for `path` if decoded and uploaded. Untracked paths are
    /// queued on first ask, so callers simply retry next frame.
    pub fn texture(&mut self, path: &Path) -> Option<TextureHandle> {
        self.ensure_requested(path);
        match self.states.get(path) {
            Some(ImageState::Ready(handle)) => Some(handle.clone()),
            _ => None,
        }
    }

    /// True when decoding `path` has failed; callers fall back to
    /// placeholder art instead of waiting forever.
    pub fn is_failed(&self, path: &Path) -> bool {
        matches!(self.states.get(path), Some(ImageState::Failed))
    }

    fn ensure_requested(&mut self, path: &Path) {
        if self.states.contains_key(path) {
            return;
        }
        let Some(jobs) = self.jobs.as_ref() else {
            return;
        };
        match jobs.try_send(path.to_owned()) {
            Ok(()) => {
                self.states.insert(path.to_owned(), ImageState::Pending);
            }
            // Queue full: stay untracked and retry on a later frame
            Err(TrySendError::Full(_)) => {}
            Err(TrySendError::Disconnected(_)) => {
                self.states.insert(path.to_owned(), ImageState::Failed);
            }
        }
    }

    /// Upload a bounded batch of finished decodes as textures.
    pub fn drain(&mut self) {
        for _ in 0..UPLOADS_PER_FRAME {
            match self.results.try_recv() {
                Ok(DecodeOutcome::Decoded(decoded)) => {
                    let name = decoded.path.display().to_string();
                    let image = ColorImage::from_rgba_unmultiplied(decoded.size, &decoded.rgba);
                    let handle = self.ctx.load_texture(name, image, TextureOptions::LINEAR);
                    self.states.insert(decoded.path, ImageState::Ready(handle));
                }
                Ok(DecodeOutcome::Failed { path, error }) => {
                    warn!("Image decode failed: {error:#}");
                    self.states.insert(path, ImageState::Failed);
                }
                Err(_) => break,
            }
        }
    }
}

impl Drop for ImageStore {
    fn drop(&mut self) {
        // Disconnect the job lane; workers exit after their current decode
        self.jobs.take();

        let handles = std::mem::take(&mut self.handles);
        for handle in handles {
            while !handle.is_finished() {
                // Keep the results lane clear so a blocked sender can exit
                while self.results.try_recv().is_ok() {}
                thread::sleep(std::time::Duration::from_millis(1));
            }
            let _ = handle.join();
        }
    }
}

fn decode(path: &Path) -> Result<DecodedImage> {
    let img = image::open(path)
        .with_context(|| format!("Failed to decode image: {}", path.display()))?;
    let img = if img.width() > MAX_TEXTURE_DIM || img.height() > MAX_TEXTURE_DIM {
        img.thumbnail(MAX_TEXTURE_DIM, MAX_TEXTURE_DIM)
    } else {
        img
    };
    let rgba = img.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(DecodedImage {
        path: path.to_owned(),
        size,
        rgba: rgba.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};
    use uuid::Uuid;

    fn temp_png(width: u32, height: u32) -> PathBuf {
        let path = std::env::temp_dir().join(format!("travelogue-test-{}.png", Uuid::new_v4()));
        image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn test_decode_reads_png() {
        let path = temp_png(4, 2);
        let decoded = decode(&path).unwrap();
        assert_eq!(decoded.size, [4, 2]);
        assert_eq!(decoded.rgba.len(), 4 * 2 * 4);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_decode_missing_file_errors() {
        let err = decode(Path::new("/nonexistent/nope.png")).unwrap_err();
        assert!(err.to_string().contains("nope.png"));
    }

    #[test]
    fn test_pipeline_delivers_texture() {
        let ctx = egui::Context::default();
        let mut store = ImageStore::new(&ctx);
        let path = temp_png(8, 8);

        assert!(store.texture(&path).is_none());

        let deadline = Instant::now() + Duration::from_secs(5);
        let handle = loop {
            store.drain();
            if let Some(handle) = store.texture(&path) {
                break handle;
            }
            assert!(Instant::now() < deadline, "decode never completed");
            thread::sleep(Duration::from_millis(5));
        };
        assert_eq!(handle.size(), [8, 8]);
        assert!(!store.is_failed(&path));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_pipeline_marks_failures() {
        let ctx = egui::Context::default();
        let mut store = ImageStore::new(&ctx);
        let path = PathBuf::from("/nonexistent/missing.jpg");

        assert!(store.texture(&path).is_none());

        let deadline = Instant::now() + Duration::from_secs(5);
        while !store.is_failed(&path) {
            store.drain();
            assert!(Instant::now() < deadline, "failure never reported");
            thread::sleep(Duration::from_millis(5));
        }
        assert!(store.texture(&path).is_none());
    }
}
