use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::color::{Color, ColorMapper};
use crate::image_pipeline::{
    CaptureError, CaptureSource, FormatWriter, ImageDecoder, ImageWriter, PipelineConfig,
    PipelineError, PipelineTimings, StandardDecoder, TintMode, TintPipeline,
};
use crate::sensors::{DeliveryRate, SensorChannel, SensorError, SensorHub, SensorSource};

/// The most recent successfully persisted photo.
#[derive(Debug, Clone, PartialEq)]
pub struct TintedPhoto {
    pub id: u64,
    pub path: PathBuf,
    pub color: Color,
}

/// Outcome of a background tint, for reporting to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum PhotoNotice {
    Saved {
        photo: TintedPhoto,
        /// A newer capture had already completed, so this one is not shown.
        superseded: bool,
    },
    Failed {
        id: u64,
        error: String,
    },
}

struct Completion {
    id: u64,
    color: Color,
    output: PathBuf,
    result: std::result::Result<PipelineTimings, PipelineError>,
}

/// Top-level controller.
///
/// Sensor state lives in the owned [`SensorHub`]. Decode, tint and encode run
/// on a blocking worker and report back over a channel; results are only
/// applied to controller state from [`PhotoController::next_notice`].
pub struct PhotoController<C, D, W>
where
    D: ImageDecoder,
    W: ImageWriter,
{
    hub: SensorHub,
    mapper: ColorMapper,
    default_color: Color,
    capture: C,
    pipeline: Arc<TintPipeline<D, W>>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
    next_id: u64,
    in_flight: usize,
    latest: Option<TintedPhoto>,
}

impl<C: CaptureSource> PhotoController<C, StandardDecoder, FormatWriter> {
    pub fn new(capture: C, mapper: ColorMapper, config: PipelineConfig) -> Self {
        Self::with_pipeline(capture, mapper, TintPipeline::new(config))
    }
}

impl<C, D, W> PhotoController<C, D, W>
where
    C: CaptureSource,
    D: ImageDecoder + Clone + Send + Sync + 'static,
    W: ImageWriter + Clone + Send + Sync + 'static,
{
    pub fn with_pipeline(capture: C, mapper: ColorMapper, pipeline: TintPipeline<D, W>) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            hub: SensorHub::new(mapper.required_channels()),
            mapper,
            default_color: Color::NEUTRAL,
            capture,
            pipeline: Arc::new(pipeline),
            completions_tx,
            completions_rx,
            next_id: 1,
            in_flight: 0,
            latest: None,
        }
    }

    /// Color used until every required sensor has reported.
    pub fn with_default_color(mut self, color: Color) -> Self {
        self.default_color = color;
        self
    }

    pub fn hub(&self) -> &SensorHub {
        &self.hub
    }

    /// Starts the sensor update loop. Must be called inside a tokio runtime.
    pub fn start(&mut self) {
        self.hub.start();
    }

    /// Subscribes to `source`; returns the channels the device lacks.
    pub fn resume<S: SensorSource + ?Sized>(
        &mut self,
        source: &mut S,
        rate: DeliveryRate,
    ) -> Vec<SensorChannel> {
        self.hub.subscribe(source, rate)
    }

    pub fn pause<S: SensorSource + ?Sized>(&mut self, source: &mut S) {
        self.hub.unsubscribe(source);
    }

    pub fn current_color(&self) -> Color {
        self.mapper.map_or_default(&self.hub.snapshot(), self.default_color)
    }

    /// Waits for the hub to apply every reading delivered so far, then
    /// returns [`PhotoController::current_color`].
    pub async fn sync_sensors(&self) -> std::result::Result<Color, SensorError> {
        self.hub.flush().await?;
        Ok(self.current_color())
    }

    /// Pipeline for one capture. Saturation mode takes its factor from the
    /// magnetometer at capture time, when it has reported.
    fn capture_pipeline(&self) -> Arc<TintPipeline<D, W>> {
        if self.pipeline.config().tint_mode != TintMode::Saturation {
            return Arc::clone(&self.pipeline);
        }
        match ColorMapper::saturation(&self.hub.snapshot()) {
            Some(saturation) => Arc::new(self.pipeline.with_saturation(saturation)),
            None => Arc::clone(&self.pipeline),
        }
    }

    /// Captures a photo and starts tinting it in the background.
    ///
    /// The color is frozen at capture time from the current snapshot; call
    /// [`PhotoController::sync_sensors`] first to include queued readings.
    /// A capture failure is returned as-is and leaves controller state
    /// untouched.
    pub fn take_photo(
        &mut self,
        capture_path: &Path,
        output_path: PathBuf,
    ) -> std::result::Result<u64, CaptureError> {
        let captured = self.capture.capture(capture_path).map_err(|e| {
            warn!(error = %e, "photo capture failed");
            e
        })?;

        let id = self.next_id;
        self.next_id += 1;
        let color = self.current_color();
        info!(id, %color, ready = self.hub.is_ready(), "photo captured");

        let pipeline = self.capture_pipeline();
        let completions = self.completions_tx.clone();
        let destination = output_path.clone();
        let worker = tokio::task::spawn_blocking(move || {
            pipeline.process_file(&captured, &destination, color)
        });
        tokio::spawn(async move {
            let result = worker.await.unwrap_or_else(|e| {
                Err(PipelineError::WorkerFailed(e.to_string()))
            });
            if completions
                .send(Completion {
                    id,
                    color,
                    output: output_path,
                    result,
                })
                .is_err()
            {
                debug!(id, "controller gone, dropping completion");
            }
        });
        self.in_flight += 1;

        Ok(id)
    }

    /// Number of photos still being tinted.
    pub fn pending(&self) -> usize {
        self.in_flight
    }

    /// Waits for the next background tint to finish and applies it.
    ///
    /// Returns `None` when nothing is in flight.
    pub async fn next_notice(&mut self) -> Option<PhotoNotice> {
        if self.in_flight == 0 {
            return None;
        }
        let completion = self.completions_rx.recv().await?;
        self.in_flight -= 1;
        Some(self.apply_completion(completion))
    }

    pub fn latest(&self) -> Option<&TintedPhoto> {
        self.latest.as_ref()
    }

    fn apply_completion(&mut self, completion: Completion) -> PhotoNotice {
        let Completion {
            id,
            color,
            output,
            result,
        } = completion;

        match result {
            Ok(timings) => {
                timings.log_summary();
                let photo = TintedPhoto {
                    id,
                    path: output,
                    color,
                };
                let superseded = self.latest.as_ref().is_some_and(|latest| latest.id > id);
                if superseded {
                    debug!(id, "newer photo already shown, keeping it");
                } else {
                    info!(id, path = %photo.path.display(), "tinted photo saved");
                    self.latest = Some(photo.clone());
                }
                PhotoNotice::Saved { photo, superseded }
            }
            Err(e) => {
                error!(id, error = %e, "tinting photo failed");
                PhotoNotice::Failed {
                    id,
                    error: e.to_string(),
                }
            }
        }
    }
}
