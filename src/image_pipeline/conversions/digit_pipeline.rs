use std::io::Write;
use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::image_pipeline::{
    common::{
        config::PipelineConfig,
        error::{PipelineError, Result},
        timing::{PipelineTimings, Timer},
    },
    conversions::outcome::{NormalizedDigit, PipelineOutcome},
    raster::{DecodedImageReader, Raster, RasterReader},
    stages::{self, Placement, Translation},
    tiff::{StandardTiffWriter, TiffWriter},
};

pub struct DigitPipeline<R: RasterReader = DecodedImageReader, W: TiffWriter = StandardTiffWriter> {
    reader: R,
    writer: W,
    config: PipelineConfig,
}

impl DigitPipeline<DecodedImageReader, StandardTiffWriter> {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            reader: DecodedImageReader,
            writer: StandardTiffWriter,
            config,
        }
    }
}

impl Default for DigitPipeline<DecodedImageReader, StandardTiffWriter> {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl<R: RasterReader, W: TiffWriter> DigitPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: PipelineConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(PipelineError::InvalidDimensions(width, height));
        }

        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                warn!(width, height, max, "Snapshot exceeds maximum dimension");
                return Err(PipelineError::InvalidDimensions(width, height));
            }
        }

        Ok(())
    }

    /// Runs every stage on `source`.
    ///
    /// An empty canvas is not an error: it yields [`PipelineOutcome::Aborted`].
    pub fn normalize(&self, source: &Raster) -> Result<PipelineOutcome> {
        let mut timings = PipelineTimings::new();
        self.run(source, &mut timings)
    }

    pub fn normalize_with_timings(
        &self,
        source: &Raster,
    ) -> Result<(PipelineOutcome, PipelineTimings)> {
        let mut timings = PipelineTimings::new();
        let outcome = self.run(source, &mut timings)?;
        Ok((outcome, timings))
    }

    #[instrument(skip_all, fields(width = source.width(), height = source.height()))]
    fn run(&self, source: &Raster, timings: &mut PipelineTimings) -> Result<PipelineOutcome> {
        self.validate_dimensions(source.width(), source.height())?;

        let working = {
            let _span = tracing::info_span!("downsample").entered();
            let timer = Timer::start("downsample");
            let working = stages::downsample(source);
            let (name, duration) = timer.stop();
            timings.add_step(name, duration);
            working
        };

        let bounding_box = {
            let _span = tracing::info_span!("bounding_box").entered();
            let timer = Timer::start("bounding_box");
            let bounding_box = stages::extract_bounding_box(&working);
            let (name, duration) = timer.stop();
            timings.add_step(name, duration);
            bounding_box
        };

        let Some(bounding_box) = bounding_box else {
            info!("Nothing drawn, skipping normalization");
            return Ok(PipelineOutcome::Aborted);
        };
        debug!(?bounding_box, "Ink found");

        let (placement, placed) = {
            let _span = tracing::info_span!("placement").entered();
            let timer = Timer::start("placement");
            let placement = Placement::for_box(bounding_box);
            let placed = stages::place_digit(&working, &placement);
            let (name, duration) = timer.stop();
            timings.add_step(name, duration);
            (placement, placed)
        };
        debug!(
            scale = placement.scale,
            offset_x = placement.offset_x,
            offset_y = placement.offset_y,
            "Digit placed"
        );

        let (recentered, centroid) = {
            let _span = tracing::info_span!("recenter").entered();
            let timer = Timer::start("recenter");
            let result = stages::recenter(&placed);
            let (name, duration) = timer.stop();
            timings.add_step(name, duration);
            result
        };
        let translation = centroid.as_ref().map(Translation::towards_center);
        match &translation {
            Some(t) => debug!(dx = t.dx, dy = t.dy, "Centre of mass moved"),
            None => debug!("Placed digit has no mass, recentering skipped"),
        }

        let smoothed = {
            let _span = tracing::info_span!("smooth").entered();
            let timer = Timer::start("smooth");
            let smoothed = stages::smooth(&recentered);
            let (name, duration) = timer.stop();
            timings.add_step(name, duration);
            smoothed
        };

        let pixels = {
            let _span = tracing::info_span!("emit").entered();
            let timer = Timer::start("emit");
            let pixels = stages::emit(&smoothed);
            let (name, duration) = timer.stop();
            timings.add_step(name, duration);
            pixels
        };

        info!(
            box_width = bounding_box.width(),
            box_height = bounding_box.height(),
            "Normalization complete"
        );

        Ok(PipelineOutcome::Emitted(NormalizedDigit {
            bounding_box,
            placement,
            centroid,
            translation,
            raster: smoothed,
            pixels,
        }))
    }

    #[instrument(skip(self, data), fields(input_size = data.len()))]
    pub fn read_raster(&self, data: &[u8]) -> Result<Raster> {
        self.reader.read_raster(data)
    }

    #[instrument(skip(self, input_path))]
    pub fn read_file<P: AsRef<Path>>(&self, input_path: P) -> Result<Raster> {
        let input_path = input_path.as_ref();
        info!(input = %input_path.display(), "Reading snapshot");

        let input_data = std::fs::read(input_path).map_err(|e| {
            PipelineError::InputReadError(format!("{}: {}", input_path.display(), e))
        })?;

        self.reader.read_raster(&input_data)
    }

    pub fn normalize_file<P: AsRef<Path>>(&self, input_path: P) -> Result<PipelineOutcome> {
        let source = self.read_file(input_path)?;
        self.normalize(&source)
    }

    pub fn write_digit(&self, digit: &NormalizedDigit, output: &mut dyn Write) -> Result<()> {
        let _span = tracing::info_span!("encode_tiff").entered();
        self.writer.write_tiff(&digit.raster, output, &self.config)
    }

    #[instrument(skip(self, digit, output_path))]
    pub fn write_digit_file<P: AsRef<Path>>(
        &self,
        digit: &NormalizedDigit,
        output_path: P,
    ) -> Result<()> {
        let output_path = output_path.as_ref();
        info!(output = %output_path.display(), "Writing normalized digit");

        let mut output_file = std::fs::File::create(output_path).map_err(|e| {
            PipelineError::OutputWriteError(format!("{}: {}", output_path.display(), e))
        })?;

        self.write_digit(digit, &mut output_file)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PipelineConfig) {
        self.config = config;
    }
}
