use std::io::Write;

use tiff::encoder::Compression;
use tiff::encoder::compression::DeflateLevel;
use tracing::debug;

use crate::image_pipeline::common::config::PipelineConfig;
use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::raster::Raster;
use crate::image_pipeline::tiff::types::TiffCompression;
use crate::image_pipeline::tiff::writer::TiffWriter;

/// Writes the RGB-mean intensity of each pixel as a single Gray8 sample.
pub struct StandardTiffWriter;

impl TiffWriter for StandardTiffWriter {
    fn write_tiff(
        &self,
        image: &Raster,
        output: &mut dyn Write,
        config: &PipelineConfig,
    ) -> Result<()> {
        debug!("Encoding TIFF image: {}x{}", image.width(), image.height());

        let gray: Vec<u8> = image
            .as_rgba()
            .chunks_exact(Raster::CHANNELS)
            .map(|px| ((px[0] as u16 + px[1] as u16 + px[2] as u16 + 1) / 3) as u8)
            .collect();

        let compression = match config.compression {
            TiffCompression::None => Compression::Uncompressed,
            TiffCompression::Lzw => Compression::Lzw,
            TiffCompression::DeflateFast => Compression::Deflate(DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => Compression::Deflate(DeflateLevel::Balanced),
            TiffCompression::DeflateBest => Compression::Deflate(DeflateLevel::Best),
        };

        let mut buffer = Vec::new();
        let mut encoder = tiff::encoder::TiffEncoder::new(std::io::Cursor::new(&mut buffer))
            .map_err(|e| PipelineError::EncodeError(e.to_string()))?
            .with_compression(compression);

        if let Some(predictor_val) = config.predictor {
            let predictor = match predictor_val {
                2 => tiff::tags::Predictor::Horizontal,
                _ => tiff::tags::Predictor::None,
            };
            encoder = encoder.with_predictor(predictor);
        }

        encoder
            .write_image::<tiff::encoder::colortype::Gray8>(
                image.width() as u32,
                image.height() as u32,
                &gray,
            )
            .map_err(|e| PipelineError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn decode(bytes: Vec<u8>) -> (u32, u32, Vec<u8>) {
        let mut decoder = tiff::decoder::Decoder::new(Cursor::new(bytes)).unwrap();
        let (width, height) = decoder.dimensions().unwrap();
        match decoder.read_image().unwrap() {
            tiff::decoder::DecodingResult::U8(data) => (width, height, data),
            _ => panic!("expected 8-bit samples"),
        }
    }

    #[test]
    fn test_gray_samples_are_rgb_mean() {
        let mut raster = Raster::black(28, 28);
        raster.put_pixel(1, 0, [255, 255, 255, 255]);
        raster.put_pixel(2, 0, [0, 0, 255, 255]);

        let mut bytes = Vec::new();
        StandardTiffWriter
            .write_tiff(&raster, &mut bytes, &PipelineConfig::default())
            .unwrap();

        let (width, height, data) = decode(bytes);
        assert_eq!((width, height), (28, 28));
        assert_eq!(&data[..3], &[0, 255, 85]);
    }

    #[test]
    fn test_compressed_output_round_trips() {
        let mut raster = Raster::black(28, 28);
        raster.put_pixel(14, 14, [200, 200, 200, 255]);
        let config = PipelineConfig::builder()
            .compression(TiffCompression::Lzw)
            .predictor(Some(2))
            .build();

        let mut bytes = Vec::new();
        StandardTiffWriter.write_tiff(&raster, &mut bytes, &config).unwrap();

        let (_, _, data) = decode(bytes);
        assert_eq!(data[14 * 28 + 14], 200);
    }
}
