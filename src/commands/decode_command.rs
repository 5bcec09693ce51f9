//! Decode command: PNG or TIFF to an image file

use clap::ArgMatches;
use image::RgbaImage;
use log::{debug, error, info};

use crate::api::{Glowkit, ImageFormat};
use crate::commands::command_traits::Command;
use crate::config::DecoderConfig;
use crate::errors::{DecodeError, DecodeResult};
use crate::extractor::Region;
use crate::io::seekable::SeekableReader;
use crate::sink::{LinearImage, PixelSink, SrgbImage};
use crate::utils::ProgressTracker;

/// Command for decoding an image, or a region of it, to an output file
pub struct DecodeCommand {
    /// Path to the input file
    input_file: String,
    /// Path to the output image; the extension picks the encoder
    output_file: String,
    /// Optional pixel window of the source image
    region: Option<Region>,
    config: DecoderConfig,
}

impl DecodeCommand {
    pub fn new(args: &ArgMatches, config: DecoderConfig) -> DecodeResult<Self> {
        let input_file = super::input_path(args)?;
        let output_file = args
            .get_one::<String>("output")
            .cloned()
            .unwrap_or_else(|| "decoded.png".to_string());
        let region = args
            .get_one::<String>("region")
            .map(|s| s.parse::<Region>())
            .transpose()?;

        Ok(DecodeCommand {
            input_file,
            output_file,
            region,
            config,
        })
    }

    fn decode_png(&self, glowkit: &Glowkit, reader: &mut dyn SeekableReader) -> DecodeResult<RgbaImage> {
        let file = glowkit.load_png_chunks(reader)?;
        let header = file.header()?;
        self.config.check_dimensions(header.width as u64, header.height as u64)?;

        match self.region {
            None => {
                let mut image = RgbaImage::new(header.width, header.height);
                file.decode_into(&mut image)?;
                Ok(image)
            }
            Some(region) => {
                let mut full = SrgbImage::new(header.width, header.height);
                file.decode_into(&mut full)?;
                self.config.check_dimensions(region.width as u64, region.height as u64)?;
                let mut image = RgbaImage::new(region.width, region.height);
                for (dest_y, src_y) in (region.y..region.end_y()).enumerate() {
                    for (dest_x, src_x) in (region.x..region.end_x()).enumerate() {
                        image.set_srgb_pixel(dest_x as i64, dest_y as i64, full.get_srgb_pixel(src_x, src_y));
                    }
                }
                Ok(image)
            }
        }
    }

    fn decode_tiff(&self, glowkit: &Glowkit, reader: &mut dyn SeekableReader) -> DecodeResult<RgbaImage> {
        let region = match self.region {
            Some(region) => region,
            None => {
                let (width, height) = glowkit.tiff_dimensions(reader)?;
                Region::full(width, height)
            }
        };
        self.config.check_dimensions(region.width as u64, region.height as u64)?;

        let mut decoded = LinearImage::new(region.width, region.height);
        let progress = ProgressTracker::new(region.height as u64, "Decoding strips");
        glowkit.decode_tiff_region_with(reader, region, &mut decoded, |_| progress.increment(1))?;
        progress.finish();

        // TIFF samples are written out as stored, without a transfer curve
        let mut image = RgbaImage::new(region.width, region.height);
        for (x, y, pixel) in image.enumerate_pixels_mut() {
            let color = decoded.get_pixel(x as i64, y as i64);
            pixel.0 = [quantize(color.r), quantize(color.g), quantize(color.b), quantize(color.a)];
        }
        Ok(image)
    }
}

impl Command for DecodeCommand {
    fn execute(&self) -> DecodeResult<()> {
        info!("Decoding {} to {}", self.input_file, self.output_file);
        if let Some(region) = &self.region {
            debug!("Region: {:?}", region);
        }

        let glowkit = Glowkit::new(self.config);
        let mut reader = Glowkit::open(&self.input_file)?;
        let image = match glowkit.detect_format(&mut reader)? {
            ImageFormat::Png => self.decode_png(&glowkit, &mut reader)?,
            ImageFormat::Tiff | ImageFormat::BigTiff => self.decode_tiff(&glowkit, &mut reader)?,
        };

        match image.save(&self.output_file) {
            Ok(_) => {
                info!("Image saved to {}", self.output_file);
                Ok(())
            }
            Err(e) => {
                error!("Failed to save image: {}", e);
                Err(DecodeError::Output(format!("Failed to save image: {}", e)))
            }
        }
    }
}

fn quantize(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}
