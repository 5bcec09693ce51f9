use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};

use log::{debug, info};

use crate::config::DecoderConfig;
use crate::errors::{DecodeError, DecodeResult};
use crate::extractor::{select_decoder, Region, StripReader};
use crate::io::seekable::SeekableReader;
use crate::png::{Chunk, PngFile, PngReader, PNG_MAGIC};
use crate::sink::{LinearImage, PixelSink, SrgbImage};
use crate::tiff::constants::header::{BIG_TIFF_VERSION, TIFF_VERSION};
use crate::tiff::{BaselineHeader, TiffReader, TIFF};

/// Container formats recognized by [`Glowkit::detect_format`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Tiff,
    BigTiff,
}

/// Main interface to the glowkit library
///
/// Every call reads from the start of the given reader and owns the
/// reader's cursor until it returns.
#[derive(Debug, Clone, Copy, Default)]
pub struct Glowkit {
    config: DecoderConfig,
}

impl Glowkit {
    pub fn new(config: DecoderConfig) -> Self {
        Glowkit { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Opens a file as a buffered random-access reader
    pub fn open(path: &str) -> DecodeResult<BufReader<File>> {
        Ok(BufReader::new(File::open(path)?))
    }

    /// Identifies the container from its leading bytes
    pub fn detect_format(&self, reader: &mut dyn SeekableReader) -> DecodeResult<ImageFormat> {
        reader.seek(SeekFrom::Start(0))?;
        let mut signature = Vec::with_capacity(PNG_MAGIC.len());
        (&mut *reader).take(PNG_MAGIC.len() as u64).read_to_end(&mut signature)?;
        reader.seek(SeekFrom::Start(0))?;

        if signature == PNG_MAGIC {
            return Ok(ImageFormat::Png);
        }
        if signature.len() >= 4 {
            let version = match &signature[0..2] {
                b"II" => Some(u16::from_le_bytes([signature[2], signature[3]])),
                b"MM" => Some(u16::from_be_bytes([signature[2], signature[3]])),
                _ => None,
            };
            match version {
                Some(TIFF_VERSION) => return Ok(ImageFormat::Tiff),
                Some(BIG_TIFF_VERSION) => return Ok(ImageFormat::BigTiff),
                _ => {}
            }
        }
        Err(DecodeError::Format("Unrecognized file signature".to_string()))
    }

    /// Reads the chunk list of a PNG stream without decoding pixels
    pub fn load_png_chunks(&self, reader: &mut dyn SeekableReader) -> DecodeResult<PngFile> {
        PngReader::new(self.config).read_chunks(reader)
    }

    /// Decodes a PNG stream into a new sRGB image
    pub fn decode_png(&self, reader: &mut dyn SeekableReader) -> DecodeResult<SrgbImage> {
        PngReader::new(self.config).decode(reader)
    }

    /// Decodes a PNG stream into a caller-provided sink
    pub fn decode_png_into(&self, reader: &mut dyn SeekableReader, sink: &mut dyn PixelSink) -> DecodeResult<()> {
        self.load_png_chunks(reader)?.decode_into(sink)
    }

    /// Reads a TIFF's directories and the baseline header of its first one
    pub fn read_tiff(&self, reader: &mut dyn SeekableReader) -> DecodeResult<(TIFF, BaselineHeader)> {
        let mut tiff_reader = TiffReader::new(self.config);
        let tiff = tiff_reader.read(reader)?;
        let ifd = tiff.main_ifd().ok_or(DecodeError::MissingHeader("IFD"))?;
        let header = BaselineHeader::from_ifd(&tiff_reader, reader, ifd)?;
        Ok((tiff, header))
    }

    /// Image size of a TIFF without decoding any pixels
    pub fn tiff_dimensions(&self, reader: &mut dyn SeekableReader) -> DecodeResult<(u32, u32)> {
        let (_, header) = self.read_tiff(reader)?;
        Ok((header.width, header.height))
    }

    /// Decodes a whole TIFF into a new linear image
    pub fn decode_tiff(&self, reader: &mut dyn SeekableReader) -> DecodeResult<LinearImage> {
        let (tiff, header) = self.read_tiff(reader)?;
        self.config.check_dimensions(header.width as u64, header.height as u64)?;
        let mut image = LinearImage::new(header.width, header.height);
        StripReader::new(&header, reader, tiff.byte_order)?.decode_into(&mut image)?;
        info!("Decoded TIFF {}x{}", header.width, header.height);
        Ok(image)
    }

    /// Decodes a whole TIFF into a caller-provided sink
    pub fn decode_tiff_into(&self, reader: &mut dyn SeekableReader, sink: &mut dyn PixelSink) -> DecodeResult<()> {
        let (tiff, header) = self.read_tiff(reader)?;
        StripReader::new(&header, reader, tiff.byte_order)?.decode_into(sink)
    }

    /// Decodes `region` of a TIFF into `sink`, with the region's top-left
    /// corner landing at the sink's origin
    pub fn decode_tiff_region(
        &self,
        reader: &mut dyn SeekableReader,
        region: Region,
        sink: &mut dyn PixelSink,
    ) -> DecodeResult<()> {
        self.decode_tiff_region_with(reader, region, sink, |_| {})
    }

    /// Like [`Glowkit::decode_tiff_region`], calling `on_row` after each row
    pub fn decode_tiff_region_with<F>(
        &self,
        reader: &mut dyn SeekableReader,
        region: Region,
        sink: &mut dyn PixelSink,
        on_row: F,
    ) -> DecodeResult<()>
    where
        F: FnMut(u32),
    {
        let (tiff, header) = self.read_tiff(reader)?;
        StripReader::new(&header, reader, tiff.byte_order)?.decode_region_with(region, sink, on_row)
    }

    /// Produces a human-readable description of a PNG or TIFF file
    pub fn analyze(&self, reader: &mut dyn SeekableReader) -> DecodeResult<String> {
        let format = self.detect_format(reader)?;
        debug!("Detected {:?}", format);
        match format {
            ImageFormat::Png => self.analyze_png(reader),
            ImageFormat::Tiff | ImageFormat::BigTiff => self.analyze_tiff(reader),
        }
    }

    fn analyze_png(&self, reader: &mut dyn SeekableReader) -> DecodeResult<String> {
        let file = self.load_png_chunks(reader)?;
        let mut result = String::from("PNG Analysis Results:\n");

        match file.header() {
            Ok(header) => {
                let _ = writeln!(result, "  Header: {}", header);
                let support = match header.check_supported() {
                    Ok(()) => "supported".to_string(),
                    Err(e) => e.to_string(),
                };
                let _ = writeln!(result, "  Decoding: {}", support);
            }
            Err(e) => {
                let _ = writeln!(result, "  Header: {}", e);
            }
        }
        if let Some(gamma) = file.gamma() {
            let _ = writeln!(result, "  Gamma: {:.4} (stored {})", gamma.gamma(), gamma.value);
        }
        if let Some(palette) = file.palette() {
            let _ = writeln!(result, "  Palette entries: {}", palette.len());
        }
        for entry in file.text_entries() {
            let _ = writeln!(result, "  Text: {} = {}", entry.keyword, entry.text);
        }

        let _ = writeln!(result, "\nChunks ({}):", file.chunks().len());
        for chunk in file.chunks() {
            let kind = if chunk.chunk_type().is_critical() { "critical" } else { "ancillary" };
            match chunk {
                Chunk::Raw { chunk_type, data, reason } => {
                    let _ = writeln!(result, "  {} [{}] ({} bytes, raw: {:?})", chunk_type, kind, data.len(), reason);
                }
                Chunk::ImageData(data) => {
                    let _ = writeln!(result, "  IDAT [{}] ({} bytes)", kind, data.len());
                }
                other => {
                    let _ = writeln!(result, "  {} [{}]", other.chunk_type(), kind);
                }
            }
        }

        Ok(result)
    }

    fn analyze_tiff(&self, reader: &mut dyn SeekableReader) -> DecodeResult<String> {
        let (tiff, header) = self.read_tiff(reader)?;
        let mut result = String::from("TIFF Analysis Results:\n");
        let _ = write!(result, "{}", tiff);
        let _ = writeln!(result, "\nBaseline header: {}", header);

        let support = if header.planar_configuration != 1 {
            "planar configuration not supported".to_string()
        } else {
            match select_decoder(&header) {
                Ok(_) => "supported".to_string(),
                Err(e) => e.to_string(),
            }
        };
        let _ = writeln!(result, "Decoding: {}", support);

        Ok(result)
    }
}
