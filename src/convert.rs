use image::{ColorType, DynamicImage, ImageFormat, ImageReader};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use crate::{
    error::{PixplotError, Result},
    histogram::Histogram,
    intensity::IntensityMap,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertOptions {
    /// Replace the image with its `(R + G + B) / 3` gray levels before encoding
    pub grayscale: bool,
    /// Replace the image with black and white pixels split at the k-means
    /// threshold of its gray levels. Takes precedence over `grayscale`.
    pub binary: bool,
}

/// Format implied by the extension of `path`, if the codec can write it.
pub fn output_format<P: AsRef<Path>>(path: P) -> Result<ImageFormat> {
    let path = path.as_ref();
    match ImageFormat::from_path(path) {
        Ok(format) if format.writing_enabled() => Ok(format),
        _ => Err(PixplotError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Decode an image, detecting its format from the file contents.
pub fn read_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    Ok(image)
}

/// Encode `image` as `format` into a new file at `path`.
///
/// A partially written file is removed when encoding fails.
pub fn write_image<P: AsRef<Path>>(
    image: &DynamicImage,
    path: P,
    format: ImageFormat,
) -> Result {
    let path = path.as_ref();
    let mut file = BufWriter::new(File::create(path)?);
    let written = image
        .write_to(&mut file, format)
        .map_err(PixplotError::encode)
        .and_then(|_| file.flush().map_err(PixplotError::from));
    if written.is_err() {
        drop(file);
        if let Err(e) = std::fs::remove_file(path) {
            log::warn!("could not remove partial '{}': {}", path.display(), e);
        }
    }
    written
}

/// Re-encode the image at `input` into the format named by the extension of
/// `output`.
///
/// The output format is resolved first: an unwritable extension fails
/// without opening the input or creating the output.
pub fn convert<I: AsRef<Path>, O: AsRef<Path>>(
    input: I,
    output: O,
    options: &ConvertOptions,
) -> Result<ImageFormat> {
    let (input, output) = (input.as_ref(), output.as_ref());
    let format = output_format(output)?;

    log::info!("converting '{}' to '{}'", input.display(), output.display());
    let mut image = read_image(input)?;
    log::debug!(
        "decoded {}x{} {:?}",
        image.width(),
        image.height(),
        image.color()
    );

    if options.binary {
        let map = IntensityMap::from_image(&image);
        let threshold = Histogram::from_intensity(&map)
            .kmeans_threshold()
            .unwrap_or(u8::MAX);
        log::debug!("binary threshold at level {}", threshold);
        image = map.binarize(threshold).into();
    } else if options.grayscale {
        image = IntensityMap::from_image(&image).into();
    }
    let image = fit_color_type(image, format);

    write_image(&image, output, format)?;
    log::info!("'{}' written as {:?}", output.display(), format);
    Ok(format)
}

/// Narrow or widen the pixel layout to one the target encoder accepts.
pub fn fit_color_type(image: DynamicImage, format: ImageFormat) -> DynamicImage {
    let color = image.color();
    match format {
        ImageFormat::Jpeg => match color {
            ColorType::L8 | ColorType::Rgb8 => image,
            ColorType::L16 | ColorType::La8 | ColorType::La16 => {
                DynamicImage::ImageLuma8(image.to_luma8())
            }
            _ => DynamicImage::ImageRgb8(image.to_rgb8()),
        },
        ImageFormat::OpenExr => match color {
            ColorType::Rgb32F | ColorType::Rgba32F => image,
            _ => DynamicImage::ImageRgba32F(image.to_rgba32f()),
        },
        ImageFormat::Hdr => match color {
            ColorType::Rgb32F => image,
            _ => DynamicImage::ImageRgb32F(image.to_rgb32f()),
        },
        ImageFormat::Farbfeld => match color {
            ColorType::Rgba16 => image,
            _ => DynamicImage::ImageRgba16(image.to_rgba16()),
        },
        ImageFormat::Gif | ImageFormat::Qoi => match color {
            ColorType::Rgb8 | ColorType::Rgba8 => image,
            _ if color.has_alpha() => DynamicImage::ImageRgba8(image.to_rgba8()),
            _ => DynamicImage::ImageRgb8(image.to_rgb8()),
        },
        ImageFormat::Tiff => match color {
            ColorType::La8 => DynamicImage::ImageRgba8(image.to_rgba8()),
            ColorType::La16 => DynamicImage::ImageRgba16(image.to_rgba16()),
            _ => image,
        },
        ImageFormat::Png | ImageFormat::Pnm => match color {
            ColorType::Rgb32F | ColorType::Rgba32F => DynamicImage::ImageRgba16(image.to_rgba16()),
            _ => image,
        },
        _ => match color {
            ColorType::L8 | ColorType::La8 | ColorType::Rgb8 | ColorType::Rgba8 => image,
            _ => DynamicImage::ImageRgba8(image.to_rgba8()),
        },
    }
}
