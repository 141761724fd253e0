use image::{DynamicImage, GrayImage, RgbImage};
use multiversion::multiversion;

pub type Shape2D = (usize, usize);

/// Gray-level view of an image: one `(R + G + B) / 3` byte per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntensityMap {
    width: u32,
    height: u32,
    buffer: Vec<u8>,
}

impl AsRef<[u8]> for IntensityMap {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.buffer
    }
}

impl IntensityMap {
    /// Build the map with the strategy picked by [IntensityTransform::auto].
    pub fn from_image(image: &DynamicImage) -> Self {
        let strategy = IntensityTransform::auto((image.width() as usize, image.height() as usize));
        Self::from_image_with(image, strategy)
    }

    pub fn from_image_with(image: &DynamicImage, strategy: IntensityTransform) -> Self {
        // alpha is dropped, 16-bit and float sources are narrowed first
        let rgb = image.to_rgb8();
        strategy.apply(&rgb)
    }

    pub fn from_slice(width: u32, height: u32, slice: &[u8]) -> Self {
        assert_eq!(
            slice.len(),
            width as usize * height as usize,
            "buffers don't match sizes"
        );
        Self {
            width,
            height,
            buffer: slice.to_owned(),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn shape(&self) -> Shape2D {
        (self.width as usize, self.height as usize)
    }

    /// Two-level copy: 255 above `threshold`, 0 at or below it.
    pub fn binarize(&self, threshold: u8) -> Self {
        Self {
            width: self.width,
            height: self.height,
            buffer: self
                .buffer
                .iter()
                .map(|&level| if level > threshold { 255 } else { 0 })
                .collect(),
        }
    }

    pub fn into_gray_image(self) -> GrayImage {
        GrayImage::from_raw(self.width, self.height, self.buffer)
            .expect("intensity buffer matches its own shape")
    }
}

impl From<IntensityMap> for DynamicImage {
    fn from(value: IntensityMap) -> Self {
        DynamicImage::ImageLuma8(value.into_gray_image())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntensityTransform {
    Seq,
    Par,
}

impl IntensityTransform {
    pub fn auto(shape_hint: Shape2D) -> Self {
        let (width, height) = shape_hint;
        let count = width * height;

        if width < 450 || count < 202500 {
            return IntensityTransform::Seq;
        }
        IntensityTransform::Par
    }

    pub fn apply(&self, image: &RgbImage) -> IntensityMap {
        let (width, height) = image.dimensions();
        let mut buffer = vec![0u8; width as usize * height as usize];
        match self {
            IntensityTransform::Seq => scalar_impl(image.as_raw(), &mut buffer),
            IntensityTransform::Par => {
                scalar_par_impl(image.as_raw(), &mut buffer, width as usize)
            }
        }
        IntensityMap {
            width,
            height,
            buffer,
        }
    }
}

#[inline(always)]
fn intensity(pixel: &[u8]) -> u8 {
    ((pixel[0] as u16 + pixel[1] as u16 + pixel[2] as u16) / 3) as u8
}

#[multiversion(targets("x86_64+avx512f", "x86_64+avx2", "x86_64+sse2"))]
fn scalar_impl(in_buf: &[u8], out_buf: &mut [u8]) {
    in_buf
        .chunks_exact(3)
        .zip(out_buf.iter_mut())
        .for_each(|(pixel, out)| *out = intensity(pixel));
}

#[multiversion(targets("x86_64+avx512f", "x86_64+avx2", "x86_64+sse2"))]
fn scalar_par_impl(in_buf: &[u8], out_buf: &mut [u8], width: usize) {
    use rayon::prelude::*;

    if width == 0 {
        return;
    }
    out_buf
        .par_chunks_exact_mut(width)
        .zip(in_buf.par_chunks_exact(width * 3))
        .for_each(|(out_row, in_row)| {
            out_row
                .iter_mut()
                .zip(in_row.chunks_exact(3))
                .for_each(|(out, pixel)| *out = intensity(pixel));
        });
}
