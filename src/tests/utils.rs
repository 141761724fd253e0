use image::{DynamicImage, Rgb, RgbImage};
use rand::Rng;

pub const TEST_IMAGE_SIZE: u32 = 300;

pub fn rand_color(rng: &mut rand::rngs::ThreadRng) -> u8 {
    rng.random::<u8>()
}

pub fn rand_rgb(rng: &mut rand::rngs::ThreadRng) -> Rgb<u8> {
    Rgb([rand_color(rng), rand_color(rng), rand_color(rng)])
}

pub fn gen_random_image(width: u32, height: u32) -> RgbImage {
    let mut rng = rand::rng();
    RgbImage::from_fn(width, height, |_, _| rand_rgb(&mut rng))
}

/// Horizontal ramp: column `x` has intensity `x % 256`.
pub fn gen_gradient_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, _| {
        let level = (x % 256) as u8;
        Rgb([level, level, level])
    }))
}
