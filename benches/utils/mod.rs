#![allow(dead_code)]

use image::{Rgb, RgbImage};
use rand::Rng;

pub fn gen_random_image(size: u32) -> RgbImage {
    let mut rng = rand::rng();
    RgbImage::from_fn(size, size, |_, _| Rgb([rng.random(), rng.random(), rng.random()]))
}

pub fn gen_random_records(count: usize) -> Vec<u8> {
    let mut rng = rand::rng();
    (0..count)
        .flat_map(|_| rng.random::<i32>().to_le_bytes())
        .collect()
}
