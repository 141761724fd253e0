use std::{path::Path, process::Command};

use image::{DynamicImage, Rgb, RgbImage};

fn write_sample_png(path: &Path) {
    DynamicImage::ImageRgb8(RgbImage::from_fn(16, 9, |x, y| {
        Rgb([(x * 16) as u8, (y * 28) as u8, 77])
    }))
    .save(path)
    .unwrap();
}

fn write_records(path: &Path, values: &[i32]) {
    let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
    std::fs::write(path, bytes).unwrap();
}

#[test]
fn convert_writes_decodable_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.tiff");
    write_sample_png(&input);

    let status = Command::new(env!("CARGO_BIN_EXE_convert"))
        .arg(&input)
        .arg(&output)
        .status()
        .unwrap();
    assert!(status.success());

    let reader = image::ImageReader::open(&output)
        .unwrap()
        .with_guessed_format()
        .unwrap();
    assert_eq!(reader.format(), Some(image::ImageFormat::Tiff));
    assert_eq!(reader.decode().unwrap().width(), 16);
}

#[test]
fn convert_with_wrong_argument_count_creates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    write_sample_png(&input);

    let output = Command::new(env!("CARGO_BIN_EXE_convert"))
        .arg(&input)
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));

    let extra = dir.path().join("extra.png");
    let status = Command::new(env!("CARGO_BIN_EXE_convert"))
        .arg(&input)
        .arg(dir.path().join("out.png"))
        .arg(&extra)
        .status()
        .unwrap();
    assert!(!status.success());

    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1, "only the input should exist");
}

#[test]
fn convert_reports_failure_on_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.png");
    let status = Command::new(env!("CARGO_BIN_EXE_convert"))
        .arg(dir.path().join("missing.png"))
        .arg(&output)
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(1));
    assert!(!output.exists());
}

#[test]
fn plot_writes_svg_next_to_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("hist.txt");
    write_records(&input, &[1, 5, 3, 9]);

    let status = Command::new(env!("CARGO_BIN_EXE_plot"))
        .arg(&input)
        .status()
        .unwrap();
    assert!(status.success());

    let svg = std::fs::read_to_string(dir.path().join("hist.svg")).unwrap();
    assert!(svg.contains("Color In Grayscale"));
}

#[test]
fn plot_to_png_never_panics() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("r.bin");
    let chart = dir.path().join("r.png");
    write_records(&input, &[1, 5, 3, 9]);

    let output = Command::new(env!("CARGO_BIN_EXE_plot"))
        .arg(&input)
        .arg("-o")
        .arg(&chart)
        .output()
        .unwrap();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("panicked"), "{}", stderr);
    match output.status.code() {
        Some(0) => {
            let image = image::open(&chart).unwrap();
            assert_eq!((image.width(), image.height()), (1024, 768));
        }
        Some(1) => assert!(!chart.exists()),
        code => panic!("unexpected exit {:?}: {}", code, stderr),
    }
}

#[test]
fn convert_binary_writes_black_and_white() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("bw.gif");
    write_sample_png(&input);

    let status = Command::new(env!("CARGO_BIN_EXE_convert"))
        .arg(&input)
        .arg(&output)
        .arg("--binary")
        .status()
        .unwrap();
    assert!(status.success());

    let decoded = image::open(&output).unwrap().to_luma8();
    assert_eq!(decoded.dimensions(), (16, 9));
    assert!(decoded.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
}

#[test]
fn plot_without_arguments_opens_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_plot"))
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn plot_with_two_inputs_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("a.bin");
    write_records(&first, &[1, 2]);

    let status = Command::new(env!("CARGO_BIN_EXE_plot"))
        .arg(&first)
        .arg(dir.path().join("b.bin"))
        .status()
        .unwrap();
    assert!(!status.success());
    assert!(!dir.path().join("a.svg").exists());
}

#[test]
fn histogram_then_plot_as_bars() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("in.png");
    let records = dir.path().join("levels.bin");
    let chart = dir.path().join("levels.svg");
    write_sample_png(&image);

    let status = Command::new(env!("CARGO_BIN_EXE_histogram"))
        .arg(&image)
        .arg("--output")
        .arg(&records)
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(std::fs::metadata(&records).unwrap().len(), 1024);

    let status = Command::new(env!("CARGO_BIN_EXE_plot"))
        .arg(&records)
        .arg("--bars")
        .arg("-o")
        .arg(&chart)
        .status()
        .unwrap();
    assert!(status.success());
    assert!(chart.exists());
}
