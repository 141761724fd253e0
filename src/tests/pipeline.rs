#[cfg(test)]
mod pipeline_tests {
    use std::io::Cursor;

    use crate::{
        chart, dump_histogram,
        histogram::{HISTOGRAM_FILE_NAME, HISTOGRAM_LENGTH, Histogram},
        intensity::IntensityMap,
        plot_records,
        prelude::PlotConfig,
        records::{self, Endian},
        tests::utils::*,
    };

    #[test]
    fn test_histogram_records_are_1024_bytes() {
        let map = IntensityMap::from_slice(2, 2, &[0, 0, 128, 255]);
        let mut bytes = Vec::new();
        Histogram::from_intensity(&map)
            .write_records(&mut bytes, Endian::Little)
            .unwrap();
        assert_eq!(bytes.len(), HISTOGRAM_LENGTH * 4);

        let values = records::read_records::<i32, _>(Cursor::new(bytes), Endian::Little).unwrap();
        assert_eq!(values.len(), HISTOGRAM_LENGTH);
        assert_eq!(values[0], 2);
        assert_eq!(values[128], 1);
        assert_eq!(values[255], 1);
        assert_eq!(values.iter().sum::<i32>(), 4);
    }

    #[test]
    fn test_dump_then_plot() {
        let dir = tempfile::tempdir().unwrap();
        let image_path = dir.path().join("ramp.png");
        let hist_path = dir.path().join(HISTOGRAM_FILE_NAME);
        let chart_path = chart::default_output(&hist_path);
        gen_gradient_image(256, 4).save(&image_path).unwrap();

        let histogram = dump_histogram(&image_path, &hist_path, Endian::Little).unwrap();
        assert_eq!(histogram.total(), 256 * 4);
        assert_eq!(std::fs::metadata(&hist_path).unwrap().len(), 1024);

        let plotted =
            plot_records::<i32, _, _>(&hist_path, &chart_path, Endian::Little, &PlotConfig::default())
                .unwrap();
        assert_eq!(plotted, HISTOGRAM_LENGTH);
        assert!(chart_path.exists());
    }

    #[test]
    fn test_plot_with_bad_output_leaves_input_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("chart.txt");
        // input does not exist: the output extension is checked first
        let err = plot_records::<i32, _, _>(
            dir.path().join("missing.bin"),
            &output,
            Endian::Little,
            &PlotConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            crate::error::PixplotError::UnsupportedChartFormat { .. }
        ));
    }
}
