use std::path::{Path, PathBuf};

use itertools::{Itertools, MinMaxResult};
use num_traits::ToPrimitive;
use plotters::{coord::Shift, prelude::*};

use crate::{
    config::{ChartStyle, PlotConfig},
    error::{PixplotError, Result},
};

/// File backend picked from the output extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartBackend {
    Svg,
    Png,
}

impl ChartBackend {
    /// Backend for `path`, refusing any this build cannot draw text with.
    ///
    /// Without the `ttf` feature plotters has no font for bitmap output, so
    /// `.png` is rejected up front.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        let unsupported = |reason: &'static str| PixplotError::UnsupportedChartFormat {
            path: path.to_path_buf(),
            reason,
        };
        match extension.as_deref() {
            Some("svg") => Ok(ChartBackend::Svg),
            #[cfg(feature = "ttf")]
            Some("png") => Ok(ChartBackend::Png),
            #[cfg(not(feature = "ttf"))]
            Some("png") => Err(unsupported(
                "PNG charts need the `ttf` feature, write .svg instead",
            )),
            _ => Err(unsupported("expected a .svg or .png extension")),
        }
    }
}

/// Where a chart of `input` goes when no output is given: next to it, as svg.
pub fn default_output<P: AsRef<Path>>(input: P) -> PathBuf {
    let input = input.as_ref();
    match input.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("svg") => input.with_extension("plot.svg"),
        _ => input.with_extension("svg"),
    }
}

/// Draw `values` against their index and write the chart to `output`.
pub fn render<T, P>(values: &[T], config: &PlotConfig, output: P) -> Result
where
    T: ToPrimitive,
    P: AsRef<Path>,
{
    let output = output.as_ref();
    let backend = ChartBackend::from_path(output)?;
    let points = values
        .iter()
        .map(|value| value.to_f64().unwrap_or(f64::NAN))
        .collect_vec();
    let size = (config.width, config.height);

    let drawn = match backend {
        ChartBackend::Svg => draw(SVGBackend::new(output, size).into_drawing_area(), &points, config),
        ChartBackend::Png => {
            draw(BitMapBackend::new(output, size).into_drawing_area(), &points, config)
        }
    };
    if let Err(err) = drawn {
        // backends flush on drop, don't leave a half drawn chart behind
        if output.exists() {
            if let Err(rm) = std::fs::remove_file(output) {
                log::warn!("could not remove '{}': {}", output.display(), rm);
            }
        }
        return Err(err);
    }
    log::info!(
        "plotted {} value(s) to '{}'",
        points.len(),
        output.display()
    );
    Ok(())
}

/// Value axis range, always including zero and never empty.
pub fn value_range(values: &[f64]) -> std::ops::Range<f64> {
    let (min, max) = match values.iter().copied().filter(|v| v.is_finite()).minmax() {
        MinMaxResult::NoElements => (0.0, 1.0),
        MinMaxResult::OneElement(v) => (v, v),
        MinMaxResult::MinMax(min, max) => (min, max),
    };
    let (min, max) = (min.min(0.0), max.max(0.0));
    if min == max {
        return min..min + 1.0;
    }
    let pad = (max - min) * 0.05;
    let low = if min < 0.0 { min - pad } else { min };
    low..max + pad
}

fn draw<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    values: &[f64],
    config: &PlotConfig,
) -> Result {
    root.fill(&WHITE)?;

    let mut builder = ChartBuilder::on(&root);
    builder
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60);
    if let Some(caption) = &config.caption {
        builder.caption(caption, ("sans-serif", 20));
    }
    let y_range = value_range(values);

    match config.style {
        ChartStyle::Line => {
            let x_max = values.len().saturating_sub(1).max(1) as f64;
            let mut chart = builder
                .build_cartesian_2d(0f64..x_max, y_range)
                .map_err(PixplotError::from)?;
            chart
                .configure_mesh()
                .x_desc(config.x_label.as_str())
                .y_desc(config.y_label.as_str())
                .draw()?;
            chart.draw_series(LineSeries::new(
                values
                    .iter()
                    .enumerate()
                    .filter(|(_, v)| v.is_finite())
                    .map(|(idx, v)| (idx as f64, *v)),
                config.color.stroke_width(2),
            ))?;
        }
        ChartStyle::Bars => {
            let x_max = values.len().max(1) as u32;
            let mut chart = builder
                .build_cartesian_2d((0u32..x_max).into_segmented(), y_range)
                .map_err(PixplotError::from)?;
            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_desc(config.x_label.as_str())
                .y_desc(config.y_label.as_str())
                .draw()?;
            chart.draw_series(
                Histogram::vertical(&chart)
                    .style(config.color.filled())
                    .margin(0)
                    .data(
                        values
                            .iter()
                            .enumerate()
                            .filter(|(_, v)| v.is_finite())
                            .map(|(idx, v)| (idx as u32, *v)),
                    ),
            )?;
        }
    }

    root.present()?;
    Ok(())
}
