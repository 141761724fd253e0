//! Small image and chart utilities.
//!
//! - [convert] re-encodes an image into the format named by the output path.
//! - [histogram] counts gray levels of an image and stores them as
//!   [records], fixed-width integers.
//! - [chart] renders a record sequence as a line or bar chart.

pub mod chart;
pub mod config;
pub mod convert;
pub mod error;
pub mod histogram;
pub mod intensity;
pub mod records;

#[cfg(test)]
mod tests;

use std::path::Path;

use crate::{
    config::PlotConfig,
    histogram::Histogram,
    intensity::IntensityMap,
    records::{Endian, Record},
};

pub mod prelude {
    pub use crate::{
        config::{ChartStyle, PlotConfig},
        convert::{ConvertOptions, convert},
        error::{PixplotError, Result},
        histogram::{HISTOGRAM_FILE_NAME, Histogram, HistogramStrategy},
        intensity::{IntensityMap, IntensityTransform},
        records::{Endian, Record},
    };
}

/// Read a record file and chart it.
///
/// Returns the number of records plotted.
pub fn plot_records<T, I, O>(
    input: I,
    output: O,
    endian: Endian,
    config: &PlotConfig,
) -> error::Result<usize>
where
    T: Record + num_traits::ToPrimitive,
    I: AsRef<Path>,
    O: AsRef<Path>,
{
    // fail on a bad output extension before touching the input
    chart::ChartBackend::from_path(output.as_ref())?;
    let values = records::read_records_from_path::<T, _>(input, endian)?;
    chart::render(&values, config, output)?;
    Ok(values.len())
}

/// Gray-level histogram of the image at `input`, written as `i32` records.
pub fn dump_histogram<I, O>(input: I, output: O, endian: Endian) -> error::Result<Histogram>
where
    I: AsRef<Path>,
    O: AsRef<Path>,
{
    let image = convert::read_image(input.as_ref())?;
    let histogram = Histogram::from_intensity(&IntensityMap::from_image(&image));
    histogram.write_records_to_path(output.as_ref(), endian)?;
    log::info!(
        "histogram of {} pixel(s) written to '{}'",
        histogram.total(),
        output.as_ref().display()
    );
    Ok(histogram)
}
