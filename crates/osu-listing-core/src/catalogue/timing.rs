//! Timing point lists

use std::io::Read;

use crate::config::DecodeOptions;
use crate::error::Result;
use crate::reader::ByteCursor;

use super::fields::{list_with_capacity, read_count};
use super::model::TimingPoint;

/// Read a count-prefixed list of timing points (17 bytes each, no framing)
pub fn read_timing_points<R: Read>(
    cursor: &mut ByteCursor<R>,
    options: &DecodeOptions,
) -> Result<Vec<TimingPoint>> {
    let count = read_count(cursor, "timing_points", options.max_list_len)?;
    let mut points = list_with_capacity(count);

    for _ in 0..count {
        let bpm = cursor.read_f64("timing_point.bpm")?;
        let offset = cursor.read_f64("timing_point.offset")?;
        let inherited = cursor.read_bool("timing_point.inherited")?;
        points.push(TimingPoint {
            bpm,
            offset,
            inherited,
        });
    }

    Ok(points)
}
