use std::fmt;

use chrono::NaiveDateTime;
use log::warn;
use ndarray::{Array2, Axis};
use serde::Serialize;

use crate::correspondence::Correspondence;
use crate::delta::{self, DriftRate};
use crate::error::TrackingError;
use crate::frame::FrameRecord;
use crate::pairing::FramePair;

const RATE_HEADERS: [&str; 4] = ["dRA[''/s]", "dDEC[''/s]", "dX[p/s]", "dY[p/s]"];

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ReportRow {
    pub source_index: usize,
    #[serde(flatten)]
    pub rates: DriftRate,
}

/// Drift rates of one frame pair.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrackingReport {
    pub pair: FramePair,
    pub first_time: NaiveDateTime,
    pub last_time: NaiveDateTime,
    /// `last_time - first_time` for a forward pair, negated for a reversed one
    pub elapsed_seconds: f64,
    pub rows: Vec<ReportRow>,
    /// column means over `rows`, absent when there are no rows
    pub summary: Option<DriftRate>,
    /// frame without sources that left this report empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_frame: Option<usize>,
}

impl TrackingReport {
    /// Build the report of `pair` from the study's frames. Depends on nothing
    /// but its inputs, so pairs can be built in any order.
    ///
    /// A frame without sources gives an empty report rather than an error.
    pub fn build(
        frames: &[FrameRecord],
        pair: FramePair,
        correspondence: Correspondence,
    ) -> Result<TrackingReport, TrackingError> {
        let first = frame_at(frames, pair.first)?;
        let last = frame_at(frames, pair.last)?;
        let elapsed_seconds = delta::elapsed_seconds(first, last)?;

        let (rows, empty_frame) = match delta::drift_rates(first, last, correspondence) {
            Ok(rates) => {
                let rows = rates
                    .into_iter()
                    .map(|(source_index, rates)| ReportRow { source_index, rates })
                    .collect();
                (rows, None)
            }
            Err(TrackingError::InsufficientSources { frame_index }) => {
                warn!(
                    "Capture {} has no sources, nothing to compare between {} and {}",
                    frame_index, pair.first, pair.last
                );
                (vec![], Some(frame_index))
            }
            Err(err) => return Err(err),
        };

        let summary = summarize(&rows);
        Ok(TrackingReport {
            pair,
            first_time: first.capture_time,
            last_time: last.capture_time,
            elapsed_seconds,
            rows,
            summary,
            empty_frame,
        })
    }
}

fn frame_at(frames: &[FrameRecord], index: usize) -> Result<&FrameRecord, TrackingError> {
    frames.get(index).ok_or(TrackingError::FrameIndexOutOfRange {
        index,
        num_frames: frames.len(),
    })
}

/// Unweighted mean of every rate column. A NaN anywhere in a column makes
/// that column's mean NaN.
fn summarize(rows: &[ReportRow]) -> Option<DriftRate> {
    let values: Vec<f64> = rows.iter().flat_map(|row| row.rates.as_array()).collect();
    let table = Array2::from_shape_vec((rows.len(), 4), values).ok()?;
    let mean = table.mean_axis(Axis(0))?;
    Some(DriftRate::from_array([mean[0], mean[1], mean[2], mean[3]]))
}

#[derive(Clone, Copy)]
enum Align {
    Left,
    Right,
}

/// Plain text table: right aligned headers over a dashed rule.
fn write_table(
    f: &mut fmt::Formatter<'_>,
    headers: &[&str],
    align: &[Align],
    rows: &[Vec<String>],
) -> fmt::Result {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(c, h)| rows.iter().map(|r| r[c].len()).fold(h.len(), usize::max))
        .collect();

    let line = |cells: Vec<String>| -> String {
        cells
            .iter()
            .zip(widths.iter().zip(align))
            .map(|(cell, (&w, a))| match a {
                Align::Left => format!("{:<w$}", cell, w = w),
                Align::Right => format!("{:>w$}", cell, w = w),
            })
            .collect::<Vec<_>>()
            .join("  ")
    };

    writeln!(f, "{}", line(headers.iter().map(|h| h.to_string()).collect()))?;
    writeln!(f, "{}", line(widths.iter().map(|&w| "-".repeat(w)).collect()))?;
    for row in rows {
        writeln!(f, "{}", line(row.clone()))?;
    }
    Ok(())
}

fn rate_cells(rates: &DriftRate) -> impl Iterator<Item = String> {
    rates.as_array().into_iter().map(|v| format!("{:.6}", v))
}

impl fmt::Display for TrackingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let FramePair { first, last } = self.pair;
        writeln!(f)?;
        writeln!(
            f,
            "  Below are the differences between Capture {} and Capture {}",
            last, first
        )?;
        writeln!(f, "  Capture {}   {}", last, self.last_time)?;
        writeln!(f, "  Capture {}   {}", first, self.first_time)?;
        writeln!(
            f,
            "  The total time between the two dates is: {:.6}s",
            self.elapsed_seconds
        )?;
        writeln!(f)?;

        let headers: Vec<&str> = std::iter::once("Source ID").chain(RATE_HEADERS).collect();
        let rows: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| {
                std::iter::once(row.source_index.to_string())
                    .chain(rate_cells(&row.rates))
                    .collect()
            })
            .collect();
        write_table(f, &headers, &[Align::Right; 5], &rows)?;
        writeln!(f)?;

        if let Some(frame_index) = self.empty_frame {
            writeln!(f, "  Capture {} has no detected sources", frame_index)?;
        }
        if let Some(summary) = &self.summary {
            let headers: Vec<&str> = std::iter::once("         ").chain(RATE_HEADERS).collect();
            let row: Vec<String> = std::iter::once("Average".to_string())
                .chain(rate_cells(summary))
                .collect();
            let mut align = [Align::Right; 5];
            align[0] = Align::Left;
            write_table(f, &headers, &align, &[row])?;
        }
        Ok(())
    }
}

/// All reports as text tables, or as one pretty printed JSON array.
pub fn render(reports: &[TrackingReport], json: bool) -> serde_json::Result<String> {
    if json {
        return serde_json::to_string_pretty(reports);
    }
    Ok(reports.iter().map(|report| report.to_string()).collect())
}
