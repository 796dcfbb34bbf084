//! Test-set sampling
//!
//! Backs the random-prediction endpoint: pick a random CSV from the test
//! data directory, pick a random row, split the `label` column off as
//! ground truth. Sampling is unseeded and non-deterministic by design.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;

use crate::error::{ApiError, ApiResult};
use crate::model::Label;

/// One labelled row drawn from the test set
#[derive(Debug, Clone)]
pub struct TestSample {
    pub features: Vec<f32>,
    pub label: Label,
}

/// Draw one row uniformly at random from a random file in `dir`.
pub fn sample_random(dir: &Path) -> ApiResult<TestSample> {
    let files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|res| res.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();

    let file = files
        .choose(&mut rand::thread_rng())
        .ok_or_else(|| ApiError::Dataset(format!("No test files in {}", dir.display())))?;

    let (header, rows) = read_csv(file)?;

    let label_idx = header
        .iter()
        .position(|col| col == "label")
        .ok_or_else(|| ApiError::Dataset(format!("{}: no 'label' column", file.display())))?;

    let row = rows
        .choose(&mut rand::thread_rng())
        .ok_or_else(|| ApiError::Dataset(format!("{}: no data rows", file.display())))?;

    let label = Label::from_value(row[label_idx]);
    let features = row
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != label_idx)
        .map(|(_, v)| *v)
        .collect();

    Ok(TestSample { features, label })
}

/// Parse a headered CSV of numeric columns.
fn read_csv(path: &Path) -> ApiResult<(Vec<String>, Vec<Vec<f32>>)> {
    let reader = BufReader::new(File::open(path)?);
    let mut lines = reader.lines();

    let header_line = lines
        .next()
        .ok_or_else(|| ApiError::Dataset(format!("{}: empty file", path.display())))??;
    let header: Vec<String> = header_line
        .split(',')
        .map(|col| col.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (line_no, line) in lines.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let row = line
            .split(',')
            .map(|cell| {
                cell.trim().parse::<f32>().map_err(|_| {
                    ApiError::Dataset(format!(
                        "{}: non-numeric value {:?} on line {}",
                        path.display(),
                        cell.trim(),
                        line_no + 2
                    ))
                })
            })
            .collect::<Result<Vec<f32>, ApiError>>()?;

        if row.len() != header.len() {
            return Err(ApiError::Dataset(format!(
                "{}: line {} has {} columns, expected {}",
                path.display(),
                line_no + 2,
                row.len(),
                header.len()
            )));
        }

        rows.push(row);
    }

    Ok((header, rows))
}
