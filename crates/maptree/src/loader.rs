use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::MapTreeError;

/// Loads a binary dataset from a whitespace-delimited 0/1 text file.
///
/// Every retained line is one sample: the first value is the label, the rest
/// are features. Lines with fewer than two values are skipped. Returns the
/// feature matrix and label vector, ready for
/// [`crate::data_manager::DataManager::new`].
pub fn load_binary_file(path: &Path) -> Result<(Vec<Vec<bool>>, Vec<bool>), MapTreeError> {
    let file = File::open(path).map_err(|source| MapTreeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let mut features = Vec::new();
    let mut labels = Vec::new();
    let mut last_width = 0;
    for (line_idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| MapTreeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let sample: Vec<bool> = line
            .chars()
            .filter_map(|c| match c {
                '0' => Some(false),
                '1' => Some(true),
                _ => None,
            })
            .collect();
        if sample.len() < 2 {
            continue;
        }
        if last_width != 0 && sample.len() != last_width {
            return Err(MapTreeError::InvalidInput(format!(
                "inconsistent sample size on line {} of {}",
                line_idx + 1,
                path.display()
            )));
        }
        labels.push(sample[0]);
        features.push(sample[1..].to_vec());
        last_width = sample.len();
    }

    Ok((features, labels))
}
