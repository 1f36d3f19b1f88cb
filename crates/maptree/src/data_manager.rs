use crate::error::MapTreeError;
use crate::fixed_bitset::FixedBitset;

/// Precomputed feature and label membership masks.
///
/// For every feature `f` and value `v`, `feature_mask(f, v)` has bit `i` set
/// iff sample `i` has feature `f` equal to `v`; likewise `label_mask(v)` for
/// labels. Searchers intersect subproblem bitsets against these masks to
/// descend into sub-subproblems.
#[derive(Debug)]
pub struct DataManager {
    num_features: usize,
    num_samples: usize,
    feature_masks: Vec<FixedBitset>,
    label_masks: Vec<FixedBitset>,
}

impl DataManager {
    pub fn new(features: &[Vec<bool>], labels: &[bool]) -> Result<Self, MapTreeError> {
        if features.is_empty() {
            return Err(MapTreeError::InvalidInput(
                "dataset contains no samples".to_string(),
            ));
        }
        let num_samples = features.len();
        let num_features = features[0].len();
        if num_features == 0 {
            return Err(MapTreeError::InvalidInput(
                "dataset contains no features".to_string(),
            ));
        }
        for (i, row) in features.iter().enumerate() {
            if row.len() != num_features {
                return Err(MapTreeError::InvalidInput(format!(
                    "row {} has {} features, expected {}",
                    i,
                    row.len(),
                    num_features
                )));
            }
        }
        if labels.len() != num_samples {
            return Err(MapTreeError::InvalidInput(format!(
                "{} labels for {} samples",
                labels.len(),
                num_samples
            )));
        }

        let mut dm = Self {
            num_features,
            num_samples,
            feature_masks: vec![FixedBitset::new(num_samples); num_features * 2],
            label_masks: vec![FixedBitset::new(num_samples); 2],
        };
        dm.build_feature_masks(features);
        dm.build_label_masks(labels);
        Ok(dm)
    }

    pub fn num_features(&self) -> usize {
        self.num_features
    }

    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    pub fn feature_mask(&self, feature: usize, value: bool) -> &FixedBitset {
        &self.feature_masks[feature * 2 + usize::from(value)]
    }

    pub fn label_mask(&self, value: bool) -> &FixedBitset {
        &self.label_masks[usize::from(value)]
    }

    fn build_feature_masks(&mut self, features: &[Vec<bool>]) {
        let mut values = vec![false; self.num_samples];
        for f in 0..self.num_features {
            for (i, row) in features.iter().enumerate() {
                values[i] = row[f];
            }
            self.feature_masks[f * 2 + 1].set_bits(&values);
            for v in values.iter_mut() {
                *v = !*v;
            }
            self.feature_masks[f * 2].set_bits(&values);
        }
    }

    fn build_label_masks(&mut self, labels: &[bool]) {
        let mut values = labels.to_vec();
        self.label_masks[1].set_bits(&values);
        for v in values.iter_mut() {
            *v = !*v;
        }
        self.label_masks[0].set_bits(&values);
    }
}
