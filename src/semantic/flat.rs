//! Flat inner-product index for exact search.

use std::cmp::Ordering;

use crate::error::{HybridRankError, Result};

/// Exact (brute force) inner-product index over L2-normalized vectors.
///
/// With unit-length vectors the inner product equals cosine similarity.
/// Search results come back best-first as `(score, original_index)` pairs,
/// where `original_index` is the insertion position of the vector.
#[derive(Debug, Clone)]
pub struct FlatInnerProductIndex {
    dimension: usize,
    vectors: Vec<Vec<f32>>,
}

impl FlatInnerProductIndex {
    /// Create a new empty index.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            vectors: Vec::new(),
        }
    }

    /// Number of stored vectors.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Add vectors, normalizing each to unit length.
    pub fn add(&mut self, vectors: Vec<Vec<f32>>) -> Result<()> {
        for mut vector in vectors {
            self.validate_dimension(&vector)?;
            normalize_l2(&mut vector);
            self.vectors.push(vector);
        }
        Ok(())
    }

    /// Search the `k` nearest vectors to `query`, best first.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<(f32, usize)>> {
        self.validate_dimension(query)?;

        let mut query = query.to_vec();
        normalize_l2(&mut query);

        let mut hits: Vec<(f32, usize)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(index, vector)| (inner_product(&query, vector), index))
            .collect();

        hits.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        hits.truncate(k);

        Ok(hits)
    }

    fn validate_dimension(&self, vector: &[f32]) -> Result<()> {
        if vector.len() != self.dimension {
            return Err(HybridRankError::embedding(format!(
                "Vector dimension mismatch: expected {}, got {}",
                self.dimension,
                vector.len()
            )));
        }
        Ok(())
    }
}

/// Normalize a vector to unit length; zero vectors are left unchanged.
pub fn normalize_l2(vector: &mut [f32]) {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for value in vector.iter_mut() {
            *value /= norm;
        }
    }
}

fn inner_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
