use crate::{error::IndexOutOfRange, services::catalog::CatalogStore};

/// Precomputed pairwise cosine similarity over the catalog's feature vectors
///
/// Stored as a dense, row-major N×N matrix. Immutable once built.
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    len: usize,
    scores: Vec<f32>,
}

/// Cosine similarity of two equal-length vectors
///
/// Returns 0 when either vector has zero norm. Raw cosine is undefined there;
/// treating such items as unrelated keeps every score finite.
///
/// Accumulates in f64: squares of any finite f32 neither overflow nor
/// underflow there, so the result is finite for every valid catalog.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0_f64;
    let mut sq_a = 0.0_f64;
    let mut sq_b = 0.0_f64;

    for (&x, &y) in a.iter().zip(b.iter()) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        sq_a += x * x;
        sq_b += y * y;
    }

    if sq_a == 0.0 || sq_b == 0.0 {
        return 0.0;
    }

    let sim = (dot / (sq_a.sqrt() * sq_b.sqrt())).clamp(-1.0, 1.0) as f32;
    // Fold -0.0 into 0.0 so equal scores compare equal under total_cmp
    sim + 0.0
}

impl SimilarityIndex {
    /// Computes the full similarity matrix for the catalog
    pub fn build(catalog: &CatalogStore) -> Self {
        let items = catalog.items();
        let len = items.len();
        let mut scores = vec![0.0; len * len];

        for i in 0..len {
            scores[i * len + i] = 1.0;
            for j in (i + 1)..len {
                let sim = cosine_similarity(&items[i].features, &items[j].features);
                scores[i * len + j] = sim;
                scores[j * len + i] = sim;
            }
        }

        tracing::debug!(items = len, "Similarity matrix computed");

        Self { len, scores }
    }

    fn check(&self, index: usize) -> Result<(), IndexOutOfRange> {
        if index < self.len {
            Ok(())
        } else {
            Err(IndexOutOfRange {
                index,
                len: self.len,
            })
        }
    }

    /// Similarity between items `i` and `j`
    pub fn score(&self, i: usize, j: usize) -> Result<f32, IndexOutOfRange> {
        self.check(i)?;
        self.check(j)?;
        Ok(self.scores[i * self.len + j])
    }

    /// The `k` items most similar to `index`, best first
    ///
    /// The query item itself is never included. Equal scores are ordered by
    /// ascending catalog index so results are reproducible.
    pub fn top_k(&self, index: usize, k: usize) -> Result<Vec<(usize, f32)>, IndexOutOfRange> {
        self.check(index)?;

        let row = &self.scores[index * self.len..(index + 1) * self.len];
        let mut ranked: Vec<(usize, f32)> = row
            .iter()
            .copied()
            .enumerate()
            .filter(|(j, _)| *j != index)
            .collect();

        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(k);

        Ok(ranked)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
