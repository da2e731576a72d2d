//! Dense pairwise distance matrix between two sampled orbits.

use orrery_core::vector::{Vector3, distance};

/// One entry of a [`DistanceMatrix`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixCell {
    pub row: usize,
    pub col: usize,
    pub distance: f64,
}

/// Global minimum and maximum cells of a matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoarseExtrema {
    pub min: MatrixCell,
    pub max: MatrixCell,
}

/// Row-major `rows × cols` matrix of Euclidean distances.
///
/// Row `i` holds the distances from the `i`-th point of the first sequence to
/// every point of the second one, stored contiguously.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    pub fn between(first: &[Vector3], second: &[Vector3]) -> Self {
        let mut values = Vec::with_capacity(first.len() * second.len());
        for p in first {
            values.extend(second.iter().map(|q| distance(p, q)));
        }
        Self {
            rows: first.len(),
            cols: second.len(),
            values,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.values.get(row * self.cols + col).copied()
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.values[row * self.cols..(row + 1) * self.cols]
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Scan once in row-major order for the smallest and largest entries.
    ///
    /// Comparisons are strict, so ties resolve to the first occurrence (lowest
    /// row, then lowest column). Returns `None` for an empty matrix.
    pub fn extrema(&self) -> Option<CoarseExtrema> {
        let first = *self.values.first()?;
        let mut min = MatrixCell {
            row: 0,
            col: 0,
            distance: first,
        };
        let mut max = min;

        for (idx, &value) in self.values.iter().enumerate().skip(1) {
            if value < min.distance {
                min = self.cell(idx, value);
            }
            if value > max.distance {
                max = self.cell(idx, value);
            }
        }

        Some(CoarseExtrema { min, max })
    }

    fn cell(&self, idx: usize, distance: f64) -> MatrixCell {
        MatrixCell {
            row: idx / self.cols,
            col: idx % self.cols,
            distance,
        }
    }
}
