use crate::algebra::*;
use std::collections::BTreeMap;

/// A matrix partitioned into [`LinearMap`] blocks addressed by a
/// (row key, column key) pair.
///
/// Blocks are stored column major, i.e. as `col -> row -> block`.
/// Absent blocks are implicit zeros.   The row dimension of a key is
/// fixed by the first block inserted in that row, and likewise for
/// columns, so that every block in a row has the same number of rows
/// and every block in a column has the same number of columns.
///
/// __Example usage__ :
///
/// ```no_run
/// use proxima::algebra::*;
///
/// let mut A = BlockMatrix::new();
/// A.insert("y", "x", LinearMap::Dense(Matrix::from(&[[1.0, 2.0]]))).unwrap();
/// A.insert("y", "z", LinearMap::Scalar { n: 1, alpha: 3.0 }).unwrap();
///
/// let mut x = BlockVector::new();
/// x.insert("x", vec![1.0, 1.0]);
/// x.insert("z", vec![2.0]);
///
/// let y = A.apply(&x).unwrap();
/// assert_eq!(y.get("y").unwrap(), &[9.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BlockMatrix<T = f64> {
    blocks: BTreeMap<String, BTreeMap<String, LinearMap<T>>>,
    row_dims: BTreeMap<String, usize>,
    col_dims: BTreeMap<String, usize>,
}

impl<T> Default for BlockMatrix<T> {
    fn default() -> Self {
        Self {
            blocks: BTreeMap::new(),
            row_dims: BTreeMap::new(),
            col_dims: BTreeMap::new(),
        }
    }
}

// attaches the failing block position to an error from a block operation
fn block_err<'a>(row: &'a str, col: &'a str) -> impl FnOnce(LinearMapError) -> BlockError + 'a {
    move |source| BlockError::LinearMap {
        row: row.to_string(),
        col: col.to_string(),
        source,
    }
}

impl<T> BlockMatrix<T>
where
    T: FloatT,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Block diagonal identity with the given (key, dimension) pairs
    pub fn identity<'a>(dims: impl IntoIterator<Item = (&'a str, usize)>) -> Self {
        let mut A = Self::new();
        for (key, n) in dims {
            A.blocks
                .entry(key.to_string())
                .or_default()
                .insert(key.to_string(), LinearMap::identity(n));
            A.row_dims.insert(key.to_string(), n);
            A.col_dims.insert(key.to_string(), n);
        }
        A
    }

    /// Inserts a block at position `(row, col)`, returning the block
    /// previously stored there if any.
    ///
    /// Fails if the block's dimensions disagree with dimensions already
    /// declared for `row` or `col` by other blocks.
    pub fn insert(
        &mut self,
        row: impl Into<String>,
        col: impl Into<String>,
        block: LinearMap<T>,
    ) -> Result<Option<LinearMap<T>>, BlockError> {
        let (row, col) = (row.into(), col.into());

        Self::check_dim(&self.row_dims, &row, block.m())?;
        Self::check_dim(&self.col_dims, &col, block.n())?;

        self.row_dims.insert(row.clone(), block.m());
        self.col_dims.insert(col.clone(), block.n());
        Ok(self.blocks.entry(col).or_default().insert(row, block))
    }

    fn check_dim(dims: &BTreeMap<String, usize>, key: &str, actual: usize) -> Result<(), BlockError> {
        match dims.get(key) {
            Some(&expected) if expected != actual => Err(BlockError::DimensionMismatch {
                key: key.to_string(),
                expected,
                actual,
            }),
            _ => Ok(()),
        }
    }

    pub fn get(&self, row: &str, col: &str) -> Option<&LinearMap<T>> {
        self.blocks.get(col)?.get(row)
    }

    /// Iterates over `(row, col, block)` in column major order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &LinearMap<T>)> {
        self.blocks.iter().flat_map(|(col, rows)| {
            rows.iter()
                .map(move |(row, block)| (row.as_str(), col.as_str(), block))
        })
    }

    /// Row keys in sorted order
    pub fn row_keys(&self) -> impl Iterator<Item = &str> {
        self.row_dims.keys().map(|k| k.as_str())
    }

    /// Column keys in sorted order
    pub fn col_keys(&self) -> impl Iterator<Item = &str> {
        self.col_dims.keys().map(|k| k.as_str())
    }

    pub fn row_dim(&self, key: &str) -> Option<usize> {
        self.row_dims.get(key).copied()
    }

    pub fn col_dim(&self, key: &str) -> Option<usize> {
        self.col_dims.get(key).copied()
    }

    /// number of stored blocks
    pub fn num_blocks(&self) -> usize {
        self.blocks.values().map(|rows| rows.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Blockwise transpose
    pub fn transpose(&self) -> Self {
        let mut At = Self::new();
        for (row, col, block) in self.iter() {
            At.blocks
                .entry(row.to_string())
                .or_default()
                .insert(col.to_string(), block.transpose());
        }
        At.row_dims = self.col_dims.clone();
        At.col_dims = self.row_dims.clone();
        At
    }

    // adds `block` into position (row, col), summing with any existing block
    fn accumulate(&mut self, row: &str, col: &str, block: LinearMap<T>) -> Result<(), BlockError> {
        let summed = match self.get(row, col) {
            Some(existing) => existing.add(&block).map_err(block_err(row, col))?,
            None => block,
        };
        self.insert(row, col, summed)?;
        Ok(())
    }

    /// Computes `self + B`.   The result holds the union of the
    /// block patterns of the operands.
    pub fn add(&self, B: &Self) -> Result<Self, BlockError> {
        let mut C = self.clone();
        for (row, col, block) in B.iter() {
            C.accumulate(row, col, block.clone())?;
        }
        Ok(C)
    }

    /// Computes `self * B`, i.e. `C_ik = sum_j A_ij * B_jk` over the
    /// key pairs with at least one product term.
    pub fn mul(&self, B: &Self) -> Result<Self, BlockError> {
        let mut C = Self::new();
        for (j, k, Bjk) in B.iter() {
            let Some(rows) = self.blocks.get(j) else {
                continue;
            };
            for (i, Aij) in rows.iter() {
                let prod = Aij.mul(Bjk).map_err(block_err(i, k))?;
                C.accumulate(i, k, prod)?;
            }
        }
        Ok(C)
    }

    /// Blockwise inverse of a block diagonal matrix
    pub fn inverse(&self) -> Result<Self, BlockError> {
        let mut Ainv = Self::new();
        for (row, col, block) in self.iter() {
            if row != col {
                return Err(BlockError::NotBlockDiagonal {
                    row: row.to_string(),
                    col: col.to_string(),
                });
            }
            let inv = block.inverse().map_err(block_err(row, col))?;
            Ainv.insert(row, col, inv)?;
        }
        Ok(Ainv)
    }

    /// Computes `self * x`.   Input keys with no block are ignored
    /// and column keys absent from `x` contribute nothing.   Every row
    /// key of `self` is present in the output.
    pub fn apply(&self, x: &BlockVector<T>) -> Result<BlockVector<T>, BlockError> {
        let mut y = BlockVector::new();
        for (key, &m) in self.row_dims.iter() {
            y.insert(key.clone(), vec![T::zero(); m]);
        }

        for (col, rows) in self.blocks.iter() {
            let Some(xc) = x.get(col) else {
                continue;
            };
            let n = self.col_dims[col];
            if xc.len() != n {
                return Err(BlockError::DimensionMismatch {
                    key: col.clone(),
                    expected: n,
                    actual: xc.len(),
                });
            }
            for (row, block) in rows.iter() {
                if let Some(yr) = y.get_mut(row) {
                    block.gemv(yr, xc, T::one(), T::one());
                }
            }
        }
        Ok(y)
    }
}
