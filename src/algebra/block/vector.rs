use crate::algebra::*;
use std::collections::btree_map;
use std::collections::BTreeMap;

/// A vector partitioned into named blocks, one per variable key.
///
/// Keys that are absent are treated as zero vectors by the
/// arithmetic operations.   Iteration is in key order.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockVector<T = f64> {
    blocks: BTreeMap<String, Vec<T>>,
}

impl<T> Default for BlockVector<T> {
    fn default() -> Self {
        Self {
            blocks: BTreeMap::new(),
        }
    }
}

impl<T> BlockVector<T>
where
    T: FloatT,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a block, returning the previous value for `key` if any
    pub fn insert(&mut self, key: impl Into<String>, value: Vec<T>) -> Option<Vec<T>> {
        self.blocks.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&[T]> {
        self.blocks.get(key).map(|v| v.as_slice())
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Vec<T>> {
        self.blocks.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.blocks.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.blocks.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Vec<T>> {
        self.blocks.iter()
    }

    /// number of blocks
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Computes `a*x + b*self` keywise, treating absent keys as zero
    fn combine(&self, a: T, x: &Self, b: T) -> Result<Self, BlockError> {
        let mut out = self.clone();
        for v in out.blocks.values_mut() {
            v.scale(b);
        }
        for (key, xv) in x.blocks.iter() {
            match out.blocks.get_mut(key) {
                Some(v) => {
                    if v.len() != xv.len() {
                        return Err(BlockError::DimensionMismatch {
                            key: key.clone(),
                            expected: v.len(),
                            actual: xv.len(),
                        });
                    }
                    v.axpby(a, xv, T::one());
                }
                None => {
                    let mut v = xv.clone();
                    v.scale(a);
                    out.blocks.insert(key.clone(), v);
                }
            }
        }
        Ok(out)
    }

    /// Computes `self + x`
    pub fn add(&self, x: &Self) -> Result<Self, BlockError> {
        self.combine(T::one(), x, T::one())
    }

    /// Computes `self - x`
    pub fn sub(&self, x: &Self) -> Result<Self, BlockError> {
        self.combine(-T::one(), x, T::one())
    }

    /// Computes `c * self`
    pub fn scale(&self, c: T) -> Self {
        let mut out = self.clone();
        for v in out.blocks.values_mut() {
            v.scale(c);
        }
        out
    }

    /// 2-norm over all blocks
    pub fn norm(&self) -> T {
        self.blocks.values().map(|v| v.sumsq()).sum::<T>().sqrt()
    }

    /// Largest absolute entrywise difference to `x`, treating
    /// absent keys as zero
    pub fn norm_inf_diff(&self, x: &Self) -> Result<T, BlockError> {
        Ok(self.sub(x)?.blocks.values().fold(T::zero(), |acc, v| T::max(acc, v.norm_inf())))
    }
}

impl<T> FromIterator<(String, Vec<T>)> for BlockVector<T> {
    fn from_iter<I: IntoIterator<Item = (String, Vec<T>)>>(iter: I) -> Self {
        Self {
            blocks: iter.into_iter().collect(),
        }
    }
}

impl<T> From<BTreeMap<String, Vec<T>>> for BlockVector<T> {
    fn from(blocks: BTreeMap<String, Vec<T>>) -> Self {
        Self { blocks }
    }
}

impl<T> IntoIterator for BlockVector<T> {
    type Item = (String, Vec<T>);
    type IntoIter = btree_map::IntoIter<String, Vec<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bv(entries: &[(&str, &[f64])]) -> BlockVector<f64> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_vec()))
            .collect()
    }

    #[test]
    fn test_block_vector_add_sub() {
        let x = bv(&[("a", &[1., 2.]), ("b", &[3.])]);
        let y = bv(&[("b", &[1.]), ("c", &[4., 5.])]);

        let s = x.add(&y).unwrap();
        assert_eq!(s, bv(&[("a", &[1., 2.]), ("b", &[4.]), ("c", &[4., 5.])]));

        let d = x.sub(&y).unwrap();
        assert_eq!(d, bv(&[("a", &[1., 2.]), ("b", &[2.]), ("c", &[-4., -5.])]));

        assert_eq!(s.len(), 3);
        assert_eq!(s.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_block_vector_mismatch() {
        let x = bv(&[("a", &[1., 2.])]);
        let y = bv(&[("a", &[1.])]);
        assert_eq!(
            x.add(&y),
            Err(BlockError::DimensionMismatch {
                key: "a".to_string(),
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_block_vector_scale_norm() {
        let x = bv(&[("a", &[3.]), ("b", &[-4.])]);
        assert_eq!(x.norm(), 5.);
        assert_eq!(x.scale(2.), bv(&[("a", &[6.]), ("b", &[-8.])]));
        assert_eq!(x.norm_inf_diff(&BlockVector::new()).unwrap(), 4.);
    }
}
