use super::*;
use crate::algebra::*;

/// Converts a linear form `c'x`, given as a block matrix of `1 x n`
/// blocks, into the block vector `c` keyed by column.   Blocks sharing
/// a column are summed.
pub fn get_linear<T: FloatT>(A: &BlockMatrix<T>) -> Result<BlockVector<T>, ProxError> {
    let mut c = BlockVector::new();
    for (_row, col, block) in A.iter() {
        if block.m() != 1 {
            return Err(ProxError::InvalidArgument(
                "linear terms must have a single row",
            ));
        }
        let ci = block.transpose().apply(&[T::one()])?;
        match c.get_mut(col) {
            Some(acc) => {
                acc.axpby(T::one(), &ci, T::one());
            }
            None => {
                c.insert(col, ci);
            }
        }
    }
    Ok(c)
}

struct AffineProxState<T> {
    AT: BlockMatrix<T>,
    ATA_inv: BlockMatrix<T>,
    b: BlockVector<T>,
    c: BlockVector<T>,
}

/// Proximal operator of the linear function `c'x` restricted to the
/// affine set `A x = b`, evaluated in closed form as
/// `x = (A'A)⁻¹ (A'(v - b) - c)`.
///
/// `A'A` must be block diagonal.
pub struct AffineProx<T> {
    state: Option<AffineProxState<T>>,
}

impl<T> Default for AffineProx<T> {
    fn default() -> Self {
        Self { state: None }
    }
}

impl<T> AffineProx<T>
where
    T: FloatT,
{
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T> ProxOperator<T> for AffineProx<T>
where
    T: FloatT,
{
    fn init(&mut self, arg: &ProxOperatorArg<T>) -> Result<(), ProxError> {
        self.state = None;

        let A = &arg.affine_constraint().a;
        let AT = A.transpose();
        let ATA_inv = AT.mul(A)?.inverse()?;
        let b = arg.affine_constraint().b.clone();
        let c = get_linear(&arg.affine_arg().a)?;

        log::debug!(
            "affine prox initialized: {} constraint block(s), {} linear term(s)",
            A.num_blocks(),
            c.len()
        );

        self.state = Some(AffineProxState { AT, ATA_inv, b, c });
        Ok(())
    }

    fn apply(&self, v: &BlockVector<T>) -> Result<BlockVector<T>, ProxError> {
        let state = self.state.as_ref().ok_or(ProxError::Uninitialized)?;
        let rhs = state.AT.apply(&v.sub(&state.b)?)?.sub(&state.c)?;
        Ok(state.ATA_inv.apply(&rhs)?)
    }
}
