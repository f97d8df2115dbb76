use super::*;
use crate::algebra::*;

/// A proximal operator `prox_{λf}`, configured once by [`init`](ProxOperator::init)
/// and then evaluated on a new input at every outer iteration.
///
/// `apply` takes `&self`, so an initialized operator can be shared
/// between threads and its derived state is never modified by evaluation.
pub trait ProxOperator<T>: Send + Sync
where
    T: FloatT,
{
    /// Derives all state reused by `apply` from the operator argument
    fn init(&mut self, arg: &ProxOperatorArg<T>) -> Result<(), ProxError>;

    /// Evaluates the operator at `v`
    fn apply(&self, v: &BlockVector<T>) -> Result<BlockVector<T>, ProxError>;
}

/// The function specific part of a [`VectorProx`] operator, which
/// sees its arguments in their natural coordinates.
pub trait VectorProxKernel<T>: Send + Sync
where
    T: FloatT,
{
    /// If true, the kernel takes exactly one argument and each input
    /// index addresses one scalar element of it
    fn elementwise(&self) -> bool {
        false
    }

    /// Kernel specific initialization
    fn init(&mut self, _arg: &ProxOperatorArg<T>) -> Result<(), ProxError> {
        Ok(())
    }

    /// Computes the output value at every input index
    fn apply_vector(
        &self,
        input: &VectorProxInput<T>,
        output: &mut VectorProxOutput<T>,
    ) -> Result<(), ProxError>;
}
