use super::*;
use crate::algebra::*;
use derive_builder::Builder;
use std::fmt;
use std::sync::Arc;

/// An affine map `y = A x + b` over block variables
#[derive(Debug, Clone, PartialEq)]
pub struct AffineOperator<T = f64> {
    pub a: BlockMatrix<T>,
    pub b: BlockVector<T>,
}

impl<T> Default for AffineOperator<T> {
    fn default() -> Self {
        Self {
            a: BlockMatrix::default(),
            b: BlockVector::default(),
        }
    }
}

impl<T> AffineOperator<T>
where
    T: FloatT,
{
    pub fn new(a: BlockMatrix<T>, b: BlockVector<T>) -> Self {
        Self { a, b }
    }

    /// Computes `A x + b`
    pub fn apply(&self, x: &BlockVector<T>) -> Result<BlockVector<T>, BlockError> {
        self.a.apply(x)?.add(&self.b)
    }
}

/// The argument of a proximal operator, built once per subproblem.
///
/// __Example usage__ :
///
/// ```no_run
/// use proxima::algebra::*;
/// use proxima::prox::*;
///
/// let arg = ProxOperatorArgBuilder::<f64>::default()
///     .lambda(0.5)
///     .affine_arg(AffineOperator::new(
///         BlockMatrix::identity([("x", 3)]),
///         BlockVector::new(),
///     ))
///     .build()
///     .unwrap();
///
/// assert_eq!(arg.arg_keys(), vec!["x".to_string()]);
/// ```

#[derive(Builder, Clone)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct ProxOperatorArg<T: FloatT> {
    /// scaling of the function, `prox_{λf}`
    #[builder(default = "T::one()")]
    lambda: T,

    /// the argument of the function as an affine form of the variables
    #[builder(default)]
    affine_arg: AffineOperator<T>,

    /// an affine constraint `A x = b` on the variables
    #[builder(default)]
    affine_constraint: AffineOperator<T>,

    /// ordering of the function arguments by row key of `affine_arg`
    #[builder(default, setter(into))]
    arg_keys: Vec<String>,

    /// the function for operators that take a user supplied handle
    #[builder(default, setter(strip_option))]
    function: Option<Arc<dyn SmoothFunction<T>>>,
}

impl<T> ProxOperatorArg<T>
where
    T: FloatT,
{
    pub fn lambda(&self) -> T {
        self.lambda
    }

    pub fn affine_arg(&self) -> &AffineOperator<T> {
        &self.affine_arg
    }

    pub fn affine_constraint(&self) -> &AffineOperator<T> {
        &self.affine_constraint
    }

    /// Argument keys in function order.   Defaults to the sorted
    /// row keys of the affine argument.
    pub fn arg_keys(&self) -> Vec<String> {
        if self.arg_keys.is_empty() {
            self.affine_arg.a.row_keys().map(String::from).collect()
        } else {
            self.arg_keys.clone()
        }
    }

    pub fn function(&self) -> Option<&Arc<dyn SmoothFunction<T>>> {
        self.function.as_ref()
    }
}

impl<T> fmt::Debug for ProxOperatorArg<T>
where
    T: FloatT,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ProxOperatorArg")
            .field("lambda", &self.lambda)
            .field("affine_arg", &self.affine_arg)
            .field("affine_constraint", &self.affine_constraint)
            .field("arg_keys", &self.arg_keys)
            .field("function", &self.function.is_some())
            .finish()
    }
}

impl From<SettingsError> for ProxOperatorArgBuilderError {
    fn from(e: SettingsError) -> Self {
        ProxOperatorArgBuilderError::ValidationError(e.to_string())
    }
}

impl<T> ProxOperatorArgBuilder<T>
where
    T: FloatT,
{
    /// check that λ is positive and finite
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(lambda) = self.lambda {
            if !(lambda.is_finite() && lambda > T::zero()) {
                return Err(SettingsError::BadFieldValue("lambda"));
            }
        }
        Ok(())
    }
}

#[test]
fn test_prox_arg_builder() {
    let arg = ProxOperatorArgBuilder::<f64>::default().build().unwrap();
    assert_eq!(arg.lambda(), 1.0);
    assert!(arg.arg_keys().is_empty());
    assert!(arg.function().is_none());

    assert!(ProxOperatorArgBuilder::<f64>::default()
        .lambda(0.0)
        .build()
        .is_err());
    assert!(ProxOperatorArgBuilder::<f64>::default()
        .lambda(f64::INFINITY)
        .build()
        .is_err());

    let mut a = BlockMatrix::new();
    a.insert("z", "x", LinearMap::identity(2)).unwrap();
    a.insert("y", "x", LinearMap::identity(2)).unwrap();
    let arg = ProxOperatorArgBuilder::<f64>::default()
        .affine_arg(AffineOperator::new(a, BlockVector::new()))
        .function(Arc::new(SumSquares::default()) as Arc<dyn SmoothFunction<f64>>)
        .build()
        .unwrap();
    assert_eq!(arg.arg_keys(), vec!["y".to_string(), "z".to_string()]);
    assert!(arg.function().is_some());

    let arg = ProxOperatorArgBuilder::<f64>::default()
        .arg_keys(vec!["z".to_string(), "y".to_string()])
        .build()
        .unwrap();
    assert_eq!(arg.arg_keys(), vec!["z".to_string(), "y".to_string()]);
}
