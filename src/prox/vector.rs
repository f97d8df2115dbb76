use super::*;
use crate::algebra::*;

/// A single value passed to or returned from a [`VectorProxKernel`]
#[derive(Debug, Clone, PartialEq)]
pub enum ProxValue<T = f64> {
    Scalar(T),
    Vector(Vec<T>),
}

impl<T> ProxValue<T>
where
    T: FloatT,
{
    pub fn len(&self) -> usize {
        match self {
            ProxValue::Scalar(_) => 1,
            ProxValue::Vector(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// the value as a slice, with scalars viewed as length one vectors
    pub fn as_slice(&self) -> &[T] {
        match self {
            ProxValue::Scalar(x) => std::slice::from_ref(x),
            ProxValue::Vector(v) => v,
        }
    }

    /// the value as a scalar, if it has length one
    pub fn as_scalar(&self) -> Option<T> {
        match self.as_slice() {
            [x] => Some(*x),
            _ => None,
        }
    }
}

/// Kernel input: one value and one scale `λᵢ` per index
#[derive(Debug, Clone)]
pub struct VectorProxInput<T = f64> {
    values: Vec<ProxValue<T>>,
    lambdas: Vec<T>,
    elementwise: bool,
}

impl<T> VectorProxInput<T>
where
    T: FloatT,
{
    /// number of indices
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// true if each index addresses a single element of one argument
    pub fn is_elementwise(&self) -> bool {
        self.elementwise
    }

    pub fn value(&self, i: usize) -> &ProxValue<T> {
        &self.values[i]
    }

    pub fn value_vec(&self, i: usize) -> &[T] {
        self.values[i].as_slice()
    }

    /// Value at index `i` as a scalar.   Fails if it is not of length one.
    pub fn value_scalar(&self, i: usize) -> Result<T, ProxError> {
        self.values[i]
            .as_scalar()
            .ok_or(ProxError::InvalidArgument("expected a scalar argument"))
    }

    /// scale of index `i`
    pub fn lambda(&self, i: usize) -> T {
        self.lambdas[i]
    }

    pub fn lambda_vec(&self) -> &[T] {
        &self.lambdas
    }

    /// The scale shared by every index.   Fails if the scales differ.
    pub fn lambda_uniform(&self) -> Result<T, ProxError> {
        let Some(&first) = self.lambdas.first() else {
            return Err(ProxError::InvalidArgument("no arguments"));
        };
        if self.lambdas.iter().any(|&l| l != first) {
            return Err(ProxError::NonUniformScaling);
        }
        Ok(first)
    }
}

/// Kernel output: one value per input index
#[derive(Debug, Clone)]
pub struct VectorProxOutput<T = f64> {
    values: Vec<Option<ProxValue<T>>>,
}

impl<T> VectorProxOutput<T>
where
    T: FloatT,
{
    fn new(len: usize) -> Self {
        Self {
            values: vec![None; len],
        }
    }

    pub fn set_scalar(&mut self, i: usize, x: T) {
        self.values[i] = Some(ProxValue::Scalar(x));
    }

    pub fn set_vector(&mut self, i: usize, x: Vec<T>) {
        self.values[i] = Some(ProxValue::Vector(x));
    }

    pub fn set_value(&mut self, i: usize, x: ProxValue<T>) {
        self.values[i] = Some(x);
    }

    // value at `i`, which must have length `len`
    fn get(&self, i: usize, len: usize) -> Result<&[T], ProxError> {
        let value = self
            .values
            .get(i)
            .and_then(|v| v.as_ref())
            .ok_or(ProxError::MissingOutput(i))?;
        if value.len() != len {
            return Err(ProxError::InvalidArgument("output value has the wrong shape"));
        }
        Ok(value.as_slice())
    }
}

// state derived in `init` from the affine argument (M, g)
struct VectorProxState<T> {
    M: BlockMatrix<T>,
    g: BlockVector<T>,
    // M' (M M')⁻¹
    MT_H_inv: BlockMatrix<T>,
    // M' (M M')⁻¹ M, or None if it is exactly the identity
    P: Option<BlockMatrix<T>>,
    keys: Vec<String>,
    dims: Vec<usize>,
    lambdas: Vec<T>,
}

/// Adapter evaluating `prox_{λf}` for a function `f(M x + g)` of an
/// affine argument, when `M M'` is block diagonal with each diagonal
/// block a multiple `αᵢ I` of the identity.
///
/// The kernel solves the problem in the natural coordinates `u = M v + g`,
/// with the scale of argument `i` set to `λ αᵢ`, and the result `y` is
/// mapped back as `x = (I - P) v + M' (M M')⁻¹ (y - g)`, where
/// `P = M' (M M')⁻¹ M` projects onto the row space of `M`.   When `P` is
/// the identity the kernel output is returned without a round trip
/// through `v`.
pub struct VectorProx<T, K> {
    kernel: K,
    state: Option<VectorProxState<T>>,
}

impl<T, K> VectorProx<T, K>
where
    T: FloatT,
    K: VectorProxKernel<T>,
{
    pub fn new(kernel: K) -> Self {
        Self {
            kernel,
            state: None,
        }
    }

    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    fn init_args(&mut self, arg: &ProxOperatorArg<T>) -> Result<(), ProxError> {
        let M = arg.affine_arg().a.clone();
        let g = arg.affine_arg().b.clone();
        let keys = arg.arg_keys();

        if keys.is_empty() {
            return Err(ProxError::InvalidArgument("function has no arguments"));
        }
        if self.kernel.elementwise() && keys.len() != 1 {
            return Err(ProxError::InvalidArgument(
                "elementwise operators take exactly one argument",
            ));
        }

        let MT = M.transpose();
        let H = M.mul(&MT)?;

        // each diagonal block of M M' must be a multiple of the identity
        for (row, col, block) in H.iter() {
            if row != col {
                return Err(BlockError::NotBlockDiagonal {
                    row: row.to_string(),
                    col: col.to_string(),
                }
                .into());
            }
            if block.scalar_value().is_none() {
                return Err(ProxError::NonScalarArgument(row.to_string()));
            }
        }
        let H_inv = H.inverse()?;
        let MT_H_inv = MT.mul(&H_inv)?;
        let P = MT_H_inv.mul(&M)?;
        let P = (!is_identity(&P, &M)).then_some(P);

        let mut dims = Vec::with_capacity(keys.len());
        let mut lambdas = Vec::with_capacity(keys.len());
        for key in keys.iter() {
            let dim = M
                .row_dim(key)
                .ok_or(ProxError::InvalidArgument("argument key is not a row of the affine argument"))?;
            let alpha = H
                .get(key, key)
                .and_then(|block| block.scalar_value())
                .ok_or_else(|| ProxError::NonScalarArgument(key.clone()))?;
            dims.push(dim);
            lambdas.push(arg.lambda() * alpha);
        }

        log::debug!(
            "vector prox initialized: {} argument(s), dims {:?}, scales {:?}",
            keys.len(),
            dims,
            lambdas
        );

        self.state = Some(VectorProxState {
            M,
            g,
            MT_H_inv,
            P,
            keys,
            dims,
            lambdas,
        });
        Ok(())
    }
}

impl<T> VectorProxState<T>
where
    T: FloatT,
{
    // u = M v + g, split by argument into kernel input
    fn preprocess_input(
        &self,
        v: &BlockVector<T>,
        elementwise: bool,
    ) -> Result<(BlockVector<T>, VectorProxInput<T>), ProxError> {
        let u = self.M.apply(v)?.add(&self.g)?;

        let mut values = Vec::new();
        let mut lambdas = Vec::new();
        for (i, key) in self.keys.iter().enumerate() {
            let ui = u
                .get(key)
                .ok_or(ProxError::InvalidArgument("argument key is not a row of the affine argument"))?;
            if ui.len() != self.dims[i] {
                return Err(BlockError::DimensionMismatch {
                    key: key.clone(),
                    expected: self.dims[i],
                    actual: ui.len(),
                }
                .into());
            }
            if elementwise {
                values.extend(ui.iter().map(|&x| ProxValue::Scalar(x)));
                lambdas.extend(std::iter::repeat(self.lambdas[i]).take(ui.len()));
            } else {
                values.push(ProxValue::Vector(ui.to_vec()));
                lambdas.push(self.lambdas[i]);
            }
        }

        let input = VectorProxInput {
            values,
            lambdas,
            elementwise,
        };
        Ok((u, input))
    }

    // x = (I - P) v + M' H⁻¹ (y - g)
    fn postprocess_output(
        &self,
        v: &BlockVector<T>,
        u: &BlockVector<T>,
        output: &VectorProxOutput<T>,
        elementwise: bool,
    ) -> Result<BlockVector<T>, ProxError> {
        let mut y = u.clone();
        if elementwise {
            let key = &self.keys[0];
            let yk = (0..self.dims[0])
                .map(|j| output.get(j, 1).map(|x| x[0]))
                .collect::<Result<Vec<T>, _>>()?;
            y.insert(key.clone(), yk);
        } else {
            for (i, key) in self.keys.iter().enumerate() {
                let yi = output.get(i, self.dims[i])?;
                y.insert(key.clone(), yi.to_vec());
            }
        }

        let mut x = self.MT_H_inv.apply(&y.sub(&self.g)?)?;
        match &self.P {
            Some(P) => {
                x = v.sub(&P.apply(v)?)?.add(&x)?;
            }
            None => {
                // variables outside the argument pass through unchanged
                for (key, vk) in v.iter() {
                    if !x.contains_key(key) {
                        x.insert(key.clone(), vk.clone());
                    }
                }
            }
        }
        Ok(x)
    }
}

// true if P is exactly the identity on every column of M
fn is_identity<T: FloatT>(P: &BlockMatrix<T>, M: &BlockMatrix<T>) -> bool {
    P.num_blocks() == M.col_keys().count()
        && M.col_keys().all(|key| {
            P.get(key, key)
                .and_then(|block| block.scalar_value())
                .is_some_and(|alpha| alpha == T::one())
        })
}

impl<T, K> ProxOperator<T> for VectorProx<T, K>
where
    T: FloatT,
    K: VectorProxKernel<T>,
{
    fn init(&mut self, arg: &ProxOperatorArg<T>) -> Result<(), ProxError> {
        self.state = None;
        self.kernel.init(arg)?;
        self.init_args(arg)
    }

    fn apply(&self, v: &BlockVector<T>) -> Result<BlockVector<T>, ProxError> {
        let state = self.state.as_ref().ok_or(ProxError::Uninitialized)?;
        let elementwise = self.kernel.elementwise();

        let (u, input) = state.preprocess_input(v, elementwise)?;
        let mut output = VectorProxOutput::new(input.len());
        self.kernel.apply_vector(&input, &mut output)?;
        state.postprocess_output(v, &u, &output, elementwise)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // returns its input unchanged
    struct CopyKernel;

    impl VectorProxKernel<f64> for CopyKernel {
        fn apply_vector(
            &self,
            input: &VectorProxInput<f64>,
            output: &mut VectorProxOutput<f64>,
        ) -> Result<(), ProxError> {
            for i in 0..input.len() {
                output.set_value(i, input.value(i).clone());
            }
            Ok(())
        }
    }

    // sets nothing
    struct LazyKernel;

    impl VectorProxKernel<f64> for LazyKernel {
        fn apply_vector(
            &self,
            _input: &VectorProxInput<f64>,
            _output: &mut VectorProxOutput<f64>,
        ) -> Result<(), ProxError> {
            Ok(())
        }
    }

    fn identity_arg() -> ProxOperatorArg<f64> {
        ProxOperatorArgBuilder::default()
            .affine_arg(AffineOperator::new(
                BlockMatrix::identity([("x", 3)]),
                BlockVector::new(),
            ))
            .build()
            .unwrap()
    }

    #[test]
    fn test_vector_prox_copy_round_trip() {
        let mut prox = VectorProx::new(CopyKernel);
        assert_eq!(
            prox.apply(&BlockVector::new()),
            Err(ProxError::Uninitialized)
        );

        prox.init(&identity_arg()).unwrap();
        let mut v = BlockVector::new();
        v.insert("x", vec![1., -2., 3.]);
        assert_eq!(prox.apply(&v).unwrap(), v);
    }

    #[test]
    fn test_vector_prox_missing_output() {
        let mut prox = VectorProx::new(LazyKernel);
        prox.init(&identity_arg()).unwrap();
        let mut v = BlockVector::new();
        v.insert("x", vec![1., -2., 3.]);
        assert_eq!(prox.apply(&v), Err(ProxError::MissingOutput(0)));
    }

    #[test]
    fn test_vector_prox_identity_detection() {
        let mut prox = VectorProx::new(CopyKernel);
        prox.init(&identity_arg()).unwrap();
        assert!(prox.state.as_ref().unwrap().P.is_none());

        // u = x + y projects onto a one dimensional subspace
        let mut M = BlockMatrix::new();
        M.insert("u", "x", LinearMap::identity(1)).unwrap();
        M.insert("u", "y", LinearMap::identity(1)).unwrap();
        let arg = ProxOperatorArgBuilder::default()
            .affine_arg(AffineOperator::new(M, BlockVector::new()))
            .build()
            .unwrap();
        prox.init(&arg).unwrap();
        assert!(prox.state.as_ref().unwrap().P.is_some());

        // y far smaller than v is returned unchanged for an identity argument
        prox.init(&identity_arg()).unwrap();
        let state = prox.state.as_ref().unwrap();
        let mut v = BlockVector::new();
        v.insert("x", vec![-1e9, 0., 1e9]);
        let mut output = VectorProxOutput::new(1);
        output.set_vector(0, vec![1e-9, 0., -1e-9]);
        let (u, _) = state.preprocess_input(&v, false).unwrap();
        let x = state.postprocess_output(&v, &u, &output, false).unwrap();
        assert_eq!(x.get("x").unwrap(), &[1e-9, 0., -1e-9]);
    }

    #[test]
    fn test_vector_prox_value_accessors() {
        let input = VectorProxInput {
            values: vec![ProxValue::Scalar(2.0), ProxValue::Vector(vec![1.0, 2.0])],
            lambdas: vec![1.0, 3.0],
            elementwise: false,
        };
        assert_eq!(input.value_scalar(0), Ok(2.0));
        assert!(input.value_scalar(1).is_err());
        assert_eq!(input.value_vec(0), &[2.0]);
        assert_eq!(input.lambda_uniform(), Err(ProxError::NonUniformScaling));
    }
}
