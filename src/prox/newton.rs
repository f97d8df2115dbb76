use super::*;
use crate::algebra::*;
use itertools::izip;
use std::sync::Arc;

/// Proximal operator of a smooth function evaluated by damped Newton
pub type NewtonProxOperator<T> = VectorProx<T, NewtonProx<T>>;

/// Epigraph projection of a smooth function evaluated by damped Newton
pub type NewtonEpigraphOperator<T> = VectorProx<T, NewtonEpigraph<T>>;

// ---------------------------------------------------------
// kernels
// ---------------------------------------------------------

/// Kernel computing `argmin_x ‖x - v‖²/(2λ) + f(x)` for a smooth `f`
/// with diagonal Hessian.
///
/// With several arguments, `f` is taken over their concatenation and
/// all arguments must share the same scale.
#[derive(Clone)]
pub struct NewtonProx<T: FloatT> {
    fixed: Option<Arc<dyn SmoothFunction<T>>>,
    function: Option<Arc<dyn SmoothFunction<T>>>,
    settings: NewtonSettings<T>,
}

impl<T> NewtonProx<T>
where
    T: FloatT,
{
    /// Kernel for the function handle supplied in the operator argument
    pub fn new(settings: NewtonSettings<T>) -> Self {
        Self {
            fixed: None,
            function: None,
            settings,
        }
    }

    /// Kernel for a fixed function, ignoring any handle in the operator argument
    pub fn with_function(function: Arc<dyn SmoothFunction<T>>, settings: NewtonSettings<T>) -> Self {
        Self {
            fixed: Some(function.clone()),
            function: Some(function),
            settings,
        }
    }

    /// Computes `prox_{λf}(v)`
    pub fn evaluate(&self, v: &[T], lambda: T) -> Result<Vec<T>, ProxError> {
        let f = self.function.as_deref().ok_or(ProxError::MissingFunction)?;
        Ok(newton_prox(f, v, lambda, &self.settings))
    }
}

impl<T> VectorProxKernel<T> for NewtonProx<T>
where
    T: FloatT,
{
    fn init(&mut self, arg: &ProxOperatorArg<T>) -> Result<(), ProxError> {
        let function = self
            .fixed
            .clone()
            .or_else(|| arg.function().cloned())
            .ok_or(ProxError::MissingFunction)?;
        self.function = Some(function);
        Ok(())
    }

    fn apply_vector(
        &self,
        input: &VectorProxInput<T>,
        output: &mut VectorProxOutput<T>,
    ) -> Result<(), ProxError> {
        let lambda = input.lambda_uniform()?;

        let v: Vec<T> = (0..input.len())
            .flat_map(|i| input.value_vec(i).iter().copied())
            .collect();
        let x = self.evaluate(&v, lambda)?;

        let mut start = 0;
        for i in 0..input.len() {
            let len = input.value(i).len();
            output.set_vector(i, x[start..start + len].to_vec());
            start += len;
        }
        Ok(())
    }
}

/// Kernel projecting `(s, v)` onto the epigraph `{(t, x) : f(x) ≤ t}`
/// of a smooth `f` with diagonal Hessian.
///
/// Takes two arguments, the scalar `s` at index 0 and the vector `v`
/// at index 1, which must share the same scale.
#[derive(Clone)]
pub struct NewtonEpigraph<T: FloatT> {
    fixed: Option<Arc<dyn SmoothFunction<T>>>,
    function: Option<Arc<dyn SmoothFunction<T>>>,
    settings: NewtonSettings<T>,
}

impl<T> NewtonEpigraph<T>
where
    T: FloatT,
{
    /// Kernel for the function handle supplied in the operator argument
    pub fn new(settings: NewtonSettings<T>) -> Self {
        Self {
            fixed: None,
            function: None,
            settings,
        }
    }

    /// Kernel for a fixed function, ignoring any handle in the operator argument
    pub fn with_function(function: Arc<dyn SmoothFunction<T>>, settings: NewtonSettings<T>) -> Self {
        Self {
            fixed: Some(function.clone()),
            function: Some(function),
            settings,
        }
    }

    /// Projects `(s, v)` onto the epigraph, returning `(t, x)`
    pub fn evaluate(&self, s: T, v: &[T]) -> Result<(T, Vec<T>), ProxError> {
        let f = self.function.as_deref().ok_or(ProxError::MissingFunction)?;
        newton_epigraph(f, s, v, &self.settings)
    }
}

impl<T> VectorProxKernel<T> for NewtonEpigraph<T>
where
    T: FloatT,
{
    fn init(&mut self, arg: &ProxOperatorArg<T>) -> Result<(), ProxError> {
        let function = self
            .fixed
            .clone()
            .or_else(|| arg.function().cloned())
            .ok_or(ProxError::MissingFunction)?;
        self.function = Some(function);
        Ok(())
    }

    fn apply_vector(
        &self,
        input: &VectorProxInput<T>,
        output: &mut VectorProxOutput<T>,
    ) -> Result<(), ProxError> {
        if input.len() != 2 {
            return Err(ProxError::InvalidArgument(
                "epigraph operators take the arguments (t, x)",
            ));
        }
        input.lambda_uniform()?;

        let s = input.value_scalar(0)?;
        let (t, x) = self.evaluate(s, input.value_vec(1))?;
        output.set_scalar(0, t);
        output.set_vector(1, x);
        Ok(())
    }
}

// ---------------------------------------------------------
// Newton iterations
// ---------------------------------------------------------

// r = x - v + λ∇f(x), returning ‖r‖.   Non-finite if x is outside
// the domain of f.
fn prox_residual<T: FloatT>(f: &dyn SmoothFunction<T>, x: &[T], v: &[T], lambda: T, r: &mut [T]) -> T {
    if !f.in_domain(x) {
        return T::infinity();
    }
    f.gradient(x, r);
    for (ri, &xi, &vi) in izip!(r.iter_mut(), x, v) {
        *ri = xi - vi + lambda * (*ri);
    }
    r.norm()
}

/// Damped Newton iterations for `prox_{λf}(v)`.   Returns the last
/// iterate, with a warning logged if it did not converge.
pub(crate) fn newton_prox<T: FloatT>(
    f: &dyn SmoothFunction<T>,
    v: &[T],
    lambda: T,
    settings: &NewtonSettings<T>,
) -> Vec<T> {
    let n = v.len();
    let mut x = vec![T::zero(); n];
    f.project_feasible(v, &mut x);
    if n == 0 {
        return x;
    }

    let eps = settings.tolerance(n);
    let beta = settings.linesearch_sufficient_decrease;
    let gamma = settings.linesearch_backtrack_step;

    let mut g = vec![T::zero(); n];
    let mut h = vec![T::zero(); n];
    let mut dx = vec![T::zero(); n];
    let mut nx = vec![T::zero(); n];
    let mut ng = vec![T::zero(); n];

    let mut x_res = prox_residual(f, &x, v, lambda, &mut g);

    for iter in 0..settings.max_iter {
        log::trace!("newton prox iter {}: residual {:e}", iter, x_res);

        // Newton step for the diagonal system (I + λ∇²f) dx = g
        f.hessian_diagonal(&x, &mut h);
        h.scale(lambda).translate(T::one());
        dx.copy_from(&g);
        for (dxi, &hi) in dx.iter_mut().zip(h.iter()) {
            *dxi /= hi;
        }

        // backtracking line search on the residual norm
        let mut theta = T::one();
        let mut accepted = false;
        while theta > eps {
            nx.waxpby(T::one(), &x, -theta, &dx);
            let nx_res = prox_residual(f, &nx, v, lambda, &mut ng);
            if nx_res.is_finite() && nx_res <= (T::one() - beta * theta) * x_res {
                std::mem::swap(&mut x, &mut nx);
                std::mem::swap(&mut g, &mut ng);
                x_res = nx_res;
                accepted = true;
                break;
            }
            theta *= gamma;
        }

        if x_res < eps {
            log::debug!("newton prox converged in {} iteration(s)", iter + 1);
            return x;
        }
        if !accepted {
            log::warn!("newton prox line search failed, residual {:e}", x_res);
            return x;
        }
    }

    log::warn!(
        "newton prox did not converge in {} iterations, residual {:e}",
        settings.max_iter,
        x_res
    );
    x
}

// g = [x - v + λ∇f(x); t - s - λ; f(x) - t], returning ‖g‖.   The
// gradient ∇f(x) is left in `grad`.
#[allow(clippy::too_many_arguments)]
fn epigraph_residual<T: FloatT>(
    f: &dyn SmoothFunction<T>,
    x: &[T],
    t: T,
    lambda: T,
    v: &[T],
    s: T,
    grad: &mut [T],
    g: &mut [T],
) -> T {
    if !f.in_domain(x) {
        return T::infinity();
    }
    let n = x.len();
    f.gradient(x, grad);
    for i in 0..n {
        g[i] = x[i] - v[i] + lambda * grad[i];
    }
    g[n] = t - s - lambda;
    g[n + 1] = f.eval(x) - t;
    g.norm()
}

/// Damped Newton iterations projecting `(s, v)` onto the epigraph of
/// `f`.   Returns `(s, v)` itself when it already lies in the epigraph.
pub(crate) fn newton_epigraph<T: FloatT>(
    f: &dyn SmoothFunction<T>,
    s: T,
    v: &[T],
    settings: &NewtonSettings<T>,
) -> Result<(T, Vec<T>), ProxError> {
    // already feasible
    if f.eval(v) <= s {
        return Ok((s, v.to_vec()));
    }

    let n = v.len();
    let eps = settings.tolerance(n);
    let beta = settings.linesearch_sufficient_decrease;
    let gamma = settings.linesearch_backtrack_step;

    let mut x = vec![T::zero(); n];
    f.project_feasible(v, &mut x);
    let mut t = s;
    let mut lambda = settings.epigraph_initial_multiplier;

    let mut grad = vec![T::zero(); n];
    let mut g = vec![T::zero(); n + 2];
    let mut d = vec![T::zero(); n + 1];
    let mut z = vec![T::zero(); n + 1];
    let mut nx = vec![T::zero(); n];
    let mut ngrad = vec![T::zero(); n];
    let mut ng = vec![T::zero(); n + 2];

    let mut x_res = epigraph_residual(f, &x, t, lambda, v, s, &mut grad, &mut g);

    for iter in 0..settings.max_iter {
        log::trace!(
            "newton epigraph iter {}: residual {:e}, t = {:e}, λ = {:e}",
            iter,
            x_res,
            t,
            lambda
        );

        // arrowhead Jacobian with d = [1 + λ∇²f(x); 1] and z = [∇f(x); -1]
        f.hessian_diagonal(&x, &mut d[..n]);
        d[..n].scale(lambda).translate(T::one());
        d[n] = T::one();
        z[..n].copy_from(&grad);
        z[n] = -T::one();
        let step = solve_arrowhead_system(&d, &z, T::zero(), &g)?;

        // backtracking line search, keeping the multiplier nonnegative
        let mut theta = T::one();
        let mut accepted = false;
        while theta > eps {
            nx.waxpby(T::one(), &x, -theta, &step[..n]);
            let nt = t - theta * step[n];
            let nlambda = T::max(lambda - theta * step[n + 1], T::zero());
            let nx_res = epigraph_residual(f, &nx, nt, nlambda, v, s, &mut ngrad, &mut ng);
            if nx_res.is_finite() && nx_res <= (T::one() - beta * theta) * x_res {
                std::mem::swap(&mut x, &mut nx);
                std::mem::swap(&mut grad, &mut ngrad);
                std::mem::swap(&mut g, &mut ng);
                t = nt;
                lambda = nlambda;
                x_res = nx_res;
                accepted = true;
                break;
            }
            theta *= gamma;
        }

        if x_res < eps {
            log::debug!("newton epigraph converged in {} iteration(s)", iter + 1);
            return Ok((t, x));
        }
        if !accepted {
            log::warn!("newton epigraph line search failed, residual {:e}", x_res);
            return Ok((t, x));
        }
    }

    log::warn!(
        "newton epigraph did not converge in {} iterations, residual {:e}",
        settings.max_iter,
        x_res
    );
    Ok((t, x))
}
