use super::*;
use crate::algebra::*;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Factory producing a fresh, uninitialized operator
pub type ProxFactory<T> = Box<dyn Fn() -> Box<dyn ProxOperator<T>> + Send + Sync>;

/// Map from [`ProxKind`] to a factory for its proximal operator.
///
/// A registry is an ordinary value, built once at startup and then
/// passed by reference to whatever needs to create operators.
///
/// __Example usage__ :
///
/// ```no_run
/// use proxima::prox::*;
///
/// let registry = ProxRegistry::<f64>::with_default_operators();
/// let kind = ProxKind::new(ProxFunctionType::SumSquares);
///
/// let mut prox = registry.create(kind).unwrap();
/// ```
pub struct ProxRegistry<T: FloatT> {
    factories: BTreeMap<ProxKind, ProxFactory<T>>,
}

impl<T> Default for ProxRegistry<T>
where
    T: FloatT,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ProxRegistry<T>
where
    T: FloatT,
{
    /// An empty registry
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// A registry holding every built-in operator, with default
    /// Newton settings
    pub fn with_default_operators() -> Self {
        Self::with_default_operators_using(NewtonSettings::default())
    }

    /// A registry holding every built-in operator, with the given
    /// Newton settings
    pub fn with_default_operators_using(settings: NewtonSettings<T>) -> Self {
        let mut registry = Self::new();
        registry
            .register_default_operators(settings)
            .expect("an empty registry has no duplicate kinds");
        registry
    }

    fn register_default_operators(&mut self, settings: NewtonSettings<T>) -> Result<(), ProxError> {
        self.register(ProxKind::new(ProxFunctionType::Affine), || {
            Box::new(AffineProx::<T>::new())
        })?;

        let floor = settings.domain_floor;
        let builtins: [(ProxFunctionType, BuiltinFunction<T>); 5] = [
            (ProxFunctionType::SumSquares, SumSquares::default().into()),
            (ProxFunctionType::SumLogistic, SumLogistic::default().into()),
            (
                ProxFunctionType::SumNegLog,
                SumNegLog::default().with_floor(floor).into(),
            ),
            (ProxFunctionType::SumExp, SumExp::default().into()),
            (
                ProxFunctionType::SumNegEntropy,
                SumNegEntropy::default().with_floor(floor).into(),
            ),
        ];

        for (function, builtin) in builtins {
            let f: Arc<dyn SmoothFunction<T>> = Arc::new(builtin);
            self.register_newton(function, Some(f), settings.clone())?;
        }
        self.register_newton(ProxFunctionType::Smooth, None, settings)?;

        Ok(())
    }

    // registers both the plain and the epigraph Newton operator for `function`
    fn register_newton(
        &mut self,
        function: ProxFunctionType,
        f: Option<Arc<dyn SmoothFunction<T>>>,
        settings: NewtonSettings<T>,
    ) -> Result<(), ProxError> {
        let prox = match &f {
            Some(f) => NewtonProx::with_function(f.clone(), settings.clone()),
            None => NewtonProx::new(settings.clone()),
        };
        self.register(ProxKind::new(function), move || {
            Box::new(VectorProx::new(prox.clone()))
        })?;

        let epi = match f {
            Some(f) => NewtonEpigraph::with_function(f, settings),
            None => NewtonEpigraph::new(settings),
        };
        self.register(ProxKind::epigraph(function), move || {
            Box::new(VectorProx::new(epi.clone()))
        })?;

        Ok(())
    }

    /// Registers a factory for `kind`.   Fails if `kind` is already registered.
    pub fn register<F>(&mut self, kind: ProxKind, factory: F) -> Result<(), ProxError>
    where
        F: Fn() -> Box<dyn ProxOperator<T>> + Send + Sync + 'static,
    {
        if self.factories.contains_key(&kind) {
            return Err(ProxError::DuplicateRegistration(kind));
        }
        log::debug!("registering proximal operator for {}", kind);
        self.factories.insert(kind, Box::new(factory));
        Ok(())
    }

    /// Creates a new uninitialized operator for `kind`
    pub fn create(&self, kind: ProxKind) -> Result<Box<dyn ProxOperator<T>>, ProxError> {
        let factory = self
            .factories
            .get(&kind)
            .ok_or(ProxError::UnregisteredKind(kind))?;
        Ok(factory())
    }

    pub fn contains(&self, kind: ProxKind) -> bool {
        self.factories.contains_key(&kind)
    }

    /// Registered kinds in sorted order
    pub fn kinds(&self) -> impl Iterator<Item = ProxKind> + '_ {
        self.factories.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_duplicates() {
        let mut registry = ProxRegistry::<f64>::new();
        let kind = ProxKind::new(ProxFunctionType::Affine);
        assert!(!registry.contains(kind));

        registry
            .register(kind, || Box::new(AffineProx::new()))
            .unwrap();
        assert!(registry.contains(kind));
        assert_eq!(
            registry.register(kind, || Box::new(AffineProx::new())),
            Err(ProxError::DuplicateRegistration(kind))
        );

        let other = ProxKind::epigraph(ProxFunctionType::SumExp);
        assert!(matches!(
            registry.create(other),
            Err(ProxError::UnregisteredKind(k)) if k == other
        ));
    }

    #[test]
    fn test_registry_defaults() {
        let registry = ProxRegistry::<f64>::with_default_operators();
        // affine, plus plain and epigraph operators for six smooth kinds
        assert_eq!(registry.kinds().count(), 13);
        assert!(registry.contains(ProxKind::epigraph(ProxFunctionType::Smooth)));
        assert!(!registry.contains(ProxKind::epigraph(ProxFunctionType::Affine)));
    }
}
