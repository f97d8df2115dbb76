use proxima::{algebra::*, prox::*};

fn all_kinds() -> Vec<ProxKind> {
    use ProxFunctionType::*;
    let mut kinds = vec![ProxKind::new(Affine)];
    for f in [SumSquares, SumLogistic, SumNegLog, SumExp, SumNegEntropy, Smooth] {
        kinds.push(ProxKind::new(f));
        kinds.push(ProxKind::epigraph(f));
    }
    kinds.sort();
    kinds
}

#[test]
fn test_registry_default_kinds() {
    let registry = ProxRegistry::<f64>::with_default_operators();
    assert_eq!(registry.kinds().collect::<Vec<_>>(), all_kinds());

    // every operator starts uninitialized
    let v = BlockVector::new();
    for kind in all_kinds() {
        let prox = registry.create(kind).unwrap();
        assert_eq!(prox.apply(&v), Err(ProxError::Uninitialized));
    }
}

#[test]
fn test_registry_unregistered() {
    let registry = ProxRegistry::<f64>::new();
    let kind = ProxKind::new(ProxFunctionType::SumSquares);
    assert!(matches!(
        registry.create(kind),
        Err(ProxError::UnregisteredKind(k)) if k == kind
    ));
    assert_eq!(
        ProxError::UnregisteredKind(ProxKind::epigraph(ProxFunctionType::SumExp)).to_string(),
        "No proximal operator registered for SumExp (epigraph)"
    );
}

#[test]
fn test_registry_custom_operator() {
    let mut registry = ProxRegistry::<f64>::with_default_operators();

    // replacing a default kind is refused
    let kind = ProxKind::new(ProxFunctionType::SumSquares);
    let result = registry.register(kind, || {
        Box::new(NewtonProxOperator::new(NewtonProx::new(
            NewtonSettings::default(),
        )))
    });
    assert_eq!(result, Err(ProxError::DuplicateRegistration(kind)));

    let mut registry = ProxRegistry::<f64>::new();
    registry
        .register(kind, || Box::new(AffineProx::new()))
        .unwrap();
    assert!(registry.contains(kind));
    assert_eq!(registry.kinds().count(), 1);
}

#[test]
fn test_registry_settings() {
    // a single iteration from the floor cannot reach the solution
    let settings = NewtonSettingsBuilder::<f64>::default()
        .max_iter(1)
        .build()
        .unwrap();
    let registry = ProxRegistry::with_default_operators_using(settings);

    let mut prox = registry
        .create(ProxKind::new(ProxFunctionType::SumNegLog))
        .unwrap();
    let arg = ProxOperatorArgBuilder::<f64>::default()
        .affine_arg(AffineOperator::new(
            BlockMatrix::identity([("x", 1)]),
            BlockVector::new(),
        ))
        .build()
        .unwrap();
    prox.init(&arg).unwrap();

    let v: BlockVector<f64> = [("x".to_string(), vec![-5.0])].into_iter().collect();
    let x = prox.apply(&v).unwrap();
    let x = x.get("x").unwrap()[0];
    let expected = (-5.0 + (25.0f64 + 4.0).sqrt()) / 2.0;
    assert!(x > 0.);
    assert!((x - expected).abs() > 1e-3);
}
