use crate::algebra::*;
use derive_builder::Builder;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Error type returned by settings and argument validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// An error attributable to one of the fields
    #[error("Bad value for field \"{0}\"")]
    BadFieldValue(&'static str),
}

/// Settings for the damped Newton iterations used by the
/// [`NewtonProx`](crate::prox::NewtonProx) and
/// [`NewtonEpigraph`](crate::prox::NewtonEpigraph) operators

#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NewtonSettings<T: FloatT> {
    ///maximum number of Newton iterations
    #[builder(default = "100")]
    pub max_iter: u32,

    ///absolute residual tolerance
    #[builder(default = "(1e-12).as_T()")]
    pub tol_abs: T,

    ///relative residual tolerance, divided by the problem dimension
    #[builder(default = "(1e-10).as_T()")]
    pub tol_rel: T,

    ///line search sufficient decrease parameter
    #[builder(default = "(1e-3).as_T()")]
    pub linesearch_sufficient_decrease: T,

    ///line search backtracking
    #[builder(default = "(0.5).as_T()")]
    pub linesearch_backtrack_step: T,

    ///initial multiplier of the epigraph constraint
    #[builder(default = "(1.0).as_T()")]
    pub epigraph_initial_multiplier: T,

    ///smallest value used when projecting onto an open domain
    #[builder(default = "(1e-12).as_T()")]
    pub domain_floor: T,
}

impl<T> Default for NewtonSettings<T>
where
    T: FloatT,
{
    fn default() -> NewtonSettings<T> {
        NewtonSettingsBuilder::<T>::default().build().unwrap()
    }
}

impl<T> NewtonSettings<T>
where
    T: FloatT,
{
    /// Stopping tolerance for a problem of dimension `n`
    pub fn tolerance(&self, n: usize) -> T {
        T::max(self.tol_abs, self.tol_rel / n.max(1).as_T())
    }

    /// Checks that all numerical values are in range
    pub fn validate(&self) -> Result<(), SettingsError> {
        validate_max_iter(self.max_iter)?;
        validate_positive(self.tol_abs, "tol_abs")?;
        validate_positive(self.tol_rel, "tol_rel")?;
        validate_unit_interval(self.linesearch_sufficient_decrease, "linesearch_sufficient_decrease")?;
        validate_unit_interval(self.linesearch_backtrack_step, "linesearch_backtrack_step")?;
        validate_nonnegative(self.epigraph_initial_multiplier, "epigraph_initial_multiplier")?;
        validate_positive(self.domain_floor, "domain_floor")?;
        Ok(())
    }
}

// pre build checker (for auto-validation when using the builder)

impl From<SettingsError> for NewtonSettingsBuilderError {
    fn from(e: SettingsError) -> Self {
        NewtonSettingsBuilderError::ValidationError(e.to_string())
    }
}

/// Automatic pre-build settings validation
impl<T> NewtonSettingsBuilder<T>
where
    T: FloatT,
{
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(max_iter) = self.max_iter {
            validate_max_iter(max_iter)?;
        }
        if let Some(v) = self.tol_abs {
            validate_positive(v, "tol_abs")?;
        }
        if let Some(v) = self.tol_rel {
            validate_positive(v, "tol_rel")?;
        }
        if let Some(v) = self.linesearch_sufficient_decrease {
            validate_unit_interval(v, "linesearch_sufficient_decrease")?;
        }
        if let Some(v) = self.linesearch_backtrack_step {
            validate_unit_interval(v, "linesearch_backtrack_step")?;
        }
        if let Some(v) = self.epigraph_initial_multiplier {
            validate_nonnegative(v, "epigraph_initial_multiplier")?;
        }
        if let Some(v) = self.domain_floor {
            validate_positive(v, "domain_floor")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------
// individual validation functions go here
// ---------------------------------------------------------

fn validate_max_iter(max_iter: u32) -> Result<(), SettingsError> {
    if max_iter == 0 {
        return Err(SettingsError::BadFieldValue("max_iter"));
    }
    Ok(())
}

fn validate_positive<T: FloatT>(v: T, field: &'static str) -> Result<(), SettingsError> {
    if !(v.is_finite() && v > T::zero()) {
        return Err(SettingsError::BadFieldValue(field));
    }
    Ok(())
}

fn validate_nonnegative<T: FloatT>(v: T, field: &'static str) -> Result<(), SettingsError> {
    if !(v.is_finite() && v >= T::zero()) {
        return Err(SettingsError::BadFieldValue(field));
    }
    Ok(())
}

fn validate_unit_interval<T: FloatT>(v: T, field: &'static str) -> Result<(), SettingsError> {
    if !(v > T::zero() && v < T::one()) {
        return Err(SettingsError::BadFieldValue(field));
    }
    Ok(())
}

#[test]
fn test_settings_validate() {
    // all standard settings
    let settings = NewtonSettingsBuilder::<f64>::default().build().unwrap();
    assert_eq!(settings.max_iter, 100);
    assert_eq!(settings.linesearch_backtrack_step, 0.5);
    assert!((settings.tolerance(10) - 1e-11).abs() < 1e-24);
    assert_eq!(settings.tolerance(1000), 1e-12);

    // fail on bad line search parameters
    assert!(NewtonSettingsBuilder::<f64>::default()
        .linesearch_backtrack_step(1.0)
        .build()
        .is_err());
    assert!(NewtonSettingsBuilder::<f64>::default()
        .linesearch_sufficient_decrease(0.0)
        .build()
        .is_err());

    // fail on zero iterations or bad tolerances
    assert!(NewtonSettingsBuilder::<f64>::default()
        .max_iter(0)
        .build()
        .is_err());
    assert!(NewtonSettingsBuilder::<f64>::default()
        .tol_abs(-1.0)
        .build()
        .is_err());

    // directly construct bad settings and manually check
    let settings = NewtonSettings::<f64> {
        tol_rel: f64::NAN,
        ..NewtonSettings::default()
    };
    assert_eq!(
        settings.validate(),
        Err(SettingsError::BadFieldValue("tol_rel"))
    );
}
