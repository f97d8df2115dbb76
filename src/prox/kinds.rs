use std::fmt;

/// Function types with a registered proximal operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProxFunctionType {
    /// `c'x`, i.e. a linear function of an affine argument
    Affine,
    /// `½ Σ xᵢ²`
    SumSquares,
    /// `Σ log(1 + exp(xᵢ))`
    SumLogistic,
    /// `-Σ log(xᵢ)`
    SumNegLog,
    /// `Σ exp(xᵢ)`
    SumExp,
    /// `Σ xᵢ log(xᵢ)`
    SumNegEntropy,
    /// A user supplied [`SmoothFunction`](crate::prox::SmoothFunction)
    Smooth,
}

/// Registry key: a function type, evaluated either as a proximal
/// operator or as a projection onto its epigraph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProxKind {
    pub function: ProxFunctionType,
    pub epigraph: bool,
}

impl ProxKind {
    pub fn new(function: ProxFunctionType) -> Self {
        Self {
            function,
            epigraph: false,
        }
    }

    pub fn epigraph(function: ProxFunctionType) -> Self {
        Self {
            function,
            epigraph: true,
        }
    }
}

impl fmt::Display for ProxKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.epigraph {
            write!(f, "{:?} (epigraph)", self.function)
        } else {
            write!(f, "{:?}", self.function)
        }
    }
}
