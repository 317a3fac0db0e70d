//! Root finding on single-variable equations.
//!
//! Three classic methods are provided, all driven by repeated calls to
//! [`Equation::eval`]:
//!
//! - `bisect`: halves a sign-changing bracket until it is narrower than the tolerance
//! - `regula_falsi`: shrinks a bracket using the secant through its endpoints
//! - `newton_raphson`: follows tangents from an initial guess, using a central
//!   finite-difference derivative
//!
//! Each method returns a `RootReport` with the last estimate, the number of iterations and
//! every intermediate step. Reaching the iteration cap is not an error; the report is
//! returned with `converged` set to false.
//!
//! # Example
//!
//! ```
//! use flatexpr::Equation;
//! use flatexpr::solver::{bisect, SolverConfig};
//!
//! let eq = Equation::new("x^2 - 4".to_string());
//! let report = bisect(&eq, 0.0, 5.0, &SolverConfig::default()).unwrap();
//! assert!(report.converged);
//! assert!((report.root - 2.0).abs() < 1e-5);
//! ```

use crate::errors::SolverError;
use crate::Equation;

/// Settings shared by all root finders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Convergence threshold: half bracket width for bisection, `|f(x)|` otherwise
    pub tolerance: f64,
    /// Maximum number of iterations before giving up
    pub max_iterations: usize,
    /// Half-width of the central difference used by Newton-Raphson
    pub step: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 1000,
            step: 1e-6,
        }
    }
}

impl SolverConfig {
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Rejects settings the solvers cannot work with.
    pub fn validate(&self) -> Result<(), SolverError> {
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            return Err(SolverError::InvalidParameter(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if !(self.step > 0.0 && self.step.is_finite()) {
            return Err(SolverError::InvalidParameter(format!(
                "step must be positive, got {}",
                self.step
            )));
        }
        if self.max_iterations == 0 {
            return Err(SolverError::InvalidParameter(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// One iteration of a root finder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub iteration: usize,
    /// Bracket `[a, b]` at the start of the iteration, for bracketing methods
    pub bracket: Option<(f64, f64)>,
    /// New estimate computed in this iteration
    pub estimate: f64,
    /// Function value at the estimate
    pub value: f64,
}

/// Outcome of a root search.
#[derive(Debug, Clone, PartialEq)]
pub struct RootReport {
    /// Final estimate of the root
    pub root: f64,
    /// Function value at `root`
    pub value: f64,
    /// Number of completed iterations
    pub iterations: usize,
    /// Whether the tolerance was met before the iteration cap
    pub converged: bool,
    pub steps: Vec<Step>,
}

impl RootReport {
    fn immediate(root: f64, value: f64) -> Self {
        Self {
            root,
            value,
            iterations: 0,
            converged: true,
            steps: Vec::new(),
        }
    }
}

/// Finds a root in `[a, b]` by bisection.
///
/// Stops when the midpoint is an exact root or the half-width of the bracket drops below
/// `config.tolerance`.
///
/// # Errors
/// - `SolverError::SameSign` if `f(a)` and `f(b)` have the same sign
/// - `SolverError::Evaluation` if the equation cannot be evaluated
/// - `SolverError::InvalidParameter` if the configuration is invalid
pub fn bisect(
    equation: &Equation,
    a: f64,
    b: f64,
    config: &SolverConfig,
) -> Result<RootReport, SolverError> {
    bracketed(
        equation,
        a,
        b,
        config,
        |a, b, _, _| (a + b) / 2.0,
        |a, b, _, tol| (b - a).abs() / 2.0 < tol,
    )
}

/// Finds a root in `[a, b]` by regula falsi (false position).
///
/// The new estimate is where the secant through `(a, f(a))` and `(b, f(b))` crosses zero.
/// Stops when `|f(c)|` drops below `config.tolerance`.
///
/// # Errors
/// Same as [`bisect`].
pub fn regula_falsi(
    equation: &Equation,
    a: f64,
    b: f64,
    config: &SolverConfig,
) -> Result<RootReport, SolverError> {
    bracketed(
        equation,
        a,
        b,
        config,
        |a, b, fa, fb| (a * fb - b * fa) / (fb - fa),
        |_, _, fc, tol| fc.abs() < tol,
    )
}

/// Shared loop of the bracketing methods.
///
/// `next` picks the new estimate from `(a, b, f(a), f(b))`; `done` decides convergence from
/// `(a, b, f(c), tolerance)` where `a` and `b` are the bracket the estimate came from.
fn bracketed<N, D>(
    equation: &Equation,
    mut a: f64,
    mut b: f64,
    config: &SolverConfig,
    next: N,
    done: D,
) -> Result<RootReport, SolverError>
where
    N: Fn(f64, f64, f64, f64) -> f64,
    D: Fn(f64, f64, f64, f64) -> bool,
{
    config.validate()?;

    let mut fa = equation.eval(a)?;
    let mut fb = equation.eval(b)?;
    if fa == 0.0 {
        return Ok(RootReport::immediate(a, fa));
    }
    if fb == 0.0 {
        return Ok(RootReport::immediate(b, fb));
    }
    if fa * fb > 0.0 || (fa * fb).is_nan() {
        return Err(SolverError::SameSign { a, b });
    }

    let mut steps = Vec::new();
    let mut estimate = a;
    let mut value = fa;
    for iteration in 0..config.max_iterations {
        estimate = next(a, b, fa, fb);
        value = equation.eval(estimate)?;
        steps.push(Step {
            iteration,
            bracket: Some((a, b)),
            estimate,
            value,
        });

        if value == 0.0 || done(a, b, value, config.tolerance) {
            return Ok(RootReport {
                root: estimate,
                value,
                iterations: iteration + 1,
                converged: true,
                steps,
            });
        }

        if fa * value < 0.0 {
            b = estimate;
            fb = value;
        } else {
            a = estimate;
            fa = value;
        }
    }

    Ok(RootReport {
        root: estimate,
        value,
        iterations: config.max_iterations,
        converged: false,
        steps,
    })
}

/// Finds a root near `x0` by Newton-Raphson iteration.
///
/// The derivative is approximated with [`Equation::derivative`] using `config.step`.
/// Stops when `|f(x)|` drops below `config.tolerance`.
///
/// # Example
/// ```
/// # use flatexpr::Equation;
/// # use flatexpr::solver::{newton_raphson, SolverConfig};
/// let eq = Equation::new("x^2 - 2".to_string());
/// let report = newton_raphson(&eq, 1.0, &SolverConfig::default()).unwrap();
/// assert!((report.root - 2f64.sqrt()).abs() < 1e-6);
/// ```
///
/// # Errors
/// - `SolverError::ZeroDerivative` if the derivative vanishes or is not finite
/// - `SolverError::Evaluation` if the equation cannot be evaluated
/// - `SolverError::InvalidParameter` if the configuration is invalid
pub fn newton_raphson(
    equation: &Equation,
    x0: f64,
    config: &SolverConfig,
) -> Result<RootReport, SolverError> {
    config.validate()?;

    let mut x = x0;
    let mut fx = equation.eval(x)?;
    if fx.abs() < config.tolerance {
        return Ok(RootReport::immediate(x, fx));
    }

    let mut steps = Vec::new();
    for iteration in 0..config.max_iterations {
        let slope = equation.derivative(x, config.step)?;
        if slope == 0.0 || !slope.is_finite() {
            return Err(SolverError::ZeroDerivative { x });
        }

        x -= fx / slope;
        fx = equation.eval(x)?;
        steps.push(Step {
            iteration,
            bracket: None,
            estimate: x,
            value: fx,
        });

        if fx.abs() < config.tolerance {
            return Ok(RootReport {
                root: x,
                value: fx,
                iterations: iteration + 1,
                converged: true,
                steps,
            });
        }
    }

    Ok(RootReport {
        root: x,
        value: fx,
        iterations: config.max_iterations,
        converged: false,
        steps,
    })
}
