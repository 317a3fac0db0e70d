use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use flatexpr::matrix::invert;
use flatexpr::solver::{bisect, newton_raphson, regula_falsi, RootReport, SolverConfig};
use flatexpr::Equation;
use itertools::Itertools;
use std::error::Error;
use std::process;

#[derive(Parser)]
#[command(name = "flatexpr")]
#[command(about = "Evaluate single-variable expressions, find their roots and invert matrices")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate an expression at one or more values of x
    Eval {
        /// Expression in x, e.g. "x^2 - 4"
        expression: String,
        /// Values of x; a constant expression needs none
        #[arg(allow_negative_numbers = true)]
        x: Vec<f64>,
    },
    /// Print the token template of an expression
    Tokens {
        expression: String,
    },
    /// Find a root in [a, b] by bisection
    Bisect {
        expression: String,
        #[arg(allow_negative_numbers = true)]
        a: f64,
        #[arg(allow_negative_numbers = true)]
        b: f64,
        #[command(flatten)]
        solver: SolverArgs,
    },
    /// Find a root in [a, b] by regula falsi
    RegulaFalsi {
        expression: String,
        #[arg(allow_negative_numbers = true)]
        a: f64,
        #[arg(allow_negative_numbers = true)]
        b: f64,
        #[command(flatten)]
        solver: SolverArgs,
    },
    /// Find a root near x0 by Newton-Raphson
    Newton {
        expression: String,
        #[arg(allow_negative_numbers = true)]
        x0: f64,
        #[command(flatten)]
        solver: SolverArgs,
        /// Half-width of the finite-difference derivative
        #[arg(long, default_value_t = SolverConfig::default().step)]
        step: f64,
    },
    /// Invert an N x N matrix given as rows of whitespace separated numbers
    Inverse {
        /// Matrix rows, e.g. "4 7" "2 6"
        #[arg(required = true, allow_hyphen_values = true)]
        rows: Vec<String>,
    },
}

#[derive(Args)]
struct SolverArgs {
    /// Convergence tolerance
    #[arg(long, default_value_t = SolverConfig::default().tolerance)]
    tolerance: f64,
    /// Iteration cap
    #[arg(long, default_value_t = SolverConfig::default().max_iterations)]
    max_iterations: usize,
    /// Only print the result, not every iteration
    #[arg(short, long)]
    quiet: bool,
}

impl SolverArgs {
    fn config(&self) -> SolverConfig {
        SolverConfig::default()
            .with_tolerance(self.tolerance)
            .with_max_iterations(self.max_iterations)
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli.command) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("  {} {}", "caused by:".red(), cause);
            source = cause.source();
        }
        process::exit(1);
    }
}

fn run(command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Eval { expression, x } => {
            let equation = load(expression);
            for (point, value) in evaluate_points(&equation, &x)? {
                match point {
                    Some(x) => println!("f({}) = {}", x, value),
                    None => println!("{}", value),
                }
            }
        }
        Command::Tokens { expression } => {
            let equation = load(expression);
            println!("{} {}", "Tokens:".green(), equation.tokens_str());
        }
        Command::Bisect {
            expression,
            a,
            b,
            solver,
        } => {
            let equation = load(expression);
            equation.check()?;
            println!("Bisection method starting with interval [{:.6}, {:.6}]", a, b);
            let report = bisect(&equation, a, b, &solver.config())?;
            print_report(&report, solver.quiet);
        }
        Command::RegulaFalsi {
            expression,
            a,
            b,
            solver,
        } => {
            let equation = load(expression);
            equation.check()?;
            println!("Regula falsi method starting with interval [{:.6}, {:.6}]", a, b);
            let report = regula_falsi(&equation, a, b, &solver.config())?;
            print_report(&report, solver.quiet);
        }
        Command::Newton {
            expression,
            x0,
            solver,
            step,
        } => {
            let equation = load(expression);
            equation.check()?;
            println!("Newton-Raphson method starting with initial guess x0 = {:.6}", x0);
            let report = newton_raphson(&equation, x0, &solver.config().with_step(step))?;
            print_report(&report, solver.quiet);
        }
        Command::Inverse { rows } => {
            let matrix = parse_matrix(&rows)?;
            let inverse = invert(&matrix)?;
            println!("{}", "Inverse of the matrix:".green());
            println!("[");
            for row in inverse {
                println!("  {}", row.iter().map(|v| format!("{:.2}", v)).join("\t"));
            }
            println!("]");
        }
    }
    Ok(())
}

/// Builds the equation and warns about characters the tokenizer ignored.
fn load(expression: String) -> Equation {
    let equation = Equation::new(expression);
    for (offset, c) in equation.skipped() {
        eprintln!(
            "{} ignoring '{}' at offset {}",
            "Warning:".yellow().bold(),
            c,
            offset
        );
    }
    equation
}

/// Evaluates at every given `x`, or once when the expression is a constant.
fn evaluate_points(
    equation: &Equation,
    xs: &[f64],
) -> Result<Vec<(Option<f64>, f64)>, Box<dyn Error>> {
    if xs.is_empty() {
        if equation.has_variable() {
            return Err(format!(
                "'{}' depends on x; give at least one value",
                equation.equation_str()
            )
            .into());
        }
        return Ok(vec![(None, equation.eval(0.0)?)]);
    }

    let values = equation.eval_many(xs)?;
    Ok(xs.iter().copied().map(Some).zip(values).collect())
}

fn print_report(report: &RootReport, quiet: bool) {
    if !quiet {
        for step in &report.steps {
            match step.bracket {
                Some((a, b)) => println!(
                    "{} {}: a = {:.6}, b = {:.6}, estimate = {:.6}, f = {:.6}",
                    "Iteration".red(),
                    step.iteration,
                    a,
                    b,
                    step.estimate,
                    step.value
                ),
                None => println!(
                    "{} {}: x = {:.6}, f(x) = {:.6}",
                    "Iteration".red(),
                    step.iteration,
                    step.estimate,
                    step.value
                ),
            }
        }
    }

    if report.converged {
        println!("{} {:.6}", "Root found:".green(), report.root);
    } else {
        println!(
            "{} {:.6}",
            "Maximum number of iterations reached. Approximate root:".yellow(),
            report.root
        );
    }
}

fn parse_matrix(rows: &[String]) -> Result<Vec<Vec<f64>>, String> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            row.split_whitespace()
                .map(|value| {
                    value
                        .parse::<f64>()
                        .map_err(|e| format!("row {}: invalid number '{}': {}", i, value, e))
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_requires_x_for_variable_expression() {
        let equation = Equation::new("x^2-4".to_string());
        let err = evaluate_points(&equation, &[]).unwrap_err();
        assert!(err.to_string().contains("depends on x"));
    }

    #[test]
    fn test_eval_constant_without_x() {
        let equation = Equation::new("(2+3)*4".to_string());
        assert_eq!(evaluate_points(&equation, &[]).unwrap(), vec![(None, 20.0)]);
    }

    #[test]
    fn test_eval_each_point() {
        let equation = Equation::new("x^2-4".to_string());
        assert_eq!(
            evaluate_points(&equation, &[2.0, 0.0]).unwrap(),
            vec![(Some(2.0), 0.0), (Some(0.0), -4.0)]
        );
    }

    #[test]
    fn test_parse_matrix() {
        let rows = vec!["4 7".to_string(), "2 -6".to_string()];
        assert_eq!(
            parse_matrix(&rows).unwrap(),
            vec![vec![4.0, 7.0], vec![2.0, -6.0]]
        );
        assert!(parse_matrix(&["1 a".to_string()]).is_err());
    }
}
