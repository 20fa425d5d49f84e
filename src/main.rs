use std::{
    fs,
    io::{self, Write},
    process::ExitCode,
    str::FromStr,
};

use clap::Parser;
use log::error;
use varexpr::{Domain, EqualityMode, Expression, Options, Scalar, input::Script};

/// Prefix of every diagnostic, in bold red.
const ERROR_PREFIX: &str = "\x1B[31;1mError:\x1B[0m";

/// varexpr compiles an expression over positional variables and evaluates it
/// with the values given on the command line or in a script file.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells varexpr to read a script file instead of an expression. The
    /// script supplies the domain and the variable values.
    #[arg(short, long)]
    file: bool,

    /// Evaluates in 64-bit integer arithmetic instead of double precision.
    #[arg(short, long)]
    integer: bool,

    /// Reads `==` as logical OR, the way the first releases of the grammar
    /// did.
    #[arg(long)]
    legacy_equality: bool,

    /// Prints the syntax tree before the result.
    #[arg(short, long)]
    tree: bool,

    /// The expression, or the script path with `--file`.
    contents: String,

    /// Variable values: the first is `$1`, the second `$2`, and so on.
    #[arg(allow_negative_numbers = true)]
    values: Vec<String>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let options = Options { equality: if args.legacy_equality {
                                EqualityMode::LegacyOr
                            } else {
                                EqualityMode::Standard
                            },
                            ..Options::default() };

    if args.file {
        let text = fs::read_to_string(&args.contents).unwrap_or_else(|_| {
                       eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                                 &args.contents);
                       std::process::exit(1);
                   });
        let script = match Script::parse(&text) {
            Ok(script) => script,
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            },
        };
        let outcome = match script.domain {
            Domain::Integer => {
                let values = script.values::<i64>().unwrap_or_default();
                run(&script.expression, options, &values, args.tree)
            },
            Domain::Real => {
                let values = script.values::<f64>().unwrap_or_default();
                run(&script.expression, options, &values, args.tree)
            },
        };
        return exit_code(outcome);
    }

    let outcome = if args.integer {
        parse_values::<i64>(&args.values).map(|values| {
                                             run(&args.contents, options, &values, args.tree)
                                         })
    } else {
        parse_values::<f64>(&args.values).map(|values| {
                                             run(&args.contents, options, &values, args.tree)
                                         })
    };
    outcome.map_or(ExitCode::FAILURE, exit_code)
}

/// Builds and evaluates `source`, printing the expression, the variables it
/// uses, and the result.
fn run<T: Scalar>(source: &str, options: Options, values: &[T], tree: bool) -> io::Result<bool> {
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    evaluate_and_print(source, options, values, tree, &mut stdout, &mut stderr)
}

/// Does the work of [`run`] against arbitrary writers. Returns whether the
/// expression evaluated.
fn evaluate_and_print<T, O, E>(source: &str,
                               options: Options,
                               values: &[T],
                               tree: bool,
                               out: &mut O,
                               err: &mut E)
                               -> io::Result<bool>
    where T: Scalar,
          O: Write,
          E: Write
{
    let mut expression = Expression::with_options(options);
    if expression.build(source, T::DOMAIN).is_err() {
        expression.write_error(err, ERROR_PREFIX)?;
        return Ok(false);
    }

    let result = match expression.eval(values) {
        Ok(result) => result,
        Err(e) => {
            writeln!(err, "{ERROR_PREFIX} {e}.")?;
            return Ok(false);
        },
    };

    writeln!(out, "Expression: '{source}'")?;
    writeln!(out, "Variables:{}", join(values))?;
    let used = expression.variables()
                         .iter()
                         .map(|&index| values[index])
                         .collect::<Vec<_>>();
    writeln!(out, "Used variables:{}", join(&used))?;
    if tree && let Some(root) = expression.root() {
        write!(out, "{}", root.render_tree())?;
    }
    writeln!(out, "Result: {result}")?;
    Ok(true)
}

fn exit_code(outcome: io::Result<bool>) -> ExitCode {
    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("failed to write the output: {e}");
            ExitCode::FAILURE
        },
    }
}

fn parse_values<T>(values: &[String]) -> Option<Vec<T>>
    where T: FromStr
{
    values.iter()
          .map(|value| {
              value.parse().map_err(|_| {
                                eprintln!("{ERROR_PREFIX} cannot read the variable value '{value}'.");
                            })
          })
          .collect::<Result<Vec<_>, _>>()
          .ok()
}

fn join<T: std::fmt::Display>(values: &[T]) -> String {
    values.iter().map(|value| format!(" {value}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A sink that refuses every write.
    struct Closed;

    impl Write for Closed {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn render<T: Scalar>(source: &str, values: &[T]) -> (bool, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let ok =
            evaluate_and_print(source, Options::default(), values, false, &mut out, &mut err).unwrap();
        (ok, String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn prints_used_variables_and_result() {
        let (ok, out, err) = render("${2} * 2", &[1i64, 5]);
        assert!(ok);
        assert_eq!(out,
                   "Expression: '${2} * 2'\nVariables: 1 5\nUsed variables: 5\nResult: 10\n");
        assert!(err.is_empty());
    }

    #[test]
    fn diagnostics_go_to_the_error_writer() {
        let (ok, out, err) = render::<f64>("1 +", &[]);
        assert!(!ok);
        assert!(out.is_empty());
        assert_eq!(err, format!("{ERROR_PREFIX} incomplete expression.\n1 +\n   ^\n"));

        let (ok, _, err) = render::<f64>("$1", &[]);
        assert!(!ok);
        assert!(err.starts_with(ERROR_PREFIX));
    }

    #[test]
    fn write_failures_are_reported() {
        let mut out = Vec::new();
        let outcome =
            evaluate_and_print::<f64, _, _>("(", Options::default(), &[], false, &mut out, &mut Closed);
        assert_eq!(outcome.map_err(|e| e.kind()), Err(io::ErrorKind::BrokenPipe));

        let outcome =
            evaluate_and_print::<f64, _, _>("1", Options::default(), &[], false, &mut Closed, &mut out);
        assert!(outcome.is_err());
    }
}
