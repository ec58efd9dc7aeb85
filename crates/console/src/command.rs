use glam::Vec2;
use mandelscope_view::FractalKind;
use thiserror::Error;

/// A parsed console command, one per input line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConsoleCommand {
    /// `iter <n>` — set the iteration limit (clamped by the view).
    SetIterations(u32),
    /// `zoom <z>` — set the absolute zoom factor.
    SetZoom(f32),
    /// `center <x> <y>` — set the view center in the complex plane.
    SetCenter(Vec2),
    /// `julia <re> <im>` — animate toward a Julia constant and switch mode.
    SetJulia(Vec2),
    /// `mode mandelbrot|julia` — switch fractal kind without animation.
    SetKind(FractalKind),
    /// `reset` — restore the default view.
    Reset,
    /// `help` — print the command list.
    Help,
    /// `quit` — exit the application.
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error("`{command}` expects {expected} argument(s), got {got}")]
    BadArity {
        command: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("invalid number `{0}`")]
    BadNumber(String),
    #[error("unknown mode `{0}` (expected `mandelbrot` or `julia`)")]
    BadMode(String),
}

pub const HELP_TEXT: &str = "\
commands:
  iter <n>            set max iterations
  zoom <z>            set zoom factor
  center <x> <y>      set view center
  julia <re> <im>     animate to a Julia constant
  mode <mandelbrot|julia>
  reset               restore default view
  help                show this list
  quit                exit";

fn parse_f32(tok: &str) -> Result<f32, ParseError> {
    tok.parse().map_err(|_| ParseError::BadNumber(tok.into()))
}

fn parse_u32(tok: &str) -> Result<u32, ParseError> {
    tok.parse().map_err(|_| ParseError::BadNumber(tok.into()))
}

fn expect_args(command: &'static str, args: &[&str], expected: usize) -> Result<(), ParseError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(ParseError::BadArity {
            command,
            expected,
            got: args.len(),
        })
    }
}

/// Parse one console line. Returns `None` for blank lines; keywords are
/// case-insensitive, arguments are whitespace-separated plain numbers.
pub fn parse_line(line: &str) -> Option<Result<ConsoleCommand, ParseError>> {
    let mut tokens = line.split_whitespace();
    let keyword = tokens.next()?.to_ascii_lowercase();
    let args: Vec<&str> = tokens.collect();

    let result = match keyword.as_str() {
        "iter" => expect_args("iter", &args, 1)
            .and_then(|_| parse_u32(args[0]))
            .map(ConsoleCommand::SetIterations),
        "zoom" => expect_args("zoom", &args, 1)
            .and_then(|_| parse_f32(args[0]))
            .map(ConsoleCommand::SetZoom),
        "center" => expect_args("center", &args, 2).and_then(|_| {
            Ok(ConsoleCommand::SetCenter(Vec2::new(
                parse_f32(args[0])?,
                parse_f32(args[1])?,
            )))
        }),
        "julia" => expect_args("julia", &args, 2).and_then(|_| {
            Ok(ConsoleCommand::SetJulia(Vec2::new(
                parse_f32(args[0])?,
                parse_f32(args[1])?,
            )))
        }),
        "mode" => expect_args("mode", &args, 1).and_then(|_| {
            match args[0].to_ascii_lowercase().as_str() {
                "mandelbrot" => Ok(ConsoleCommand::SetKind(FractalKind::Mandelbrot)),
                "julia" => Ok(ConsoleCommand::SetKind(FractalKind::Julia)),
                other => Err(ParseError::BadMode(other.into())),
            }
        }),
        "reset" => expect_args("reset", &args, 0).map(|_| ConsoleCommand::Reset),
        "help" => expect_args("help", &args, 0).map(|_| ConsoleCommand::Help),
        "quit" | "exit" => expect_args("quit", &args, 0).map(|_| ConsoleCommand::Quit),
        _ => Err(ParseError::UnknownCommand(keyword)),
    };

    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_skipped() {
        assert!(parse_line("").is_none());
        assert!(parse_line("   \t ").is_none());
    }

    #[test]
    fn iter_command() {
        assert_eq!(
            parse_line("iter 512"),
            Some(Ok(ConsoleCommand::SetIterations(512)))
        );
    }

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(
            parse_line("ITER 64"),
            Some(Ok(ConsoleCommand::SetIterations(64)))
        );
        assert_eq!(
            parse_line("Mode JULIA"),
            Some(Ok(ConsoleCommand::SetKind(FractalKind::Julia)))
        );
    }

    #[test]
    fn zoom_and_center() {
        assert_eq!(
            parse_line("zoom 250.5"),
            Some(Ok(ConsoleCommand::SetZoom(250.5)))
        );
        assert_eq!(
            parse_line("center -0.745 0.113"),
            Some(Ok(ConsoleCommand::SetCenter(Vec2::new(-0.745, 0.113))))
        );
    }

    #[test]
    fn julia_takes_two_floats() {
        assert_eq!(
            parse_line("julia -0.8 0.156"),
            Some(Ok(ConsoleCommand::SetJulia(Vec2::new(-0.8, 0.156))))
        );
        assert_eq!(
            parse_line("julia 0.5"),
            Some(Err(ParseError::BadArity {
                command: "julia",
                expected: 2,
                got: 1
            }))
        );
    }

    #[test]
    fn mode_validation() {
        assert_eq!(
            parse_line("mode mandelbrot"),
            Some(Ok(ConsoleCommand::SetKind(FractalKind::Mandelbrot)))
        );
        assert_eq!(
            parse_line("mode nonsense"),
            Some(Err(ParseError::BadMode("nonsense".into())))
        );
    }

    #[test]
    fn bare_commands() {
        assert_eq!(parse_line("reset"), Some(Ok(ConsoleCommand::Reset)));
        assert_eq!(parse_line("help"), Some(Ok(ConsoleCommand::Help)));
        assert_eq!(parse_line("quit"), Some(Ok(ConsoleCommand::Quit)));
        assert_eq!(parse_line("exit"), Some(Ok(ConsoleCommand::Quit)));
    }

    #[test]
    fn bad_numbers_are_rejected() {
        assert_eq!(
            parse_line("iter many"),
            Some(Err(ParseError::BadNumber("many".into())))
        );
        assert_eq!(
            parse_line("center 0.1 up"),
            Some(Err(ParseError::BadNumber("up".into())))
        );
    }

    #[test]
    fn unknown_commands_are_rejected() {
        assert_eq!(
            parse_line("teleport 1 2"),
            Some(Err(ParseError::UnknownCommand("teleport".into())))
        );
    }

    #[test]
    fn extra_arguments_are_rejected() {
        assert_eq!(
            parse_line("reset now"),
            Some(Err(ParseError::BadArity {
                command: "reset",
                expected: 0,
                got: 1
            }))
        );
    }
}
