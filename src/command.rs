//! Command-line parsing for the interactive shell
//!
//! One command per line, whitespace-separated tokens:
//!
//! ```text
//! malloc <size>
//! free <offset>
//! blocklist [json]
//! writemem <offset> <text>
//! printmem <offset> <count>
//! stats [json]
//! check
//! help
//! quit
//! ```

use crate::error::{HeapError, Result};

pub const HELP: &str = "\
commands:
  malloc <size>              allocate <size> payload bytes, print the offset
  free <offset>              release the block at payload <offset>
  blocklist [json]           list blocks, largest payload first
  writemem <offset> <text>   copy <text> into the arena (raw)
  printmem <offset> <count>  print <count> raw bytes
  stats [json]               usage and fragmentation summary
  check                      verify heap consistency
  help                       show this message
  quit                       exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Malloc(usize),
    Free(usize),
    BlockList { json: bool },
    WriteMem { offset: usize, text: String },
    PrintMem { offset: usize, count: usize },
    Stats { json: bool },
    Check,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line
    ///
    /// Returns `Ok(None)` for a blank line.
    ///
    /// # Errors
    ///
    /// Returns `MalformedCommand` for an unknown command name, a wrong number
    /// of arguments, or an argument that is not a non-negative integer.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((&name, args)) = tokens.split_first() else {
            return Ok(None);
        };

        let command = match name {
            "malloc" => {
                expect_args(name, args, 1)?;
                Command::Malloc(number(name, args[0])?)
            }
            "free" => {
                expect_args(name, args, 1)?;
                Command::Free(number(name, args[0])?)
            }
            "blocklist" => Command::BlockList {
                json: json_flag(name, args)?,
            },
            "writemem" => {
                expect_args(name, args, 2)?;
                Command::WriteMem {
                    offset: number(name, args[0])?,
                    text: args[1].to_string(),
                }
            }
            "printmem" => {
                expect_args(name, args, 2)?;
                Command::PrintMem {
                    offset: number(name, args[0])?,
                    count: number(name, args[1])?,
                }
            }
            "stats" => Command::Stats {
                json: json_flag(name, args)?,
            },
            "check" => {
                expect_args(name, args, 0)?;
                Command::Check
            }
            "help" => {
                expect_args(name, args, 0)?;
                Command::Help
            }
            "quit" => {
                expect_args(name, args, 0)?;
                Command::Quit
            }
            other => {
                return Err(HeapError::MalformedCommand(format!(
                    "unknown command '{}'",
                    other
                )))
            }
        };

        Ok(Some(command))
    }
}

fn expect_args(name: &str, args: &[&str], count: usize) -> Result<()> {
    if args.len() != count {
        return Err(HeapError::MalformedCommand(format!(
            "{} takes {} argument(s), got {}",
            name,
            count,
            args.len()
        )));
    }
    Ok(())
}

fn number(name: &str, token: &str) -> Result<usize> {
    token.parse::<usize>().map_err(|_| {
        HeapError::MalformedCommand(format!(
            "{}: '{}' is not a non-negative integer",
            name, token
        ))
    })
}

fn json_flag(name: &str, args: &[&str]) -> Result<bool> {
    match args {
        [] => Ok(false),
        ["json"] => Ok(true),
        _ => Err(HeapError::MalformedCommand(format!(
            "{} accepts only an optional 'json' argument",
            name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        Command::parse(line).unwrap().unwrap()
    }

    fn malformed(line: &str) -> bool {
        matches!(Command::parse(line), Err(HeapError::MalformedCommand(_)))
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse("malloc 10"), Command::Malloc(10));
        assert_eq!(parse("  free\t11 \n"), Command::Free(11));
        assert_eq!(parse("blocklist"), Command::BlockList { json: false });
        assert_eq!(parse("blocklist json"), Command::BlockList { json: true });
        assert_eq!(
            parse("writemem 5 hello"),
            Command::WriteMem {
                offset: 5,
                text: "hello".to_string()
            }
        );
        assert_eq!(parse("printmem 0 4"), Command::PrintMem { offset: 0, count: 4 });
        assert_eq!(parse("stats json"), Command::Stats { json: true });
        assert_eq!(parse("check"), Command::Check);
        assert_eq!(parse("help"), Command::Help);
        assert_eq!(parse("quit"), Command::Quit);
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse("   \t\n").unwrap(), None);
    }

    #[test]
    fn test_malformed() {
        assert!(malformed("mallo 10"));
        assert!(malformed("malloc"));
        assert!(malformed("malloc ten"));
        assert!(malformed("malloc -3"));
        assert!(malformed("malloc 1 2"));
        assert!(malformed("writemem 5"));
        assert!(malformed("writemem 5 two words"));
        assert!(malformed("printmem 1"));
        assert!(malformed("blocklist xml"));
        assert!(malformed("quit now"));
    }
}
