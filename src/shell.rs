//! Interactive command loop
//!
//! Reads one command per line and drives the allocator against a single
//! arena. Command failures are printed as `error: ...` and the loop keeps
//! going; only I/O failures on the streams themselves end it early.

use crate::allocator::{Allocator, PlacementPolicy};
use crate::arena::Arena;
use crate::command::{Command, HELP};
use crate::config::SimConfig;
use crate::error::{HeapError, Result};
use crate::{snapshot, validation};
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// Whether the loop should keep reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// An arena plus the allocator that manages it
pub struct Shell {
    arena: Arena,
    allocator: Allocator,
    prompt: Option<String>,
}

impl Shell {
    pub fn new(config: &SimConfig) -> Result<Self> {
        config.validate()?;
        Ok(Shell {
            arena: Arena::new(config.arena_size)?,
            allocator: Allocator::new(config.strategy),
            prompt: Some(config.prompt.clone()),
        })
    }

    /// Replace the prompt; `None` prints nothing between commands
    pub fn with_prompt(mut self, prompt: Option<String>) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn allocator(&self) -> &Allocator {
        &self.allocator
    }

    /// Run one parsed command, writing any output to `out`
    pub fn execute<W: Write>(&mut self, command: &Command, out: &mut W) -> Result<Flow> {
        debug!(?command, "executing");

        match command {
            Command::Malloc(size) => {
                let offset = self.allocator.allocate(&mut self.arena, *size)?;
                writeln!(out, "{}", offset)?;
            }
            Command::Free(offset) => {
                self.allocator.release(&mut self.arena, *offset)?;
            }
            Command::BlockList { json } => {
                let list = snapshot::snapshot(&self.arena);
                if *json {
                    writeln!(out, "{}", serde_json::to_string(&list)?)?;
                } else {
                    for block in &list {
                        writeln!(out, "{}", block)?;
                    }
                }
            }
            Command::WriteMem { offset, text } => {
                crate::debug::write_mem(&mut self.arena, *offset, text.as_bytes())?;
            }
            Command::PrintMem { offset, count } => {
                let bytes = crate::debug::read_mem(&self.arena, *offset, *count)?;
                writeln!(out, "{}", crate::debug::format_mem(bytes))?;
            }
            Command::Stats { json } => {
                let stats = snapshot::stats(&self.arena);
                if *json {
                    writeln!(out, "{}", serde_json::to_string(&stats)?)?;
                } else {
                    writeln!(out, "{}", stats)?;
                }
            }
            Command::Check => {
                validation::verify(&self.arena)?;
                writeln!(out, "ok")?;
            }
            Command::Help => {
                writeln!(out, "{}", HELP)?;
            }
            Command::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    /// Parse and run one input line, reporting command errors to `out`
    pub fn execute_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        let result = Command::parse(line).and_then(|command| match command {
            Some(command) => self.execute(&command, out),
            None => Ok(Flow::Continue),
        });

        match result {
            Ok(flow) => Ok(flow),
            Err(HeapError::Io(err)) => Err(HeapError::Io(err)),
            Err(err) => {
                debug!(line = line.trim_end(), error = %err, "command failed");
                writeln!(out, "error: {}", err)?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Read commands until `quit` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> Result<()> {
        info!(
            strategy = self.allocator.placement().name(),
            arena_size = self.arena.len(),
            "shell started"
        );

        let mut line = String::new();
        loop {
            if let Some(prompt) = &self.prompt {
                write!(out, "{}", prompt)?;
                out.flush()?;
            }

            line.clear();
            if input.read_line(&mut line)? == 0 {
                break;
            }

            let flow = self.execute_line(&line, out)?;
            out.flush()?;
            if flow == Flow::Quit {
                break;
            }
        }

        info!("shell stopped");
        Ok(())
    }
}
