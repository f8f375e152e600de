use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use rand::Rng;
use sweeper_core::{Board, BoardSnapshot, GameConfig, GameStatus};

use crate::command::{Command, HELP_TEXT, MAX_GRID_SIZE};
use crate::render::{BoardView, status_line};

enum Flow {
    Continue,
    Stop,
}

/// One player's game loop: owns the board and the random source used for restarts.
pub struct Session<R> {
    board: Board,
    rng: R,
    started: Instant,
    elapsed_before: u64,
}

impl<R: Rng> Session<R> {
    pub fn new(config: GameConfig, mut rng: R) -> Self {
        let board = Board::new(config, &mut rng);
        Self {
            board,
            rng,
            started: Instant::now(),
            elapsed_before: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_before + self.started.elapsed().as_secs()
    }

    /// Reads commands line by line until the game ends, the player quits, or input runs out.
    pub fn run(&mut self, mut input: impl BufRead, mut output: impl Write) -> Result<()> {
        loop {
            writeln!(output, "{}", BoardView(&self.board))?;
            writeln!(output, "{}", status_line(&self.board, self.elapsed_secs()))?;
            write!(output, "Please input action: ")?;
            output.flush()?;

            let Some(line) = read_line(&mut input)? else {
                log::debug!("input closed, leaving game");
                return Ok(());
            };

            let command = match Command::parse(&line, self.board.grid_size()) {
                Ok(command) => command,
                Err(err) => {
                    writeln!(output, "{err}")?;
                    continue;
                }
            };

            if let Flow::Stop = self.apply(command, &mut input, &mut output)? {
                return Ok(());
            }
        }
    }

    fn apply(
        &mut self,
        command: Command,
        input: &mut impl BufRead,
        output: &mut impl Write,
    ) -> Result<Flow> {
        match command {
            Command::Help => writeln!(output, "{HELP_TEXT}")?,
            Command::Quit => return confirm_quit(input, output),
            Command::Restart => {
                self.restart();
                writeln!(output, "Starting over with the same layout.")?;
            }
            Command::NewGame => {
                self.new_game();
                writeln!(output, "Starting over with a new layout.")?;
            }
            Command::Flag(index) => {
                if let Err(err) = self.board.toggle_flag(index) {
                    writeln!(output, "{err}")?;
                }
                return self.report_outcome(output);
            }
            Command::Select(index) => {
                let outcome = self.board.select(index)?;
                log::debug!("select {} -> {:?}", index, outcome);
                if !outcome.has_update() {
                    writeln!(output, "That cell is already open or flagged.")?;
                }
                return self.report_outcome(output);
            }
            Command::Save(path) => match self.save(&path) {
                Ok(()) => writeln!(output, "Game saved to {}.", path.display())?,
                Err(err) => writeln!(output, "Could not save game: {err:#}")?,
            },
            Command::Load(path) => match self.load(&path) {
                Ok(()) => {
                    writeln!(output, "Game loaded from {}.", path.display())?;
                    return self.report_outcome(output);
                }
                Err(err) => writeln!(output, "Could not load game: {err:#}")?,
            },
        }
        Ok(Flow::Continue)
    }

    fn report_outcome(&self, output: &mut impl Write) -> Result<Flow> {
        let message = match self.board.status() {
            GameStatus::Active => return Ok(Flow::Continue),
            GameStatus::Won => "You win.",
            GameStatus::Lost => "You hit a hazard. Game over.",
        };
        writeln!(output, "{}", BoardView(&self.board))?;
        writeln!(output, "{message}")?;
        Ok(Flow::Stop)
    }

    /// Clears every cell but keeps the hazards where they are.
    fn restart(&mut self) {
        self.board = Board::from_layout(self.board.layout().clone());
        self.reset_clock(0);
    }

    fn new_game(&mut self) {
        self.board = Board::new(self.board.config(), &mut self.rng);
        self.reset_clock(0);
    }

    fn reset_clock(&mut self, elapsed_before: u64) {
        self.started = Instant::now();
        self.elapsed_before = elapsed_before;
    }

    fn save(&self, path: &Path) -> Result<()> {
        let snapshot = BoardSnapshot::capture(&self.board, self.elapsed_secs());
        let json = serde_json::to_string_pretty(&snapshot)?;
        fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
    }

    fn load(&mut self, path: &Path) -> Result<()> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let snapshot: BoardSnapshot =
            serde_json::from_str(&json).context("save file is not a valid game")?;
        if snapshot.grid_size > MAX_GRID_SIZE {
            anyhow::bail!(
                "a {size}x{size} grid is larger than the {MAX_GRID_SIZE}x{MAX_GRID_SIZE} this front end can show",
                size = snapshot.grid_size
            );
        }
        self.board = snapshot.restore()?;
        self.reset_clock(snapshot.elapsed_secs);
        Ok(())
    }
}

fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        Ok(None)
    } else {
        Ok(Some(line))
    }
}

fn confirm_quit(input: &mut impl BufRead, output: &mut impl Write) -> Result<Flow> {
    write!(output, "Are you sure you want to quit? (y/n): ")?;
    output.flush()?;

    let answer = read_line(input)?.unwrap_or_default();
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => {
            writeln!(output, "Goodbye.")?;
            Ok(Flow::Stop)
        }
        "n" | "no" => {
            writeln!(output, "Let's keep going.")?;
            Ok(Flow::Continue)
        }
        _ => {
            writeln!(output, "Please answer y or n.")?;
            Ok(Flow::Continue)
        }
    }
}
