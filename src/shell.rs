//! Line-oriented interactive shell driving a [`PartitionModel`].
//!
//! Each input line is one command; clicks are given as pixel coordinates.
//! Failures while exporting or previewing are reported and the session keeps
//! running.

use crate::export::{export_tiles, ExportError, ExportReport};
use crate::{canvas_for_image, Canvas, PartitionModel, Placement, Point, SplitError, SplitterConfig};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::*;

pub const USAGE: &str = "\
HOW TO USE:
Place/select point: place X Y (p)
Delete point: delete X Y (d)
Toggle horizontal line on current point: horizontal (h)
Toggle vertical line on current point: vertical (v)
Increment point priority: increment (; or +)
Decrement point priority: decrement (l or -)
Export tiles: export (e)
List points and tiles: show (s)
Render the layout onto a copy of the image: preview PATH
Quit: quit (q)
Priority meaning: lower priority lines block higher priority lines
See point priority: select a point to see its priority
NOTE: THE OUTPUT DIRECTORY MUST EXIST BEFORE EXPORTING.";

/// One shell command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Place(Point),
    Delete(Point),
    ToggleHorizontal,
    ToggleVertical,
    IncrementPriority,
    DecrementPriority,
    Export,
    Show,
    Preview(PathBuf),
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq)]
pub enum ParseCommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command `{0}`, type `help` for a list")]
    Unknown(String),

    #[error("`{command}` expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("Invalid coordinate `{0}`")]
    InvalidCoordinate(String),

    #[error("Unexpected argument `{0}`")]
    UnexpectedArgument(String),
}

fn parse_point<'a>(
    command: &'static str,
    args: &mut impl Iterator<Item = &'a str>,
) -> Result<Point, ParseCommandError> {
    let mut coordinate = || -> Result<u32, ParseCommandError> {
        let raw = args.next().ok_or(ParseCommandError::MissingArgument {
            command,
            expected: "X Y coordinates",
        })?;
        raw.parse()
            .map_err(|_| ParseCommandError::InvalidCoordinate(raw.to_string()))
    };
    let x = coordinate()?;
    let y = coordinate()?;
    Ok(Point::new(x, y))
}

impl FromStr for Command {
    type Err = ParseCommandError;

    /// Parses a command line.
    ///
    /// # Example
    /// ```
    /// use splitter::{shell::Command, Point};
    ///
    /// assert_eq!("p 10 20".parse(), Ok(Command::Place(Point::new(10, 20))));
    /// assert_eq!(";".parse(), Ok(Command::IncrementPriority));
    /// ```
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        let head = tokens.next().ok_or(ParseCommandError::Empty)?;
        let command = match head.to_ascii_lowercase().as_str() {
            "p" | "place" => Command::Place(parse_point("place", &mut tokens)?),
            "d" | "delete" => Command::Delete(parse_point("delete", &mut tokens)?),
            "h" | "horizontal" => Command::ToggleHorizontal,
            "v" | "vertical" => Command::ToggleVertical,
            ";" | "+" | "increment" => Command::IncrementPriority,
            "l" | "-" | "decrement" => Command::DecrementPriority,
            "e" | "export" => Command::Export,
            "s" | "show" => Command::Show,
            "preview" => {
                let path = tokens.next().ok_or(ParseCommandError::MissingArgument {
                    command: "preview",
                    expected: "an output path",
                })?;
                Command::Preview(PathBuf::from(path))
            }
            "?" | "help" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            _ => return Err(ParseCommandError::Unknown(head.to_string())),
        };
        match tokens.next() {
            Some(extra) => Err(ParseCommandError::UnexpectedArgument(extra.to_string())),
            None => Ok(command),
        }
    }
}

/// Whether the shell loop should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// An interactive splitting session over one source image.
#[derive(Debug)]
pub struct Session {
    model: PartitionModel,
    source: PathBuf,
    config: SplitterConfig,
}

impl Session {
    pub fn new(source: impl Into<PathBuf>, canvas: Canvas, config: SplitterConfig) -> Self {
        Self {
            model: PartitionModel::with_config(canvas, &config),
            source: source.into(),
            config,
        }
    }

    /// Starts a session sized to the image at `source`.
    pub fn open(source: impl Into<PathBuf>, config: SplitterConfig) -> Result<Self, SplitError> {
        let source = source.into();
        let canvas = canvas_for_image(&source)?;
        Ok(Self::new(source, canvas, config))
    }

    pub fn model(&self) -> &PartitionModel {
        &self.model
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn config(&self) -> &SplitterConfig {
        &self.config
    }

    /// Exports the current tiling into the configured output directory.
    pub fn export(&self) -> Result<ExportReport, ExportError> {
        export_tiles(
            &self.source,
            &self.model.calculate_boxes(),
            &self.config.output_dir,
            self.config.enable_parallel,
        )
    }

    /// Applies one command, writing user-facing feedback to `out`.
    pub fn execute(&mut self, command: Command, out: &mut impl Write) -> io::Result<Flow> {
        debug!("Executing {:?}", command);
        match command {
            Command::Place(at) => {
                let canvas = self.model.canvas();
                if at.x >= canvas.width || at.y >= canvas.height {
                    writeln!(
                        out,
                        "({}, {}) is outside the {}x{} image",
                        at.x, at.y, canvas.width, canvas.height
                    )?;
                    return Ok(Flow::Continue);
                }
                if let Placement::Selected { priority, .. } = self.model.place_or_select(at) {
                    writeln!(out, "Current priority: {priority}")?;
                }
            }
            Command::Delete(at) => {
                self.model.delete(at);
            }
            Command::ToggleHorizontal => {
                self.model.toggle_horizontal();
            }
            Command::ToggleVertical => {
                self.model.toggle_vertical();
            }
            Command::IncrementPriority => {
                if let Some(priority) = self.model.increment_priority() {
                    writeln!(out, "New priority: {priority}")?;
                }
            }
            Command::DecrementPriority => {
                if let Some(priority) = self.model.decrement_priority() {
                    writeln!(out, "New priority: {priority}")?;
                }
            }
            Command::Export => match self.export() {
                Ok(report) => writeln!(out, "Exported {} tiles!", report.len())?,
                Err(err) if err.is_missing_resource() => {
                    warn!("Export aborted: {}", err);
                    writeln!(out, "{err}")?;
                }
                Err(err) => {
                    error!("Export failed: {:?}", err);
                    writeln!(out, "Export failed: {err}")?;
                }
            },
            Command::Show => out.write_all(self.describe().as_bytes())?,
            Command::Preview(path) => self.preview(&path, out)?,
            Command::Help => writeln!(out, "{USAGE}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    #[cfg(feature = "drawing")]
    fn preview(&self, path: &Path, out: &mut impl Write) -> io::Result<()> {
        use crate::debug::save_image_with_overlay;
        use crate::drawing::OverlayConfig;

        let config = OverlayConfig {
            dot_radius: self.config.pick_radius,
            tile_color: Some(image::Rgba([255, 0, 0, 255])),
            ..OverlayConfig::default()
        };
        let result = image::open(&self.source)
            .and_then(|img| save_image_with_overlay(&img, &self.model, path, &config));
        match result {
            Ok(()) => writeln!(out, "Preview written to {}", path.display()),
            Err(err) => {
                error!("Preview failed: {:?}", err);
                writeln!(out, "Preview failed: {err}")
            }
        }
    }

    #[cfg(not(feature = "drawing"))]
    fn preview(&self, _path: &Path, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "Preview requires the `drawing` feature")
    }

    /// Human-readable listing of points and tiles.
    pub fn describe(&self) -> String {
        let mut lines = Vec::new();
        for point in self.model.points() {
            let mut line = format!(
                "{} ({}, {}) priority {}",
                point.id, point.position.x, point.position.y, point.priority
            );
            if let Some(span) = point.horizontal {
                line.push_str(&format!(" horizontal [{}, {})", span.start, span.end));
            }
            if let Some(span) = point.vertical {
                line.push_str(&format!(" vertical [{}, {})", span.start, span.end));
            }
            if self.model.is_selected(point.id) {
                line.push_str(" *");
            }
            lines.push(line);
        }
        for (index, tile) in self.model.calculate_boxes().iter().enumerate() {
            lines.push(format!(
                "tile {}: left={} top={} width={} height={}",
                index, tile.left, tile.top, tile.width, tile.height
            ));
        }
        lines.iter().map(|line| format!("{line}\n")).collect()
    }

    /// Reads commands from `input` until it ends or a quit command arrives.
    /// Blank lines are skipped and malformed commands are reported.
    pub fn run(&mut self, input: impl BufRead, mut out: impl Write) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Command>() {
                Ok(command) => {
                    if self.execute(command, &mut out)? == Flow::Quit {
                        break;
                    }
                }
                Err(err) => writeln!(out, "{err}")?,
            }
            out.flush()?;
        }
        Ok(())
    }
}
