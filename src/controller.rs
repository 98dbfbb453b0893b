//! Viewer driver.
//!
//! This module runs the pipeline end to end:
//! - Inputs are opened in order (standard input when none are given)
//! - Each line is fed to the record assembler
//! - Every completed record is rendered straight away
//!
//! Inputs are treated as one concatenated stream, so a record may start in
//! one file and finish in the next.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};

use crate::config::ViewConfig;
use crate::fastq::RecordAssembler;
use crate::render::render;

/// A source of FASTQ lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Standard input
    Stdin,
    /// A file on disk
    File(PathBuf),
}

impl Input {
    /// Interprets a command-line path, with `-` meaning standard input.
    pub fn from_path(path: &Path) -> Self {
        if path.as_os_str() == "-" {
            Input::Stdin
        } else {
            Input::File(path.to_path_buf())
        }
    }

    /// Name used in log and error messages.
    pub fn name(&self) -> String {
        match self {
            Input::Stdin => "<stdin>".to_string(),
            Input::File(path) => path.display().to_string(),
        }
    }

    /// Opens the input for line-by-line reading.
    pub fn open(&self) -> io::Result<Box<dyn BufRead>> {
        match self {
            Input::Stdin => Ok(Box::new(BufReader::new(io::stdin()))),
            Input::File(path) => {
                let file = File::open(path)?;
                Ok(Box::new(BufReader::with_capacity(1024 * 1024, file)))
            }
        }
    }
}

/// Builds the input list from command-line paths.
pub fn inputs_from_paths(paths: &[PathBuf]) -> Vec<Input> {
    if paths.is_empty() {
        vec![Input::Stdin]
    } else {
        paths.iter().map(|p| Input::from_path(p)).collect()
    }
}

/// Streams FASTQ records from readers to a writer.
pub struct Viewer<W: Write> {
    /// Rendering options
    config: ViewConfig,
    /// Record under construction
    assembler: RecordAssembler,
    /// Destination of rendered records
    out: W,
    /// Name of the last input read, for end-of-stream errors
    last_input: Option<String>,
}

impl<W: Write> Viewer<W> {
    /// Creates a viewer writing to `out`.
    pub fn new(config: ViewConfig, out: W) -> Self {
        Self {
            config,
            assembler: RecordAssembler::new(),
            out,
            last_input: None,
        }
    }

    /// Number of records rendered so far.
    pub fn records_rendered(&self) -> usize {
        self.assembler.records_emitted()
    }

    /// Reads every line of `reader`, rendering records as they complete.
    pub fn view_reader<R: BufRead>(&mut self, reader: R, name: &str) -> Result<()> {
        let before = self.records_rendered();
        self.last_input = Some(name.to_string());

        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line = line.with_context(|| format!("Failed to read {name}"))?;
            let record = self
                .assembler
                .push(line.trim_end(), line_number)
                .with_context(|| format!("Invalid FASTQ in {name}"))?;

            if let Some(record) = record {
                render(&record, &self.config, &mut self.out)
                    .with_context(|| format!("Cannot display record {:?}", record.name()))?;
            }
        }

        debug!("{} records from {name}", self.records_rendered() - before);
        Ok(())
    }

    /// Reads one input to the end.
    pub fn view_input(&mut self, input: &Input) -> Result<()> {
        let name = input.name();
        info!("Reading {name}");
        let reader = input
            .open()
            .with_context(|| format!("Failed to open {name}"))?;
        self.view_reader(reader, &name)
    }

    /// Ends the stream, failing on a truncated last record.
    ///
    /// Returns the writer.
    pub fn finish(mut self) -> Result<W> {
        let finished = self.assembler.finish();
        match self.last_input.take() {
            Some(name) => finished.with_context(|| format!("Invalid FASTQ in {name}"))?,
            None => finished?,
        }
        self.out.flush()?;
        info!("Displayed {} records", self.records_rendered());
        Ok(self.out)
    }
}

/// Returns true if the error comes from the reader of our output going away.
pub fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|e| e.kind() == io::ErrorKind::BrokenPipe)
    })
}

/// Displays all inputs on standard output.
pub fn run(inputs: &[Input], config: ViewConfig) -> Result<()> {
    debug!("Configuration: {config:?}");
    let stdout = io::stdout();
    let mut viewer = Viewer::new(config, stdout.lock());

    let result = inputs
        .iter()
        .try_for_each(|input| viewer.view_input(input))
        .and_then(|()| viewer.finish().map(|_| ()));

    match result {
        Err(e) if is_broken_pipe(&e) => {
            debug!("Output closed early");
            Ok(())
        }
        other => other,
    }
}
