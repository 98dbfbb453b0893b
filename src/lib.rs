//! # fqview - Terminal FASTQ Viewer
//!
//! Displays FASTQ files in a more human-readable way: reads are wrapped to
//! the terminal width, each wrapped sequence line is followed by the matching
//! slice of its quality string, and qualities can be coloured by score.
//!
//! ## Architecture
//!
//! Leaves first:
//! - `ansi`: measuring and stripping colour-coded text
//! - `quality`: quality character to colour bucket
//! - `wrap`: fixed-width splitting of sequence and quality strings
//! - `model`: the `FastqRecord` data structure
//! - `fastq`: the streaming record assembler
//! - `render`: interleaved sequence/quality output for one record
//! - `config`: validated viewer options and terminal width detection
//! - `controller`: feeding inputs through the assembler and renderer

pub mod ansi;
pub mod config;
pub mod controller;
pub mod fastq;
pub mod model;
pub mod quality;
pub mod render;
pub mod wrap;
