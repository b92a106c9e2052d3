use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use msc_cdr::counters::Counter;
use msc_cdr::{ClassifierConfig, CounterRegistry, Error, RecordPipeline};

/// Input subdirectory holding the MSC files.
const INPUT_SUBDIR: &str = "INPUT";
/// Output subdirectory for normalized records.
const OUTPUT_SUBDIR: &str = "MSC";
const OUTPUT_FILE: &str = "part-00000";
/// Lines handed to the thread pool at once.
const CHUNK_LINES: usize = 100_000;

#[derive(Parser, Debug)]
#[command(name = "msc-cdr", about = "Normalize and classify MSC call-detail records")]
struct Cli {
    /// Input staging directory (MSC files are read from <input>/INPUT)
    #[arg(short, long)]
    input: PathBuf,

    /// Output staging directory (removed first if it exists)
    #[arg(short, long)]
    output: PathBuf,

    /// JSON classifier config (landline codes, dialing codes)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fail the run when more lines than this are malformed
    #[arg(long)]
    max_malformed: Option<u64>,

    /// Print the counter report as JSON
    #[arg(long)]
    json: bool,
}

fn hms_string(elapsed_secs: f64) -> String {
    let h = (elapsed_secs / 3600.0) as u64;
    let m = ((elapsed_secs % 3600.0) / 60.0) as u64;
    let s = elapsed_secs % 60.0;
    format!("{}:{:02}:{:05.2}", h, m, s)
}

/// Spark/Hadoop side files (`_SUCCESS`, `.part-00000.crc`) are not input.
fn is_side_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.') || n.starts_with('_'))
}

fn input_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("reading input directory {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && !is_side_file(path))
        .collect();
    paths.sort();
    Ok(paths)
}

/// Fill `lines` with up to `limit` lines from `reader`.
///
/// Bytes that are not UTF-8 become U+FFFD, so a corrupt line is still
/// offered to the pipeline. Returns `false` once the reader is exhausted.
fn read_chunk<R: BufRead>(
    reader: &mut R,
    limit: usize,
    lines: &mut Vec<String>,
) -> io::Result<bool> {
    let mut buf = Vec::new();
    lines.clear();
    while lines.len() < limit {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(false);
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        lines.push(String::from_utf8_lossy(&buf).into_owned());
    }
    Ok(true)
}

/// Stream every input file through the pipeline into `writer`, chunk by chunk.
fn process_files<W: Write>(
    paths: &[PathBuf],
    pipeline: &RecordPipeline,
    counters: &CounterRegistry,
    writer: &mut W,
) -> Result<usize> {
    let mut written = 0;
    let mut lines = Vec::with_capacity(CHUNK_LINES);
    for path in paths {
        info!("Reading {}", path.display());
        let mut reader = BufReader::new(File::open(path)?);
        loop {
            let more = read_chunk(&mut reader, CHUNK_LINES, &mut lines)?;
            if !lines.is_empty() {
                let output = pipeline.process_batch(lines.as_slice(), counters);
                for record in &output.records {
                    writeln!(writer, "{}", record.to_pipe_line())?;
                }
                written += output.records.len();
            }
            if !more {
                break;
            }
        }
    }
    Ok(written)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let start_time = chrono::Local::now();
    let started = Instant::now();
    println!();
    println!("{}", "-".repeat(50));
    println!("Start Time: {}", start_time);
    println!("Input Staging Directory: {}", cli.input.display());
    println!("Output Staging Directory: {}", cli.output.display());

    let config = match &cli.config {
        Some(path) => ClassifierConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ClassifierConfig::default(),
    };

    let paths = input_files(&cli.input.join(INPUT_SUBDIR))?;

    if cli.output.exists() {
        warn!("Removing existing output directory {}", cli.output.display());
        fs::remove_dir_all(&cli.output)?;
    }

    println!("{}", "-".repeat(50));
    println!("Begin processing MSC files..");
    let out_dir = cli.output.join(OUTPUT_SUBDIR);
    fs::create_dir_all(&out_dir)?;
    let out_path = out_dir.join(OUTPUT_FILE);
    let mut writer = BufWriter::new(File::create(&out_path)?);

    let pipeline = RecordPipeline::new(config);
    let counters = CounterRegistry::new();
    let written = process_files(&paths, &pipeline, &counters, &mut writer)?;
    writer.flush()?;
    info!("Wrote {} records to {}", written, out_path.display());
    println!("{}", "-".repeat(50));

    let snapshot = counters.snapshot();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", snapshot);
    }
    println!("{}", "-".repeat(50));

    println!("End Time: {}", chrono::Local::now());
    println!(
        "\nTOTAL TIME TAKEN: {}",
        hms_string(started.elapsed().as_secs_f64())
    );

    if let Some(limit) = cli.max_malformed {
        let malformed = snapshot.get(Counter::MalformedRecords);
        if malformed > limit {
            return Err(Error::MalformedThreshold { malformed, limit }.into());
        }
    }

    println!("FILE PROCESSING COMPLETED SUCCESSFULLY !");
    Ok(())
}
