use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::info;
use thiserror::Error;

use huffpack::{code_book_of, compress, decode, decompress, encode, Artifact};

#[derive(Error, Debug)]
enum Error {
    /// stdin is an interactive terminal, there is nothing to compress
    #[error("huffpack only reads piped stdin, pass a file instead")]
    NoStdin,

    /// codec failures, file and stream faults included
    #[error(transparent)]
    Codec(#[from] huffpack::Error),
}

impl From<huffpack::FormatError> for Error {
    fn from(err: huffpack::FormatError) -> Self {
        Error::Codec(err.into())
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Codec(huffpack::Error::Io(err))
    }
}

/// represent all acceptable arguments
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    mode: Mode,
}

#[derive(Subcommand)]
enum Mode {
    /// compresses a file, or stdin
    Compress {
        input: Option<PathBuf>,

        /// destination, stdout when omitted
        #[clap(short, long)]
        output: Option<PathBuf>,

        /// write the code book to OUTPUT.codebook instead of ahead of the payload,
        /// e.g. `out.bin` and `out.bin.codebook`
        #[clap(long, requires = "output")]
        split: bool,
    },

    /// decompresses a file, or stdin
    Decompress {
        input: Option<PathBuf>,

        /// destination, stdout when omitted
        #[clap(short, long)]
        output: Option<PathBuf>,

        /// code book written by `compress --split`
        #[clap(long)]
        codebook: Option<PathBuf>,
    },

    /// prints each byte and its code, tab separated
    Codebook { input: Option<PathBuf> },

    /// prints original and compressed sizes
    Stats { input: PathBuf },
}

/// `out.bin` keeps its code book in `out.bin.codebook`, never in `out.bin`
fn code_book_path(output: &Path) -> PathBuf {
    let mut name = output.as_os_str().to_os_string();
    name.push(".codebook");
    PathBuf::from(name)
}

fn read_input(path: Option<&Path>) -> Result<Vec<u8>, Error> {
    match path {
        Some(path) => Ok(fs::read(path)?),
        None => {
            // abort when there is no input from stdin
            if atty::is(atty::Stream::Stdin) {
                return Err(Error::NoStdin);
            }
            let mut input = Vec::new();
            io::stdin().lock().read_to_end(&mut input)?;
            Ok(input)
        }
    }
}

fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<(), Error> {
    match path {
        Some(path) => fs::write(path, bytes)?,
        None => {
            let stdout = io::stdout();
            let mut stdout = BufWriter::new(stdout.lock());
            stdout.write_all(bytes)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn main() -> Result<(), Error> {
    log_init::init();

    // get arguments
    let args = Args::parse();

    // run each subcommands
    match args.mode {
        Mode::Compress {
            input,
            output,
            split,
        } => {
            let data = read_input(input.as_deref())?;
            let artifact = encode(&data)?;
            if let (true, Some(output)) = (split, &output) {
                let (code_book, payload) = artifact.to_parts();
                let book_path = code_book_path(output);
                fs::write(&book_path, code_book)?;
                fs::write(output, payload)?;
                info!("code book written to {}", book_path.display());
            } else {
                write_output(output.as_deref(), &artifact.to_bytes())?;
            }
            Ok(())
        }
        Mode::Decompress {
            input,
            output,
            codebook,
        } => {
            let data = read_input(input.as_deref())?;
            let decoded = match codebook {
                Some(path) => decode(&Artifact::from_parts(&fs::read(path)?, &data)?)?,
                None => decompress(&data)?,
            };
            write_output(output.as_deref(), &decoded)
        }
        Mode::Codebook { input } => {
            let data = read_input(input.as_deref())?;
            let code_book = code_book_of(&data);
            let stdout = io::stdout();
            let mut stdout = BufWriter::new(stdout.lock());
            if !code_book.is_empty() {
                writeln!(stdout, "{}", code_book)?;
            }
            stdout.flush()?;
            Ok(())
        }
        Mode::Stats { input } => {
            let data = fs::read(&input)?;
            let compressed = compress(&data)?;
            let stdout = io::stdout();
            let mut stdout = BufWriter::new(stdout.lock());
            writeln!(stdout, "Uncompressed: {:.2} MB", data.len() as f64 / 1e6)?;
            writeln!(stdout, "Compressed:   {:.2} MB", compressed.len() as f64 / 1e6)?;
            if !data.is_empty() {
                writeln!(
                    stdout,
                    "Ratio:        {:.2}",
                    compressed.len() as f64 / data.len() as f64
                )?;
            }
            stdout.flush()?;
            Ok(())
        }
    }
}
