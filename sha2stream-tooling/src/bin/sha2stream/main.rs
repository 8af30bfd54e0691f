use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, ensure, Context, Result};
use log::{debug, info, warn};
use sha2stream::{sha256, Sha256Digest};
use sha2stream_tooling::{
    compare_with_reference, hash_reader, read_message, reference_reader_digest, render, SETTINGS,
};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "sha2stream",
    version = "0.1",
    about = "Computes SHA-256 digests and checks them against the sha2 crate.\n\n\
        Without arguments a single line is read from stdin. Settings are read from \
        ./sha2stream.config.toml and SHA2STREAM_* environment variables."
)]
struct Cli {
    #[structopt(
        long,
        short = "f",
        value_name = "PATH",
        parse(from_os_str),
        conflicts_with = "text",
        help = "Hash the contents of a file (may be given more than once)."
    )]
    file: Vec<PathBuf>,
    #[structopt(long, short = "t", value_name = "TEXT", help = "Hash the given text as-is.")]
    text: Option<String>,
    #[structopt(
        long,
        short = "e",
        value_name = "HEX DIGEST",
        help = "Fail unless the computed digest equals this one."
    )]
    expect: Option<Sha256Digest>,
    #[structopt(long = "no-compare", help = "Skip the comparison against the sha2 crate.")]
    no_compare: bool,
}

fn prompt_message() -> Result<Vec<u8>> {
    println!("sha2stream");
    println!("==========");
    print!("Enter a message to hash: ");
    io::stdout().flush().context("failed to flush stdout")?;

    let stdin = io::stdin();
    let mut lock = stdin.lock();
    let message = read_message(&mut lock, SETTINGS.trim_input)?;
    println!("input: {}", String::from_utf8_lossy(&message));
    Ok(message)
}

fn hash_message(message: &[u8], compare: bool, uppercase: bool) -> Result<Sha256Digest> {
    info!("hashing {} byte message", message.len());

    if !compare {
        let digest = Sha256Digest::from(sha256(message));
        println!("sha2stream: {}", render(&digest, uppercase));
        return Ok(digest);
    }

    let comparison = compare_with_reference(message);
    println!("reference:  {}", render(&comparison.reference, uppercase));
    println!("sha2stream: {}", render(&comparison.ours, uppercase));

    if !comparison.matches() {
        warn!(
            "digest mismatch: {:x} != {:x}",
            comparison.ours, comparison.reference
        );
        bail!("sha2stream digest does not match the reference digest");
    }
    println!("digests match");
    Ok(comparison.ours)
}

fn hash_files(paths: &[PathBuf], compare: bool, uppercase: bool) -> Result<Vec<Sha256Digest>> {
    let mut digests = Vec::with_capacity(paths.len());

    for path in paths {
        let file =
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        let (digest, len) = hash_reader(file, SETTINGS.read_chunk_size)
            .with_context(|| format!("failed to hash {}", path.display()))?;
        info!("hashed {} bytes from {}", len, path.display());

        if compare {
            let file =
                File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
            let reference = reference_reader_digest(file)
                .with_context(|| format!("failed to hash {}", path.display()))?;
            if digest != reference {
                warn!("digest mismatch: {:x} != {:x}", digest, reference);
                bail!("digest mismatch for {}", path.display());
            }
        }

        println!("{}  {}", render(&digest, uppercase), path.display());
        digests.push(digest);
    }

    Ok(digests)
}

fn main() -> Result<()> {
    fil_logger::init();

    let cli = Cli::from_args();
    debug!("settings: {:?}", *SETTINGS);

    let compare = SETTINGS.compare_reference && !cli.no_compare;
    let uppercase = SETTINGS.uppercase;

    let digests = if !cli.file.is_empty() {
        hash_files(&cli.file, compare, uppercase)?
    } else {
        let message = match cli.text {
            Some(ref text) => text.as_bytes().to_vec(),
            None => prompt_message()?,
        };
        vec![hash_message(&message, compare, uppercase)?]
    };

    if let Some(expected) = cli.expect {
        ensure!(
            digests.len() == 1,
            "--expect needs exactly one input, got {}",
            digests.len()
        );
        if digests[0] != expected {
            warn!("expected {:x}, computed {:x}", expected, digests[0]);
            bail!("digest does not match the expected value");
        }
        info!("digest matches the expected value");
    }

    Ok(())
}
