//! OxiCode CLI - The Oxidized Prefix Coder
//!
//! A Pure Rust Huffman text compressor: encode, decode, and inspect.

mod utils;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use oxicode_huffman::{CodeTable, build_tree, count_frequencies, encode};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use utils::{decode_text, read_encoded, shannon_entropy, write_encoded};

/// File extension for encoded output.
const ENCODED_EXT: &str = "oxc";

#[derive(Parser)]
#[command(name = "oxicode")]
#[command(
    author,
    version,
    about = "The Oxidized Prefix Coder - Pure Rust Huffman text compression"
)]
#[command(long_about = "
OxiCode is a Pure Rust implementation of classic Huffman text compression.
Encoded files carry their own code table; nothing else is needed to decode.

Examples:
  oxicode encode book.txt
  oxicode encode notes.txt --encoding shift_jis -o notes.oxc
  oxicode decode book.txt.oxc
  oxicode info book.txt.oxc --json
  oxicode stats book.txt
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Huffman-encode a text file
    #[command(alias = "e")]
    Encode {
        /// Text file to encode
        input: PathBuf,

        /// Output file (default: <input>.oxc)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Character encoding of the input text (WHATWG label)
        #[arg(short, long, default_value = "utf-8")]
        encoding: String,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Decode an encoded file back to text
    #[command(alias = "d")]
    Decode {
        /// Encoded file to decode
        input: PathBuf,

        /// Output file (default: <input> without .oxc, or <input>.txt)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show information about an encoded file
    #[command(alias = "i")]
    Info {
        /// Encoded file to inspect
        input: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,

        /// Also dump the code table
        #[arg(short, long)]
        verbose: bool,
    },

    /// Entropy and projected-size statistics for a plain-text file
    Stats {
        /// Text file to analyze
        input: PathBuf,

        /// Character encoding of the input text (WHATWG label)
        #[arg(short, long, default_value = "utf-8")]
        encoding: String,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Encode {
            input,
            output,
            encoding,
            verbose,
        } => cmd_encode(&input, output.as_deref(), &encoding, verbose),
        Commands::Decode {
            input,
            output,
            verbose,
        } => cmd_decode(&input, output.as_deref(), verbose),
        Commands::Info {
            input,
            json,
            verbose,
        } => cmd_info(&input, json, verbose),
        Commands::Stats {
            input,
            encoding,
            json,
        } => cmd_stats(&input, &encoding, json),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "oxicode",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_encode(
    input: &Path,
    output: Option<&Path>,
    encoding: &str,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = std::fs::read(input)?;
    let (text, had_errors) = decode_text(&bytes, encoding)?;
    if had_errors {
        eprintln!(
            "Warning: {} contained sequences invalid in {}; they were replaced",
            input.display(),
            encoding
        );
    }

    let encoded = encode(&text)?;

    let default_output = input.with_extension(match input.extension() {
        Some(ext) => format!("{}.{}", ext.to_string_lossy(), ENCODED_EXT),
        None => ENCODED_EXT.to_string(),
    });
    let output = output.unwrap_or(&default_output);

    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);
    write_encoded(&mut writer, &encoded)?;
    writer.flush()?;
    drop(writer);

    let written = std::fs::metadata(output)?.len();
    println!("Encoded {} to {}", input.display(), output.display());
    println!("  Original: {} bytes", bytes.len());
    println!("  Encoded: {} bytes", written);
    if !bytes.is_empty() {
        println!(
            "  Ratio: {:.1}%",
            (1.0 - written as f64 / bytes.len() as f64) * 100.0
        );
    }
    if verbose {
        println!("  Distinct symbols: {}", encoded.table.len());
        println!("  Payload bits: {}", encoded.bit_len);
        println!("  Longest code: {} bits", encoded.table.max_code_len());
    }

    Ok(())
}

fn cmd_decode(
    input: &Path,
    output: Option<&Path>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::open(input)?;
    let mut reader = BufReader::new(file);
    let encoded = read_encoded(&mut reader)?;

    let text = oxicode_huffman::decode(encoded.bit_len, &encoded.data, &encoded.table)?;

    let default_output = if input
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case(ENCODED_EXT))
    {
        input.with_extension("")
    } else {
        input.with_extension("txt")
    };
    let output = output.unwrap_or(&default_output);

    std::fs::write(output, text.as_bytes())?;

    println!("Decoded {} to {}", input.display(), output.display());
    if verbose {
        println!("  Symbols: {}", text.chars().count());
        println!("  Bytes (UTF-8): {}", text.len());
    }

    Ok(())
}

/// Statistics of an encoded file, as printed by `info`.
#[derive(serde::Serialize)]
struct EncodedInfo {
    entries: usize,
    bit_len: u64,
    max_code_len: u8,
    payload_bytes: usize,
    table_bytes: usize,
    file_bytes: u64,
}

fn cmd_info(input: &Path, json: bool, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::open(input)?;
    let mut reader = BufReader::new(file);
    let encoded = read_encoded(&mut reader)?;

    let mut table_wire = Vec::new();
    encoded.table.write(&mut table_wire)?;

    let info = EncodedInfo {
        entries: encoded.table.len(),
        bit_len: encoded.bit_len,
        max_code_len: encoded.table.max_code_len(),
        payload_bytes: encoded.data.len(),
        table_bytes: table_wire.len(),
        file_bytes: std::fs::metadata(input)?.len(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Encoded file: {}", input.display());
    println!("  Distinct symbols: {}", info.entries);
    println!("  Payload bits: {}", info.bit_len);
    println!("  Longest code: {} bits", info.max_code_len);
    println!("  Payload: {} bytes", info.payload_bytes);
    println!("  Code table: {} bytes", info.table_bytes);
    println!("  File: {} bytes", info.file_bytes);

    if verbose {
        println!();
        println!("Code table:");
        for entry in encoded.table.entries() {
            println!(
                "  U+{:04X} {:?} -> {:0len$b} ({} bits)",
                entry.ch as u32,
                entry.ch,
                entry.code.bits,
                entry.code.len,
                len = entry.code.len as usize
            );
        }
    }

    Ok(())
}

/// Statistics of a plain-text file, as printed by `stats`.
#[derive(serde::Serialize)]
struct TextStats {
    bytes: usize,
    symbols: u64,
    distinct_symbols: usize,
    entropy_bits_per_symbol: f64,
    avg_code_len: f64,
    projected_bits: u64,
    projected_bytes: u64,
}

fn cmd_stats(input: &Path, encoding: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = std::fs::read(input)?;
    let (text, _) = decode_text(&bytes, encoding)?;

    let symbols = count_frequencies(&text)?;
    let root = build_tree(&symbols)?;
    let table = CodeTable::from_tree(&root)?;

    let total: u64 = symbols.iter().map(|s| s.freq).sum();
    let projected_bits: u64 = symbols
        .iter()
        .map(|s| s.freq * u64::from(table.get(s.ch).map(|c| c.len).unwrap_or(0)))
        .sum();

    let stats = TextStats {
        bytes: bytes.len(),
        symbols: total,
        distinct_symbols: symbols.len(),
        entropy_bits_per_symbol: shannon_entropy(&symbols),
        avg_code_len: projected_bits as f64 / total as f64,
        projected_bits,
        projected_bytes: projected_bits.div_ceil(8),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Text file: {}", input.display());
    println!("  Size: {} bytes, {} symbols", stats.bytes, stats.symbols);
    println!("  Distinct symbols: {}", stats.distinct_symbols);
    println!(
        "  Shannon entropy: {:.3} bits/symbol",
        stats.entropy_bits_per_symbol
    );
    println!("  Huffman average: {:.3} bits/symbol", stats.avg_code_len);
    println!(
        "  Projected payload: {} bytes ({} bits)",
        stats.projected_bytes, stats.projected_bits
    );

    Ok(())
}
