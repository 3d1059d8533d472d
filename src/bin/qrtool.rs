//! qrtool - encode payloads into QR symbols and inspect the result.

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use qrmatrix::decoder::read_symbol;
use qrmatrix::{ECLevel, EncodeOptions, MaskPattern, RegionTag, Symbol, Version, encode};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qrtool", version, about = "qrmatrix CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a payload and print the symbol with block characters
    Encode(EncodeArgs),
    /// Print version, level, mask penalties and the region map
    Inspect(EncodeArgs),
    /// Encode, read the symbol back and compare payloads
    Verify(EncodeArgs),
}

#[derive(Args)]
struct EncodeArgs {
    /// Text to encode (UTF-8)
    data: String,
    #[arg(short, long, value_enum, default_value_t = Level::L)]
    level: Level,
    /// Fixed symbol version 1-40
    #[arg(long = "qr-version")]
    qr_version: Option<u8>,
    /// Fixed mask pattern 0-7
    #[arg(long)]
    mask: Option<u8>,
    /// ECI assignment written before the data
    #[arg(long)]
    eci: Option<u32>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Level {
    L,
    M,
    Q,
    H,
}

impl From<Level> for ECLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::L => ECLevel::L,
            Level::M => ECLevel::M,
            Level::Q => ECLevel::Q,
            Level::H => ECLevel::H,
        }
    }
}

impl EncodeArgs {
    fn options(&self) -> anyhow::Result<EncodeOptions> {
        let mut options = EncodeOptions::new(self.level.into());
        if let Some(n) = self.qr_version {
            options = options.with_version(Version::new(n)?);
        }
        if let Some(id) = self.mask {
            let Some(mask) = MaskPattern::from_bits(id) else {
                bail!("mask pattern {} is outside 0..=7", id);
            };
            options = options.with_mask(mask);
        }
        if let Some(eci) = self.eci {
            options = options.with_eci(eci);
        }
        Ok(options)
    }

    fn encode(&self) -> anyhow::Result<Symbol> {
        let options = self.options()?;
        encode(self.data.as_bytes(), &options).context("failed to encode payload")
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("qrmatrix=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Encode(args) => print_symbol(&args.encode()?),
        Command::Inspect(args) => inspect_cmd(&args.encode()?),
        Command::Verify(args) => verify_cmd(&args)?,
    }

    Ok(())
}

/// Two modules per character cell, with a four-module quiet zone
fn print_symbol(symbol: &Symbol) {
    let size = symbol.side_length() as isize;
    let quiet = 4isize;
    let dark = |row: isize, col: isize| {
        row >= 0 && col >= 0 && row < size && col < size && symbol.is_dark(row as usize, col as usize)
    };

    for row in (-quiet..size + quiet).step_by(2) {
        let line: String = (-quiet..size + quiet)
            .map(|col| match (dark(row, col), dark(row + 1, col)) {
                (true, true) => '█',
                (true, false) => '▀',
                (false, true) => '▄',
                (false, false) => ' ',
            })
            .collect();
        println!("{}", line);
    }
}

fn region_char(region: RegionTag) -> char {
    match region {
        RegionTag::Finder => 'F',
        RegionTag::Separator => 's',
        RegionTag::TimingH | RegionTag::TimingV => 't',
        RegionTag::Alignment => 'A',
        RegionTag::Format => 'f',
        RegionTag::VersionInfo => 'v',
        RegionTag::Data => '.',
    }
}

fn inspect_cmd(symbol: &Symbol) {
    println!(
        "version={} size={} level={:?} mask={}",
        symbol.version().number(),
        symbol.side_length(),
        symbol.ec_level(),
        symbol.mask_pattern().id()
    );
    match symbol.penalties() {
        Some(penalties) => {
            for (id, penalty) in penalties.iter().enumerate() {
                let marker = if id == symbol.mask_pattern().id() as usize { " <" } else { "" };
                println!("  mask {}: penalty {}{}", id, penalty, marker);
            }
        }
        None => println!("  mask fixed by caller"),
    }
    println!();
    let size = symbol.side_length();
    for row in 0..size {
        let line: String = (0..size)
            .filter_map(|col| symbol.region_at(row, col).map(region_char))
            .collect();
        println!("{}", line);
    }
}

fn verify_cmd(args: &EncodeArgs) -> anyhow::Result<()> {
    let symbol = args.encode()?;
    let decoded = read_symbol(&symbol).context("symbol could not be read back")?;
    if decoded.payload != args.data.as_bytes() {
        bail!(
            "payload mismatch: encoded {} bytes, read back {} bytes",
            args.data.len(),
            decoded.payload.len()
        );
    }
    println!(
        "ok: version {} level {:?} mask {} ({} bytes)",
        decoded.version.number(),
        decoded.ec_level,
        decoded.mask_pattern.id(),
        decoded.payload.len()
    );
    Ok(())
}
