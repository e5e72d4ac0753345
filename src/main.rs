// Format it, mount it, poke at it.

use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use flatfs::{
    helpers::hex_view::hex_view,
    layout::constants::{BLOCK_SIZE, DEFAULT_STORE_SIZE},
    store::store_struct::BlockStore,
};
use log::{LevelFilter, error, info};

#[derive(Parser)]
#[command(name = "flatfs")]
#[command(about = "A two-level 8.3 filesystem living in one flat file")]
struct Args {
    /// Log everything, not just the highlights. `RUST_LOG` still wins.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Make a brand new, empty backing file. Anything already there is wiped.
    Format {
        /// Backing file to create
        disk: PathBuf,
        /// Size of the backing file (e.g., 5M, 512K)
        #[arg(short, long, value_parser = parse_size, default_value_t = DEFAULT_STORE_SIZE)]
        size: u64,
    },
    /// Serve a backing file over FUSE until it is unmounted.
    Mount {
        /// Existing backing file
        disk: PathBuf,
        /// Where to mount it
        mountpoint: PathBuf,
    },
    /// Hex view of a single block.
    Dump {
        /// Existing backing file
        disk: PathBuf,
        /// Which block
        block: u64,
    },
}

fn parse_size(s: &str) -> Result<u64, String> {
    let upper = s.trim().to_uppercase();
    let (number, multiplier) = if let Some(number) = upper.strip_suffix("GB").or(upper.strip_suffix('G')) {
        (number, 1024 * 1024 * 1024)
    } else if let Some(number) = upper.strip_suffix("MB").or(upper.strip_suffix('M')) {
        (number, 1024 * 1024)
    } else if let Some(number) = upper.strip_suffix("KB").or(upper.strip_suffix('K')) {
        (number, 1024)
    } else {
        (upper.as_str(), 1)
    };

    number
        .trim()
        .parse::<u64>()
        .ok()
        .and_then(|n| n.checked_mul(multiplier))
        .ok_or_else(|| format!("`{s}` is not a size, try something like `5M`."))
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new().filter_level(level).parse_default_env().init();

    let result = match args.command {
        Command::Format { disk, size } => format_disk(disk, size),
        Command::Mount { disk, mountpoint } => mount(disk, mountpoint),
        Command::Dump { disk, block } => dump(disk, block),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn format_disk(disk: PathBuf, size: u64) -> Result<(), String> {
    let store = BlockStore::create(&disk, size).map_err(|error| format!("Could not format `{}`: {error}", disk.display()))?;
    info!(
        "Formatted `{}` with `{}` blocks of `{BLOCK_SIZE}` bytes.",
        disk.display(),
        store.block_count()
    );
    Ok(())
}

#[cfg(feature = "fuse")]
fn mount(disk: PathBuf, mountpoint: PathBuf) -> Result<(), String> {
    use std::ffi::OsStr;

    use flatfs::filesystem::filesystem_struct::{FilesystemOptions, FlatFS};

    let options = FilesystemOptions::new(disk, None);
    let filesystem = FlatFS::start(&options)
        .map_err(|error| format!("Could not open `{}`: {error}", options.disk_path().display()))?;

    let mount_options = [
        // No spaces after `-o` or it does not work lol.
        OsStr::new("-onodev"),
        OsStr::new("-onoatime"),
        OsStr::new("-onosuid"),
        OsStr::new("-orw"),
        OsStr::new("-ofsname=flatfs"),
    ];

    info!("Mounting at `{}`, unmount to stop.", mountpoint.display());
    // Zero threads for fully sync, everything takes the same lock anyways.
    fuse_mt::mount(fuse_mt::FuseMT::new(filesystem, 0), &mountpoint, &mount_options)
        .map_err(|error| format!("Mount failed: {error}"))?;
    info!("Unmounted.");
    Ok(())
}

#[cfg(not(feature = "fuse"))]
fn mount(_disk: PathBuf, _mountpoint: PathBuf) -> Result<(), String> {
    Err("This build has no FUSE support. Rebuild with `--features fuse` to mount.".to_string())
}

fn dump(disk: PathBuf, block: u64) -> Result<(), String> {
    let store = BlockStore::open(&disk).map_err(|error| format!("Could not open `{}`: {error}", disk.display()))?;
    let raw = store
        .read_block(block)
        .map_err(|error| format!("Could not read block `{block}`: {error}"))?;
    println!("Block {block}:");
    print!("{}", hex_view(&raw.data, block * BLOCK_SIZE as u64));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::parse_size;
    use test_log::test; // We want to see logs while testing.

    #[test]
    fn sizes() {
        assert_eq!(parse_size("5M"), Ok(5 * 1024 * 1024));
        assert_eq!(parse_size("512k"), Ok(512 * 1024));
        assert_eq!(parse_size("1GB"), Ok(1024 * 1024 * 1024));
        assert_eq!(parse_size("4096"), Ok(4096));
        assert!(parse_size("lots").is_err());
        assert!(parse_size("").is_err());
    }
}
