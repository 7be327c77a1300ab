//! SparseStore Simulator
//!
//! Replays an out-of-order, range-fetched download of a synthetic object into
//! a sparse store, then checks that the reassembled data is complete.

use clap::Parser;
use sparsestore::{Config, Store, DEFAULT_MIN_CONTIGUOUS};
use tracing_subscriber::{fmt, EnvFilter};

/// SparseStore Simulator
#[derive(Parser, Debug)]
#[command(name = "sparsestore-sim")]
#[command(about = "Replay an out-of-order chunked fetch into a sparse store")]
#[command(version)]
struct Args {
    /// Logical size of the object, in bytes
    #[arg(short, long, default_value = "1048576")]
    length: usize,

    /// Size of each fetched chunk, in bytes
    #[arg(short, long, default_value = "4096")]
    chunk: usize,

    /// Merge threshold for touching segments, in bytes
    #[arg(short, long, default_value_t = DEFAULT_MIN_CONTIGUOUS)]
    min_contiguous: usize,

    /// Step between consecutively fetched chunk indexes
    #[arg(short, long, default_value = "7")]
    stride: usize,

    /// Extra bytes fetched past each chunk end, overlapping the next chunk
    #[arg(short, long, default_value = "0")]
    overlap: usize,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sparsestore=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("SparseStore Simulator v{}", sparsestore::VERSION);
    tracing::info!(
        "Object length: {}, chunk: {}, overlap: {}",
        args.length,
        args.chunk,
        args.overlap
    );

    if args.chunk == 0 {
        tracing::error!("Chunk size must be greater than zero");
        std::process::exit(1);
    }

    let config = Config::builder().min_contiguous(args.min_contiguous).build();

    let mut store = match Store::<u8>::with_config(config) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to create store: {}", e);
            std::process::exit(1);
        }
    };

    // Fetch chunks in a permuted order
    let chunk_count = args.length.div_ceil(args.chunk);
    let stride = coprime_stride(args.stride, chunk_count);
    let mut index = 0;

    for fetched in 0..chunk_count {
        let start = index * args.chunk;
        let end = start
            .saturating_add(args.chunk)
            .saturating_add(args.overlap)
            .min(args.length);
        let values: Vec<u8> = (start..end).map(value_at).collect();

        store.set(start, values);

        tracing::trace!(
            "Fetched chunk {} ({}/{}): [{}, {}), complete={}, segments={}",
            index,
            fetched + 1,
            chunk_count,
            start,
            end,
            store.has(0, args.length),
            store.segment_count()
        );

        index = (index + stride) % chunk_count;
    }

    // Verify the reassembled object
    let mut buf = vec![0u8; args.length];
    let complete = store.get(0, &mut buf);
    let mismatches = buf
        .iter()
        .enumerate()
        .filter(|(pos, value)| **value != value_at(*pos))
        .count();

    let stats = store.stats();
    tracing::info!(
        "Writes: {}, segments: {}, occupancy: {}, length: {}",
        stats.writes,
        stats.segments,
        stats.occupancy,
        stats.length
    );

    if !complete || mismatches > 0 {
        tracing::error!(
            "Verification failed: complete={}, mismatched bytes={}",
            complete,
            mismatches
        );
        std::process::exit(1);
    }

    tracing::info!("Verification passed");
}

/// Deterministic content of the synthetic object at `pos`
fn value_at(pos: usize) -> u8 {
    (pos % 251) as u8
}

/// Smallest stride >= `stride` (mod `count`) that visits every chunk once
fn coprime_stride(stride: usize, count: usize) -> usize {
    if count == 0 {
        return 1;
    }

    let mut stride = (stride % count).max(1);
    while gcd(stride, count) != 1 {
        stride += 1;
    }
    stride
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
