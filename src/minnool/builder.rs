//! Turns extraction output into a [`Book`] ready for the library.
//!
//! Construction is pure: an id, a timestamp and a cover colour are attached
//! and nothing else happens. The clock and the random source are parameters
//! of [`build_with`] so callers that need determinism (tests, replays) can
//! supply their own.

use crate::model::{Book, ExtractionResult, COVER_PALETTE};
use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use tracing::warn;
use uuid::Uuid;

pub fn build(extraction: ExtractionResult) -> Book {
    build_with(extraction, Utc::now(), &mut rand::thread_rng())
}

pub fn build_with<R: Rng>(extraction: ExtractionResult, now: DateTime<Utc>, rng: &mut R) -> Book {
    let id = new_id(os_entropy(), now, rng);
    let cover_color = COVER_PALETTE
        .choose(rng)
        .copied()
        .unwrap_or(COVER_PALETTE[0])
        .to_string();

    Book {
        id,
        title: extraction.title,
        author: None,
        content: extraction.content,
        imported_at: now.timestamp_millis(),
        cover_color,
    }
}

fn os_entropy() -> Result<[u8; 16], rand::Error> {
    let mut bytes = [0u8; 16];
    OsRng.try_fill_bytes(&mut bytes)?;
    Ok(bytes)
}

/// A random UUID v4 when the OS random source works, otherwise base-36
/// epoch milliseconds followed by a base-36 suffix from `rng`.
fn new_id<R: Rng>(entropy: Result<[u8; 16], rand::Error>, now: DateTime<Utc>, rng: &mut R) -> String {
    match entropy {
        Ok(bytes) => uuid::Builder::from_random_bytes(bytes)
            .into_uuid()
            .to_string(),
        Err(e) => {
            warn!(error = %e, "os random source unavailable, using time-based id");
            time_random_id(now, rng)
        }
    }
}

fn time_random_id<R: Rng>(now: DateTime<Utc>, rng: &mut R) -> String {
    let millis = u64::try_from(now.timestamp_millis()).unwrap_or_default();
    format!("{}{}", to_base36(millis), to_base36(rng.gen()))
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
