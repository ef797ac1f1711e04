use std::sync::LazyLock;

use chrono::DateTime;
use rand::Rng;
use regex::Regex;

use crate::{error::ResolveError, types::PagePosition};

/// Page size used for every history request.
pub const HISTORY_PAGE_SIZE: u64 = 200;

/// Maps a reverse-chronological index onto a history page and offset.
///
/// `n = 1` is the most recent scrobble and `n = max_playcount` the oldest.
/// The position is measured from the oldest end, which stays stable while
/// new scrobbles are prepended; `max_playcount` itself may be stale.
pub fn page_position(n: u64, max_playcount: u64) -> Result<PagePosition, ResolveError> {
    if n == 0 || n > max_playcount {
        return Err(ResolveError::InvalidIndex(format!(
            "n must be between 1 and {}, got {}",
            max_playcount, n
        )));
    }

    let position_from_oldest = max_playcount - n + 1;
    Ok(PagePosition {
        page: (position_from_oldest - 1) / HISTORY_PAGE_SIZE + 1,
        offset: ((position_from_oldest - 1) % HISTORY_PAGE_SIZE) as usize,
    })
}

/// Trailing " - Qualifier" suffixes that only hurt search recall.
static DASH_QUALIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\s+-\s+(?:(?:\d{4}\s+)?remaster(?:ed)?(?:\s+\d{4})?(?:\s+version)?|radio\s+edit|(?:single|album)\s+version|live(?:\s+(?:at|from|in|version|recording)\b.*)?|(?:mono|stereo)(?:\s+version)?)\s*$",
    )
    .expect("valid dash qualifier pattern")
});

static FEATURING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*[\(\[](?:feat\.?|ft\.?|featuring)\s+[^\)\]]*[\)\]]")
        .expect("valid featuring pattern")
});

static BRACKET_QUALIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\s*[\(\[](?:live(?:\s+(?:at|from|in)\b[^\)\]]*)?|(?:\d{4}\s+)?remaster(?:ed)?(?:\s+[^\)\]]*)?|radio\s+edit|(?:mono|stereo)(?:\s+version)?)[\)\]]",
    )
    .expect("valid bracket qualifier pattern")
});

/// Strips edition qualifiers from a track title before searching Spotify.
///
/// Only well-known qualifiers are removed ("- Remastered 2011",
/// "(feat. X)", "[Live]", ...); any other bracketed text is part of the
/// title and survives. Never returns an empty string for a non-empty title.
pub fn normalize_title(title: &str) -> String {
    let original = title.trim();
    let mut current = original.to_string();

    loop {
        let next = FEATURING.replace_all(&current, "");
        let next = BRACKET_QUALIFIER.replace_all(&next, "");
        let next = DASH_QUALIFIER.replace(&next, "").trim().to_string();
        if next == current {
            break;
        }
        current = next;
    }

    if current.is_empty() {
        original.to_string()
    } else {
        current
    }
}

/// Builds a Spotify field-filter query for one track.
pub fn search_query(title: &str, artist: &str) -> String {
    format!(
        "track:\"{}\" artist:\"{}\"",
        title.replace('"', ""),
        artist.replace('"', "")
    )
}

/// Draws a uniformly random reverse-chronological index in `1..=max_playcount`.
pub fn random_index(max_playcount: u64) -> Option<u64> {
    if max_playcount == 0 {
        return None;
    }
    Some(rand::rng().random_range(1..=max_playcount))
}

pub fn format_timestamp(timestamp: Option<i64>) -> String {
    match timestamp.and_then(|ts| DateTime::from_timestamp(ts, 0)) {
        Some(date) => date.format("%Y-%m-%d %H:%M").to_string(),
        None => "now playing".to_string(),
    }
}
