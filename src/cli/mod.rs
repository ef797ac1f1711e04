//! # CLI Module
//!
//! Command-line front end for scrobble-slots. Every command builds a
//! [`crate::resolver::Resolver`] from the environment and prints the result
//! with the crate's logging macros or as a table.
//!
//! ## Commands
//!
//! - [`serve`] - Runs the HTTP service used by the slot machine UI
//! - [`playcount`] - Prints a user's total scrobble count
//! - [`track`] - Resolves the n-th most recent scrobble (1 = latest)
//! - [`spin`] - Draws a random index and resolves it, optionally opening the
//!   Spotify match in the browser
//!
//! ## Usage Patterns
//!
//! ```bash
//! scrobble-slots serve --addr 0.0.0.0:3000
//! scrobble-slots playcount --user rj
//! scrobble-slots track --user rj --n 1200
//! scrobble-slots spin --user rj --open
//! ```
//!
//! Long-running upstream calls show a spinner. Fatal failures print an error
//! and exit with status 1.

mod lookup;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub use lookup::playcount;
pub use lookup::serve;
pub use lookup::spin;
pub use lookup::track;

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
