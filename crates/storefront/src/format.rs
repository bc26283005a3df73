//! Display formatting for fragments and the command line.
//!
//! Prices format through [`boutique_core::Price`]'s `Display`
//! (`1 234,50 €`); this module covers dates and star ratings.

use chrono::{DateTime, Datelike, Utc};

/// Full star glyph.
pub const FULL_STAR: char = '⭐';
/// Empty star glyph.
pub const EMPTY_STAR: char = '☆';

const STAR_COUNT: u32 = 5;

const MONTHS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Long French date: `17 octobre 2026`.
#[must_use]
pub fn format_date(date: &DateTime<Utc>) -> String {
    let month = MONTHS
        .get(date.month0() as usize)
        .copied()
        .unwrap_or_default();
    format!("{} {month} {}", date.day(), date.year())
}

/// Five-glyph star rating.
///
/// The whole part of the rating gives full stars; a fractional part of at
/// least one half adds one more. The rest are empty. Ratings outside
/// `0.0..=5.0` are clamped first.
#[must_use]
pub fn star_rating(rating: f64) -> String {
    let rating = if rating.is_finite() {
        rating.clamp(0.0, f64::from(STAR_COUNT))
    } else {
        0.0
    };
    let whole = rating.floor();
    let rounded_up = rating - whole >= 0.5;

    // `whole` is within 0..=5 after clamping.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let full = (whole as u32 + u32::from(rounded_up)).min(STAR_COUNT);

    let mut stars = String::new();
    for index in 0..STAR_COUNT {
        stars.push(if index < full { FULL_STAR } else { EMPTY_STAR });
    }
    stars
}
