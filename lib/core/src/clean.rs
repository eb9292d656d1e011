//! Name cleaning for name / surname / patronymic columns
//!
//! Each value is normalized independently:
//! 1. HTML entities are decoded (`&#039;` becomes `'`)
//! 2. the text is lowercased
//! 3. digits and whitespace are removed
//!
//! and is then blanked (replaced with `""`) when what is left is a lone `-`,
//! a single word character, or is made up only of vowels or only of
//! non-vowels. The vowel set is exact: Latin `aoueiy` plus Cyrillic
//! `аяєоуиіїе`.
//!
//! Whitespace is stripped together with digits, before the discard check.
//! A padded single letter such as `" a"` therefore ends up blank instead of
//! surviving as `"a"`; otherwise a second pass would blank it and cleaning
//! would not be idempotent.
//!
//! Normalization runs to a fixed point, so `clean(clean(x)) == clean(x)`
//! even for double-encoded entities.

use crate::record::OrderRecord;
use once_cell::sync::Lazy;
use regex::Regex;

/// Vowels recognised by the cleaner, Latin then Cyrillic
pub const VOWELS: &str = "aoueiyаяєоуиіїе";

/// Upper bound on normalization passes; real input settles in one or two
const MAX_NORMALIZE_PASSES: usize = 8;

static NOISE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\d\s]").unwrap());

static DISCARD_RE: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(r"^(?:-|\w|[{v}]*|[^{v}]*)$", v = VOWELS);
    Regex::new(&pattern).unwrap()
});

/// Clean a single name-like value
pub fn clean_name(value: &str) -> String {
    let normalized = normalize(value);
    if DISCARD_RE.is_match(&normalized) {
        String::new()
    } else {
        normalized
    }
}

/// Clean a whole column, keeping row order and nulls in place
pub fn clean_column(column: &[Option<String>]) -> Vec<Option<String>> {
    column
        .iter()
        .map(|value| value.as_deref().map(clean_name))
        .collect()
}

/// Clean name, surname and patronymic of every order in place
pub fn clean_order_names(orders: &mut [OrderRecord]) {
    for order in orders.iter_mut() {
        for field in [&mut order.name, &mut order.surname, &mut order.patronymic] {
            if let Some(value) = field.as_mut() {
                *value = clean_name(value);
            }
        }
    }
}

fn normalize(value: &str) -> String {
    let mut current = normalize_once(value);
    for _ in 1..MAX_NORMALIZE_PASSES {
        let next = normalize_once(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn normalize_once(value: &str) -> String {
    let decoded = html_escape::decode_html_entities(value);
    let lowered = decoded.to_lowercase();
    NOISE_RE.replace_all(&lowered, "").into_owned()
}
