//! Value generators for placeholder substitution.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::dates::apply_offset;

/// Uniform random source in `[0, 1)`.
///
/// Injectable so that bound behavior is testable: a source pinned at 0
/// must produce the lower bound of [`random_int`], a source pinned at 1
/// the upper bound.
pub trait RandomSource {
    /// Returns the next sample in `[0, 1)`.
    fn next_f64(&mut self) -> f64;
}

/// Default source backed by the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_f64(&mut self) -> f64 {
        rand::random::<f64>()
    }
}

/// Generates a globally-unique 36-character identifier.
pub fn guid() -> String {
    Uuid::new_v4().to_string()
}

/// Samples an integer in `[lower, upper]` inclusive and renders it as a
/// decimal string.
///
/// The sample is `round(lower + r * (upper - lower))` for `r` drawn from
/// `source`, so 0 maps exactly onto the lower bound and 1 exactly onto the
/// upper bound.
pub fn random_int(lower: i64, upper: i64, source: &mut dyn RandomSource) -> String {
    let r = source.next_f64();
    let value = (lower as f64 + r * (upper - lower) as f64).round() as i64;
    value.to_string()
}

/// Current instant, optionally advanced or retreated by a calendar offset.
pub fn timestamp(offset: Option<&str>, unit: Option<&str>) -> DateTime<Utc> {
    apply_offset(Utc::now(), offset, unit)
}

/// Builds a Basic-Auth header value from a username and password.
pub fn basic_auth(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}
