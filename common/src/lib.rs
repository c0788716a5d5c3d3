// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

//! This crate provides common features used throughout the generators and the data-types of allpairs.
//!
//! # Features
//!   * `sub-time` Log the timings for all the [sub_time_it] calls.

#![deny(missing_docs, rustdoc::missing_crate_level_docs, future_incompatible)]

#[doc(hidden)]
pub use tracing;

/// The selection index used for a column that has not been assigned a value (yet).
///
/// This is the maximum value of [usize], so it can never be a valid index into a list of values.
pub const UNASSIGNED: usize = usize::MAX;

/// The text to print when a value is unassigned.
pub const DONT_CARE_TEXT: &str = "*";

/// Returns true if the given selection index refers to a value.
#[inline(always)]
pub fn is_assigned(selection: usize) -> bool {
    selection != UNASSIGNED
}

/// Calculate the number of unordered column pairs for the given number of columns.
///
/// # Example
/// ```
/// use common::pair_count;
///
/// assert_eq!(pair_count(4), 6);
/// assert_eq!(pair_count(1), 0);
/// ```
#[inline]
pub fn pair_count(columns: usize) -> usize {
    if columns < 2 {
        0
    } else {
        columns * (columns - 1) / 2
    }
}

/// Log the time it took to provide the result of the provided expression.
/// Returns the result of the provided expression.
///
/// # Example
/// ```
/// use common::time_it;
///
/// time_it!(0 + 1, "Addition");
/// ```
#[macro_export]
macro_rules! time_it {
    ($code:expr, $text:expr) => {{
        let now = std::time::Instant::now();
        let result = $code;
        let duration = now.elapsed();
        $crate::tracing::info!("{} takes: {}.{:06}s", $text, duration.as_secs(), duration.subsec_micros());
        result
    }};
}

/// Act like [time_it] if the `sub-time` feature is set. Otherwise return the provided expression.
///
/// # Example
/// ```
/// use common::sub_time_it;
///
/// sub_time_it!(0 + 1, "Addition");
/// ```
///
/// The `sub-time` feature has been set.
#[cfg(feature = "sub-time")]
#[macro_export]
macro_rules! sub_time_it {
    ($code:expr, $text:expr) => {{
        let now = std::time::Instant::now();
        let result = $code;
        let duration = now.elapsed();
        $crate::tracing::info!("{} takes: {}.{:06}s", $text, duration.as_secs(), duration.subsec_micros());
        result
    }};
}

/// Act like [time_it] if the `sub-time` feature is set. Otherwise return the provided expression.
///
/// # Example
/// ```
/// use common::sub_time_it;
///
/// sub_time_it!(0 + 1, "Addition");
/// ```
///
/// The `sub-time` feature has not been set.
#[cfg(not(feature = "sub-time"))]
#[macro_export]
macro_rules! sub_time_it {
    ($code:expr, $text:expr) => {{$code}};
}
