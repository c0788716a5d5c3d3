// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

//! This crate generates argument combinations for a set of named columns:
//!   * [generate::ExhaustiveIterator] Every row satisfying the constraints.
//!   * [generate::GeneratorState] A greedy set of rows covering every reachable pair of values.
//!
//! The other crates included provide the data-types used by these two generators.
//!
//! # Example
//! ```
//! use allpairs::columns::parse;
//! use allpairs::generate::{generate, Strategy};
//!
//! let set = parse("p1: v1, v2, v3;\np2: a, b;\np3: x, y;\n$assert p1=v1 => p2=a;").unwrap();
//! for row in generate(&set, Strategy::Pairwise) {
//!     assert!(row.is_complete());
//!     assert!(!(row.values()[0] == "v1" && row.values()[1] == "b"));
//! }
//! ```
//!
//! # Features
//! This crate provides the following optional feature:
//!   * `sub-time` Log the timings for all the [common::sub_time_it] calls.

#![deny(missing_docs, rustdoc::missing_crate_level_docs, future_incompatible)]

pub use cli;
pub use cm;
pub use columns;
pub use common;
pub use generate;
pub use row;
pub use writer;
