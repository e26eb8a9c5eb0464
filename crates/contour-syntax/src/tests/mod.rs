//! Crate-level tests for contour-syntax.

mod unit;
