//! Page flow — what each wiki action renders or where it redirects.

pub mod controller;
pub mod views;

pub use controller::{Outcome, Page};
