// SPDX-License-Identifier: GPL-3.0-only

//! Photo capture sequence
//!
//! This module implements the booth-side half of a session:
//!
//! ```text
//! Countdown → Shutter sound → Frame grab → Filter → PNG encode
//!                                                      ↓
//!                                           ordered photo list
//! ```
//!
//! The controller owns the photo list until the session is complete, then
//! hands it to the composer by value.

pub mod controller;
pub mod filters;

pub use controller::{CaptureController, CapturedPhoto};
pub use filters::FilterType;
