//! Sundial is a small HTTP service that answers "when does the sun rise
//! and set in <place> on <date>?" in that place's local time.
//!
//! One endpoint, four upstream calls in sequence: forward geocode (place →
//! coordinates + timezone), solar times (coordinates + date → UTC clock
//! times), reverse geocode (coordinates → city/state, best effort), and a
//! UTC-to-local conversion for the two clock times.

pub mod config;
pub mod geocode;
pub mod localtime;
pub mod server;
pub mod suntimes;
