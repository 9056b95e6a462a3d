//! # Workshop Core
//!
//! Domain types and booking rules shared by every crate in the workspace:
//! the fixed Saturday schedule, the slot engine that decides which hours are
//! still bookable, the storage and event-sink seams, and the booking service
//! that ties them together.

pub mod dates;
pub mod errors;
pub mod events;
pub mod models;
pub mod schedule;
pub mod service;
pub mod slots;
pub mod store;
