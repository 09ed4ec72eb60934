//! Miscellaneous utilities for pfind.
//!
//! - [cli]: the command line definition and its merge with the config file.
//! - [helpers]: home directory lookup and value clamping.

pub mod cli;
pub mod helpers;

pub use helpers::{
    MAX_CHANNEL_CAPACITY, MIN_CHANNEL_CAPACITY, clamp_channel_capacity, get_home,
};
