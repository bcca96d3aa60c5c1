#![allow(unused_macros)]
//! Thin wrappers around the `log` macros that default the target to
//! [`OUR_LOGGER_NAME`], so applications can filter everything this crate
//! says with a single directive.

pub const OUR_LOGGER_NAME: &str = "dsnparse";

macro_rules! error {
    (target: $target:expr, $($arg:tt)+) => (::log::error!(target: $target, $($arg)+));
    ($($arg:tt)+) => (::log::error!(target: $crate::our_logger::OUR_LOGGER_NAME, $($arg)+))
}

macro_rules! warn {
    (target: $target:expr, $($arg:tt)+) => (::log::warn!(target: $target, $($arg)+));
    ($($arg:tt)+) => (::log::warn!(target: $crate::our_logger::OUR_LOGGER_NAME, $($arg)+))
}

macro_rules! info {
    (target: $target:expr, $($arg:tt)+) => (::log::info!(target: $target, $($arg)+));
    ($($arg:tt)+) => (::log::info!(target: $crate::our_logger::OUR_LOGGER_NAME, $($arg)+))
}

macro_rules! debug {
    (target: $target:expr, $($arg:tt)+) => (::log::debug!(target: $target, $($arg)+));
    ($($arg:tt)+) => (::log::debug!(target: $crate::our_logger::OUR_LOGGER_NAME, $($arg)+))
}

macro_rules! trace {
    (target: $target:expr, $($arg:tt)+) => (::log::trace!(target: $target, $($arg)+));
    ($($arg:tt)+) => (::log::trace!(target: $crate::our_logger::OUR_LOGGER_NAME, $($arg)+))
}

macro_rules! log_enabled {
    (target: $target:expr, $lvl:expr) => (::log::log_enabled!(target: $target, $lvl));
    ($lvl:expr) => (::log::log_enabled!(target: $crate::our_logger::OUR_LOGGER_NAME, $lvl))
}
