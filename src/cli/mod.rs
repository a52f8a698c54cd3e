//! Command implementations. Each takes the store (and whatever context it
//! needs) explicitly; nothing here reaches for globals.

pub mod ls;
pub mod prompt;
pub mod rm;
pub mod show;
