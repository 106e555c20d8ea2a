//! Seams between the runner and the
//! outside world.
pub mod clock;
pub mod random;
pub mod repo;
pub mod sink;
