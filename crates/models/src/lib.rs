pub mod coverage;
pub mod days;
pub mod schedule;
