pub mod cli;
pub mod config;
pub mod convert;
pub mod doctor;
pub mod engine;
pub mod error;
pub mod pages;
pub mod probe;
pub mod report;
pub mod util;
