//! Configuration parsing for the engine

pub mod engine;
