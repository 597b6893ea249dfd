pub mod classify;
pub mod config;
pub mod converter;
pub mod emitter;
pub mod parser;
