// src/data_input/mod.rs

pub mod channel_resolver;
pub mod log_parser;
pub mod log_table;

// src/data_input/mod.rs
