// src/lib.rs
// Main library module declarations

pub mod adapter;
pub mod analysis;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
