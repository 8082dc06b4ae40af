// src/application/service/mod.rs
// Application services

pub mod demo;

pub use demo::DemoSampleTable;
