pub mod aggregates;
pub mod config;
pub mod dataset;
pub mod render;
pub mod report;
pub mod state;
pub mod views;
