//! Core library: artifact loading, text extraction, classification, organizing.

pub mod artifacts;
pub mod classify;
pub mod config;
pub mod extractor;
pub mod models;
pub mod organizer;
pub mod pipeline;
pub mod report;
