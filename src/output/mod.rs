//! Reports, formatters and the PDF renderer

pub mod formatter;
pub mod render;
pub mod report;
