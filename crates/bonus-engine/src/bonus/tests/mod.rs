mod common;
mod properties;
mod report;
