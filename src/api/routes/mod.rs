pub mod meta;
pub mod report;
