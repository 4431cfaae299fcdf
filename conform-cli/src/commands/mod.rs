pub mod header;
pub mod scan;
