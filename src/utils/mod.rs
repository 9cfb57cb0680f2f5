pub mod code_regions;
pub mod offsets;
