pub mod figure;
pub mod label;
pub mod names;
