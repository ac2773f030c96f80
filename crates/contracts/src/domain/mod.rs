pub mod a001_product;
pub mod a002_template;
pub mod common;
