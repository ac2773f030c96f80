pub mod common;
pub mod u501_import_products;
pub mod u502_generate_from_template;
