pub mod utils;

mod catalog_tests;
mod db_tests;
