pub mod insert_all;
pub mod list;
