pub mod holidays;
pub mod maps;
pub mod status;
