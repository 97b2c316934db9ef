pub mod status;
pub mod studio;
