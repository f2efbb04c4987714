pub mod dto;
pub mod field;
pub mod field_type;
pub mod form;
pub mod submission;
