pub mod assessment;
pub mod patient;
pub mod settings;
pub mod statistics;
