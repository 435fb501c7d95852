pub mod history;
pub mod languages;
pub mod query;
