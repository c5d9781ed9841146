pub mod annotation;
pub mod app;
pub mod backend;
pub mod catalog;
pub mod form;
pub mod logging;
pub mod model;
pub mod settings;
