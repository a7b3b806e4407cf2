// Library root: configuration, external sources and the application event
// loop that sits between them and a front end.

pub mod app;
pub mod config;
pub mod protocol;
pub mod sources;
