// Library root for the line-oriented front end, so the console loop, input
// parser and renderer can be tested without a terminal.

pub mod console;
pub mod input;
pub mod render;
