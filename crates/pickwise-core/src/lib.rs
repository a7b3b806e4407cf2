// Pickwise core: attribute model, entity catalog, roster state and the
// composition scoring/recommendation engine. No I/O beyond parsing.

pub mod attribute;
pub mod catalog;
pub mod engine;
pub mod roster;
pub mod session;
