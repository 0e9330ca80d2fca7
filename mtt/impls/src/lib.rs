#![deny(clippy::pedantic)]

#[macro_use]
extern crate contracts;

#[macro_use]
extern crate log;

pub mod cogs;
pub mod migration;
