#![deny(clippy::pedantic)]
#![allow(clippy::type_repetition_in_bounds)]

#[macro_use]
extern crate contracts;

pub mod cogs;
pub mod tree;
