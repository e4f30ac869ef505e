//! devproxy Core Library
//! Configuration, prefix matching and the dev server redirect server

pub mod config;
pub mod proxy;
