#![allow(dead_code, unused_imports)]

pub mod cli;
pub mod config;
pub mod connection;
pub mod error;
pub mod lang;
pub mod manager;
pub mod protocol;
pub mod state;
pub mod types;
pub mod ui;
