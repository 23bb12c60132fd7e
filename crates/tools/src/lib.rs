pub mod config;
pub mod controllers;
pub mod runner;
