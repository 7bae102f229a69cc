pub mod config;
pub mod db;
pub mod demo;
pub mod migrate;
pub mod models;
pub mod output;
pub mod provision;
