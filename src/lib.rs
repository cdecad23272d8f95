pub mod config;
pub mod entries;
pub mod feed;
pub mod league;
pub mod output;
pub mod pool;
pub mod scoring;
pub mod wins;
