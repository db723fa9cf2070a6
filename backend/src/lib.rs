pub mod config;
pub mod frame;
pub mod group;
pub mod sprite;
pub mod system;
