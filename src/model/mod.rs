pub mod arena;
pub mod config;
pub mod entity;
pub mod error;
pub mod events;
pub mod field;
pub mod geometry;
pub mod world;
