//! Domain model for the Records domain

pub mod entities;
