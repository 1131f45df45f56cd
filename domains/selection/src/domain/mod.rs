//! Domain model for the Selection domain

pub mod category;
pub mod entities;
pub mod outcome;
pub mod state;
