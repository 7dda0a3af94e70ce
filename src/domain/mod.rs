// Domain layer - aquarium state and the simulation rules
pub mod aquarium;
pub mod error;
pub mod fish;
pub mod rules;
pub mod status;
