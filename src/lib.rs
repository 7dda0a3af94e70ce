// Virtual aquarium simulation for chat channels
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
