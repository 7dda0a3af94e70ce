// Application layer - live aquariums and their owners
pub mod aquarium_service;
pub mod clock;
pub mod error;
pub mod owner;
pub mod tank_runner;
pub mod tick_observer;
