// Domain errors
use thiserror::Error;

use super::aquarium::{FishId, Substrate};
use super::fish::Species;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum WaterChangeError {
    #[error("cannot change {litres} litres in a {volume} litre tank")]
    VolumeExceeded { litres: u32, volume: u32 },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AquariumError {
    #[error("species {0} is not allowed")]
    InvalidSpecies(Species),

    #[error("decoration '{0}' is not allowed")]
    InvalidDecoration(String),

    #[error("substrate {0} is not allowed")]
    InvalidSubstrate(Substrate),

    #[error("no fish with id {0}")]
    FishNotFound(FishId),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("unknown species '{0}'")]
    UnknownSpecies(String),

    #[error("unknown gender '{0}'")]
    UnknownGender(String),

    #[error("unknown substrate '{0}'")]
    UnknownSubstrate(String),
}
