// Application errors
use crate::domain::aquarium::ChannelId;
use crate::domain::error::AquariumError;
use thiserror::Error;
use tokio::task::JoinError;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("tick task for channel {channel_id} failed: {source}")]
    TickTask {
        channel_id: ChannelId,
        #[source]
        source: JoinError,
    },
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("channel {0} already has an aquarium")]
    AlreadyExists(ChannelId),

    #[error("channel {0} has no aquarium")]
    NotFound(ChannelId),

    #[error(transparent)]
    Aquarium(#[from] AquariumError),

    #[error(transparent)]
    Runner(#[from] RunnerError),
}
