// Presentation layer - rendering for the chat front end
pub mod status;
