pub mod commands;
pub mod context;
pub mod instructions;
pub mod locate;
pub mod patch;
pub mod secret;
pub mod term;
