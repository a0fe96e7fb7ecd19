mod error;
mod gateway;
mod provider;
mod repository;
mod wallet;

pub use {error::*, gateway::*, provider::*, repository::*, wallet::*};
