//! Command handler implementations.

pub mod decrypt;
pub mod generate;
pub mod rotate;

pub use decrypt::DecryptCommand;
pub use generate::GenerateApikeyCommand;
pub use rotate::RotateCommand;
