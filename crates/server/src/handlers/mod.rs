pub mod quiz;
pub mod system;
