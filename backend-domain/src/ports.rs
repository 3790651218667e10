// Gateway and Store Port Traits (Interfaces)
// Define what the domain needs from infrastructure

pub mod gateways;
pub mod stores;

pub use gateways::*;
pub use stores::*;
