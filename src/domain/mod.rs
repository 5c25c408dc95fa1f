// Domain layer - Facility view model types
pub mod conversation;
pub mod highlight;
pub mod snapshot;
