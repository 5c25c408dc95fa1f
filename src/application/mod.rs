// Application layer - State synchronization and highlight coordination
pub mod chat;
pub mod fetcher;
pub mod gateway;
pub mod highlight;
pub mod view_model;
