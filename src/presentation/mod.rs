// Presentation layer - Pure derivations for the visual components
pub mod feed;
pub mod flow;
pub mod graph;
