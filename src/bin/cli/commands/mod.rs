pub mod cards;
pub mod demo;
pub mod stats;
pub mod study;
