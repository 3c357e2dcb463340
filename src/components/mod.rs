//! Browser hosts for the headless core.

pub mod force_graph;
