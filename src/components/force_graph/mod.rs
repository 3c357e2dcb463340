//! Leptos canvas view over a [`GraphScene`](crate::scene::GraphScene).

mod component;
mod render;
mod state;

pub use component::GraphVisualizerCanvas;
