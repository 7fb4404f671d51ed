//! Layout simulation stepping.
//!
//! The force iteration itself lives outside the crate; the graph only needs
//! something that moves nodes one tick at a time. State between ticks is the
//! implementor's own.

use super::link::Link;
use super::node::Node;

pub trait Simulation {
    /// Advance one tick. May move and resize nodes; must not change ids.
    fn step(&mut self, nodes: &mut [Node], links: &[Link]);
}

impl<F> Simulation for F
where
    F: FnMut(&mut [Node], &[Link]),
{
    fn step(&mut self, nodes: &mut [Node], links: &[Link]) {
        self(nodes, links)
    }
}
