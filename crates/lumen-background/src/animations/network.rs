//! Drifting node network animation (stateful).
//!
//! A fixed set of nodes drifts at constant velocity, bouncing off the
//! surface edges. Pairs closer than [`LINK_DISTANCE`] are joined by a line
//! that fades out with distance. Every pair is checked every frame, which
//! is fine for tens of nodes and not meant for thousands.

use glam::Vec2;
use lumen_core::NetworkSettings;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::frame_loop::Animation;
use crate::surface::Surface;

/// Pairs at or beyond this distance are not linked.
pub const LINK_DISTANCE: f32 = 140.0;

/// Opacity of a link between two coincident nodes.
pub const LINK_OPACITY: f32 = 0.35;

/// Radius of a drawn node.
pub const NODE_RADIUS: f32 = 1.2;

/// Opacity of a drawn node.
pub const NODE_OPACITY: f32 = 0.7;

/// Largest initial velocity component, per frame.
const MAX_DRIFT: f32 = 0.2;

/// A point drifting across the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl Node {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self { position, velocity }
    }
}

/// A line to draw between two nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub from: usize,
    pub to: usize,
    pub opacity: f32,
}

/// Random nodes spread over a `width` × `height` surface.
pub fn spawn_nodes(count: usize, width: f32, height: f32, rng: &mut impl Rng) -> Vec<Node> {
    (0..count)
        .map(|_| {
            let position = Vec2::new(up_to(rng, width), up_to(rng, height));
            let velocity = Vec2::new(
                rng.random_range(-MAX_DRIFT..=MAX_DRIFT),
                rng.random_range(-MAX_DRIFT..=MAX_DRIFT),
            );
            Node::new(position, velocity)
        })
        .collect()
}

fn up_to(rng: &mut impl Rng, max: f32) -> f32 {
    if max > 0.0 {
        rng.random_range(0.0..=max)
    } else {
        0.0
    }
}

/// Velocity along one axis after the boundary test.
///
/// The component flips exactly when `position` lies outside `[0, bound]`.
pub fn reflect(position: f32, velocity: f32, bound: f32) -> f32 {
    if position < 0.0 || position > bound {
        -velocity
    } else {
        velocity
    }
}

/// Move a node one frame and bounce it off the bounds.
///
/// The position is never corrected, so a node may sit one frame outside.
pub fn step_node(node: &mut Node, bounds: Vec2, speed: f32) {
    node.position += node.velocity * speed;
    node.velocity.x = reflect(node.position.x, node.velocity.x, bounds.x);
    node.velocity.y = reflect(node.position.y, node.velocity.y, bounds.y);
}

/// Opacity of a link spanning `distance`, or `None` when too far apart.
pub fn link_opacity(distance: f32) -> Option<f32> {
    (distance < LINK_DISTANCE).then(|| (1.0 - distance / LINK_DISTANCE) * LINK_OPACITY)
}

/// Every unordered pair close enough to link.
pub fn links(nodes: &[Node]) -> Vec<Link> {
    let mut links = Vec::new();
    for (i, a) in nodes.iter().enumerate() {
        for (j, b) in nodes.iter().enumerate().skip(i + 1) {
            if let Some(opacity) = link_opacity(a.position.distance(b.position)) {
                links.push(Link {
                    from: i,
                    to: j,
                    opacity,
                });
            }
        }
    }
    links
}

/// The node network animation.
#[derive(Debug)]
pub struct NodeNetwork {
    settings: NetworkSettings,
    nodes: Vec<Node>,
    bounds: Vec2,
    rng: StdRng,
}

impl NodeNetwork {
    pub fn new(settings: NetworkSettings) -> Self {
        Self::with_rng(settings, StdRng::from_os_rng())
    }

    pub fn with_rng(settings: NetworkSettings, rng: StdRng) -> Self {
        Self {
            settings,
            nodes: Vec::new(),
            bounds: Vec2::ZERO,
            rng,
        }
    }

    /// Start from explicit nodes on a `width` × `height` surface.
    pub fn with_nodes(mut self, nodes: Vec<Node>, width: f32, height: f32) -> Self {
        self.nodes = nodes;
        self.bounds = Vec2::new(width, height);
        self
    }

    pub fn settings(&self) -> &NetworkSettings {
        &self.settings
    }

    /// Color and speed apply on the next frame; node count on the next start.
    pub fn set_settings(&mut self, settings: NetworkSettings) {
        self.settings = settings;
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Bounds used for reflection.
    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }
}

impl Animation for NodeNetwork {
    fn name(&self) -> &'static str {
        "network"
    }

    fn enabled(&self) -> bool {
        self.settings.enabled
    }

    fn initialize(&mut self, width: f32, height: f32) {
        let count = self.settings.node_count as usize;
        self.nodes = spawn_nodes(count, width, height, &mut self.rng);
        self.bounds = Vec2::new(width, height);
    }

    fn on_resize(&mut self, width: f32, height: f32) {
        // Nodes outside the new bounds drift back on their next reflection
        self.bounds = Vec2::new(width, height);
    }

    fn render_frame(&mut self, surface: &mut dyn Surface) {
        surface.clear();

        for node in &mut self.nodes {
            step_node(node, self.bounds, self.settings.speed);
        }

        let color = self.settings.color;
        for link in links(&self.nodes) {
            let from = self.nodes[link.from].position;
            let to = self.nodes[link.to].position;
            surface.draw_line(from, to, color, link.opacity);
        }

        for node in &self.nodes {
            surface.fill_circle(node.position, NODE_RADIUS, color, NODE_OPACITY);
        }
    }
}
