//! RNG module - seeded randomness and the upcoming-shape queue
//!
//! The queue is refilled with a shuffled permutation of all seven shapes
//! whenever it drops below [`QUEUE_LOOKAHEAD`] entries, so every shape appears
//! once per bag. The RNG is an explicit value owned by the board: cloning a
//! board clones its future, which keeps search clones and tests reproducible.

use std::collections::VecDeque;

use crate::types::{Shape, QUEUE_LOOKAHEAD};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Low bits of an LCG have short periods.
        (self.next_u32() >> 8) % max.max(1)
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Produce one shuffled bag of all seven shapes
pub fn shuffled_bag(rng: &mut SimpleRng) -> [Shape; 7] {
    let mut bag = Shape::ALL;
    rng.shuffle(&mut bag);
    bag
}

/// Upcoming shapes, consumed from the front
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceQueue {
    shapes: VecDeque<Shape>,
}

impl PieceQueue {
    /// Wrap an initial sequence and top it up to the lookahead
    pub fn new(initial: &[Shape], rng: &mut SimpleRng) -> Self {
        let mut queue = Self {
            shapes: initial.iter().copied().collect(),
        };
        queue.refill(rng);
        queue
    }

    fn refill(&mut self, rng: &mut SimpleRng) {
        while self.shapes.len() < QUEUE_LOOKAHEAD {
            self.shapes.extend(shuffled_bag(rng));
        }
    }

    /// Pop the next shape; the queue never runs dry.
    pub fn pop(&mut self, rng: &mut SimpleRng) -> Shape {
        self.refill(rng);
        let shape = self.shapes.pop_front().unwrap_or(Shape::I);
        self.refill(rng);
        shape
    }

    pub fn peek(&self) -> Option<Shape> {
        self.shapes.front().copied()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Shape> + '_ {
        self.shapes.iter().copied()
    }
}
