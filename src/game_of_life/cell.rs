//! Per-position cell state

use serde::{Deserialize, Serialize};

/// A single grid position.
///
/// The age counts how many consecutive generations the cell has been alive;
/// an age of zero means the cell is dead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cell {
    age: u32,
}

impl Cell {
    /// Create a dead cell
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cell with the given age (0 is dead)
    pub fn with_age(age: u32) -> Self {
        let mut cell = Self::new();
        cell.set_age(age);
        cell
    }

    /// Set the cell's age; zero kills it
    pub fn set_age(&mut self, age: u32) {
        if age == 0 {
            self.kill();
        } else {
            self.age = age;
        }
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn is_alive(&self) -> bool {
        self.age > 0
    }

    /// Binary state as written by the default writer format
    pub fn state(&self) -> u8 {
        u8::from(self.is_alive())
    }

    /// Advance the cell by one living generation (a dead cell is born at age 1)
    pub fn grow(&mut self) {
        self.age = self.age.saturating_add(1);
    }

    pub fn kill(&mut self) {
        self.age = 0;
    }

    /// Step the age back by one generation; a cell at age 1 dies
    pub fn decay(&mut self) {
        if self.age <= 1 {
            self.kill();
        } else {
            self.age -= 1;
        }
    }
}
