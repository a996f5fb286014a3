use serde::{Deserialize, Serialize};
use slotmap::new_key_type;
use std::fmt;
use std::str::FromStr;

new_key_type! {
    /// Identifies a listener registered on a [`Publisher`](crate::event::Publisher).
    pub struct SubscriptionId;
}

/// Position of a cell in the voxel world. Cheap to copy, hash and compare.
///
/// Valid cells lie in `[0, world_size)` on every axis. Coordinates are signed
/// so that the -1 neighbours of boundary cells are representable and can be
/// rejected by [`CellPos::in_bounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl CellPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The position displaced by `(dx, dy, dz)`, or `None` on `i32` overflow.
    pub fn offset(self, (dx, dy, dz): (i32, i32, i32)) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
            z: self.z.checked_add(dz)?,
        })
    }

    /// Whether every axis lies in `[0, world_size)`.
    pub fn in_bounds(&self, world_size: i32) -> bool {
        let axis = |v: i32| (0..world_size).contains(&v);
        axis(self.x) && axis(self.y) && axis(self.z)
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

/// Errors from parsing the `"x,y,z"` text form of a [`CellPos`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CellKeyError {
    #[error("expected three comma-separated coordinates, got '{key}'")]
    WrongArity { key: String },
    #[error("invalid coordinate '{component}' in key '{key}'")]
    InvalidComponent { key: String, component: String },
}

impl FromStr for CellPos {
    type Err = CellKeyError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = key.split(',').collect();
        let [x, y, z] = parts.as_slice() else {
            return Err(CellKeyError::WrongArity {
                key: key.to_string(),
            });
        };

        let parse = |component: &str| {
            component
                .trim()
                .parse::<i32>()
                .map_err(|_| CellKeyError::InvalidComponent {
                    key: key.to_string(),
                    component: component.to_string(),
                })
        };

        Ok(Self::new(parse(*x)?, parse(*y)?, parse(*z)?))
    }
}
