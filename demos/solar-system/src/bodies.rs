/// Body data: sizes, orbits and surface names, indexed by body.
///
/// Distances and speeds are picked for readability, not physics: orbits are
/// uniform circles and sizes are only roughly proportional.

use orrery_engine::InitError;

use crate::orbit::Orbit;

pub const MERCURY: usize = 0;
pub const VENUS: usize = 1;
pub const EARTH: usize = 2;
pub const MARS: usize = 3;
pub const JUPITER: usize = 4;
pub const SATURN: usize = 5;
pub const URANUS: usize = 6;
pub const NEPTUNE: usize = 7;
pub const BODY_COUNT: usize = 8;

/// Names, also used as texture keys in the asset manifest.
pub const BODY_NAMES: [&str; BODY_COUNT] = [
    "mercury", "venus", "earth", "mars", "jupiter", "saturn", "uranus", "neptune",
];

/// Sphere radius per body.
pub const SIZES: [f64; BODY_COUNT] = [0.39, 0.95, 1.0, 0.53, 11.0, 9.1, 3.9, 4.0];

/// Orbital radius per body.
pub const DISTANCES: [f64; BODY_COUNT] = [20.0, 35.0, 50.0, 75.0, 110.0, 140.0, 170.0, 190.0];

/// Angular speed multiplier per body.
pub const SPEEDS: [f64; BODY_COUNT] = [0.2, 0.1, 0.05, 0.04, 0.01, 0.008, 0.006, 0.004];

/// Sphere tessellation for bodies and the sun.
pub const SPHERE_SEGMENTS: u32 = 32;

// -- Sun --

pub const SUN_RADIUS: f32 = 15.0;
pub const SUN_EMISSIVE: u32 = 0xf08f2a;
pub const SUN_EMISSIVE_INTENSITY: f32 = 1.5;
pub const SUN_LIGHT_COLOR: u32 = 0xffe9b1;
pub const SUN_LIGHT_INTENSITY: f32 = 10000.0;
pub const SUN_LIGHT_RANGE: f32 = 1000.0;

// -- Ring --

pub const RINGED_BODY: usize = SATURN;
/// Ring radii as multiples of the body's size.
pub const RING_INNER: f64 = 1.2;
pub const RING_OUTER: f64 = 2.0;

/// Startup configuration failure. Fatal: no scene is built.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{table} table has {found} entries, expected {expected}")]
    TableLength {
        table: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("no body at index {0}")]
    MissingBody(usize),
}

impl From<ConfigError> for InitError {
    fn from(err: ConfigError) -> Self {
        InitError::Config(err.to_string())
    }
}

/// Fail unless `table` has exactly `expected` entries.
pub fn check_len(table: &'static str, expected: usize, found: usize) -> Result<(), ConfigError> {
    if expected == found {
        Ok(())
    } else {
        Err(ConfigError::TableLength { table, expected, found })
    }
}

/// Immutable description of one body.
#[derive(Debug, Clone, PartialEq)]
pub struct BodySpec {
    pub index: usize,
    pub name: String,
    pub size: f64,
    pub orbit: Orbit,
}

/// Validated per-body tables.
#[derive(Debug, Clone)]
pub struct BodyTable {
    bodies: Vec<BodySpec>,
}

impl BodyTable {
    /// Zip parallel tables into body specs. The names table sets the body count;
    /// every other table must match it.
    pub fn new(
        names: &[&str],
        sizes: &[f64],
        distances: &[f64],
        speeds: &[f64],
    ) -> Result<Self, ConfigError> {
        let count = names.len();
        check_len("size", count, sizes.len())?;
        check_len("distance", count, distances.len())?;
        check_len("speed", count, speeds.len())?;

        let bodies = names
            .iter()
            .enumerate()
            .map(|(index, name)| BodySpec {
                index,
                name: name.to_string(),
                size: sizes[index],
                orbit: Orbit::new(distances[index], speeds[index]),
            })
            .collect();
        Ok(Self { bodies })
    }

    /// The eight-body solar system.
    pub fn solar() -> Result<Self, ConfigError> {
        Self::new(&BODY_NAMES, &SIZES, &DISTANCES, &SPEEDS)
    }

    pub fn get(&self, index: usize) -> Result<&BodySpec, ConfigError> {
        self.bodies.get(index).ok_or(ConfigError::MissingBody(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &BodySpec> {
        self.bodies.iter()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}
