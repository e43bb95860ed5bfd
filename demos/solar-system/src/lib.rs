use wasm_bindgen::prelude::*;
use orrery_engine::*;

pub mod bodies;
pub mod config;
pub mod driver;
pub mod game;
pub mod orbit;
pub mod registry;
pub mod substitution;
use game::SolarSystem;

orrery_web::export_game!(SolarSystem, "solar-system");
