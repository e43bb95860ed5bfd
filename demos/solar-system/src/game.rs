/// Solar System: eight bodies on circular orbits around a glowing sun,
/// with a runtime switch that swaps every body for a shared detailed model.
///
/// Control panel → game through custom events; game → control panel through
/// game events published every frame.

use glam::Vec3;
use orrery_engine::{
    AssetManifest, Color, EngineContext, Entity, EntityId, Game, GameConfig, GameEvent, InitError,
    InputEvent, InputQueue, LoadOutcome, MeshComponent, ModelHandle, DetailedObject, PointLight,
    SoundDescriptor, SoundEvent,
};

use crate::bodies::{
    BodyTable, RINGED_BODY, SPHERE_SEGMENTS, SUN_EMISSIVE, SUN_EMISSIVE_INTENSITY, SUN_LIGHT_COLOR,
    SUN_LIGHT_INTENSITY, SUN_LIGHT_RANGE, SUN_RADIUS,
};
use crate::config::{Options, SolarConfig};
use crate::driver::{AnimationDriver, AudioPlayer, Silence, SoundCommands};
use crate::registry::{BodyRegistry, RingSkin};
use crate::substitution::{SubstitutionController, SubstitutionState};

const MANIFEST: &str = include_str!("../assets/manifest.json");
const CONFIG: &str = include_str!("../assets/config.json");

// -- Custom event kinds from the control panel --

const CUSTOM_SET_SPEED: u32 = 1;
const CUSTOM_SET_REPLACE: u32 = 2;
const CUSTOM_SET_MUSIC: u32 = 3;

// -- Game event kinds to the control panel --

/// a = state code, b = arrivals, c = 1 when stalled on a failed load.
const EVENT_SUBSTITUTION: f32 = 1.0;
/// a = angle, b = speed, c = frames.
const EVENT_CLOCK: f32 = 2.0;
/// a = speed, b = replace flag, c = music flag.
const EVENT_OPTIONS: f32 = 3.0;

/// Everything built by a successful init.
struct Orrery {
    registry: BodyRegistry,
    controller: SubstitutionController,
    driver: AnimationDriver,
    /// Play and pause events, when music is wired up.
    music: Option<(SoundEvent, SoundEvent)>,
}

pub struct SolarSystem {
    config: SolarConfig,
    /// Parse failure of the startup config, reported by `init`.
    config_error: Option<String>,
    options: Options,
    orrery: Option<Orrery>,
}

impl SolarSystem {
    /// Configured from the embedded `assets/config.json`.
    pub fn new() -> Self {
        Self::from_config_json(CONFIG)
    }

    /// A malformed config does not panic here; `init` fails with it instead.
    pub fn from_config_json(json: &str) -> Self {
        match SolarConfig::from_json(json) {
            Ok(config) => Self::with_config(config),
            Err(err) => Self {
                config_error: Some(format!("solar config: {err}")),
                ..Self::with_config(SolarConfig::default())
            },
        }
    }

    pub fn with_config(config: SolarConfig) -> Self {
        Self {
            options: config.options(),
            config,
            config_error: None,
            orrery: None,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// `None` before a successful init.
    pub fn substitution_state(&self) -> Option<SubstitutionState> {
        self.orrery.as_ref().map(|o| o.controller.state())
    }

    pub fn angle(&self) -> f64 {
        self.orrery.as_ref().map_or(0.0, |o| o.driver.angle())
    }

    pub fn registry(&self) -> Option<&BodyRegistry> {
        self.orrery.as_ref().map(|o| &o.registry)
    }

    fn apply_custom(&mut self, kind: u32, a: f32) {
        match kind {
            CUSTOM_SET_SPEED => self.options.set_speed(a as f64),
            CUSTOM_SET_REPLACE => self.options.replace_planets = a != 0.0,
            CUSTOM_SET_MUSIC => self.options.play_music = a != 0.0,
            _ => log::debug!("unknown custom event {}", kind),
        }
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

fn music_events(
    name: &str,
    sound: &SoundDescriptor,
) -> Result<(SoundEvent, SoundEvent), InitError> {
    let (Some(play), Some(pause)) = (sound.event_id, sound.pause_event_id) else {
        return Err(InitError::Config(format!(
            "sound '{name}' needs both a play and a pause event"
        )));
    };
    // Sound events reach the host as single bytes.
    for id in [play, pause] {
        if u8::try_from(id).is_err() {
            return Err(InitError::Config(format!(
                "sound '{name}' event id {id} does not fit in a byte"
            )));
        }
    }
    Ok((SoundEvent(play), SoundEvent(pause)))
}

fn flag(on: bool) -> f32 {
    if on { 1.0 } else { 0.0 }
}

impl Game for SolarSystem {
    fn config(&self) -> GameConfig {
        GameConfig {
            max_instances: 32,
            max_lights: 1,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) -> Result<(), InitError> {
        if let Some(err) = &self.config_error {
            return Err(InitError::Config(err.clone()));
        }
        let manifest = AssetManifest::from_json(MANIFEST)?;
        let table = BodyTable::solar()?;

        // Resolve every asset before the scene is touched.
        let stars = manifest.texture("stars")?;
        let sun_skin = manifest.texture("sun")?;
        let skins = table
            .iter()
            .map(|spec| manifest.texture(&spec.name))
            .collect::<Result<Vec<_>, _>>()?;
        let ring_skin = if self.config.rings {
            table.get(RINGED_BODY)?;
            Some(manifest.texture("saturn_ring")?)
        } else {
            None
        };
        let model = manifest.model(&self.config.model)?.clone();
        let music = if self.config.music {
            let track = &self.config.music_track;
            Some(music_events(track, manifest.sound(track)?)?)
        } else {
            None
        };

        let skins: Vec<_> = skins.into_iter().map(|path| ctx.textures.load(path)).collect();
        let ring = ring_skin.map(|path| RingSkin {
            body: RINGED_BODY,
            texture: ctx.textures.load(path),
        });
        let registry = BodyRegistry::spawn_primitives(&table, &mut ctx.scene, &skins, ring)?;

        ctx.scene.background = Some(ctx.textures.load(stars));
        let sun_texture = ctx.textures.load(sun_skin);
        let sun: EntityId = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(sun).with_tag("sun").with_mesh(
                MeshComponent::sphere(SUN_RADIUS, SPHERE_SEGMENTS)
                    .with_texture(sun_texture)
                    .with_emissive(Color::from_hex(SUN_EMISSIVE), SUN_EMISSIVE_INTENSITY),
            ),
        );
        ctx.lights.add(PointLight::new(
            Vec3::ZERO,
            Color::from_hex(SUN_LIGHT_COLOR).to_array(),
            SUN_LIGHT_INTENSITY,
            SUN_LIGHT_RANGE,
        ));

        log::info!(
            "solar-system: {} bodies, rings {}, music {}, model '{}'",
            registry.len(),
            ring.is_some(),
            music.is_some(),
            self.config.model,
        );

        self.orrery = Some(Orrery {
            registry,
            controller: SubstitutionController::new(model),
            driver: AnimationDriver::new(sun, self.config.spin_rate),
            music,
        });
        Ok(())
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            if let InputEvent::Custom { kind, a, .. } = *event {
                self.apply_custom(kind, a);
            }
        }

        let Some(orrery) = self.orrery.as_mut() else {
            return;
        };

        // Load completions re-enter here, on the animation thread.
        for event in input.iter() {
            let outcome = match *event {
                InputEvent::AssetLoaded { slot, handle } => LoadOutcome::Ready {
                    slot,
                    object: DetailedObject { handle: ModelHandle(handle) },
                },
                InputEvent::AssetFailed { slot } => LoadOutcome::Failed {
                    slot,
                    reason: "host reported failure".to_string(),
                },
                InputEvent::Custom { .. } => continue,
            };
            orrery.controller.on_outcome(outcome, &mut orrery.registry, &mut ctx.scene);
        }

        let mut sound_commands;
        let mut silence = Silence;
        let audio: &mut dyn AudioPlayer = match orrery.music {
            Some((play, pause)) => {
                sound_commands = SoundCommands { sounds: &mut ctx.sounds, play, pause };
                &mut sound_commands
            }
            None => &mut silence,
        };
        orrery.driver.tick(
            &self.options,
            &mut ctx.scene,
            &orrery.registry,
            &mut orrery.controller,
            &mut ctx.loader,
            audio,
        );

        let controller = &orrery.controller;
        ctx.events.push(GameEvent {
            kind: EVENT_SUBSTITUTION,
            a: controller.state().code(),
            b: controller.arrived(&orrery.registry) as f32,
            c: flag(controller.is_stalled()),
        });
        ctx.events.push(GameEvent {
            kind: EVENT_CLOCK,
            a: orrery.driver.angle() as f32,
            b: self.options.speed() as f32,
            c: orrery.driver.frames() as f32,
        });
        ctx.events.push(GameEvent {
            kind: EVENT_OPTIONS,
            a: self.options.speed() as f32,
            b: flag(self.options.replace_planets),
            c: flag(self.options.play_music),
        });
    }
}
