/// Per-frame animation: edge detection, orbits, spin, clock.

use glam::Vec3;
use orrery_engine::{AssetLoader, EntityId, FrameClock, Scene, SoundEvent};

use crate::config::Options;
use crate::registry::BodyRegistry;
use crate::substitution::SubstitutionController;

/// Music output. Both calls must be safe to repeat.
pub trait AudioPlayer {
    fn play(&mut self);
    fn pause(&mut self);
}

/// Audio player backed by the host: play and pause become sound events.
pub struct SoundCommands<'a> {
    pub sounds: &'a mut Vec<SoundEvent>,
    pub play: SoundEvent,
    pub pause: SoundEvent,
}

impl AudioPlayer for SoundCommands<'_> {
    fn play(&mut self) {
        self.sounds.push(self.play);
    }

    fn pause(&mut self) {
        self.sounds.push(self.pause);
    }
}

/// Used when music is switched off in the configuration.
pub struct Silence;

impl AudioPlayer for Silence {
    fn play(&mut self) {}
    fn pause(&mut self) {}
}

/// Owns the animation clock and the previous values of both toggles.
#[derive(Debug)]
pub struct AnimationDriver {
    clock: FrameClock,
    previous_replace: bool,
    previous_music: bool,
    spin_rate: f64,
    sun: EntityId,
}

impl AnimationDriver {
    /// Previous toggle values start at `false`, so options that start `true`
    /// produce an edge on the first frame.
    pub fn new(sun: EntityId, spin_rate: f64) -> Self {
        Self {
            clock: FrameClock::new(),
            previous_replace: false,
            previous_music: false,
            spin_rate,
            sun,
        }
    }

    pub fn angle(&self) -> f64 {
        self.clock.angle()
    }

    pub fn frames(&self) -> u64 {
        self.clock.frames()
    }

    /// One frame. Edges are handled before anything moves.
    pub fn tick(
        &mut self,
        options: &Options,
        scene: &mut Scene,
        registry: &BodyRegistry,
        controller: &mut SubstitutionController,
        loader: &mut dyn AssetLoader,
        audio: &mut dyn AudioPlayer,
    ) {
        if options.play_music != self.previous_music {
            if options.play_music {
                audio.play();
            } else {
                audio.pause();
            }
            self.previous_music = options.play_music;
        }

        if options.replace_planets != self.previous_replace {
            controller.on_toggle(options.replace_planets, registry, scene, loader);
            self.previous_replace = options.replace_planets;
        }

        let angle = self.clock.angle();
        for (index, id) in registry.members() {
            let Some(spec) = registry.spec(index) else { continue };
            let Some(entity) = scene.get_mut(id) else { continue };
            if !entity.visible {
                continue;
            }
            let (x, z) = spec.orbit.position(angle);
            entity.pos = Vec3::new(x as f32, 0.0, z as f32);
            entity.spin += self.spin_rate as f32;
        }

        if let Some(sun) = scene.get_mut(self.sun) {
            sun.spin -= (self.spin_rate * options.speed()) as f32;
        }

        self.clock.advance(options.speed());
    }
}
