use orrery_engine::{
    build_render_buffer, CameraUniform, EngineContext, FrameData, Game, GameConfig, InitError,
    InputEvent, InputQueue, ProtocolLayout, RenderBuffer, RenderContext, RenderSurface, TextureId,
};

/// Generic game runner that wires up the frame loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    config: GameConfig,
    layout: ProtocolLayout,
    initialized: bool,
    frames: u64,
    camera: CameraUniform,
    /// Flat buffer of sound event IDs for SharedArrayBuffer reads.
    sound_buffer: Vec<u8>,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let layout = ProtocolLayout::from_config(&config);
        let ctx = EngineContext::from_config(&config);
        let camera = ctx.camera.uniform();

        Self {
            game,
            ctx,
            input: InputQueue::new(),
            render_buffer: RenderBuffer::with_capacity(config.max_instances),
            sound_buffer: Vec::with_capacity(config.max_sounds),
            layout,
            config,
            initialized: false,
            frames: 0,
            camera,
        }
    }

    /// Initialize the game. Call once after construction.
    /// On error the runner stays uninitialized and `tick` does nothing.
    pub fn init(&mut self) -> Result<(), InitError> {
        if let Err(err) = self.game.init(&mut self.ctx) {
            log::error!("init failed: {err}");
            return Err(err);
        }
        self.initialized = true;
        self.camera = self.ctx.camera.uniform();
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Viewport resized by the host.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.ctx.camera.resize(width, height);
        self.camera = self.ctx.camera.uniform();
    }

    /// Run one frame: exactly one game update, then rebuild the render data.
    pub fn tick(&mut self) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        self.game.update(&mut self.ctx, &self.input);
        self.input.drain();

        build_render_buffer(self.ctx.scene.iter(), &mut self.render_buffer);

        // Allow game to add custom render commands
        {
            let mut render_ctx = RenderContext {
                render_buffer: &mut self.render_buffer,
            };
            self.game.render(&mut render_ctx);
        }

        // Pack sound events into flat buffer
        self.sound_buffer.clear();
        for sound in &self.ctx.sounds {
            self.sound_buffer.push(sound.0 as u8);
        }

        self.camera = self.ctx.camera.uniform();
        self.frames += 1;
    }

    /// Everything a renderer needs for the last ticked frame.
    pub fn frame_data(&self) -> FrameData<'_> {
        FrameData {
            instances: &self.render_buffer.instances,
            background: self.ctx.scene.background,
            camera: self.camera,
            lights: self.ctx.lights.as_slice(),
            ambient: self.ctx.lights.ambient(),
        }
    }

    /// Hand the last ticked frame to a native surface.
    pub fn draw(&self, surface: &mut impl RenderSurface) {
        surface.draw(&self.frame_data());
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn ctx(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn sound_events_ptr(&self) -> *const u8 {
        self.sound_buffer.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn lights_ptr(&self) -> *const f32 {
        self.ctx.lights.buffer_ptr()
    }

    pub fn light_count(&self) -> u32 {
        self.ctx.lights.count() as u32
    }

    pub fn ambient(&self) -> [f32; 3] {
        self.ctx.lights.ambient()
    }

    pub fn camera_ptr(&self) -> *const f32 {
        &self.camera as *const CameraUniform as *const f32
    }

    /// Background texture handle, or -1 for none.
    pub fn background_texture(&self) -> i32 {
        self.ctx.scene.background.map_or(-1, |t| t.0 as i32)
    }

    // ---- Asset accessors (strings cross the boundary by value) ----

    pub fn texture_count(&self) -> u32 {
        self.ctx.textures.len() as u32
    }

    pub fn texture_path(&self, id: u32) -> Option<String> {
        self.ctx.textures.path(TextureId(id)).map(str::to_string)
    }

    pub fn asset_request_count(&self) -> u32 {
        self.ctx.loader.pending().len() as u32
    }

    pub fn asset_request_slot(&self, index: u32) -> Option<u32> {
        self.ctx.loader.pending().get(index as usize).map(|r| r.slot)
    }

    pub fn asset_request_material(&self, index: u32) -> Option<String> {
        self.ctx.loader.pending().get(index as usize).map(|r| r.material_path.clone())
    }

    pub fn asset_request_geometry(&self, index: u32) -> Option<String> {
        self.ctx.loader.pending().get(index as usize).map(|r| r.geometry_path.clone())
    }

    // ---- Capacity accessors (read by the host via wasm_bindgen exports) ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_sounds(&self) -> u32 {
        self.layout.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn max_lights(&self) -> u32 {
        self.layout.max_lights as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::{
        AssetLoader, Entity, GameEvent, LoadRequest, MeshComponent, SoundEvent,
    };

    /// Spawns one sphere, requests a load on the first frame, counts updates.
    struct Probe {
        updates: u32,
        fail_init: bool,
        seen_loads: u32,
    }

    impl Probe {
        fn new(fail_init: bool) -> Self {
            Self { updates: 0, fail_init, seen_loads: 0 }
        }
    }

    impl Game for Probe {
        fn init(&mut self, ctx: &mut EngineContext) -> Result<(), InitError> {
            if self.fail_init {
                return Err(InitError::Config("bad table".into()));
            }
            let id = ctx.next_id();
            ctx.scene.spawn(Entity::new(id).with_mesh(MeshComponent::sphere(1.0, 16)));
            Ok(())
        }

        fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
            self.updates += 1;
            for event in input.iter() {
                if let InputEvent::AssetLoaded { .. } = event {
                    self.seen_loads += 1;
                }
            }
            if self.updates == 1 {
                ctx.loader.load(LoadRequest {
                    slot: 0,
                    material_path: "m.mtl".into(),
                    geometry_path: "m.obj".into(),
                });
            }
            ctx.emit_sound(SoundEvent(2));
            ctx.emit_event(GameEvent { kind: 1.0, a: self.updates as f32, ..Default::default() });
        }
    }

    #[derive(Default)]
    struct Recorder {
        frames: Vec<usize>,
    }

    impl RenderSurface for Recorder {
        fn backend(&self) -> &'static str {
            "recorder"
        }

        fn draw(&mut self, frame: &FrameData) {
            self.frames.push(frame.instances.len());
        }

        fn resize(&mut self, _width: u32, _height: u32) {}
    }

    #[test]
    fn tick_before_init_is_noop() {
        let mut runner = GameRunner::new(Probe::new(false));
        runner.tick();
        assert_eq!(runner.game().updates, 0);
        assert_eq!(runner.frame_count(), 0);
    }

    #[test]
    fn failed_init_never_ticks() {
        let mut runner = GameRunner::new(Probe::new(true));
        assert!(matches!(runner.init(), Err(InitError::Config(_))));
        assert!(!runner.is_initialized());
        runner.tick();
        assert_eq!(runner.game().updates, 0);
        assert_eq!(runner.instance_count(), 0);
    }

    #[test]
    fn one_update_per_tick() {
        let mut runner = GameRunner::new(Probe::new(false));
        runner.init().unwrap();
        for _ in 0..5 {
            runner.tick();
        }
        assert_eq!(runner.game().updates, 5);
        assert_eq!(runner.frame_count(), 5);
        assert_eq!(runner.instance_count(), 1);
        assert_eq!(runner.sound_events_len(), 1);
        assert_eq!(runner.game_events_len(), 1);
    }

    #[test]
    fn load_requests_live_for_one_frame() {
        let mut runner = GameRunner::new(Probe::new(false));
        runner.init().unwrap();
        runner.tick();
        assert_eq!(runner.asset_request_count(), 1);
        assert_eq!(runner.asset_request_geometry(0).as_deref(), Some("m.obj"));
        runner.tick();
        assert_eq!(runner.asset_request_count(), 0);
    }

    #[test]
    fn input_is_drained_after_update() {
        let mut runner = GameRunner::new(Probe::new(false));
        runner.init().unwrap();
        runner.push_input(InputEvent::AssetLoaded { slot: 0, handle: 9 });
        runner.tick();
        runner.tick();
        assert_eq!(runner.game().seen_loads, 1);
    }

    #[test]
    fn draw_hands_frame_to_surface() {
        let mut runner = GameRunner::new(Probe::new(false));
        runner.init().unwrap();
        runner.tick();
        let mut surface = Recorder::default();
        runner.draw(&mut surface);
        assert_eq!(surface.frames, vec![1]);
    }

    #[test]
    fn resize_updates_camera() {
        let mut runner = GameRunner::new(Probe::new(false));
        runner.resize(1000.0, 500.0);
        assert_eq!(runner.ctx().camera.aspect, 2.0);
    }
}
