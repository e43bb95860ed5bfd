/// Runtime replacement of the primitive bodies by a shared detailed model.
///
/// Detailed objects are requested once, one per body, the first time
/// replacement is switched on. They arrive in any order; the swap happens
/// when the last one is in, counted, not identified.

use orrery_engine::{
    AssetLoader, DetailedObject, Entity, EntityId, LoadOutcome, LoadRequest, MeshComponent,
    ModelDescriptor, Scene,
};

use crate::registry::BodyRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubstitutionState {
    NotLoaded,
    Loading,
    /// Terminal.
    Loaded,
}

impl SubstitutionState {
    /// Numeric code published to the control panel.
    pub fn code(self) -> f32 {
        match self {
            SubstitutionState::NotLoaded => 0.0,
            SubstitutionState::Loading => 1.0,
            SubstitutionState::Loaded => 2.0,
        }
    }
}

/// Result of handing one arrival to an [`ArrivalJoin`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arrival {
    Pending { arrived: usize, expected: usize },
    /// The final arrival. Carries every object, in slot order.
    Complete(Vec<EntityId>),
    /// Slot out of range or already filled.
    Rejected,
}

/// "All of N" join over slot-addressed arrivals.
#[derive(Debug, Clone)]
pub struct ArrivalJoin {
    slots: Vec<Option<EntityId>>,
    arrived: usize,
}

impl ArrivalJoin {
    pub fn new(expected: usize) -> Self {
        Self { slots: vec![None; expected], arrived: 0 }
    }

    /// True if `slot` exists and has not arrived yet.
    pub fn is_open(&self, slot: usize) -> bool {
        matches!(self.slots.get(slot), Some(None))
    }

    pub fn arrive(&mut self, slot: usize, id: EntityId) -> Arrival {
        if !self.is_open(slot) {
            return Arrival::Rejected;
        }
        self.slots[slot] = Some(id);
        self.arrived += 1;

        if self.arrived < self.slots.len() {
            return Arrival::Pending { arrived: self.arrived, expected: self.slots.len() };
        }
        match self.slots.iter().copied().collect::<Option<Vec<_>>>() {
            Some(ids) => Arrival::Complete(ids),
            None => Arrival::Pending { arrived: self.arrived, expected: self.slots.len() },
        }
    }

    pub fn arrived(&self) -> usize {
        self.arrived
    }

    pub fn expected(&self) -> usize {
        self.slots.len()
    }

    pub fn is_complete(&self) -> bool {
        self.arrived == self.slots.len()
    }
}

/// Drives [`SubstitutionState`] from toggle edges and load outcomes.
#[derive(Debug)]
pub struct SubstitutionController {
    state: SubstitutionState,
    model: ModelDescriptor,
    join: Option<ArrivalJoin>,
    /// Slots whose load failed and have not arrived since.
    failed: Vec<(u32, String)>,
    dispatched: usize,
}

impl SubstitutionController {
    pub fn new(model: ModelDescriptor) -> Self {
        Self {
            state: SubstitutionState::NotLoaded,
            model,
            join: None,
            failed: Vec::new(),
            dispatched: 0,
        }
    }

    pub fn state(&self) -> SubstitutionState {
        self.state
    }

    /// Detailed objects in so far.
    pub fn arrived(&self, registry: &BodyRegistry) -> usize {
        match &self.join {
            Some(join) => join.arrived(),
            None => registry.detailed().len(),
        }
    }

    /// Load requests issued over the controller's lifetime.
    pub fn dispatched(&self) -> usize {
        self.dispatched
    }

    pub fn failures(&self) -> &[(u32, String)] {
        &self.failed
    }

    /// Loading with at least one failed slot: completion will not come.
    pub fn is_stalled(&self) -> bool {
        self.state == SubstitutionState::Loading && !self.failed.is_empty()
    }

    /// React to an edge of the replace toggle. `replace` is the new value.
    pub fn on_toggle(
        &mut self,
        replace: bool,
        registry: &BodyRegistry,
        scene: &mut Scene,
        loader: &mut dyn AssetLoader,
    ) {
        match (self.state, replace) {
            (SubstitutionState::NotLoaded, true) => self.begin_loading(registry, loader),
            (SubstitutionState::NotLoaded, false) => {
                log::debug!("restore ignored: nothing loaded yet");
            }
            (SubstitutionState::Loading, _) => {
                log::debug!("toggle to {} ignored while loading", replace);
            }
            (SubstitutionState::Loaded, true) => registry.show_detailed(scene),
            (SubstitutionState::Loaded, false) => registry.show_primitives(scene),
        }
    }

    fn begin_loading(&mut self, registry: &BodyRegistry, loader: &mut dyn AssetLoader) {
        self.state = SubstitutionState::Loading;
        self.join = Some(ArrivalJoin::new(registry.len()));
        for slot in 0..registry.len() {
            loader.load(LoadRequest {
                slot: slot as u32,
                material_path: self.model.material.clone(),
                geometry_path: self.model.geometry.clone(),
            });
            self.dispatched += 1;
        }
        log::info!("substitution: loading {} detailed bodies", registry.len());
    }

    pub fn on_outcome(
        &mut self,
        outcome: LoadOutcome,
        registry: &mut BodyRegistry,
        scene: &mut Scene,
    ) {
        match outcome {
            LoadOutcome::Ready { slot, object } => self.on_arrival(slot, object, registry, scene),
            LoadOutcome::Failed { slot, reason } => self.on_failure(slot, reason),
        }
    }

    /// Stage one detailed object. It copies the primitive's current position
    /// and size and stays hidden until the whole set is in.
    pub fn on_arrival(
        &mut self,
        slot: u32,
        object: DetailedObject,
        registry: &mut BodyRegistry,
        scene: &mut Scene,
    ) {
        let Some(join) = self.join.as_mut() else {
            log::warn!("slot {}: arrival outside loading ({:?}), dropped", slot, self.state);
            return;
        };
        let index = slot as usize;
        let Some((primitive, spec)) = registry.primitive(index).zip(registry.spec(index)) else {
            log::warn!("slot {}: no such body, dropped", slot);
            return;
        };
        let tag = format!("{}-detailed", spec.name);
        let scale = spec.size as f32;
        let pos = scene.get(primitive).map(|e| e.pos).unwrap_or_default();

        let id = scene.next_id();
        let complete = match join.arrive(index, id) {
            Arrival::Rejected => {
                log::warn!("slot {}: duplicate arrival, dropped", slot);
                return;
            }
            Arrival::Pending { arrived, expected } => {
                log::debug!("substitution: {}/{} arrived", arrived, expected);
                None
            }
            Arrival::Complete(ids) => Some(ids),
        };
        scene.spawn(
            Entity::new(id)
                .with_tag(tag)
                .with_pos(pos)
                .with_scale(scale)
                .with_visible(false)
                .with_mesh(MeshComponent::model(object.handle)),
        );
        self.failed.retain(|(failed, _)| *failed != slot);

        if let Some(ids) = complete {
            registry.commit_detailed(ids);
            registry.show_detailed(scene);
            self.join = None;
            self.state = SubstitutionState::Loaded;
            log::info!("substitution: all {} detailed bodies arrived", registry.len());
        }
    }

    /// Record a failed load. The state stays `Loading`; no retry is issued.
    /// Only slots still awaited count; anything else is dropped.
    pub fn on_failure(&mut self, slot: u32, reason: String) {
        if !self.join.as_ref().is_some_and(|join| join.is_open(slot as usize)) {
            log::warn!("slot {}: failure for a slot not awaited ({:?}), dropped", slot, self.state);
            return;
        }
        log::warn!("slot {}: detailed body failed to load: {}", slot, reason);
        if !self.failed.iter().any(|(failed, _)| *failed == slot) {
            self.failed.push((slot, reason));
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::bodies::BODY_COUNT;
    use crate::registry::tests::solar_registry;
    use orrery_engine::{HostLoader, ModelHandle};

    pub(crate) fn model() -> ModelDescriptor {
        ModelDescriptor {
            material: "model.mtl".to_string(),
            geometry: "model.obj".to_string(),
        }
    }

    fn ready(slot: u32) -> DetailedObject {
        DetailedObject { handle: ModelHandle(slot + 1) }
    }

    struct Rig {
        scene: Scene,
        registry: BodyRegistry,
        controller: SubstitutionController,
        loader: HostLoader,
    }

    impl Rig {
        fn new() -> Self {
            let mut scene = Scene::new();
            let registry = solar_registry(&mut scene);
            Self {
                scene,
                registry,
                controller: SubstitutionController::new(model()),
                loader: HostLoader::new(),
            }
        }

        fn toggle(&mut self, replace: bool) {
            self.controller.on_toggle(replace, &self.registry, &mut self.scene, &mut self.loader);
        }

        fn arrive(&mut self, slot: u32) {
            self.controller.on_arrival(slot, ready(slot), &mut self.registry, &mut self.scene);
        }

        fn primitives_visible(&self) -> Vec<bool> {
            self.registry.primitives().iter().map(|&id| self.scene.is_visible(id)).collect()
        }

        fn detailed_visible(&self) -> Vec<bool> {
            self.registry.detailed().iter().map(|&id| self.scene.is_visible(id)).collect()
        }

        fn exclusive(&self) -> bool {
            self.registry
                .primitives()
                .iter()
                .zip(self.registry.detailed())
                .all(|(&p, &d)| !(self.scene.is_visible(p) && self.scene.is_visible(d)))
        }

        fn load_all(&mut self) {
            self.toggle(true);
            for slot in 0..BODY_COUNT as u32 {
                self.arrive(slot);
            }
        }
    }

    #[test]
    fn join_completes_on_count() {
        let mut join = ArrivalJoin::new(3);
        assert_eq!(join.arrive(2, EntityId(12)), Arrival::Pending { arrived: 1, expected: 3 });
        assert_eq!(join.arrive(2, EntityId(13)), Arrival::Rejected);
        assert_eq!(join.arrive(5, EntityId(15)), Arrival::Rejected);
        assert_eq!(join.arrive(0, EntityId(10)), Arrival::Pending { arrived: 2, expected: 3 });
        assert!(!join.is_complete());
        assert_eq!(
            join.arrive(1, EntityId(11)),
            Arrival::Complete(vec![EntityId(10), EntityId(11), EntityId(12)])
        );
        assert!(join.is_complete());
    }

    #[test]
    fn rising_edge_dispatches_one_load_per_body() {
        let mut rig = Rig::new();
        rig.toggle(true);
        assert_eq!(rig.controller.state(), SubstitutionState::Loading);
        let pending = rig.loader.pending();
        assert_eq!(pending.len(), BODY_COUNT);
        for (slot, request) in pending.iter().enumerate() {
            assert_eq!(request.slot, slot as u32);
            assert_eq!(request.material_path, "model.mtl");
            assert_eq!(request.geometry_path, "model.obj");
        }
    }

    #[test]
    fn falling_edge_before_loading_is_ignored() {
        let mut rig = Rig::new();
        rig.toggle(false);
        assert_eq!(rig.controller.state(), SubstitutionState::NotLoaded);
        assert_eq!(rig.loader.issued(), 0);
    }

    #[test]
    fn arrivals_stay_hidden_until_the_last() {
        let mut rig = Rig::new();
        rig.toggle(true);
        let before = rig.scene.len();
        for slot in 0..BODY_COUNT as u32 - 1 {
            rig.arrive(slot);
            assert!(rig.registry.detailed().is_empty());
            assert_eq!(rig.controller.arrived(&rig.registry), slot as usize + 1);
        }
        assert_eq!(rig.scene.len(), before + BODY_COUNT - 1);
        assert!(rig.scene.iter().skip(before).all(|e| !e.visible));
        assert!(rig.primitives_visible().iter().all(|&v| v));
        assert_eq!(rig.controller.state(), SubstitutionState::Loading);
    }

    #[test]
    fn arrival_copies_primitive_position_and_size() {
        let mut rig = Rig::new();
        let jupiter = rig.registry.primitive(4).unwrap();
        rig.scene.get_mut(jupiter).unwrap().pos = glam::Vec3::new(0.0, 0.0, 110.0);
        rig.toggle(true);
        rig.arrive(4);
        let staged = rig.scene.find_by_tag("jupiter-detailed").unwrap();
        assert_eq!(staged.pos, glam::Vec3::new(0.0, 0.0, 110.0));
        assert_eq!(staged.scale, 11.0);
        assert!(!staged.visible);
    }

    #[test]
    fn final_arrival_swaps_everything() {
        let mut rig = Rig::new();
        rig.load_all();
        assert_eq!(rig.controller.state(), SubstitutionState::Loaded);
        assert_eq!(rig.registry.detailed().len(), BODY_COUNT);
        assert!(rig.primitives_visible().iter().all(|&v| !v));
        assert!(rig.detailed_visible().iter().all(|&v| v));
    }

    #[test]
    fn every_completion_order_reaches_loaded() {
        let mut orders: Vec<Vec<u32>> = Vec::new();
        orders.push((0..8).rev().collect());
        orders.push(vec![1, 3, 5, 7, 0, 2, 4, 6]);
        for shift in 0..8 {
            orders.push((0..8).map(|i| (i + shift) % 8).collect());
        }
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        for _ in 0..64 {
            let mut order: Vec<u32> = (0..8).collect();
            for i in (1..order.len()).rev() {
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                let j = (seed >> 33) as usize % (i + 1);
                order.swap(i, j);
            }
            orders.push(order);
        }

        for order in orders {
            let mut rig = Rig::new();
            rig.toggle(true);
            for &slot in &order {
                rig.arrive(slot);
            }
            assert_eq!(rig.controller.state(), SubstitutionState::Loaded, "order {order:?}");
            assert!(rig.detailed_visible().iter().all(|&v| v), "order {order:?}");
            assert!(rig.primitives_visible().iter().all(|&v| !v), "order {order:?}");
        }
    }

    #[test]
    fn reverse_toggle_during_loading_still_ends_detailed() {
        let mut rig = Rig::new();
        rig.toggle(true);
        rig.arrive(0);
        rig.toggle(false);
        rig.arrive(1);
        rig.toggle(true);
        assert_eq!(rig.loader.issued(), BODY_COUNT);
        for slot in 2..BODY_COUNT as u32 {
            rig.arrive(slot);
        }
        assert_eq!(rig.controller.state(), SubstitutionState::Loaded);
        assert!(rig.detailed_visible().iter().all(|&v| v));
        assert!(rig.primitives_visible().iter().all(|&v| !v));
    }

    #[test]
    fn toggle_cycle_after_loaded_keeps_roles_exclusive() {
        let mut rig = Rig::new();
        rig.load_all();
        rig.toggle(false);
        assert!(rig.exclusive());
        assert!(rig.primitives_visible().iter().all(|&v| v));
        assert!(rig.detailed_visible().iter().all(|&v| !v));
        rig.toggle(true);
        assert!(rig.exclusive());
        assert!(rig.detailed_visible().iter().all(|&v| v));
        assert_eq!(rig.loader.issued(), BODY_COUNT);
    }

    #[test]
    fn repeated_toggle_is_idempotent() {
        let mut rig = Rig::new();
        rig.load_all();
        rig.toggle(true);
        let once = (rig.primitives_visible(), rig.detailed_visible());
        rig.toggle(true);
        assert_eq!((rig.primitives_visible(), rig.detailed_visible()), once);
        rig.toggle(false);
        let once = (rig.primitives_visible(), rig.detailed_visible());
        rig.toggle(false);
        assert_eq!((rig.primitives_visible(), rig.detailed_visible()), once);
    }

    #[test]
    fn duplicate_and_stray_arrivals_are_dropped() {
        let mut rig = Rig::new();
        rig.arrive(0);
        assert_eq!(rig.scene.len(), BODY_COUNT);

        rig.toggle(true);
        rig.arrive(3);
        rig.arrive(3);
        rig.arrive(42);
        assert_eq!(rig.controller.arrived(&rig.registry), 1);
        assert_eq!(rig.scene.len(), BODY_COUNT + 1);
    }

    #[test]
    fn failed_load_stalls_in_loading() {
        let mut rig = Rig::new();
        rig.toggle(true);
        for slot in 0..BODY_COUNT as u32 {
            if slot == 6 {
                rig.controller.on_failure(slot, "404".to_string());
            } else {
                rig.arrive(slot);
            }
        }
        assert_eq!(rig.controller.state(), SubstitutionState::Loading);
        assert!(rig.controller.is_stalled());
        assert_eq!(rig.controller.failures().to_vec(), vec![(6u32, "404".to_string())]);
        assert!(rig.registry.detailed().is_empty());
        assert!(rig.primitives_visible().iter().all(|&v| v));
    }

    #[test]
    fn failure_after_arrival_does_not_stall() {
        let mut rig = Rig::new();
        rig.toggle(true);
        rig.arrive(3);
        rig.controller.on_failure(3, "late error".to_string());
        assert!(!rig.controller.is_stalled());
        assert!(rig.controller.failures().is_empty());
        for slot in (0..BODY_COUNT as u32).filter(|&s| s != 3) {
            rig.arrive(slot);
        }
        assert_eq!(rig.controller.state(), SubstitutionState::Loaded);
    }

    #[test]
    fn failure_for_unknown_slot_is_dropped() {
        let mut rig = Rig::new();
        rig.controller.on_failure(42, "stray".to_string());
        assert!(!rig.controller.is_stalled());

        rig.toggle(true);
        rig.controller.on_failure(42, "stray".to_string());
        assert!(!rig.controller.is_stalled());
        assert!(rig.controller.failures().is_empty());
        assert_eq!(rig.controller.state(), SubstitutionState::Loading);
    }

    #[test]
    fn late_arrival_clears_a_failure() {
        let mut rig = Rig::new();
        rig.toggle(true);
        rig.controller.on_failure(2, "timeout".to_string());
        assert!(rig.controller.is_stalled());
        rig.arrive(2);
        assert!(!rig.controller.is_stalled());
        assert!(rig.controller.failures().is_empty());
    }

    #[test]
    fn outcomes_route_to_arrival_and_failure() {
        let mut rig = Rig::new();
        rig.toggle(true);
        rig.controller.on_outcome(
            LoadOutcome::Ready { slot: 0, object: ready(0) },
            &mut rig.registry,
            &mut rig.scene,
        );
        rig.controller.on_outcome(
            LoadOutcome::Failed { slot: 1, reason: "bad obj".to_string() },
            &mut rig.registry,
            &mut rig.scene,
        );
        assert_eq!(rig.controller.arrived(&rig.registry), 1);
        assert_eq!(rig.controller.failures().len(), 1);
    }
}
