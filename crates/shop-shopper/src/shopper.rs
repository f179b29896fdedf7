//! The `Shopper` state machine.

use tracing::{debug, trace, warn};

use shop_brain::{
    BrainKind, Decision, DecisionCategory, DistractionAction, NavigationAction, Observation,
};
use shop_catalog::{AisleClass, StoreLayout};
use shop_core::{AgentId, AgentRng, AisleId, Point};
use shop_nav::{Navigator, UNREACHABLE_DISTANCE};

use crate::{
    ActionCompletion, AisleDistances, CheckoutProgress, PurchaseCounters, ShopperContext,
    ShopperState, TimedAction,
};

/// Handed to the driver when a shopper reaches the exit.
#[derive(Clone, Debug, PartialEq)]
pub struct RetiredShopper {
    pub id:              AgentId,
    pub brain:           BrainKind,
    pub time_spent_secs: f32,
    pub counters:        PurchaseCounters,
    /// Items still on the list when the shopper left.
    pub list_remaining:  usize,
    /// One point per path-record interval.
    pub path:            Vec<Point>,
}

pub struct Shopper {
    pub id:    AgentId,
    pub brain: BrainKind,
    rng:       AgentRng,
    state:     ShopperState,

    shopping_list:     Vec<AisleId>,
    list_len_at_start: usize,
    counters:          PurchaseCounters,

    /// Aisle being walked to or acted on; `None` once it has been handled.
    current_aisle:  Option<AisleId>,
    /// Class and list membership of the most recent target, as observed.
    current_class:  Option<AisleClass>,
    item_in_list:   bool,
    distances:      AisleDistances,
    action:         Option<TimedAction>,

    /// Aisles inside the detection radius as of the last tick.
    noticed:             Vec<AisleId>,
    pending_distraction: Option<AisleId>,

    checkout:   CheckoutProgress,
    time_spent: f32,
    path:       Vec<Point>,
    path_timer: f32,
}

impl Shopper {
    pub fn new(id: AgentId, brain: BrainKind, shopping_list: Vec<AisleId>, rng: AgentRng) -> Self {
        let list_len_at_start = shopping_list.len();
        Self {
            id,
            brain,
            rng,
            state: ShopperState::Enter,
            shopping_list,
            list_len_at_start,
            counters: PurchaseCounters::default(),
            current_aisle: None,
            current_class: None,
            item_in_list: false,
            distances: AisleDistances::default(),
            action: None,
            noticed: Vec::new(),
            pending_distraction: None,
            checkout: CheckoutProgress::default(),
            time_spent: 0.0,
            path: Vec::new(),
            path_timer: 0.0,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn state(&self) -> ShopperState {
        self.state
    }

    pub fn shopping_list(&self) -> &[AisleId] {
        &self.shopping_list
    }

    pub fn counters(&self) -> &PurchaseCounters {
        &self.counters
    }

    pub fn current_aisle(&self) -> Option<AisleId> {
        self.current_aisle
    }

    pub fn distances(&self) -> &AisleDistances {
        &self.distances
    }

    pub fn action(&self) -> Option<&TimedAction> {
        self.action.as_ref()
    }

    pub fn pending_distraction(&self) -> Option<AisleId> {
        self.pending_distraction
    }

    pub fn checkout_progress(&self) -> &CheckoutProgress {
        &self.checkout
    }

    pub fn time_spent(&self) -> f32 {
        self.time_spent
    }

    pub fn path(&self) -> &[Point] {
        &self.path
    }

    /// `1 − remaining / initial`; a shopper that arrived with an empty list
    /// is already done.
    pub fn shopping_progress(&self) -> f32 {
        if self.list_len_at_start == 0 {
            return 1.0;
        }
        1.0 - self.shopping_list.len() as f32 / self.list_len_at_start as f32
    }

    // ── Driver entry points ───────────────────────────────────────────────────

    /// Head for the entry point.  Call once after placing the shopper.
    pub fn enter(&mut self, nav: &mut dyn Navigator, layout: &StoreLayout) {
        self.state = ShopperState::Enter;
        self.go_to(nav, layout.entry);
    }

    /// The checkout station finished with this shopper.
    pub fn finish_checkout(&mut self, nav: &mut dyn Navigator, layout: &StoreLayout) {
        if self.state != ShopperState::Checkout {
            warn!(agent = %self.id, state = %self.state, "checkout finished outside checkout state");
        }
        self.transition(ShopperState::Exit);
        self.go_to(nav, layout.exit);
    }

    /// Advance one tick.  Returns the retirement record once the shopper has
    /// reached the exit; the driver must then drop it.
    pub fn tick(&mut self, ctx: &mut ShopperContext<'_>) -> Option<RetiredShopper> {
        let dt = ctx.config.tick_duration_secs;
        self.time_spent += dt;
        let position = ctx.nav.position(self.id);
        if let Some(pos) = position {
            self.update_noticed(ctx, pos);
        }

        let retired = match self.state {
            ShopperState::Enter => {
                if self.within(position, ctx.layout.entry, ctx.config.stopping_distance) {
                    self.start_shopping(ctx);
                }
                None
            }
            ShopperState::Shopping => {
                self.shopping_step(ctx, dt);
                None
            }
            ShopperState::Checkout => {
                self.checkout_step(ctx, position);
                None
            }
            ShopperState::Exit => {
                if self.within(position, ctx.layout.exit, ctx.config.stopping_distance) {
                    Some(self.retire())
                } else {
                    None
                }
            }
        };

        self.record_path(position, dt, ctx.config.path_record_interval_secs);
        retired
    }

    // ── Shopping ──────────────────────────────────────────────────────────────

    fn start_shopping(&mut self, ctx: &mut ShopperContext<'_>) {
        self.transition(ShopperState::Shopping);
        self.refresh_distances(ctx);
        if let Some((aisle, _)) = self.distances.nearest_in_list {
            self.move_to_aisle(ctx, aisle);
        }
    }

    fn shopping_step(&mut self, ctx: &mut ShopperContext<'_>, dt: f32) {
        if let Some(action) = self.action.as_mut() {
            action.remaining -= dt;
            if action.remaining > 0.0 {
                return;
            }
            let done = *action;
            self.action = None;
            self.complete_action(ctx, done);
            return;
        }

        self.handle_distraction(ctx);
        if self.state != ShopperState::Shopping {
            return;
        }

        if !ctx.nav.has_arrived(self.id, ctx.config.stopping_distance) {
            return;
        }
        if self.shopping_list.is_empty() {
            debug!(agent = %self.id, "shopping list empty; heading to checkout");
            self.start_checkout(ctx);
            return;
        }
        match self.current_aisle {
            None        => self.navigation_point(ctx),
            Some(aisle) => self.purchase_point(ctx, aisle),
        }
    }

    fn navigation_point(&mut self, ctx: &mut ShopperContext<'_>) {
        self.refresh_distances(ctx);

        match ctx.brain.take_decision(self.id, DecisionCategory::Navigation) {
            Some(Decision::Navigation(action)) => self.apply_navigation(ctx, action),
            Some(other) => warn!(agent = %self.id, ?other, "mis-routed decision"),
            None => {
                if !ctx.brain.is_outstanding(self.id, DecisionCategory::Navigation) {
                    let obs = self.observation(ctx);
                    ctx.brain.request_navigation(self.id, obs);
                }
            }
        }
    }

    fn apply_navigation(&mut self, ctx: &mut ShopperContext<'_>, action: NavigationAction) {
        trace!(agent = %self.id, ?action, "navigation decision");
        let target = match action {
            NavigationAction::NearestOverall => self.distances.nearest_overall,
            NavigationAction::NearestInList  => self.distances.nearest_in_list,
            NavigationAction::NextInList     => self.distances.next_in_list,
            NavigationAction::Checkout => {
                self.start_checkout(ctx);
                return;
            }
        };
        match target {
            Some((aisle, _)) => self.move_to_aisle(ctx, aisle),
            // Nothing to walk to; ask again next tick.
            None => debug!(agent = %self.id, ?action, "no aisle for navigation decision"),
        }
    }

    fn purchase_point(&mut self, ctx: &mut ShopperContext<'_>, aisle: AisleId) {
        match ctx.brain.take_decision(self.id, DecisionCategory::Purchase) {
            Some(Decision::Purchase(action)) => {
                let completion = ActionCompletion::from(action);
                let remaining = completion.draw_duration(&mut self.rng);
                self.action = Some(TimedAction { aisle, completion, remaining });
                self.pending_distraction = None;
                trace!(agent = %self.id, %aisle, ?completion, remaining, "action started");
            }
            Some(other) => warn!(agent = %self.id, ?other, "mis-routed decision"),
            None => {
                if !ctx.brain.is_outstanding(self.id, DecisionCategory::Purchase) {
                    let obs = self.observation(ctx);
                    ctx.brain.request_purchase(self.id, obs);
                }
            }
        }
    }

    fn complete_action(&mut self, ctx: &mut ShopperContext<'_>, done: TimedAction) {
        match done.completion {
            ActionCompletion::Buy => {
                self.counters.record_buy(ctx.catalog.class_of(done.aisle));
                if let Some(i) = self.shopping_list.iter().position(|a| *a == done.aisle) {
                    self.shopping_list.remove(i);
                }
            }
            ActionCompletion::Browse => self.counters.record_browse(),
            ActionCompletion::Ignore => {}
        }
        ctx.ledger.record(done.aisle, done.completion.outcome());
        self.current_aisle = None;
    }

    // ── Distraction ───────────────────────────────────────────────────────────

    /// Note aisles newly inside the detection radius.  A new one that is not
    /// the current target becomes the pending distraction.
    fn update_noticed(&mut self, ctx: &ShopperContext<'_>, pos: Point) {
        let noticed = ctx.catalog.aisles_within(pos, ctx.config.detection_radius);
        let can_be_distracted = self.state == ShopperState::Shopping && self.action.is_none();
        if can_be_distracted {
            let fresh = noticed
                .iter()
                .copied()
                .find(|a| !self.noticed.contains(a) && Some(*a) != self.current_aisle);
            if let Some(aisle) = fresh {
                self.pending_distraction = Some(aisle);
            }
        }
        self.noticed = noticed;
    }

    fn handle_distraction(&mut self, ctx: &mut ShopperContext<'_>) {
        let Some(aisle) = self.pending_distraction else {
            // Answer to a distraction that was already dropped.
            ctx.brain.take_decision(self.id, DecisionCategory::Distraction);
            return;
        };
        if Some(aisle) == self.current_aisle {
            self.pending_distraction = None;
            return;
        }

        match ctx.brain.take_decision(self.id, DecisionCategory::Distraction) {
            Some(Decision::Distraction(action)) => {
                self.pending_distraction = None;
                if action == DistractionAction::Follow {
                    debug!(agent = %self.id, %aisle, "following distraction");
                    self.move_to_aisle(ctx, aisle);
                }
            }
            Some(other) => warn!(agent = %self.id, ?other, "mis-routed decision"),
            None => {
                if !ctx.brain.is_outstanding(self.id, DecisionCategory::Distraction) {
                    let obs = self.observation(ctx);
                    ctx.brain.request_distraction(self.id, obs);
                }
            }
        }
    }

    // ── Checkout ──────────────────────────────────────────────────────────────

    fn start_checkout(&mut self, ctx: &mut ShopperContext<'_>) {
        self.transition(ShopperState::Checkout);
        let staging = ctx.layout.checkout_area.random_point(&mut self.rng);
        self.go_to(ctx.nav, staging);
    }

    fn checkout_step(&mut self, ctx: &mut ShopperContext<'_>, position: Option<Point>) {
        if self.checkout.queued || !ctx.nav.has_arrived(self.id, ctx.config.stopping_distance) {
            return;
        }
        let Some(pos) = position else {
            return;
        };

        let station = match self.checkout.station {
            Some(s) => s,
            None => match ctx.checkout.select_station(pos) {
                Some(s) => {
                    self.checkout.station = Some(s);
                    s
                }
                None => {
                    debug!(agent = %self.id, "no checkout station available");
                    return;
                }
            },
        };

        if !self.checkout.destination_set {
            let Some(slot) = ctx.checkout.station(station).map(|s| s.waiting_location()) else {
                warn!(agent = %self.id, %station, "assigned station vanished");
                self.checkout.station = None;
                return;
            };
            self.go_to(ctx.nav, slot);
            self.checkout.destination_set = true;
            return;
        }

        match ctx.checkout.enqueue(station, self.id, self.counters.total_bought, ctx.nav) {
            Ok(()) => self.checkout.queued = true,
            Err(e) => {
                warn!(agent = %self.id, %station, error = %e, "could not join checkout queue");
                self.checkout = CheckoutProgress::default();
            }
        }
    }

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn transition(&mut self, next: ShopperState) {
        trace!(agent = %self.id, from = %self.state, to = %next, "state change");
        self.state = next;
        if next != ShopperState::Checkout {
            self.checkout = CheckoutProgress::default();
        }
    }

    fn go_to(&mut self, nav: &mut dyn Navigator, to: Point) {
        if let Err(e) = nav.set_destination(self.id, to) {
            warn!(agent = %self.id, error = %e, "could not set destination");
        }
    }

    fn move_to_aisle(&mut self, ctx: &mut ShopperContext<'_>, aisle: AisleId) {
        let Some(location) = ctx.catalog.location_of(aisle) else {
            warn!(agent = %self.id, %aisle, "aisle missing from catalog");
            return;
        };
        if let Err(e) = ctx.nav.set_destination(self.id, location) {
            warn!(agent = %self.id, %aisle, error = %e, "cannot walk to aisle");
            return;
        }
        self.current_aisle = Some(aisle);
        self.current_class = ctx.catalog.class_of(aisle);
        self.item_in_list = self.shopping_list.contains(&aisle);
    }

    fn refresh_distances(&mut self, ctx: &ShopperContext<'_>) {
        let Some(pos) = ctx.nav.position(self.id) else {
            self.distances = AisleDistances::default();
            return;
        };
        let distance_to = |aisle: AisleId| {
            ctx.catalog
                .location_of(aisle)
                .map_or(UNREACHABLE_DISTANCE, |loc| ctx.nav.path_distance(pos, loc))
        };
        let nearest = |candidates: &[AisleId]| {
            let mut best: Option<(AisleId, f32)> = None;
            for &a in candidates {
                let d = distance_to(a);
                if d < best.map_or(UNREACHABLE_DISTANCE, |(_, bd)| bd) {
                    best = Some((a, d));
                }
            }
            best
        };

        self.distances = AisleDistances {
            nearest_overall: nearest(&self.noticed),
            nearest_in_list: nearest(&self.shopping_list),
            next_in_list:    self.shopping_list.first().map(|&a| (a, distance_to(a))),
        };
    }

    fn observation(&self, ctx: &ShopperContext<'_>) -> Observation {
        let dist = |d: Option<(AisleId, f32)>| d.map_or(UNREACHABLE_DISTANCE, |(_, x)| x);
        Observation {
            time_spent:           self.time_spent as u32,
            shopping_progress:    self.shopping_progress(),
            list_len_at_start:    self.list_len_at_start as u32,
            total_bought:         self.counters.total_bought,
            total_browsed:        self.counters.total_browsed,
            bought_per_class:     self.counters.bought_per_class,
            current_class:        self.current_class,
            item_in_list:         self.item_in_list,
            dist_nearest_overall: dist(self.distances.nearest_overall),
            dist_nearest_in_list: dist(self.distances.nearest_in_list),
            dist_next_in_list:    dist(self.distances.next_in_list),
            distracting_class:    self.pending_distraction.and_then(|a| ctx.catalog.class_of(a)),
        }
    }

    fn within(&self, position: Option<Point>, target: Point, threshold: f32) -> bool {
        position.is_some_and(|p| p.distance(target) <= threshold)
    }

    fn record_path(&mut self, position: Option<Point>, dt: f32, interval: f32) {
        self.path_timer += dt;
        if self.path_timer >= interval {
            if let Some(p) = position {
                self.path.push(p);
            }
            self.path_timer -= interval;
        }
    }

    fn retire(&mut self) -> RetiredShopper {
        debug!(agent = %self.id, brain = %self.brain, secs = self.time_spent, "shopper left the store");
        RetiredShopper {
            id:              self.id,
            brain:           self.brain,
            time_spent_secs: self.time_spent,
            counters:        self.counters.clone(),
            list_remaining:  self.shopping_list.len(),
            path:            std::mem::take(&mut self.path),
        }
    }
}
