//! The per-turn state machine driving the whole decision cycle.
//!
//! One `Strategist` lives for the match. Each turn it runs offense
//! (cadence-gated scout waves, or the all-in burst while collapsed),
//! reactive reinforcement over the breach history, the fixed proactive
//! turret layers, the support clusters, and finally the
//! health-differential mode update, then submits the turn. Every
//! placement attempt is non-fatal: a rejection is skipped, never
//! retried within the turn, and never aborts the turn.

use crate::breach::{parse_frame, BreachLog};
use crate::config::UnitCatalog;
use crate::constants::*;
use crate::error::{ConfigError, EventError};
use crate::host::GameHost;
use crate::location::{edge_cells, EdgeFlags, Location};
use crate::reinforce::reinforce;
use crate::select::least_risk_location;
use crate::units::{Currency, Owner, UnitKind};
use log::{debug, warn};

/// Deployment lanes tried for a normal scout wave, in priority order.
const SCOUT_LANES: [Location; 7] = [
    Location::new(17, 3),
    Location::new(16, 2),
    Location::new(15, 1),
    Location::new(14, 0),
    Location::new(9, 4),
    Location::new(8, 5),
    Location::new(7, 6),
];

/// Fallback when the selector finds no usable lane: fixed cell,
/// conservative cap.
const FALLBACK_DEPLOY: Location = Location::new(13, 0);
const FALLBACK_WAVE_CAP: u32 = 60;

/// Effectively "the whole mobility budget".
const WAVE_CAP: u32 = 1000;

/// The two all-in lanes evaluated while collapsed.
const ALL_IN_LANES: [Location; 2] = [Location::new(13, 0), Location::new(14, 0)];

/// Support chain hugging the left diagonal, spawn-ordered top to bottom.
const LEFT_SUPPORT_DIAGONAL: [Location; 13] = [
    Location::new(1, 12),
    Location::new(2, 11),
    Location::new(3, 10),
    Location::new(4, 9),
    Location::new(5, 8),
    Location::new(6, 7),
    Location::new(7, 6),
    Location::new(8, 5),
    Location::new(9, 4),
    Location::new(10, 3),
    Location::new(11, 2),
    Location::new(12, 1),
    Location::new(13, 0),
];

/// Mirrored chain along the right diagonal.
const RIGHT_SUPPORT_DIAGONAL: [Location; 14] = [
    Location::new(14, 0),
    Location::new(15, 1),
    Location::new(16, 2),
    Location::new(17, 3),
    Location::new(18, 4),
    Location::new(19, 5),
    Location::new(20, 6),
    Location::new(21, 7),
    Location::new(22, 8),
    Location::new(23, 9),
    Location::new(24, 10),
    Location::new(25, 11),
    Location::new(26, 12),
    Location::new(27, 13),
];

/// Proactive turret layers. The corner layer guards the left flank; the
/// front layer holds the forward row and refreshes itself every turn.
const CORNER_TURRET_LAYER: [Location; 5] = [
    Location::new(1, 13),
    Location::new(0, 13),
    Location::new(2, 12),
    Location::new(3, 11),
    Location::new(4, 10),
];

const FRONT_TURRET_LAYER: [Location; 5] = [
    Location::new(13, 12),
    Location::new(22, 12),
    Location::new(23, 12),
    Location::new(14, 12),
    Location::new(3, 12),
];

/// Support clusters shielding the left lane.
const ANCHOR_SUPPORTS: [Location; 2] = [Location::new(1, 12), Location::new(2, 11)];
const EXTENDED_SUPPORT: Location = Location::new(3, 10);

/// Health-differential thresholds for the collapse/rebuild transitions.
#[derive(Clone, Debug)]
pub struct HealthPolicy {
    pub deficit_threshold: f32,
    pub own_floor: f32,
    pub enemy_emergency_floor: f32,
    pub own_emergency_floor: f32,
    pub recovery_lead: f32,
}

impl Default for HealthPolicy {
    fn default() -> Self {
        HealthPolicy {
            deficit_threshold: COLLAPSE_DEFICIT,
            own_floor: COLLAPSE_OWN_FLOOR,
            enemy_emergency_floor: ENEMY_EMERGENCY_FLOOR,
            own_emergency_floor: OWN_EMERGENCY_FLOOR,
            recovery_lead: RECOVERY_LEAD,
        }
    }
}

/// Persistent per-match state. Created once at game start and owned by
/// the [`Strategist`]; nothing here lives at module level.
#[derive(Clone, Debug)]
pub struct Session {
    pub catalog: UnitCatalog,
    pub breaches: BreachLog,
    pub collapse_mode: bool,
    /// Most recent successful offensive deployment cell; reinforcement
    /// avoids its current egress path.
    pub last_deploy: Location,
}

impl Session {
    pub fn new(catalog: UnitCatalog) -> Session {
        Session {
            catalog,
            breaches: BreachLog::new(),
            collapse_mode: false,
            last_deploy: FALLBACK_DEPLOY,
        }
    }
}

/// Top-level turn controller exposed to the host adapter.
pub struct Strategist {
    session: Session,
    policy: HealthPolicy,
}

impl Strategist {
    /// One-time setup from the host's match configuration.
    pub fn on_game_start(raw_config: &str) -> Result<Strategist, ConfigError> {
        let catalog = UnitCatalog::from_config(raw_config)?;
        debug!(
            "configured: scout={} turret={} support={}",
            catalog.shorthand(UnitKind::Scout),
            catalog.shorthand(UnitKind::Turret),
            catalog.shorthand(UnitKind::Support),
        );
        Ok(Strategist {
            session: Session::new(catalog),
            policy: HealthPolicy::default(),
        })
    }

    pub fn with_policy(mut self, policy: HealthPolicy) -> Strategist {
        self.policy = policy;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Incremental breach recording from the mid-turn event feed. Only
    /// opponent-caused breaches are kept; a malformed batch records
    /// nothing and the error propagates.
    pub fn on_action_frame(&mut self, raw: &str) -> Result<(), EventError> {
        let batch = parse_frame(raw)?;
        for event in batch.breaches {
            if !event.self_inflicted {
                debug!("scored on at {:?}", event.location);
                self.session.breaches.record(event.location);
            }
        }
        Ok(())
    }

    /// One full decision cycle. Submission is the last host call.
    pub fn on_turn<H: GameHost>(&mut self, host: &mut H) {
        debug!(
            "turn {}: health {} vs {}, collapse={}",
            host.turn_number(),
            host.my_health(),
            host.enemy_health(),
            self.session.collapse_mode,
        );
        self.play_turn(host);
        host.submit_turn();
    }

    fn play_turn<H: GameHost>(&mut self, host: &mut H) {
        if self.session.collapse_mode {
            self.all_in_offense(host);
        } else {
            if offense_scheduled(host.turn_number()) {
                self.launch_scout_wave(host);
            }
            self.build_reactive_defense(host);
            self.build_defense_layers(host);
            self.place_support_clusters(host);
        }
        self.update_mode(host);
    }

    // ----- offense ---------------------------------------------------

    fn launch_scout_wave<H: GameHost>(&mut self, host: &mut H) {
        match least_risk_location(host, &SCOUT_LANES) {
            Some((lane, risk)) => {
                debug!("scout wave from {:?} (risk {})", lane, risk);
                if host
                    .attempt_spawn_many(UnitKind::Scout, lane, WAVE_CAP)
                    .placed()
                {
                    self.session.last_deploy = lane;
                }
            }
            None => {
                if host
                    .attempt_spawn_many(UnitKind::Scout, FALLBACK_DEPLOY, FALLBACK_WAVE_CAP)
                    .placed()
                {
                    self.session.last_deploy = FALLBACK_DEPLOY;
                }
            }
        }
    }

    /// Scripted maximum-resource burst along the less risky of the two
    /// all-in lanes: a contiguous buffing chain along one diagonal, then
    /// the full mobility budget at two launch cells beside it.
    fn all_in_offense<H: GameHost>(&mut self, host: &mut H) {
        let lane = least_risk_location(host, &ALL_IN_LANES).map(|(cell, _)| cell);
        if lane == Some(ALL_IN_LANES[0]) {
            self.sacrificial_burst(
                host,
                &LEFT_SUPPORT_DIAGONAL,
                [Location::new(14, 0), Location::new(15, 1)],
            );
        } else {
            self.sacrificial_burst(
                host,
                &RIGHT_SUPPORT_DIAGONAL,
                [Location::new(13, 0), Location::new(12, 1)],
            );
        }
    }

    fn sacrificial_burst<H: GameHost>(
        &mut self,
        host: &mut H,
        diagonal: &[Location],
        launch_cells: [Location; 2],
    ) {
        for &cell in diagonal {
            host.attempt_spawn(UnitKind::Support, cell);
        }
        for &cell in diagonal {
            host.attempt_upgrade(cell);
        }
        for cell in launch_cells {
            if host
                .attempt_spawn_many(UnitKind::Scout, cell, WAVE_CAP)
                .placed()
            {
                self.session.last_deploy = cell;
            }
        }
    }

    // ----- defense ---------------------------------------------------

    /// Reinforce breached locations, freshest first, while the per-call
    /// budget gate holds.
    fn build_reactive_defense<H: GameHost>(&mut self, host: &mut H) {
        let turret_price = host.cost_of(UnitKind::Turret).get(Currency::Mobility);
        let anchor = self.session.last_deploy;
        let weak_points: Vec<Location> = self.session.breaches.newest_first().collect();
        for weak_point in weak_points {
            if host.resource(Currency::Mobility) < turret_price {
                return;
            }
            reinforce(host, weak_point, anchor);
        }
    }

    /// The two fixed turret layers. An entry whose cell has gone empty
    /// after turn 0 first gets the reinforcement treatment; front-layer
    /// turrets are flagged for removal right after a successful spawn so
    /// they come back fresh next turn.
    fn build_defense_layers<H: GameHost>(&mut self, host: &mut H) {
        let turret_price = host.cost_of(UnitKind::Turret).get(Currency::Mobility);
        let anchor = self.session.last_deploy;
        let turn = host.turn_number();

        for &cell in &CORNER_TURRET_LAYER {
            if host.resource(Currency::Mobility) < turret_price {
                break;
            }
            if turn > 0 && !host.contains_stationary_unit(cell) {
                reinforce(host, cell, anchor);
            }
            host.attempt_spawn(UnitKind::Turret, cell);
        }

        for &cell in &FRONT_TURRET_LAYER {
            if host.resource(Currency::Mobility) < turret_price {
                break;
            }
            if turn > 0 && !host.contains_stationary_unit(cell) {
                reinforce(host, cell, anchor);
            }
            if host.attempt_spawn(UnitKind::Turret, cell).placed() {
                host.attempt_remove(cell);
            }
        }
    }

    fn place_support_clusters<H: GameHost>(&mut self, host: &mut H) {
        for &cell in &ANCHOR_SUPPORTS {
            host.attempt_spawn(UnitKind::Support, cell);
            host.attempt_upgrade(cell);
        }
        host.attempt_spawn(UnitKind::Support, EXTENDED_SUPPORT);
        if host.turn_number() > 0 {
            host.attempt_upgrade(EXTENDED_SUPPORT);
        }
    }

    // ----- mode ------------------------------------------------------

    /// At most one transition per turn, never both directions. Each
    /// transition clears the board, since the unit composition of the
    /// two modes has nothing in common.
    fn update_mode<H: GameHost>(&mut self, host: &mut H) {
        let own = host.my_health();
        let enemy = host.enemy_health();
        if !self.session.collapse_mode {
            let desperate = (enemy - own > self.policy.deficit_threshold
                && own < self.policy.own_floor)
                || enemy < self.policy.enemy_emergency_floor
                || own < self.policy.own_emergency_floor;
            if desperate {
                warn!("health {own} vs {enemy}: collapsing into all-in mode");
                self.clear_board(host);
                self.session.collapse_mode = true;
            }
        } else if own - enemy > self.policy.recovery_lead {
            warn!("health {own} vs {enemy}: leaving collapse mode, rebuilding");
            self.session.collapse_mode = false;
            self.clear_board(host);
        }
    }

    fn clear_board<H: GameHost>(&mut self, host: &mut H) {
        for (cell, occupants) in host.stationary_units() {
            if occupants.iter().any(|o| o.owner == Owner::Ally) {
                host.attempt_remove(cell);
            }
        }
    }

    // ----- auxiliary operations ---------------------------------------

    /// Dump the remaining mobility budget into interceptors spread over
    /// the open friendly-edge cells, cycling the list deterministically.
    pub fn stall_with_interceptors<H: GameHost>(&mut self, host: &mut H) {
        let open: Vec<Location> = edge_cells(EdgeFlags::BOTTOM_LEFT | EdgeFlags::BOTTOM_RIGHT)
            .into_iter()
            .filter(|&cell| !host.contains_stationary_unit(cell))
            .collect();
        if open.is_empty() {
            return;
        }

        let price = host.cost_of(UnitKind::Interceptor).get(Currency::Mobility);
        if price <= 0.0 {
            // A zero-priced interceptor would never drain the budget.
            return;
        }

        let mut slot = 0;
        let mut consecutive_failures = 0;
        while host.resource(Currency::Mobility) >= price
            && consecutive_failures < open.len()
        {
            let cell = open[slot % open.len()];
            if host.attempt_spawn(UnitKind::Interceptor, cell).placed() {
                consecutive_failures = 0;
            } else {
                consecutive_failures += 1;
            }
            slot += 1;
        }
    }
}

/// Whether this turn launches an offensive wave under the stepped-down
/// cadence (every turn early, every 2nd, 3rd, then 4th as the match
/// matures).
fn offense_scheduled(turn: u32) -> bool {
    let period = offense_period(turn);
    period == 1 || turn % period == 1
}
