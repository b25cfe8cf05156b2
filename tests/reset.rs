// tests/reset.rs
#![cfg(feature = "system-reset_prestige")]

use idle_prestige::mechanics::Decimal;
use idle_prestige::systems::reset_prestige::{Branch, Reset, ResetGraph, ResetTarget};
use idle_prestige::systems::resource::Resource;
use idle_prestige::systems::sdk::Predicate;

/* ──────────────────────────────────────────────────────────────────────────
Two-layer toy: Rebirth cascades into Cash
────────────────────────────────────────────────────────────────────────── */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tier {
    Cash,
    Rebirth,
    Super,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Key {
    Points(Tier),
    Upgrades { keep: usize },
}

#[derive(Clone, Debug, PartialEq)]
struct World {
    cash: Resource,
    rp: Resource,
    srp: Resource,
    cash_upgrades: Vec<bool>,
    keep_upgrades: bool,
    linked: bool,
}

impl World {
    fn new() -> Self {
        Self {
            cash: Resource::new("cash", 10.0),
            rp: Resource::new("rp", 0.0),
            srp: Resource::new("srp", 0.0),
            cash_upgrades: vec![false; 4],
            keep_upgrades: false,
            linked: true,
        }
    }

    fn progressed() -> Self {
        let mut world = Self::new();
        world.cash.set(Decimal::from(123_456));
        world.rp.set(Decimal::from(7));
        world.srp.set(Decimal::from(2));
        world.cash_upgrades = vec![true; 4];
        world
    }

    fn points_mut(&mut self, tier: Tier) -> &mut Resource {
        match tier {
            Tier::Cash => &mut self.cash,
            Tier::Rebirth => &mut self.rp,
            Tier::Super => &mut self.srp,
        }
    }
}

impl ResetTarget<Key> for World {
    fn reset_entity(&mut self, key: &Key) {
        match *key {
            Key::Points(tier) => self.points_mut(tier).reset(),
            Key::Upgrades { keep } => {
                for bought in self.cash_upgrades.iter_mut().skip(keep) {
                    *bought = false;
                }
            }
        }
    }
}

fn graph() -> ResetGraph<World, Tier, Key> {
    ResetGraph::new()
        .with_reset(
            Tier::Cash,
            Reset::new(|world: &World, _trigger: &Tier| {
                let keep = if world.keep_upgrades { 2 } else { 0 };
                vec![Key::Points(Tier::Cash), Key::Upgrades { keep }]
            }),
        )
        .with_reset(Tier::Rebirth, Reset::fixed(vec![Key::Points(Tier::Rebirth)]))
        .with_reset(Tier::Super, Reset::fixed(vec![Key::Points(Tier::Super)]))
        .with_branch(
            Branch::new(Tier::Rebirth, Tier::Cash)
                .enabled_when(Predicate::from_fn(|world: &World| world.linked)),
        )
        .with_branch(Branch::new(Tier::Super, Tier::Rebirth))
}

#[test]
fn rebirth_cascades_into_cash_but_not_itself() {
    let graph = graph();
    let mut world = World::progressed();

    let plan = graph.reset(&mut world, Tier::Rebirth);

    assert_eq!(plan.layers, vec![Tier::Cash]);
    assert_eq!(world.cash.value(), Decimal::from(10), "cash back to its default");
    assert!(world.cash_upgrades.iter().all(|&bought| !bought), "all cash upgrades cleared");
    assert_eq!(world.rp.value(), Decimal::from(7), "the trigger keeps its currency");
    assert_eq!(world.srp.value(), Decimal::from(2), "upstream untouched");
}

#[test]
fn cascade_is_transitive() {
    let graph = graph();
    let mut world = World::progressed();

    let plan = graph.reset(&mut world, Tier::Super);

    assert_eq!(plan.layers, vec![Tier::Rebirth, Tier::Cash]);
    assert!(world.cash.is_default());
    assert!(world.rp.is_default());
    assert_eq!(world.srp.value(), Decimal::from(2));
}

#[test]
fn disabled_branch_stops_the_cascade() {
    let graph = graph();
    let mut world = World::progressed();
    world.linked = false;

    let plan = graph.reset(&mut world, Tier::Rebirth);
    assert!(plan.is_empty());
    assert_eq!(world.cash.value(), Decimal::from(123_456));
}

#[test]
fn second_reset_is_a_no_op() {
    let graph = graph();
    let mut world = World::progressed();

    graph.reset(&mut world, Tier::Super);
    let once = world.clone();
    graph.reset(&mut world, Tier::Super);
    assert_eq!(world, once);
}

#[test]
fn scope_resolver_reads_state_at_reset_time() {
    let graph = graph();
    let mut world = World::progressed();
    world.keep_upgrades = true;

    graph.reset(&mut world, Tier::Rebirth);
    assert_eq!(world.cash_upgrades, vec![true, true, false, false]);
}

#[test]
fn cycles_visit_each_layer_once() {
    let graph = graph()
        .with_branch(Branch::new(Tier::Cash, Tier::Rebirth))
        .with_branch(Branch::new(Tier::Cash, Tier::Super));
    let world = World::progressed();

    let plan = graph.plan(&world, Tier::Super);
    assert_eq!(plan.layers, vec![Tier::Rebirth, Tier::Cash]);
    assert_eq!(
        plan.entities,
        vec![
            Key::Points(Tier::Rebirth),
            Key::Points(Tier::Cash),
            Key::Upgrades { keep: 0 },
        ]
    );
}

#[test]
fn planning_does_not_mutate() {
    let graph = graph();
    let world = World::progressed();
    let before = world.clone();
    let _ = graph.plan(&world, Tier::Super);
    assert_eq!(world, before);
}

#[cfg(feature = "system-conversion")]
mod prestige {
    use super::*;
    use idle_prestige::lens;
    use idle_prestige::systems::conversion::Conversion;
    use idle_prestige::systems::formula::Formula;
    use idle_prestige::systems::reset_prestige::{prestige, PrestigeGate};
    use idle_prestige::PrestigeError;

    fn rebirth() -> (Conversion<World>, PrestigeGate<World>) {
        let conversion = Conversion::new(
            lens!(World => cash),
            lens!(World => rp),
            Formula::variable().div(100_000.0).sqrt(),
        );
        (conversion, PrestigeGate::new(1.0))
    }

    #[test]
    fn prestige_grants_gain_after_the_cascade() {
        let graph = graph();
        let (conversion, gate) = rebirth();
        let mut world = World::progressed();
        world.cash.set(Decimal::from(400_000));

        let gain = prestige(&mut world, Tier::Rebirth, &conversion, &gate, &graph).unwrap();

        assert_eq!(gain, Decimal::from(2));
        assert_eq!(world.rp.value(), Decimal::from(9), "7 held + 2 gained");
        assert!(world.cash.is_default());
    }

    #[test]
    fn rejected_prestige_leaves_state_alone() {
        let graph = graph();
        let (conversion, gate) = rebirth();
        let mut world = World::progressed();
        world.cash.set(Decimal::from(50_000));
        let before = world.clone();

        let err = prestige(&mut world, Tier::Rebirth, &conversion, &gate, &graph).unwrap_err();
        assert_eq!(
            err,
            PrestigeError::InsufficientGain {
                gain: Decimal::ZERO,
                required: Decimal::ONE,
            }
        );
        assert_eq!(world, before);

        let locked = gate.unlocked_when(false);
        world.cash.set(Decimal::from(1e9));
        let err = prestige(&mut world, Tier::Rebirth, &conversion, &locked, &graph).unwrap_err();
        assert_eq!(err, PrestigeError::Locked);
    }
}
