// tests/modifier.rs
use idle_prestige::lens;
use idle_prestige::mechanics::Decimal;
use idle_prestige::systems::modifier::{Modifier, Term, TermKind};
use idle_prestige::systems::purchasable::{Upgrade, UpgradeState, Upgrades};
use idle_prestige::systems::requirement::CostRequirement;
use idle_prestige::systems::resource::Resource;
use idle_prestige::systems::sdk::Predicate;
use idle_prestige::systems::tick;

/* ──────────────────────────────────────────────────────────────────────────
Toy layer: one resource, two upgrades, a gain modifier on base 0
────────────────────────────────────────────────────────────────────────── */

struct Toy {
    points: Resource,
    upgrades: Vec<UpgradeState>,
}

impl Toy {
    fn new() -> Self {
        Self {
            points: Resource::new("points", 0.0),
            upgrades: vec![UpgradeState::default(); 2],
        }
    }
}

fn bought(index: usize) -> Predicate<Toy> {
    Predicate::from_fn(move |s: &Toy| s.upgrades[index].bought)
}

fn upgrades() -> Upgrades<Toy> {
    let points = lens!(Toy => points);
    Upgrades::new(lens!(Toy => upgrades))
        .with(Upgrade::new("one", CostRequirement::flat(points, 0.0)))
        .with(Upgrade::new("two", CostRequirement::flat(points, 10.0)))
}

fn gain() -> Modifier<Toy> {
    Modifier::new()
        .with(Term::additive("one", 1.0).enabled_when(bought(0)))
        .with(Term::multiplicative("two", 4.0).enabled_when(bought(1)))
}

fn run_tick(toy: &mut Toy, gain: &Modifier<Toy>, delta: f64) {
    let per_second = gain.apply(toy, Decimal::ZERO);
    tick::accumulate(&mut toy.points, per_second, delta);
}

#[test]
fn free_additive_upgrade_yields_one_point_per_second() {
    let mut toy = Toy::new();
    let upgrades = upgrades();
    let gain = gain();

    upgrades.purchase(&mut toy, 0).expect("cost-0 upgrade is affordable at 0");
    run_tick(&mut toy, &gain, 1.0);

    assert_eq!(toy.points.value(), Decimal::ONE, "one tick of +1/s");
}

#[test]
fn multiplicative_upgrade_deducts_cost_and_quadruples_gain() {
    let mut toy = Toy::new();
    let upgrades = upgrades();
    let gain = gain();

    upgrades.purchase(&mut toy, 0).unwrap();
    toy.points.set(Decimal::from(10));
    assert_eq!(gain.apply(&toy, Decimal::ZERO), Decimal::ONE);

    upgrades.purchase(&mut toy, 1).expect("10 points buys a cost-10 upgrade");
    assert_eq!(toy.points.value(), Decimal::ZERO, "cost deducted in full");
    assert_eq!(gain.apply(&toy, Decimal::ZERO), Decimal::from(4));

    run_tick(&mut toy, &gain, 1.0);
    assert_eq!(toy.points.value(), Decimal::from(4));
}

#[test]
fn exponent_applies_to_the_running_value() {
    let modifier: Modifier<()> = Modifier::new()
        .with(Term::multiplicative("a", 4.0))
        .with(Term::multiplicative("b", 4.0))
        .with(Term::exponential("c", 1.2));

    let got = modifier.apply(&(), Decimal::ONE).to_f64();
    let expected = 16f64.powf(1.2);
    assert!((got - expected).abs() < 1e-9, "(1*4*4)^1.2 = {expected}, got {got}");
    assert!((got - 16.0).abs() > 1.0, "must not be 1^1.2*4*4");
}

#[test]
fn all_terms_disabled_is_identity() {
    let modifier: Modifier<()> = Modifier::new()
        .with(Term::additive("a", 7.0).enabled_when(false))
        .with(Term::multiplicative("b", 3.0).enabled_when(false))
        .with(Term::exponential("c", 2.0).enabled_when(false));

    for base in [0.0, 1.0, 12.5, -3.0, 1e300] {
        let base = Decimal::from(base);
        assert_eq!(modifier.apply(&(), base), base, "identity at {base}");
    }
    assert!(Modifier::<()>::new().apply(&(), Decimal::NAN).is_nan());
}

#[test]
fn apply_is_pure() {
    let toy = {
        let mut toy = Toy::new();
        toy.upgrades[0].bought = true;
        toy.upgrades[1].bought = true;
        toy
    };
    let gain = gain();
    let first = gain.apply(&toy, Decimal::ZERO);
    for _ in 0..10 {
        assert_eq!(gain.apply(&toy, Decimal::ZERO), first);
    }
}

#[test]
fn breakdown_keeps_disabled_slots() {
    let mut toy = Toy::new();
    toy.upgrades[1].bought = true;
    let rows = gain().breakdown(&toy, Decimal::ZERO);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].kind, TermKind::Additive);
    assert!(!rows[0].enabled);
    assert!(rows[1].enabled);
    assert_eq!(rows[1].value, Decimal::ZERO, "0 * 4 with 'one' disabled");
}
