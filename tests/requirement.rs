// tests/requirement.rs
use idle_prestige::lens;
use idle_prestige::mechanics::Decimal;
use idle_prestige::systems::formula::Formula;
use idle_prestige::systems::purchasable::{
    Repeatable, RepeatableState, Repeatables, Upgrade, UpgradeState, Upgrades,
};
use idle_prestige::systems::requirement::{CostRequirement, PurchaseStatus};
use idle_prestige::systems::resource::Resource;
use idle_prestige::systems::sdk::Predicate;
use idle_prestige::PurchaseError;

#[derive(Clone, Debug, PartialEq)]
struct Shop {
    gold: Resource,
    free: bool,
    unlocked: bool,
    upgrades: Vec<UpgradeState>,
    buyables: Vec<RepeatableState>,
}

impl Shop {
    fn with_gold(gold: f64) -> Self {
        let mut shop = Self {
            gold: Resource::new("gold", 0.0),
            free: false,
            unlocked: true,
            upgrades: vec![UpgradeState::default(); 2],
            buyables: vec![RepeatableState::default(); 2],
        };
        shop.gold.set(Decimal::from(gold));
        shop
    }
}

fn upgrades() -> Upgrades<Shop> {
    let gold = lens!(Shop => gold);
    Upgrades::new(lens!(Shop => upgrades))
        .with(Upgrade::new(
            "sword",
            CostRequirement::flat(gold, 50.0)
                .with_requires_pay(Predicate::from_fn(|s: &Shop| !s.free)),
        ))
        .with(
            Upgrade::new("shield", CostRequirement::flat(gold, 10.0))
                .visible_when(Predicate::from_fn(|s: &Shop| s.unlocked)),
        )
}

/// `10 * 2^amount`, capped at 3.
fn buyables() -> Repeatables<Shop> {
    let gold = lens!(Shop => gold);
    Repeatables::new(lens!(Shop => buyables))
        .with(
            Repeatable::new(
                "potion",
                CostRequirement::scaling(gold, Formula::variable().pow_base(2.0).mul(10.0)),
            )
            .with_limit(3),
        )
        .with(Repeatable::new("arrow", CostRequirement::flat(gold, 1.0)))
}

#[test]
fn unaffordable_purchase_changes_nothing() {
    let mut shop = Shop::with_gold(49.0);
    let before = shop.clone();

    let err = upgrades().purchase(&mut shop, 0).unwrap_err();
    assert_eq!(
        err,
        PurchaseError::Unaffordable {
            cost: Decimal::from(50),
            available: Decimal::from(49),
        }
    );
    assert_eq!(shop, before, "rejection must not touch state");
}

#[test]
fn waived_payment_still_requires_affordability() {
    let upgrades = upgrades();

    let mut poor = Shop::with_gold(10.0);
    poor.free = true;
    assert_eq!(upgrades.status(&poor, 0), Some(PurchaseStatus::Unaffordable));
    assert!(upgrades.purchase(&mut poor, 0).is_err());

    let mut rich = Shop::with_gold(60.0);
    rich.free = true;
    upgrades.purchase(&mut rich, 0).unwrap();
    assert!(upgrades.is_bought(&rich, 0));
    assert_eq!(rich.gold.value(), Decimal::from(60), "free purchase deducts nothing");
}

#[test]
fn upgrade_lifecycle() {
    let upgrades = upgrades();
    let mut shop = Shop::with_gold(100.0);
    shop.unlocked = false;

    assert_eq!(upgrades.status(&shop, 1), Some(PurchaseStatus::Locked));
    assert_eq!(upgrades.purchase(&mut shop, 1), Err(PurchaseError::Locked));

    shop.unlocked = true;
    assert_eq!(upgrades.status(&shop, 1), Some(PurchaseStatus::Affordable));
    upgrades.purchase(&mut shop, 1).unwrap();
    assert_eq!(upgrades.status(&shop, 1), Some(PurchaseStatus::Bought));
    assert_eq!(upgrades.purchase(&mut shop, 1), Err(PurchaseError::AlreadyBought));
    assert_eq!(shop.gold.value(), Decimal::from(90));
    assert_eq!(upgrades.bought_count(&shop), 1);
}

#[test]
fn unknown_index_is_rejected() {
    let mut shop = Shop::with_gold(100.0);
    assert_eq!(upgrades().status(&shop, 7), None);
    assert_eq!(
        upgrades().purchase(&mut shop, 7),
        Err(PurchaseError::Unknown { index: 7 })
    );
    assert_eq!(
        buyables().purchase(&mut shop, 7),
        Err(PurchaseError::Unknown { index: 7 })
    );
    assert_eq!(buyables().amount(&shop, 7), 0);
}

#[test]
fn scaling_cost_grows_with_amount_and_respects_limit() {
    let buyables = buyables();
    let mut shop = Shop::with_gold(1000.0);

    let mut paid = Vec::new();
    for _ in 0..3 {
        let cost = buyables.cost(&shop, 0).unwrap();
        buyables.purchase(&mut shop, 0).unwrap();
        paid.push(cost);
    }
    assert_eq!(paid, vec![Decimal::from(10), Decimal::from(20), Decimal::from(40)]);
    assert_eq!(buyables.amount(&shop, 0), 3);
    assert_eq!(buyables.status(&shop, 0), Some(PurchaseStatus::Maxed));
    assert_eq!(
        buyables.purchase(&mut shop, 0),
        Err(PurchaseError::AtLimit { limit: 3 })
    );
    assert_eq!(shop.gold.value(), Decimal::from(930));
}

#[test]
fn affordability_is_monotonic_in_amount() {
    let buyables = buyables();
    let mut shop = Shop::with_gold(100.0);

    // Once unaffordable at some amount, every higher amount stays unaffordable.
    let requirement = &buyables.get(0).unwrap().requirement;
    let first_unaffordable = (0..64)
        .find(|&amount| !requirement.can_afford(&shop, amount))
        .expect("cost eventually exceeds 100");
    for amount in first_unaffordable..first_unaffordable + 32 {
        assert!(!requirement.can_afford(&shop, amount), "affordable again at {amount}");
    }

    shop.gold.set(Decimal::NAN);
    assert!(!requirement.can_afford(&shop, 0), "NaN balance never affords");
}

#[test]
fn repeatable_buys_one_unit_per_call() {
    let buyables = buyables();
    let mut shop = Shop::with_gold(2.5);
    buyables.purchase(&mut shop, 1).unwrap();
    buyables.purchase(&mut shop, 1).unwrap();
    assert_eq!(buyables.amount(&shop, 1), 2);
    assert_eq!(buyables.status(&shop, 1), Some(PurchaseStatus::Unaffordable));
    assert!(buyables.purchase(&mut shop, 1).is_err());
    assert_eq!(shop.gold.value(), Decimal::from(0.5));
}
