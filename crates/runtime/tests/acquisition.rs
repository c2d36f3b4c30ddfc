mod common;

use script_runtime::{AcquisitionEvent, BankOp, Event, MarketOp, Precondition, ScriptError, Topic};
use world_core::{Amount, EquipmentSlot, ItemQuantity, Position, Verb};
use world_sandbox::{Action, ItemDef, Sandbox};

use common::{BRONZE_ARROW, BRONZE_SWORD, COINS, START, config, context, context_with, world};

/// Banked currency covers the request: one withdrawal of exactly the requested
/// amount, no purchase and no deposit.
#[tokio::test]
async fn withdraws_exactly_the_requested_currency() {
    let sandbox = world().banked(COINS, 1000).build();
    let ctx = context(&sandbox);

    let report = ctx
        .obtain(&[ItemQuantity::new(COINS, 500)])
        .await
        .expect("bank holds enough coins");

    assert_eq!(report.withdrawals, vec![ItemQuantity::new(COINS, 500)]);
    assert!(report.purchases.is_empty());
    assert!(!report.deposited);

    let actions = sandbox.actions();
    assert!(!actions.iter().any(Action::is_purchase));
    assert_eq!(
        actions.iter().filter(|a| a.is_withdrawal()).collect::<Vec<_>>(),
        vec![&Action::Bank(BankOp::Withdraw {
            item: COINS,
            amount: Amount::Exact(500),
            mode: Default::default(),
        })]
    );
    assert_eq!(actions.last(), Some(&Action::Bank(BankOp::Close)));

    sandbox.with_world(|w| {
        assert_eq!(w.carried_quantity(COINS), 500);
        assert_eq!(w.bank_quantity(COINS), 500);
    });
}

/// Nothing banked or carried: fetch currency, buy once, bank everything, then
/// withdraw the purchase.
#[tokio::test]
async fn buys_what_the_bank_cannot_cover() {
    let sandbox = world()
        .banked(COINS, 1000)
        .clerk("Grand Exchange Clerk", Position::new(4, 5))
        .listing(BRONZE_ARROW, 2, 10_000)
        .build();
    let ctx = context(&sandbox);
    let mut events = ctx.events().subscribe(Topic::Acquisition);

    let report = ctx
        .obtain(&[ItemQuantity::new(BRONZE_ARROW, 100)])
        .await
        .expect("marketplace sells arrows");

    assert_eq!(report.purchases, vec![ItemQuantity::new(BRONZE_ARROW, 100)]);
    assert!(report.deposited);
    assert_eq!(report.withdrawals, vec![ItemQuantity::new(BRONZE_ARROW, 100)]);

    let actions = sandbox.actions();
    assert_eq!(actions.iter().filter(|a| a.is_purchase()).count(), 1);
    assert_eq!(actions.iter().filter(|a| a.is_deposit()).count(), 1);
    assert!(actions.contains(&Action::Market(MarketOp::Buy {
        item: BRONZE_ARROW,
        quantity: 100,
    })));
    // Currency is fetched whole before the marketplace opens.
    assert!(actions.contains(&Action::Bank(BankOp::Withdraw {
        item: COINS,
        amount: Amount::All,
        mode: Default::default(),
    })));

    sandbox.with_world(|w| {
        assert_eq!(w.carried_quantity(BRONZE_ARROW), 100);
        assert_eq!(w.bank_quantity(COINS), 800);
        assert_eq!(w.carried_quantity(COINS), 0);
    });

    let mut purchased = 0;
    while let Ok(event) = events.try_recv() {
        if let Event::Acquisition(AcquisitionEvent::Purchased { item, quantity, .. }) = event {
            assert_eq!(item, BRONZE_ARROW);
            purchased += quantity;
        }
    }
    assert_eq!(purchased, 100);
}

#[tokio::test]
async fn second_obtain_is_a_noop() {
    let sandbox = world().banked(COINS, 1000).build();
    let ctx = context(&sandbox);
    let request = [ItemQuantity::new(COINS, 500)];

    ctx.obtain(&request).await.expect("first obtain");
    let sent = sandbox.actions().len();
    let tick = sandbox.with_world(|w| w.tick());

    let report = ctx.obtain(&request).await.expect("second obtain");
    assert!(report.is_noop());
    assert_eq!(sandbox.actions().len(), sent);
    assert_eq!(sandbox.with_world(|w| w.tick()), tick);
}

#[tokio::test]
async fn worn_items_count_toward_holdings() {
    let sandbox = world()
        .wearing(ItemDef::new(1277, "Bronze sword").equips_to(EquipmentSlot::Weapon))
        .build();
    let ctx = context(&sandbox);

    let request = [ItemQuantity::new(BRONZE_SWORD, 1)];
    assert!(ctx.has_items(&request));
    assert!(!ctx.inventory_has_items(&request));

    let report = ctx.obtain(&request).await.expect("already worn");
    assert!(report.is_noop());
    assert!(sandbox.actions().is_empty());
}

#[tokio::test]
async fn missing_bank_access_is_a_precondition_violation() {
    let sandbox = Sandbox::builder().at(START).banked(COINS, 10).build();
    let ctx = context(&sandbox);

    let err = ctx
        .obtain(&[ItemQuantity::new(COINS, 5)])
        .await
        .expect_err("no banker, booth or chest");

    assert!(matches!(
        err,
        ScriptError::PreconditionViolation(Precondition::NoBankAccess)
    ));
    assert!(sandbox.actions().is_empty());
}

#[tokio::test]
async fn unfilled_purchase_is_insufficient_resources() {
    let sandbox = world()
        .banked(COINS, 1000)
        .clerk("Grand Exchange Clerk", Position::new(4, 5))
        .listing(BRONZE_ARROW, 2, 10)
        .build();
    let mut config = config();
    config.waits.purchase_ticks = 5;
    let ctx = context_with(&sandbox, config);

    let err = ctx
        .obtain(&[ItemQuantity::new(BRONZE_ARROW, 100)])
        .await
        .expect_err("only 10 arrows for sale");

    match err {
        ScriptError::InsufficientResources {
            item,
            requested,
            held,
        } => {
            assert_eq!(item, BRONZE_ARROW);
            assert_eq!(requested, 100);
            assert_eq!(held, 0);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn bank_chest_opens_with_use() {
    let sandbox = Sandbox::builder()
        .at(START)
        .chest("Bank chest", Position::new(5, 6), Verb::Use)
        .banked(COINS, 50)
        .build();
    let ctx = context(&sandbox);

    ctx.obtain(&[ItemQuantity::new(COINS, 50)])
        .await
        .expect("chest is a bank");

    assert!(matches!(
        sandbox.actions().first(),
        Some(Action::Interact { verb: Verb::Use, .. })
    ));
    assert_eq!(sandbox.with_world(|w| w.carried_quantity(COINS)), 50);
}

/// Thirty swords banked, twenty-eight free slots: the withdrawal lands short
/// and the shortfall is reported without burning the wait budget.
#[tokio::test]
async fn withdrawal_short_of_room_is_insufficient_resources() {
    let sandbox = world().banked(BRONZE_SWORD, 30).build();
    let ctx = context(&sandbox);

    let err = ctx
        .obtain(&[ItemQuantity::new(BRONZE_SWORD, 30)])
        .await
        .expect_err("only 28 slots");

    match err {
        ScriptError::InsufficientResources {
            item,
            requested,
            held,
        } => {
            assert_eq!(item, BRONZE_SWORD);
            assert_eq!(requested, 30);
            assert_eq!(held, 28);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(ctx.snapshot().tick.0 < 10);
    sandbox.with_world(|w| {
        assert_eq!(w.carried_quantity(BRONZE_SWORD), 28);
        assert_eq!(w.bank_quantity(BRONZE_SWORD), 2);
    });
}

#[tokio::test]
async fn withdraw_reports_what_arrived() {
    let sandbox = world().banked(BRONZE_SWORD, 30).build();
    let ctx = context(&sandbox);
    let mut events = ctx.events().subscribe(Topic::Acquisition);

    let report = ctx
        .withdraw(&[ItemQuantity::new(BRONZE_SWORD, 30)])
        .await
        .expect("partial withdrawal");

    assert_eq!(report.withdrawals, vec![ItemQuantity::new(BRONZE_SWORD, 28)]);
    assert!(matches!(
        events.try_recv(),
        Ok(Event::Acquisition(AcquisitionEvent::Withdrawn {
            amount: Amount::Exact(28),
            ..
        }))
    ));
}
