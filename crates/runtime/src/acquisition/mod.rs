//! Resource acquisition: make requested items end up carried or worn.
//!
//! ```text
//! obtain(items)
//!   ├─ carried + worn already cover every item ─▶ done, no actions
//!   ├─ obtain_bank: shortfall = requested - banked - carried
//!   │     buy each positive shortfall, then deposit the inventory
//!   ├─ withdraw:    need = requested - carried
//!   │     withdraw each positive need by id
//!   └─ verify carried + worn ≥ requested, else InsufficientResources
//! ```
//!
//! Purchases happen before the deposit and the deposit before withdrawal needs
//! are recomputed. Every delta is recomputed from a fresh snapshot, so a second
//! `obtain` with unchanged holdings sends nothing.
mod ledger;

pub use ledger::InventoryLedger;

use tracing::{debug, info};
use world_core::{Amount, ItemQuantity};

use crate::api::{MatchMode, Result, ScriptError};
use crate::context::ScriptContext;
use crate::session::{BankSession, MarketSession};

/// Actions taken by one acquisition call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcquisitionReport {
    pub purchases: Vec<ItemQuantity>,
    pub withdrawals: Vec<ItemQuantity>,
    pub deposited: bool,
}

impl AcquisitionReport {
    /// True when no real-world action was taken.
    pub fn is_noop(&self) -> bool {
        self.purchases.is_empty() && self.withdrawals.is_empty() && !self.deposited
    }

    fn merge(&mut self, other: AcquisitionReport) {
        self.purchases.extend(other.purchases);
        self.withdrawals.extend(other.withdrawals);
        self.deposited |= other.deposited;
    }
}

impl ScriptContext {
    /// Guarantees each requested item is carried or worn in at least the
    /// requested quantity.
    ///
    /// # Errors
    ///
    /// Session and wait failures propagate as-is; the sequence aborts in its
    /// partially completed state. [`ScriptError::InsufficientResources`] if the
    /// items are still short after withdrawal.
    pub async fn obtain(&self, items: &[ItemQuantity]) -> Result<AcquisitionReport> {
        if InventoryLedger::new(&self.snapshot()).holds(items) {
            debug!(?items, "already holding requested items");
            return Ok(AcquisitionReport::default());
        }

        let mut report = self.obtain_bank(items).await?;
        report.merge(self.withdraw(items).await?);
        BankSession::current(self).close().await?;

        let snapshot = self.snapshot();
        let ledger = InventoryLedger::new(&snapshot);
        for request in items {
            let held = ledger.carried(request.item) + ledger.worn(request.item);
            if held < request.quantity {
                return Err(ScriptError::InsufficientResources {
                    item: request.item,
                    requested: request.quantity,
                    held,
                });
            }
        }

        info!(?report, "acquisition complete");
        Ok(report)
    }

    /// Buys whatever the bank and carried inventory cannot cover between them,
    /// then banks the purchases together with the rest of the inventory.
    ///
    /// Leaves the bank open.
    pub async fn obtain_bank(&self, items: &[ItemQuantity]) -> Result<AcquisitionReport> {
        let bank = BankSession::open(self).await?;
        let shortfalls = InventoryLedger::new(&self.snapshot()).purchase_shortfalls(items);
        let mut report = AcquisitionReport::default();
        if shortfalls.is_empty() {
            debug!("bank covers every request");
            return Ok(report);
        }
        bank.close().await?;

        let mut market = MarketSession::open(self).await?;
        for shortfall in &shortfalls {
            market.buy(shortfall.item, shortfall.quantity).await?;
            report.purchases.push(*shortfall);
        }
        market.close().await?;

        let mut bank = BankSession::open(self).await?;
        bank.deposit_inventory().await?;
        report.deposited = true;
        Ok(report)
    }

    /// Withdraws `requested - carried` of each item from the bank.
    ///
    /// Opens the bank only if something is needed, and leaves it open. The
    /// report lists what actually arrived; a short withdrawal is not an error
    /// here, `obtain` checks the totals afterwards.
    pub async fn withdraw(&self, items: &[ItemQuantity]) -> Result<AcquisitionReport> {
        let mut report = AcquisitionReport::default();
        if InventoryLedger::new(&self.snapshot()).withdrawal_needs(items).is_empty() {
            return Ok(report);
        }

        let mut bank = BankSession::open(self).await?;
        // Carried stock is re-read after the bank opens.
        let needs = InventoryLedger::new(&self.snapshot()).withdrawal_needs(items);
        for need in needs {
            let moved = bank
                .withdraw(need.item, Amount::Exact(need.quantity), MatchMode::ById)
                .await?;
            if moved > 0 {
                report.withdrawals.push(ItemQuantity::new(need.item, moved));
            }
        }
        Ok(report)
    }

    /// Opens (or attaches to) the bank.
    pub async fn bank(&self) -> Result<BankSession<'_>> {
        BankSession::open(self).await
    }

    /// Opens the marketplace, fetching currency first if none is carried.
    pub async fn marketplace(&self) -> Result<MarketSession<'_>> {
        MarketSession::open(self).await
    }

    /// Every request is met by carried stock alone.
    pub fn inventory_has_items(&self, items: &[ItemQuantity]) -> bool {
        InventoryLedger::new(&self.snapshot()).carried_holds(items)
    }

    /// Every request is met by carried and worn stock combined.
    pub fn has_items(&self, items: &[ItemQuantity]) -> bool {
        InventoryLedger::new(&self.snapshot()).holds(items)
    }
}
