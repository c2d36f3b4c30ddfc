use tracing::{debug, info, warn};
use world_core::{Amount, Area, Interfaces, ItemId, Position, Queryable, Verb, WorldSnapshot};

use super::{Lifecycle, SessionState};
use crate::acquisition::InventoryLedger;
use crate::api::{BankOp, MatchMode, Precondition, Result, ScriptError, SessionKind};
use crate::context::ScriptContext;
use crate::events::{AcquisitionEvent, Event};

/// Handle on the bank interface.
pub struct BankSession<'c> {
    ctx: &'c ScriptContext,
    lifecycle: Lifecycle,
}

impl<'c> BankSession<'c> {
    /// Mirrors the bank interface as it is right now, without opening it.
    pub fn current(ctx: &'c ScriptContext) -> Self {
        let state = if ctx.snapshot().is_open(Interfaces::BANK) {
            SessionState::Open
        } else {
            SessionState::Closed
        };
        Self {
            ctx,
            lifecycle: Lifecycle::new(SessionKind::Bank, state),
        }
    }

    /// Opens the bank, walking to the nearest known bank first.
    ///
    /// Returns immediately when the bank is already open. Access points are
    /// tried in priority order: banker (Bank, then Talk-to), booth, chest.
    ///
    /// # Errors
    ///
    /// - [`ScriptError::PreconditionViolation`] when no access point is nearby
    /// - [`ScriptError::Timeout`] when the interface does not appear within the
    ///   configured bank-open budget
    pub async fn open(ctx: &'c ScriptContext) -> Result<Self> {
        let mut session = Self::current(ctx);
        if session.lifecycle.state == SessionState::Open {
            return Ok(session);
        }
        session.transition(SessionState::Opening);

        walk_to_nearest_bank(ctx).await?;
        session.request_open()?;

        let budget = ctx.config().waits.bank_open_ticks;
        ctx.wait()
            .until_within("bank open", budget, |s| s.is_open(Interfaces::BANK))
            .await?;

        session.transition(SessionState::Open);
        Ok(session)
    }

    fn request_open(&self) -> Result<()> {
        let snapshot = self.ctx.snapshot();
        let bank = &self.ctx.config().bank;

        // Bankers without a Bank verb still open the bank through Talk-to.
        for verb in [Verb::Bank, Verb::TalkTo] {
            if let Ok(banker) = snapshot
                .creatures()
                .with_names(&bank.bankers)
                .with_verb(verb)
                .nearest()
            {
                return self.ctx.interact_with(banker, verb);
            }
        }
        if let Ok(booth) = snapshot
            .objects()
            .with_names(&bank.booths)
            .with_verb(Verb::Bank)
            .nearest()
        {
            return self.ctx.interact_with(booth, Verb::Bank);
        }
        if let Ok(chest) = snapshot.objects().with_names(&bank.chests).nearest() {
            let verb = if chest.has_verb(Verb::Bank) {
                Verb::Bank
            } else {
                Verb::Use
            };
            return self.ctx.interact_with(chest, verb);
        }

        Err(ScriptError::PreconditionViolation(Precondition::NoBankAccess))
    }

    pub fn state(&self) -> SessionState {
        self.lifecycle.state
    }

    /// True while this handle is open and the interface is still visible.
    pub fn is_open(&self) -> bool {
        self.lifecycle.state == SessionState::Open && self.ctx.snapshot().is_open(Interfaces::BANK)
    }

    /// Banked quantity of `item` on the latest tick.
    pub fn quantity(&self, item: ItemId) -> u64 {
        InventoryLedger::new(&self.ctx.snapshot()).banked(item)
    }

    /// Withdraws `amount` of `item` and waits for the bank to hand it over.
    ///
    /// Withdrawing more than the bank holds takes what is there. A request for
    /// zero units, or for an item the bank does not hold, sends nothing.
    /// Returns how many units reached the carried inventory, which is less
    /// than requested when the inventory runs out of room.
    pub async fn withdraw(&mut self, item: ItemId, amount: Amount, mode: MatchMode) -> Result<u64> {
        self.ensure_open()?;

        let (carried, banked) = {
            let snapshot = self.ctx.snapshot();
            let ledger = InventoryLedger::new(&snapshot);
            (ledger.carried(item), ledger.banked(item))
        };
        let moving = match amount {
            Amount::Exact(n) => n.min(banked),
            Amount::All => banked,
        };
        if moving == 0 {
            debug!(%item, %amount, banked, "nothing to withdraw");
            return Ok(0);
        }

        info!(%item, %amount, ?mode, "withdraw");
        self.ctx.controls().bank(BankOp::Withdraw { item, amount, mode })?;
        // A short withdrawal still lowers the banked stock.
        let tick = self
            .ctx
            .wait()
            .until("withdrawal", |s| {
                let ledger = InventoryLedger::new(s);
                ledger.carried(item) >= carried + moving || ledger.banked(item) < banked
            })
            .await?;

        let moved = InventoryLedger::new(&self.ctx.snapshot())
            .carried(item)
            .saturating_sub(carried);
        if moved < moving {
            warn!(%item, requested = moving, moved, "withdrawal fell short");
        }
        self.ctx.events().publish(Event::Acquisition(AcquisitionEvent::Withdrawn {
            item,
            amount: Amount::Exact(moved),
            tick,
        }));
        Ok(moved)
    }

    /// Deposits every carried item and waits for the inventory to empty.
    pub async fn deposit_inventory(&mut self) -> Result<()> {
        self.ensure_open()?;
        if self.ctx.snapshot().carried.is_empty() {
            debug!("inventory already empty");
            return Ok(());
        }

        info!("deposit inventory");
        self.ctx.controls().bank(BankOp::DepositInventory)?;
        let tick = self
            .ctx
            .wait()
            .until("inventory deposit", |s| s.carried.is_empty())
            .await?;

        self.ctx
            .events()
            .publish(Event::Acquisition(AcquisitionEvent::Deposited { tick }));
        Ok(())
    }

    /// Closes the interface. A no-op on a handle that is not open.
    pub async fn close(mut self) -> Result<()> {
        if !self.ctx.snapshot().is_open(Interfaces::BANK) {
            self.transition(SessionState::Closed);
            return Ok(());
        }

        self.ctx.controls().bank(BankOp::Close)?;
        self.ctx
            .wait()
            .until("bank close", |s| !s.is_open(Interfaces::BANK))
            .await?;
        self.transition(SessionState::Closed);
        Ok(())
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(ScriptError::PreconditionViolation(
                Precondition::SessionNotOpen {
                    session: SessionKind::Bank,
                },
            ))
        }
    }

    fn transition(&mut self, next: SessionState) {
        let tick = self.ctx.snapshot().tick;
        self.lifecycle.transition(next, self.ctx.events(), tick);
    }
}

/// Walks to the closest configured bank unless the actor already stands in one.
async fn walk_to_nearest_bank(ctx: &ScriptContext) -> Result<()> {
    let destination = nearest_bank(&ctx.snapshot(), &ctx.config().bank.locations).cloned();
    if let Some(area) = destination {
        info!(%area, "walking to bank");
        ctx.navigator().walk_to(&area).await?;
    }
    Ok(())
}

fn nearest_bank<'a>(snapshot: &WorldSnapshot, locations: &'a [Area]) -> Option<&'a Area> {
    let here: Position = snapshot.actor.position;
    if locations.iter().any(|area| area.contains(here)) {
        return None;
    }
    locations
        .iter()
        .min_by_key(|area| here.chebyshev(area.anchor()).unwrap_or(u32::MAX))
}
