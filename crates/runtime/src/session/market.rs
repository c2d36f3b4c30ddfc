use tracing::{debug, info, warn};
use world_core::{Amount, Interfaces, ItemId, Verb};

use super::{BankSession, Lifecycle, SessionState};
use crate::acquisition::InventoryLedger;
use crate::api::{MarketOp, MatchMode, Precondition, Result, ScriptError, SessionKind, WaitError};
use crate::context::ScriptContext;
use crate::events::{AcquisitionEvent, Event};

/// Handle on the marketplace (exchange) interface.
pub struct MarketSession<'c> {
    ctx: &'c ScriptContext,
    lifecycle: Lifecycle,
}

impl<'c> MarketSession<'c> {
    /// Opens the marketplace.
    ///
    /// 1. Walks into the configured marketplace area if the actor is outside it.
    /// 2. Withdraws the bank's whole currency stock if none is carried.
    /// 3. Talks to the clerk with the exchange verb unless already open.
    pub async fn open(ctx: &'c ScriptContext) -> Result<Self> {
        let mut session = Self {
            ctx,
            lifecycle: Lifecycle::new(SessionKind::Marketplace, SessionState::Closed),
        };
        session.transition(SessionState::Opening);

        session.enter_marketplace().await?;

        let currency = ctx.config().marketplace.currency;
        if InventoryLedger::new(&ctx.snapshot()).carried(currency) == 0 {
            info!(%currency, "no currency carried, fetching from bank");
            let mut bank = BankSession::open(ctx).await?;
            bank.withdraw(currency, Amount::All, MatchMode::ById).await?;
            bank.close().await?;
            // The bank trip may have left the marketplace.
            session.enter_marketplace().await?;
        }

        if !ctx.snapshot().is_open(Interfaces::MARKETPLACE) {
            session.request_open()?;
            let budget = ctx.config().waits.market_open_ticks;
            ctx.wait()
                .until_within("marketplace open", budget, |s| {
                    s.is_open(Interfaces::MARKETPLACE)
                })
                .await?;
        }

        session.transition(SessionState::Open);
        Ok(session)
    }

    async fn enter_marketplace(&self) -> Result<()> {
        let area = &self.ctx.config().marketplace.area;
        let position = self.ctx.snapshot().actor.position;
        if !area.contains(position) {
            info!(%area, %position, "walking to marketplace");
            self.ctx.navigator().walk_to(area).await?;
        }
        Ok(())
    }

    fn request_open(&self) -> Result<()> {
        let snapshot = self.ctx.snapshot();
        let clerk_name = &self.ctx.config().marketplace.clerk;
        let clerk = snapshot
            .creatures()
            .with_name(clerk_name)
            .with_verb(Verb::Exchange)
            .nearest()
            .map_err(|_| {
                ScriptError::PreconditionViolation(Precondition::NoMarketClerk {
                    clerk: clerk_name.clone(),
                })
            })?;
        self.ctx.interact_with(clerk, Verb::Exchange)
    }

    pub fn state(&self) -> SessionState {
        self.lifecycle.state
    }

    pub fn is_open(&self) -> bool {
        self.lifecycle.state == SessionState::Open
            && self.ctx.snapshot().is_open(Interfaces::MARKETPLACE)
    }

    /// Buys `quantity` of `item` and waits for the goods to be carried.
    ///
    /// # Errors
    ///
    /// [`ScriptError::InsufficientResources`] when the goods do not arrive within
    /// the configured purchase budget (no stock, not enough currency).
    pub async fn buy(&mut self, item: ItemId, quantity: u64) -> Result<()> {
        if !self.is_open() {
            return Err(ScriptError::PreconditionViolation(
                Precondition::SessionNotOpen {
                    session: SessionKind::Marketplace,
                },
            ));
        }
        if quantity == 0 {
            return Ok(());
        }

        let before = InventoryLedger::new(&self.ctx.snapshot()).carried(item);
        info!(%item, quantity, "buy");
        self.ctx.controls().market(MarketOp::Buy { item, quantity })?;

        let budget = self.ctx.config().waits.purchase_ticks;
        let delivered = self
            .ctx
            .wait()
            .until_within("purchase delivery", budget, |s| {
                InventoryLedger::new(s).carried(item) >= before + quantity
            })
            .await;

        match delivered {
            Ok(tick) => {
                self.ctx
                    .events()
                    .publish(Event::Acquisition(AcquisitionEvent::Purchased {
                        item,
                        quantity,
                        tick,
                    }));
                Ok(())
            }
            Err(WaitError::TimedOut { .. }) => {
                let held = InventoryLedger::new(&self.ctx.snapshot())
                    .carried(item)
                    .saturating_sub(before);
                warn!(%item, quantity, held, "purchase not delivered");
                Err(ScriptError::InsufficientResources {
                    item,
                    requested: quantity,
                    held,
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Closes the interface. A no-op when it is already closed.
    pub async fn close(mut self) -> Result<()> {
        if self.ctx.snapshot().is_open(Interfaces::MARKETPLACE) {
            self.ctx.controls().market(MarketOp::Close)?;
            self.ctx
                .wait()
                .until("marketplace close", |s| !s.is_open(Interfaces::MARKETPLACE))
                .await?;
        } else {
            debug!("marketplace already closed");
        }
        self.transition(SessionState::Closed);
        Ok(())
    }

    fn transition(&mut self, next: SessionState) {
        let tick = self.ctx.snapshot().tick;
        self.lifecycle.transition(next, self.ctx.events(), tick);
    }
}
