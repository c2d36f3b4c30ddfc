use script_runtime::{BankOp, Control, MarketOp};
use world_core::{Area, EntityRef, EquipmentSlot, Verb};

/// A request received by the sandbox, recorded in arrival order.
///
/// Everything except [`Action::Chat`] is applied on the next tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Interact { target: EntityRef, verb: Verb },
    UseOn { item: EntityRef, target: EntityRef },
    CastOn { spell: Control, target: EntityRef },
    Activate(Control),
    Unequip(EquipmentSlot),
    Bank(BankOp),
    Market(MarketOp),
    DismissLevelUp,
    WalkTo(Area),
    Chat(Vec<String>),
    Kill { target: EntityRef, prayers: Vec<Control> },
}

impl Action {
    pub fn is_withdrawal(&self) -> bool {
        matches!(self, Action::Bank(BankOp::Withdraw { .. }))
    }

    pub fn is_purchase(&self) -> bool {
        matches!(self, Action::Market(MarketOp::Buy { .. }))
    }

    pub fn is_deposit(&self) -> bool {
        matches!(self, Action::Bank(BankOp::DepositInventory))
    }
}
