use super::ItemId;

/// An item together with a requested or held count.
///
/// A count of zero is equivalent to absence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemQuantity {
    pub item: ItemId,
    pub quantity: u64,
}

impl ItemQuantity {
    pub const fn new(item: ItemId, quantity: u64) -> Self {
        Self { item, quantity }
    }

    pub const fn is_empty(&self) -> bool {
        self.quantity == 0
    }
}

/// Withdrawal amount; `All` is the "everything available" sentinel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Amount {
    Exact(u64),
    All,
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Amount::Exact(n) => write!(f, "{n}"),
            Amount::All => f.write_str("all"),
        }
    }
}
