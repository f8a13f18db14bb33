use std::cmp::Ordering;

use crate::{
    constants::RECENT_TXS_LIMIT,
    tx::{OutgoingTransaction, TransactionType, TxStatus},
};

/// Column a query result is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderColumn {
    Timestamp,
    HeightBuilt,
    BlockHeight,
}

impl OrderColumn {
    /// Name of the column in the `outgoing_txs` table.
    pub const fn column_name(&self) -> &'static str {
        match self {
            OrderColumn::Timestamp => "timestamp",
            OrderColumn::HeightBuilt => "height_built",
            OrderColumn::BlockHeight => "block_height",
        }
    }

    fn key(&self, tx: &OutgoingTransaction) -> Option<i64> {
        match self {
            OrderColumn::Timestamp => Some(tx.timestamp),
            OrderColumn::HeightBuilt => tx.height_built,
            OrderColumn::BlockHeight => tx.block_height,
        }
    }
}

/// Selection of outgoing transaction records.
///
/// Without an order column records come back by `tx_id`. Ties on the order
/// column are broken by `tx_id` as well, so results are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutgoingTxQuery {
    pub tx_type: Option<TransactionType>,
    pub status: Option<TxStatus>,
    pub order_by: Option<OrderColumn>,
    pub descending: bool,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl OutgoingTxQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every record still waiting for confirmation.
    pub fn pending() -> Self {
        Self::new().with_status(TxStatus::Pending)
    }

    /// The most recently created records.
    pub fn recent(limit: u64) -> Self {
        Self::new()
            .order_by(OrderColumn::Timestamp, true)
            .with_limit(limit)
    }

    /// The wallet's "recent transactions" view.
    pub fn recent_default() -> Self {
        Self::recent(RECENT_TXS_LIMIT)
    }

    pub fn with_type(mut self, tx_type: TransactionType) -> Self {
        self.tx_type = Some(tx_type);
        self
    }

    pub fn with_status(mut self, status: TxStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn order_by(mut self, column: OrderColumn, descending: bool) -> Self {
        self.order_by = Some(column);
        self.descending = descending;
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn matches(&self, tx: &OutgoingTransaction) -> bool {
        self.tx_type.map_or(true, |t| tx.tx_type == t)
            && self.status.map_or(true, |s| tx.status == s)
    }

    /// Order of two records under this query.
    ///
    /// Mirrors SQLite: a missing value sorts before any present one when
    /// ascending, after every one when descending.
    pub fn compare(&self, a: &OutgoingTransaction, b: &OutgoingTransaction) -> Ordering {
        let primary = match self.order_by {
            Some(column) => {
                let ord = column.key(a).cmp(&column.key(b));
                if self.descending {
                    ord.reverse()
                } else {
                    ord
                }
            }
            None => Ordering::Equal,
        };
        primary.then_with(|| a.tx_id.cmp(&b.tx_id))
    }

    /// Order, skip and truncate `txs` in place.
    pub fn apply(&self, txs: &mut Vec<OutgoingTransaction>) {
        txs.retain(|tx| self.matches(tx));
        txs.sort_by(|a, b| self.compare(a, b));

        if let Some(offset) = self.offset {
            let offset = usize::try_from(offset).unwrap_or(usize::MAX).min(txs.len());
            txs.drain(..offset);
        }
        if let Some(limit) = self.limit {
            txs.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }
    }
}
