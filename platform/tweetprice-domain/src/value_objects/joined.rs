use crate::value_objects::post::Post;
use crate::value_objects::resolved::{PriceChanges, ResolvedPrices};

/// A post together with the prices resolved for it. Holding both in one value
/// keeps every post paired with its own prices through sorting and cleanup.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedRow {
    pub post: Post,
    pub prices: ResolvedPrices,
    pub changes: Option<PriceChanges>,
}

impl JoinedRow {
    pub fn is_complete(&self) -> bool {
        self.prices.is_complete() && self.changes.map_or(true, |c| c.is_complete())
    }

    pub fn price_values(&self) -> Vec<Option<f64>> {
        let mut values = self.prices.values().to_vec();
        if let Some(changes) = &self.changes {
            values.extend(changes.values());
        }
        values
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct JoinedTable {
    pub post_headers: Vec<String>,
    pub price_headers: Vec<String>,
    pub rows: Vec<JoinedRow>,
}

impl JoinedTable {
    pub fn headers(&self) -> Vec<String> {
        self.post_headers
            .iter()
            .chain(self.price_headers.iter())
            .cloned()
            .collect()
    }

    /// Rows rendered as strings in header order; missing prices render empty.
    pub fn records(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                row.post
                    .cells()
                    .into_iter()
                    .map(str::to_string)
                    .chain(
                        row.price_values()
                            .into_iter()
                            .map(|v| v.map(|p| p.to_string()).unwrap_or_default()),
                    )
                    .collect()
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
