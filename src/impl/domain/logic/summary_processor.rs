use crate::entities::{Category, CategoryGroup, ShoppingItem};

/// Groups shopping items by category, largest subtotal first.
pub(crate) struct SummaryProcessor<'a> {
    items: &'a [ShoppingItem],
}

impl<'a> SummaryProcessor<'a> {
    pub(crate) fn new(items: &'a [ShoppingItem]) -> Self {
        Self { items }
    }

    pub(crate) fn process(self) -> Vec<CategoryGroup> {
        let mut groups: Vec<(Category, Vec<ShoppingItem>)> = Vec::new();
        for item in self.items {
            match groups.iter_mut().find(|(c, _)| *c == item.category) {
                Some((_, members)) => members.push(item.clone()),
                None => groups.push((item.category, vec![item.clone()])),
            }
        }

        let mut groups: Vec<CategoryGroup> = groups
            .into_iter()
            .map(|(category, items)| CategoryGroup {
                category,
                subtotal: items.iter().map(ShoppingItem::subtotal).sum(),
                share_of_max: 0.0,
                items,
            })
            .collect();
        // Stable: ties keep first-seen order.
        groups.sort_by(|a, b| b.subtotal.total_cmp(&a.subtotal));

        let max = groups.first().map_or(0.0, |g| g.subtotal);
        for group in groups.iter_mut() {
            group.share_of_max = if max > 0.0 {
                group.subtotal / max * 100.0
            } else {
                0.0
            };
        }
        groups
    }
}
