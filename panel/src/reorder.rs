//! Drag-and-drop ordering of a listing.
//!
//! A drag snapshots the list; the drop yields the batch to persist, numbered
//! 1-based over the active items in their new visual order. The server's reply
//! is authoritative: confirmed orders replace the local ones verbatim, while a
//! failure restores the snapshot untouched.

use common::requests::ReorderItem;

use crate::crud::{CrudOperations, ReorderReply};
use crate::error::{PanelError, Result};
use crate::fields::EntityKind;
use crate::listing::ListRow;
use crate::logger::logger;
use crate::toast::Toaster;

const COMPONENT: &str = "Reorder";

/// One row as the reorder controller sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListItem {
    pub id: i64,
    pub display_order: i32,
    /// Inactive rows can't be dragged and are left out of the batch.
    pub active: bool,
}

impl From<&ListRow> for ListItem {
    fn from(row: &ListRow) -> Self {
        Self {
            id: row.id,
            display_order: row.display_order.unwrap_or_default(),
            active: row.active,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReorderList {
    kind: EntityKind,
    items: Vec<ListItem>,
    /// Pre-drag state, held until the server settles the drop.
    snapshot: Option<Vec<ListItem>>,
    dragging: Option<i64>,
}

impl ReorderList {
    pub fn new(kind: EntityKind, items: Vec<ListItem>) -> Self {
        Self {
            kind,
            items,
            snapshot: None,
            dragging: None,
        }
    }

    pub fn from_rows(kind: EntityKind, rows: &[ListRow]) -> Self {
        Self::new(kind, rows.iter().map(ListItem::from).collect())
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn ids(&self) -> Vec<i64> {
        self.items.iter().map(|item| item.id).collect()
    }

    pub fn orders(&self) -> Vec<i32> {
        self.items.iter().map(|item| item.display_order).collect()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    /// A drop has been computed and awaits the server.
    pub fn is_pending(&self) -> bool {
        self.snapshot.is_some() && self.dragging.is_none()
    }

    /// Takes a fresh listing. Refused while a drag or a save is unsettled,
    /// since that would drop the snapshot the outcome is applied against.
    pub fn replace_rows(&mut self, rows: &[ListRow]) -> Result<()> {
        if self.snapshot.is_some() {
            return Err(PanelError::InvalidState("order change not settled yet"));
        }
        self.items = rows.iter().map(ListItem::from).collect();
        self.dragging = None;
        Ok(())
    }

    pub fn begin_drag(&mut self, id: i64) -> Result<()> {
        let config = self.kind.config();
        if !config.reorderable {
            return Err(PanelError::NotReorderable(config.type_name));
        }
        if self.is_pending() {
            return Err(PanelError::InvalidState("previous order is still being saved"));
        }
        let item = self
            .items
            .iter()
            .find(|item| item.id == id)
            .ok_or(PanelError::InvalidState("dragged item is not in the list"))?;
        if !item.active {
            return Err(PanelError::InactiveItem(id));
        }

        self.snapshot = Some(self.items.clone());
        self.dragging = Some(id);
        logger().debug(COMPONENT, format!("Dragging {} {}", self.kind, id), None);
        Ok(())
    }

    /// Moves the dragged item to `index` (clamped to the list bounds).
    pub fn drop_at(&mut self, index: usize) -> Result<()> {
        let id = self
            .dragging
            .ok_or(PanelError::InvalidState("no drag in progress"))?;
        let from = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(PanelError::InvalidState("dragged item is not in the list"))?;
        let item = self.items.remove(from);
        let to = index.min(self.items.len());
        self.items.insert(to, item);
        Ok(())
    }

    /// Abandons the drag and puts everything back.
    pub fn cancel_drag(&mut self) {
        if self.dragging.take().is_some() {
            if let Some(snapshot) = self.snapshot.take() {
                self.items = snapshot;
            }
        }
    }

    /// Ends the drag and returns the batch to persist.
    pub fn finish_drop(&mut self) -> Result<Vec<ReorderItem>> {
        if self.dragging.take().is_none() {
            return Err(PanelError::InvalidState("no drag in progress"));
        }
        let batch: Vec<ReorderItem> = self
            .items
            .iter()
            .filter(|item| item.active)
            .zip(1..)
            .map(|(item, display_order)| ReorderItem {
                id: item.id,
                display_order,
            })
            .collect();
        logger().info(
            COMPONENT,
            format!("Computed new {} order for {} items", self.kind, batch.len()),
            None,
        );
        Ok(batch)
    }

    /// Settles a pending drop. Returns whether the new order was kept.
    pub fn complete(&mut self, result: Result<ReorderReply>, toaster: &dyn Toaster) -> bool {
        let Some(snapshot) = self.snapshot.take() else {
            logger().debug(COMPONENT, "No pending reorder to settle", None);
            return false;
        };

        match result {
            Ok(reply) => {
                for confirmed in &reply.items {
                    if let Some(item) = self.items.iter_mut().find(|item| item.id == confirmed.id) {
                        item.display_order = confirmed.display_order;
                    }
                }
                toaster.success(
                    reply
                        .message
                        .as_deref()
                        .unwrap_or("Order updated successfully!"),
                );
                true
            }
            Err(err) => {
                self.items = snapshot;
                logger().error(COMPONENT, "Restored order after failed save", Some(&err));
                toaster.error(&format!("Failed to update order: {}", err.user_message()));
                false
            }
        }
    }

    /// Finishes the drop, posts it through `crud` and settles the result.
    pub async fn persist(&mut self, crud: &CrudOperations, toaster: &dyn Toaster) -> Result<bool> {
        let batch = self.finish_drop()?;
        let result = crud.reorder(&batch).await;
        Ok(self.complete(result, toaster))
    }
}
