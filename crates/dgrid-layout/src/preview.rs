//! Shadow preview: the transient candidate placement of an active gesture.

use dgrid_core::geometry::{CellPos, Rect};
use serde::{Deserialize, Serialize};

use crate::item::ItemId;
use crate::resize::ResizeMode;

/// Swap proposal attached to a move preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapInfo {
    /// The item that would trade places with the dragged item.
    pub target_id: ItemId,
    /// The target's top-left before the gesture.
    pub target_origin: CellPos,
}

/// Candidate placement recomputed on every pointer move.
///
/// Never stored in the model; dropped when the gesture ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShadowPreview {
    pub item_id: ItemId,
    pub rect: Rect,
    pub is_valid: bool,
    /// Resolved mode, for resize previews.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<ResizeMode>,
    /// Swap proposal, for move previews over another item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swap: Option<SwapInfo>,
}

impl ShadowPreview {
    /// `"W × H"` caption shown inside the preview outline.
    #[must_use]
    pub fn size_label(&self) -> String {
        format!("{} × {}", self.rect.width, self.rect.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preview() -> ShadowPreview {
        ShadowPreview {
            item_id: ItemId::from("a"),
            rect: Rect::new(6, 0, 6, 3),
            is_valid: true,
            mode: None,
            swap: Some(SwapInfo {
                target_id: ItemId::from("b"),
                target_origin: CellPos::new(6, 0),
            }),
        }
    }

    #[test]
    fn size_label_uses_cell_units() {
        assert_eq!(preview().size_label(), "6 × 3");
    }

    #[test]
    fn json_omits_absent_options() {
        let value = serde_json::to_value(preview()).expect("serialize");
        assert!(value.get("mode").is_none());
        assert_eq!(value["swap"]["target_id"], "b");
        let back: ShadowPreview = serde_json::from_value(value).expect("deserialize");
        assert_eq!(back, preview());
    }
}
