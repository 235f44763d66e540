//! Data handed to the host renderer.
//!
//! The engine never paints. A [`RenderPlan`] lists every placed item with its
//! pixel rectangle plus the shadow preview of the active gesture, if any.

use dgrid_core::geometry::{PixelRect, Rect};
use serde::Serialize;

use crate::coords::CoordinateMapper;
use crate::item::ItemId;
use crate::model::GridModel;
use crate::preview::ShadowPreview;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedItem {
    pub id: ItemId,
    pub cell_rect: Rect,
    pub pixel_rect: PixelRect,
    /// The item is being dragged or resized.
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedPreview {
    pub preview: ShadowPreview,
    pub pixel_rect: PixelRect,
    /// `"W × H"` caption.
    pub label: String,
}

/// Snapshot of everything the renderer draws for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderPlan {
    pub items: Vec<RenderedItem>,
    pub preview: Option<RenderedPreview>,
}

impl RenderPlan {
    #[must_use]
    pub fn build(
        model: &GridModel,
        mapper: &CoordinateMapper,
        preview: Option<&ShadowPreview>,
    ) -> Self {
        let active = preview.map(|preview| &preview.item_id);
        let items = model
            .items()
            .iter()
            .map(|item| RenderedItem {
                id: item.id.clone(),
                cell_rect: item.rect(),
                pixel_rect: mapper.cell_rect_to_pixels(item.rect()),
                is_active: active == Some(&item.id),
            })
            .collect();
        let preview = preview.map(|preview| RenderedPreview {
            pixel_rect: mapper.cell_rect_to_pixels(preview.rect),
            label: preview.size_label(),
            preview: preview.clone(),
        });
        Self { items, preview }
    }

    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&RenderedItem> {
        self.items.iter().find(|item| &item.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridDimensions;
    use crate::item::GridItemSpec;

    fn setup() -> (GridModel, CoordinateMapper) {
        let dims = GridDimensions::new(12, 8);
        let model = GridModel::from_specs(
            dims,
            &[
                GridItemSpec::new("a").at(0, 0).size(6, 3),
                GridItemSpec::new("b").at(6, 0).size(6, 3),
            ],
        )
        .expect("valid layout");
        let mapper = CoordinateMapper::new(PixelRect::new(0.0, 0.0, 704.0, 392.0), dims, 8.0, 8.0);
        (model, mapper)
    }

    #[test]
    fn idle_plan_has_items_only() {
        let (model, mapper) = setup();
        let plan = RenderPlan::build(&model, &mapper, None);
        assert!(plan.preview.is_none());
        let b = plan.item(&ItemId::from("b")).expect("b rendered");
        assert_eq!(b.pixel_rect, PixelRect::new(8.0 + 6.0 * 58.0, 8.0, 340.0, 136.0));
        assert!(!b.is_active);
    }

    #[test]
    fn preview_is_mapped_and_labelled() {
        let (model, mapper) = setup();
        let preview = ShadowPreview {
            item_id: ItemId::from("a"),
            rect: Rect::new(0, 3, 4, 2),
            is_valid: true,
            mode: None,
            swap: None,
        };
        let plan = RenderPlan::build(&model, &mapper, Some(&preview));
        let rendered = plan.preview.as_ref().expect("preview");
        assert_eq!(rendered.label, "4 × 2");
        assert_eq!(rendered.pixel_rect, PixelRect::new(8.0, 8.0 + 3.0 * 48.0, 224.0, 88.0));
        assert!(plan.item(&ItemId::from("a")).is_some_and(|item| item.is_active));
        assert!(plan.item(&ItemId::from("b")).is_some_and(|item| !item.is_active));
    }
}
