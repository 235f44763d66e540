#![no_main]

use arbitrary::Arbitrary;
use dgrid_core::event::{Modifiers, PointerButton};
use dgrid_core::geometry::{PixelPoint, PixelRect, Rect};
use dgrid_layout::{
    CancelReason, GestureEffect, GridConfig, GridInputEvent, GridItemSpec, GridLayoutManager,
    PointerPress,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct SpecInput {
    x: Option<u8>,
    y: Option<u8>,
    width: Option<u8>,
    height: Option<u8>,
    min: Option<(u8, u8)>,
    max: Option<(u8, u8)>,
}

#[derive(Debug, Arbitrary)]
enum Step {
    Body { item: u8, x: i16, y: i16 },
    Handle { item: u8, gx: u8, gy: u8, modifiers: u8, secondary: bool },
    Move { x: i16, y: i16 },
    Up { x: i16, y: i16 },
    Cancel,
    Remove { item: u8 },
}

#[derive(Debug, Arbitrary)]
struct Input {
    columns: u8,
    rows: u8,
    specs: Vec<SpecInput>,
    steps: Vec<Step>,
}

fuzz_target!(|input: Input| {
    let columns = u16::from(input.columns % 24) + 1;
    let rows = u16::from(input.rows % 16) + 1;
    let config = GridConfig::with_size(columns, rows);
    let container = PixelRect::new(0.0, 0.0, 704.0, 392.0);

    let specs: Vec<GridItemSpec> = input
        .specs
        .iter()
        .take(16)
        .enumerate()
        .map(|(i, raw)| {
            let mut spec = GridItemSpec::new(format!("p{i}"));
            spec.x = raw.x.map(u16::from);
            spec.y = raw.y.map(u16::from);
            spec.width = raw.width.map(u16::from);
            spec.height = raw.height.map(u16::from);
            if let Some((w, h)) = raw.min {
                spec = spec.min_size(u16::from(w), u16::from(h));
            }
            if let Some((w, h)) = raw.max {
                spec = spec.max_size(u16::from(w), u16::from(h));
            }
            spec
        })
        .collect();

    let Ok(mut manager) = GridLayoutManager::new(config, container, &specs) else {
        return;
    };
    // A packed grid may already hold a fallback overlap; only clean layouts
    // are held to the invariants.
    let clean = manager.model().validate().is_ok();

    for step in input.steps.iter().take(256) {
        let items = manager.model().items();
        let pick = |index: u8| items.get(usize::from(index) % items.len().max(1)).cloned();
        let event = match *step {
            Step::Body { item, x, y } => {
                let Some(item) = pick(item) else { continue };
                GridInputEvent::PointerDown(PointerPress::body(
                    item.id,
                    PixelPoint::new(f64::from(x), f64::from(y)),
                ))
            }
            Step::Handle {
                item,
                gx,
                gy,
                modifiers,
                secondary,
            } => {
                let Some(item) = pick(item) else { continue };
                let rect = item.rect();
                let corner = Rect::new(rect.right().saturating_sub(1), rect.bottom().saturating_sub(1), 1, 1);
                let handle = manager.mapper().cell_rect_to_pixels(corner);
                let grab = PixelPoint::new(
                    handle.left + handle.width * f64::from(gx) / 255.0,
                    handle.top + handle.height * f64::from(gy) / 255.0,
                );
                let mut press = PointerPress::handle(item.id, handle, grab)
                    .with_modifiers(Modifiers::from_bits_truncate(modifiers));
                if secondary {
                    press = press.with_button(PointerButton::Secondary);
                }
                GridInputEvent::PointerDown(press)
            }
            Step::Move { x, y } => GridInputEvent::PointerMove {
                position: PixelPoint::new(f64::from(x), f64::from(y)),
            },
            Step::Up { x, y } => GridInputEvent::PointerUp {
                position: PixelPoint::new(f64::from(x), f64::from(y)),
            },
            Step::Cancel => GridInputEvent::Cancel {
                reason: CancelReason::Programmatic,
            },
            Step::Remove { item } => {
                if let Some(item) = pick(item) {
                    manager.remove(&item.id);
                }
                continue;
            }
        };

        let before = manager.model().clone();
        let transition = manager.handle_event(&event);
        if !matches!(transition.effect, GestureEffect::Committed(_)) {
            assert_eq!(*manager.model(), before, "model changed without a commit");
        }
        if clean {
            if let Err(err) = manager.model().validate() {
                panic!("invariant broken after {transition:?}: {err}");
            }
        }
    }
});
