use leptos::{html, prelude::*};
use leptos_use::use_raf_fn;

use crate::motion::{BoundingBox, FrameSample};

/// One measurement of the window per animation frame, shared by every
/// animated component so they all agree on scroll position and time.
#[derive(Debug, Clone, Copy)]
pub struct FrameHub {
    sample: ReadSignal<FrameSample>,
}

impl FrameHub {
    pub fn sample(&self) -> ReadSignal<FrameSample> {
        self.sample
    }
}

pub fn provide_frame_hub() {
    let (sample, set_sample) = signal(FrameSample::default());
    use_raf_fn(move |args| {
        set_sample.set(measure_window(args.timestamp, args.delta));
    });
    provide_context(FrameHub { sample });
}

pub fn use_frame() -> ReadSignal<FrameSample> {
    expect_context::<FrameHub>().sample()
}

fn measure_window(timestamp_ms: f64, delta_ms: f64) -> FrameSample {
    let win = window();
    let scroll_y = win.scroll_y().unwrap_or(0.0);
    let viewport_height = win
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0);
    let document_height = document()
        .document_element()
        .map(|el| el.scroll_height() as f64)
        .unwrap_or(viewport_height);
    FrameSample {
        timestamp_ms,
        delta_ms,
        scroll_y,
        viewport_height,
        document_height,
    }
}

/// Viewport-relative box of a mounted element. Read fresh on every call.
pub fn element_box(node: NodeRef<html::Div>) -> Option<BoundingBox> {
    let el = node.get_untracked()?;
    let rect = el.get_bounding_client_rect();
    Some(BoundingBox::new(rect.top(), rect.height()))
}

/// Horizontal and vertical position of a pointer inside an element, each in
/// `-0.5..=0.5` with 0 at the center.
pub fn pointer_offset(
    node: NodeRef<html::Div>,
    client_x: f64,
    client_y: f64,
) -> Option<(f64, f64)> {
    let el = node.get_untracked()?;
    let rect = el.get_bounding_client_rect();
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return None;
    }
    let x = (client_x - rect.left()) / rect.width() - 0.5;
    let y = (client_y - rect.top()) / rect.height() - 0.5;
    Some((x.clamp(-0.5, 0.5), y.clamp(-0.5, 0.5)))
}
