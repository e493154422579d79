use leptos::{html, prelude::*};

use crate::{
    content::SITE,
    motion::{map_range, ObserveOptions, Variants, VisualTransform},
};

use super::{
    frame::pointer_offset,
    hooks::{use_element_progress, use_in_view, use_reveal_group, use_spring},
};

/// Fades its children up the first time they are in view.
#[component]
pub fn Reveal(#[prop(into, optional)] class: String, children: Children) -> impl IntoView {
    let motion = &SITE.motion;
    let node = NodeRef::<html::Div>::new();
    let in_view = use_in_view(node, "reveal", ObserveOptions::once(motion.reveal_threshold));
    let target = Signal::derive(move || if in_view.get() { 1.0 } else { 0.0 });
    let progress = use_spring(target, motion.bouncy);
    let variants = Variants::fade_up(motion.reveal_distance);

    view! {
        <div node_ref=node class=class style=move || variants.reveal_at(progress.get()).to_css()>
            {children()}
        </div>
    }
}

/// Text revealed one word (or one character) at a time.
#[component]
pub fn TextReveal(
    #[prop(into)] text: String,
    #[prop(optional)] by_char: bool,
    #[prop(into, optional)] class: String,
) -> impl IntoView {
    let motion = &SITE.motion;
    let node = NodeRef::<html::Div>::new();
    let (pieces, timing) = if by_char {
        (
            text.chars().map(String::from).collect::<Vec<_>>(),
            motion.char_stagger,
        )
    } else {
        (
            text.split_whitespace().map(String::from).collect::<Vec<_>>(),
            motion.word_stagger,
        )
    };
    let reveal = use_reveal_group(node, "text", pieces.len(), timing);
    let variants = Variants::fade_up(motion.reveal_distance);

    view! {
        <div node_ref=node class=format!("inline {class}") aria-label=text>
            {pieces
                .into_iter()
                .enumerate()
                .map(|(i, piece)| {
                    view! {
                        <span
                            aria-hidden="true"
                            class="inline-block whitespace-pre"
                            style=move || variants.reveal_at(reveal.get(i)).to_css()
                        >
                            {piece}
                        </span>
                        {(!by_char).then_some(" ")}
                    }
                })
                .collect_view()}
        </div>
    }
}

/// Card that tilts toward the pointer and lifts while hovered.
#[component]
pub fn TiltCard(#[prop(into, optional)] class: String, children: Children) -> impl IntoView {
    let motion = &SITE.motion;
    let tilt = motion.tilt_degrees;
    let node = NodeRef::<html::Div>::new();
    let pointer_x = RwSignal::new(0.0);
    let pointer_y = RwSignal::new(0.0);
    let hovered = RwSignal::new(false);

    let x = use_spring(pointer_x.into(), motion.pointer);
    let y = use_spring(pointer_y.into(), motion.pointer);
    let lift = use_spring(
        Signal::derive(move || if hovered.get() { 1.0 } else { 0.0 }),
        motion.pointer,
    );
    let variants = Variants::card(0.0);

    let style = move || {
        VisualTransform {
            rotate_x: map_range(y.get(), &[-0.5, 0.5], &[tilt, -tilt]),
            rotate_y: map_range(x.get(), &[-0.5, 0.5], &[-tilt, tilt]),
            ..variants.emphasis_at(lift.get())
        }
        .to_css()
    };
    let glare = move || {
        format!(
            "background: radial-gradient(circle at {:.1}% {:.1}%, rgba(255, 255, 255, 0.12), transparent 60%); opacity: {:.3};",
            (x.get() + 0.5) * 100.0,
            (y.get() + 0.5) * 100.0,
            lift.get().clamp(0.0, 1.0),
        )
    };

    view! {
        <div class="h-full [perspective:1000px]">
            <div
                node_ref=node
                class=format!("relative h-full [transform-style:preserve-3d] {class}")
                style=style
                on:mouseenter=move |_| hovered.set(true)
                on:mousemove=move |ev| {
                    let offset = pointer_offset(node, ev.client_x() as f64, ev.client_y() as f64);
                    if let Some((px, py)) = offset {
                        pointer_x.set(px);
                        pointer_y.set(py);
                    }
                }
                on:mouseleave=move |_| {
                    hovered.set(false);
                    pointer_x.set(0.0);
                    pointer_y.set(0.0);
                }
            >
                {children()}
                <div class="pointer-events-none absolute inset-0 rounded-[inherit]" style=glare></div>
            </div>
        </div>
    }
}

/// Drifts its children vertically while the wrapper crosses the viewport.
#[component]
pub fn Parallax(
    #[prop(default = 60.0)] distance: f64,
    #[prop(into, optional)] class: String,
    children: Children,
) -> impl IntoView {
    let motion = &SITE.motion;
    // measure the static wrapper, move the inner layer
    let node = NodeRef::<html::Div>::new();
    let progress = use_element_progress(node, motion.parallax_start, motion.parallax_end);
    let smoothed = use_spring(progress, motion.smooth);

    let style = move || {
        VisualTransform {
            translate_y: map_range(smoothed.get(), &[0.0, 1.0], &[distance, -distance]),
            ..VisualTransform::IDENTITY
        }
        .to_css()
    };

    view! {
        <div node_ref=node class=class>
            <div class="h-full w-full" style=style>
                {children()}
            </div>
        </div>
    }
}
