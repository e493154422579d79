use leptos::{html, prelude::*};

use crate::{
    content::{Job, SITE},
    motion::{map_range, Variants},
};

use super::{
    animate::Reveal,
    hooks::{use_element_progress, use_reveal_group, use_spring},
};

/// Opacity of the glowing tip over the course of the timeline.
fn tip_opacity(progress: f64) -> f64 {
    map_range(progress, &[0.0, 0.05, 0.95, 1.0], &[0.0, 1.0, 1.0, 0.0])
}

#[component]
pub fn Experience() -> impl IntoView {
    let motion = &SITE.motion;
    let node = NodeRef::<html::Div>::new();
    let progress = use_element_progress(node, motion.timeline_start, motion.timeline_end);
    let line = use_spring(progress, motion.smooth);

    let line_style = move || format!("transform: scaleY({:.4});", line.get().clamp(0.0, 1.0));
    let tip_style = move || {
        let p = line.get();
        format!(
            "top: {:.2}%; opacity: {:.3};",
            p.clamp(0.0, 1.0) * 100.0,
            tip_opacity(p)
        )
    };

    view! {
        <section id="experience" class="py-24">
            <div class="mx-auto max-w-5xl px-6">
                <Reveal class="mb-16 text-center">
                    <h2 class="text-3xl font-bold md:text-4xl">"Professional journey"</h2>
                </Reveal>
                <div node_ref=node class="relative">
                    <div class="absolute left-4 top-0 h-full w-0.5 -translate-x-1/2 bg-muted/20 md:left-1/2"></div>
                    <div
                        class="absolute left-4 top-0 h-full w-0.5 -translate-x-1/2 origin-top bg-gradient-to-b from-cyan to-purple md:left-1/2"
                        style=line_style
                    ></div>
                    <div
                        class="absolute left-4 h-4 w-4 -translate-x-1/2 -translate-y-1/2 rounded-full bg-cyan shadow-[0_0_16px_4px] shadow-cyan/60 md:left-1/2"
                        style=tip_style
                    ></div>
                    <div class="space-y-16">
                        {SITE
                            .experience
                            .iter()
                            .enumerate()
                            .map(|(index, job)| view! { <TimelineEntry job=job index=index /> })
                            .collect_view()}
                    </div>
                </div>
            </div>
        </section>
    }
}

#[component]
fn TimelineEntry(job: &'static Job, index: usize) -> impl IntoView {
    let motion = &SITE.motion;
    let from_left = index % 2 == 0;
    let node = NodeRef::<html::Div>::new();
    // the card, then each achievement
    let reveal = use_reveal_group(node, &job.company, job.achievements.len() + 1, motion.stagger);
    let card = Variants::card(if from_left { -50.0 } else { 50.0 });
    let item = Variants::slide_in(if from_left { -20.0 } else { 20.0 });

    let hovered = RwSignal::new(false);
    let lift = use_spring(
        Signal::derive(move || if hovered.get() { 1.0 } else { 0.0 }),
        motion.pointer,
    );
    let card_style = move || {
        card.hidden
            .blend(&card.emphasis_at(lift.get()), reveal.get(0))
            .to_css()
    };
    let side = if from_left {
        "md:mr-auto md:pr-12"
    } else {
        "md:ml-auto md:pl-12"
    };

    view! {
        <div node_ref=node class=format!("relative pl-12 md:w-1/2 {side}")>
            <div
                class="rounded-2xl border border-muted/20 bg-brightBlack/20 p-6 shadow-lg"
                style=card_style
                on:mouseenter=move |_| hovered.set(true)
                on:mouseleave=move |_| hovered.set(false)
            >
                <div class=format!("mb-4 h-1 w-16 rounded bg-gradient-to-r {}", job.accent)></div>
                <p class="text-sm font-semibold text-cyan">{job.period.clone()}</p>
                <h3 class="mt-1 text-xl font-bold">{job.role.clone()}</h3>
                <p class="mb-4 text-muted">{job.company.clone()}</p>
                <p class="mb-4 leading-relaxed">{job.description.clone()}</p>
                <ul class="space-y-2 text-sm">
                    {job
                        .achievements
                        .iter()
                        .enumerate()
                        .map(|(i, achievement)| {
                            view! {
                                <li
                                    class="flex gap-2"
                                    style=move || item.reveal_at(reveal.get(i + 1)).to_css()
                                >
                                    <span class="text-green">"▹"</span>
                                    {achievement.clone()}
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </div>
        </div>
    }
}
