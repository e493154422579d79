use leptos::{html, prelude::*};

use crate::content::{Stat, SITE};

use super::{
    animate::{Reveal, TextReveal},
    hooks::use_counter,
};

#[component]
pub fn About() -> impl IntoView {
    let profile = &SITE.profile;

    view! {
        <section id="about" class="py-24">
            <div class="mx-auto grid max-w-6xl gap-12 px-6 md:grid-cols-2">
                <div>
                    <Reveal>
                        <h2 class="mb-2 text-sm font-semibold uppercase tracking-widest text-cyan">
                            "About me"
                        </h2>
                    </Reveal>
                    <h3 class="mb-6 text-3xl font-bold md:text-4xl">
                        <TextReveal text=profile.about_heading.clone() />
                    </h3>
                    {profile
                        .about
                        .iter()
                        .map(|paragraph| {
                            view! {
                                <Reveal class="mb-4">
                                    <p class="text-lg leading-relaxed text-muted">{paragraph.clone()}</p>
                                </Reveal>
                            }
                        })
                        .collect_view()}
                </div>
                <div class="grid grid-cols-2 gap-6 self-center">
                    {profile
                        .stats
                        .iter()
                        .map(|stat| view! { <StatCounter stat=stat /> })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}

#[component]
fn StatCounter(stat: &'static Stat) -> impl IntoView {
    let node = NodeRef::<html::Div>::new();
    let text = use_counter(node, &stat.label, stat.value, stat.suffix.clone());

    view! {
        <div
            node_ref=node
            class="rounded-2xl border border-muted/20 bg-brightBlack/20 p-6 text-center backdrop-blur"
        >
            <div class="text-4xl font-bold tabular-nums text-gradient">{move || text.get()}</div>
            <div class="mt-2 text-sm text-muted">{stat.label.clone()}</div>
        </div>
    }
}
