use leptos::prelude::*;

use crate::{content::SITE, motion::Variants};

use super::{
    animate::{Parallax, TextReveal},
    hooks::use_mount_sequence,
};

#[component]
pub fn Hero() -> impl IntoView {
    let motion = &SITE.motion;
    let profile = &SITE.profile;
    let lead = profile
        .name
        .strip_suffix(profile.highlight.as_str())
        .unwrap_or(profile.name.as_str())
        .trim();

    // badge, role, tagline, actions
    let intro = use_mount_sequence(4, motion.stagger);
    let rise = Variants::fade_up(motion.reveal_distance);

    view! {
        <section id="home" class="relative flex min-h-screen items-center overflow-hidden">
            <Parallax distance=120.0 class="pointer-events-none absolute inset-0 -z-10">
                <div class="absolute left-1/4 top-1/4 h-72 w-72 rounded-full bg-purple/20 blur-3xl"></div>
                <div class="absolute bottom-1/4 right-1/4 h-96 w-96 rounded-full bg-cyan/10 blur-3xl"></div>
            </Parallax>
            <div class="mx-auto w-full max-w-6xl px-6 pt-24">
                <p
                    class="mb-6 inline-flex items-center gap-2 rounded-full border border-green/30 bg-green/10 px-4 py-1 text-sm text-green"
                    style=move || rise.reveal_at(intro.get(0)).to_css()
                >
                    <span class="h-2 w-2 animate-pulse rounded-full bg-green"></span>
                    {profile.availability.clone()}
                </p>
                <h1 class="text-5xl font-bold leading-tight md:text-7xl">
                    <TextReveal text=lead.to_string() />
                    " "
                    <TextReveal text=profile.highlight.clone() by_char=true class="text-gradient" />
                </h1>
                <p
                    class="mt-4 text-2xl font-semibold text-muted md:text-3xl"
                    style=move || rise.reveal_at(intro.get(1)).to_css()
                >
                    {profile.role.clone()}
                </p>
                <p
                    class="mt-6 max-w-2xl text-lg leading-relaxed"
                    style=move || rise.reveal_at(intro.get(2)).to_css()
                >
                    {profile.tagline.clone()}
                </p>
                <div class="mt-10 flex flex-wrap gap-4" style=move || rise.reveal_at(intro.get(3)).to_css()>
                    <a
                        href="#projects"
                        class="rounded-full bg-gradient-to-r from-cyan to-purple px-8 py-3 font-semibold text-background transition-transform hover:scale-105"
                    >
                        "View my work"
                    </a>
                    <a
                        href=profile.resume_url.clone()
                        class="rounded-full border border-muted/40 px-8 py-3 font-semibold transition-colors hover:border-cyan hover:text-cyan"
                    >
                        "Download resume"
                    </a>
                </div>
            </div>
        </section>
    }
}
