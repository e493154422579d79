use chrono::{DateTime, Datelike};
use leptos::{html, prelude::*};

use crate::{content::SITE, motion::Variants};

use super::{
    animate::{Reveal, TextReveal},
    hooks::use_reveal_group,
};

#[component]
pub fn Contact() -> impl IntoView {
    let motion = &SITE.motion;
    let profile = &SITE.profile;
    let node = NodeRef::<html::Div>::new();
    // email first, then each social link
    let reveal = use_reveal_group(node, "contact", profile.socials.len() + 1, motion.stagger);
    let pop = Variants::pop();

    view! {
        <section id="contact" class="py-24">
            <div class="mx-auto max-w-3xl px-6 text-center">
                <Reveal>
                    <h2 class="mb-2 text-sm font-semibold uppercase tracking-widest text-cyan">
                        "Get in touch"
                    </h2>
                </Reveal>
                <h3 class="mb-6 text-3xl font-bold md:text-5xl">
                    <TextReveal text="Let's build something together" />
                </h3>
                <Reveal>
                    <p class="mb-10 text-lg leading-relaxed text-muted">
                        {profile.contact_blurb.clone()}
                    </p>
                </Reveal>
                <div node_ref=node class="flex flex-wrap items-center justify-center gap-4">
                    <a
                        href=format!("mailto:{}", profile.email)
                        class="inline-block rounded-full bg-gradient-to-r from-cyan to-purple px-8 py-3 font-semibold text-background"
                        style=move || pop.reveal_at(reveal.get(0)).to_css()
                    >
                        {profile.email.clone()}
                    </a>
                    {profile
                        .socials
                        .iter()
                        .enumerate()
                        .map(|(i, social)| {
                            view! {
                                <a
                                    href=social.href.clone()
                                    target="_blank"
                                    rel="noopener"
                                    aria-label=social.name.clone()
                                    class="inline-flex items-center gap-2 rounded-full border border-muted/40 px-6 py-3 transition-colors hover:border-cyan hover:text-cyan"
                                    style=move || pop.reveal_at(reveal.get(i + 1)).to_css()
                                >
                                    <i class=social.icon.clone()></i>
                                    {social.name.clone()}
                                </a>
                            }
                        })
                        .collect_view()}
                </div>
                <p class="mt-8 text-sm text-muted">{profile.location.clone()}</p>
            </div>
        </section>
    }
}

/// Year the site was built, from an RFC 3339 timestamp.
fn build_year(build_time: &str) -> Option<i32> {
    DateTime::parse_from_rfc3339(build_time)
        .ok()
        .map(|dt| dt.year())
}

#[component]
pub fn Footer() -> impl IntoView {
    let year = build_year(env!("BUILD_TIME"))
        .map(|y| format!("© {y} "))
        .unwrap_or_default();

    view! {
        <footer class="border-t border-muted/20 py-8 text-center text-sm text-muted">
            {year}
            {SITE.profile.name.clone()}
            ". Built with Rust and Leptos."
        </footer>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_year() {
        assert_eq!(build_year("2025-03-09T14:02:11.123456+00:00"), Some(2025));
        assert_eq!(build_year("1999-12-31T23:59:59-05:00"), Some(1999));
        assert_eq!(build_year("yesterday"), None);
        assert!(build_year(env!("BUILD_TIME")).is_some());
    }
}
