use codee::string::JsonSerdeWasmCodec;
use leptos::prelude::*;
use leptos_use::storage::use_local_storage;
use serde::{Deserialize, Serialize};
use web_sys::{ScrollBehavior, ScrollToOptions};

use crate::{
    content::SITE,
    motion::{counter::format_count, CounterAnimator, ScrollThreshold, Variants},
};

use super::{
    frame::use_frame,
    hooks::{use_document_progress, use_mount_sequence, use_spring},
};

#[component]
pub fn Navbar() -> impl IntoView {
    let motion = &SITE.motion;
    let profile = &SITE.profile;
    let links = &profile.nav;
    let frame = use_frame();
    let navbar_offset = motion.navbar_offset;
    let scrolled = Memo::new(move |_| ScrollThreshold::new(navbar_offset).is_past(&frame.get()));
    let menu_open = RwSignal::new(false);

    // logo first, then each link
    let entrance = use_mount_sequence(links.len() + 1, motion.nav_stagger);
    let drop_in = Variants::fade_up(-motion.reveal_distance);
    let initials = profile
        .name
        .split_whitespace()
        .filter_map(|w| w.chars().next())
        .collect::<String>();

    view! {
        <header class=move || {
            if scrolled.get() {
                "fixed inset-x-0 top-0 z-50 bg-background/80 py-3 shadow-lg backdrop-blur-md transition-all duration-300"
            } else {
                "fixed inset-x-0 top-0 z-50 bg-transparent py-6 transition-all duration-300"
            }
        }>
            <nav class="mx-auto flex max-w-6xl items-center justify-between px-6">
                <a
                    href="#home"
                    class="text-2xl font-bold text-gradient"
                    style=move || drop_in.reveal_at(entrance.get(0)).to_css()
                >
                    {initials}
                </a>
                <ul class="hidden items-center gap-8 md:flex">
                    {links
                        .iter()
                        .enumerate()
                        .map(|(i, link)| {
                            view! {
                                <li style=move || drop_in.reveal_at(entrance.get(i + 1)).to_css()>
                                    <a
                                        href=link.href.clone()
                                        class="text-sm font-medium text-muted transition-colors hover:text-foreground"
                                    >
                                        {link.name.clone()}
                                    </a>
                                </li>
                            }
                        })
                        .collect_view()}
                    <li>
                        <ThemeToggle />
                    </li>
                </ul>
                <button
                    class="text-2xl md:hidden"
                    aria-label="Toggle menu"
                    on:click=move |_| menu_open.update(|open| *open = !*open)
                >
                    {move || if menu_open.get() { "✕" } else { "☰" }}
                </button>
            </nav>
            <Show when=move || menu_open.get()>
                <ul class="flex flex-col gap-4 bg-background/95 px-6 py-6 backdrop-blur-md md:hidden">
                    {links
                        .iter()
                        .map(|link| {
                            view! {
                                <li>
                                    <a
                                        href=link.href.clone()
                                        class="text-lg font-medium"
                                        on:click=move |_| menu_open.set(false)
                                    >
                                        {link.name.clone()}
                                    </a>
                                </li>
                            }
                        })
                        .collect_view()}
                    <li>
                        <ThemeToggle />
                    </li>
                </ul>
            </Show>
        </header>
    }
}

/// Thin bar across the top of the page showing how far it has been read.
#[component]
pub fn ScrollProgressBar() -> impl IntoView {
    let progress = use_document_progress();
    let smoothed = use_spring(progress, SITE.motion.smooth);

    view! {
        <div
            class="fixed inset-x-0 top-0 z-[60] h-1 origin-left bg-gradient-to-r from-cyan to-purple"
            style=move || format!("transform: scaleX({:.4});", smoothed.get().clamp(0.0, 1.0))
        ></div>
    }
}

#[component]
pub fn ScrollToTop() -> impl IntoView {
    let frame = use_frame();
    let offset = SITE.motion.scroll_to_top_offset;
    let visible = Memo::new(move |_| ScrollThreshold::new(offset).is_past(&frame.get()));

    let scroll_up = move |_| {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        window().scroll_to_with_scroll_to_options(&options);
    };

    view! {
        <button
            aria-label="Scroll to top"
            class=move || {
                format!(
                    "fixed bottom-8 right-8 z-50 flex h-12 w-12 items-center justify-center rounded-full bg-cyan/20 text-cyan shadow-lg backdrop-blur transition-all duration-300 hover:bg-cyan/30 {}",
                    if visible.get() {
                        "translate-y-0 opacity-100"
                    } else {
                        "pointer-events-none translate-y-4 opacity-0"
                    },
                )
            }
            on:click=scroll_up
        >
            "↑"
        </button>
    }
}

/// Full-screen overlay counting to 100% while the page settles.
#[component]
pub fn PageLoader() -> impl IntoView {
    let motion = &SITE.motion;
    let frame = use_frame();
    let percent = RwSignal::new(0.0);
    let done = RwSignal::new(false);
    let counter = StoredValue::new(CounterAnimator::with_tick(
        100.0,
        motion.loader_duration_ms,
        motion.counter_tick_ms,
    ));

    Effect::new(move |_| {
        let sample = frame.get();
        // nothing measured yet
        if sample.viewport_height <= 0.0 {
            return;
        }
        let update = counter.try_update_value(|c| {
            c.trigger(sample.timestamp_ms);
            (c.advance(sample.delta_ms), c.is_complete())
        });
        if let Some((value, complete)) = update {
            if let Some(v) = value {
                percent.set(v);
            }
            if complete && !done.get_untracked() {
                log::debug!("page loader finished");
                done.set(true);
            }
        }
    });

    on_cleanup(move || {
        counter.try_update_value(|c| c.teardown());
    });

    view! {
        <div
            aria-hidden="true"
            class=move || {
                format!(
                    "fixed inset-0 z-[100] flex flex-col items-center justify-center bg-background transition-opacity duration-500 {}",
                    if done.get() { "pointer-events-none opacity-0" } else { "opacity-100" },
                )
            }
        >
            <div class="text-5xl font-bold tabular-nums text-gradient">
                {move || format_count(percent.get(), 100.0, "%")}
            </div>
            <div class="mt-6 h-1 w-48 overflow-hidden rounded bg-brightBlack/40">
                <div
                    class="h-full origin-left bg-cyan"
                    style=move || format!("transform: scaleX({:.3});", percent.get() / 100.0)
                ></div>
            </div>
        </div>
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

#[component]
pub fn ThemeToggle() -> impl IntoView {
    let (theme, set_theme, _) = use_local_storage::<Theme, JsonSerdeWasmCodec>("theme");

    Effect::new(move |_| {
        let theme = theme.get();
        let Some(root) = document().document_element() else {
            return;
        };
        if let Err(e) = root.set_attribute("data-theme", theme.as_str()) {
            log::warn!("couldn't apply theme: {e:?}");
        }
    });

    view! {
        <button
            aria-label="Toggle theme"
            class="flex h-9 w-9 items-center justify-center rounded-full border border-muted/40 transition-colors hover:border-cyan"
            on:click=move |_| set_theme.update(|t| *t = t.toggled())
        >
            {move || match theme.get() {
                Theme::Dark => "☀",
                Theme::Light => "☾",
            }}
        </button>
    }
}
